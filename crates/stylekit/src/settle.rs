//! Settle-all combinator for concurrent tasks.

use std::future::Future;

use tokio::task::JoinError;

/// Outcome of one task in a settled batch.
#[derive(Debug)]
pub enum Settled<T, E> {
    /// The task completed with a value.
    Fulfilled(T),
    /// The task failed or panicked.
    Rejected(E),
}

impl<T, E> Settled<T, E> {
    /// Returns true for a fulfilled outcome.
    #[must_use]
    pub fn is_fulfilled(&self) -> bool {
        matches!(self, Self::Fulfilled(_))
    }

    /// Converts into a `Result`.
    ///
    /// # Errors
    ///
    /// Returns the rejection reason.
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Self::Fulfilled(value) => Ok(value),
            Self::Rejected(err) => Err(err),
        }
    }
}

impl<T, E> From<Result<T, E>> for Settled<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Fulfilled(value),
            Err(err) => Self::Rejected(err),
        }
    }
}

/// Runs every task concurrently and waits for all of them.
///
/// Returns one outcome per task, in input order. A failing or panicking task
/// never cancels the others.
pub async fn settle_all<I, F, T, E>(tasks: I) -> Vec<Settled<T, E>>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: From<JoinError> + Send + 'static,
{
    let handles: Vec<_> = tasks.into_iter().map(tokio::spawn).collect();

    let mut settled = Vec::with_capacity(handles.len());
    for handle in handles {
        settled.push(match handle.await {
            Ok(result) => Settled::from(result),
            Err(join) => Settled::Rejected(E::from(join)),
        });
    }
    settled
}
