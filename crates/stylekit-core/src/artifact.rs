//! Artifact types: identifiers, files and groups.

use std::fmt;
use std::sync::Arc;

/// A validated artifact identifier.
///
/// Identifiers are non-empty and consist of `[a-z0-9-.]`. A dotted identifier
/// such as `recipes.button-style` names a child of the `recipes` namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArtifactId(String);

impl ArtifactId {
    /// Creates a new artifact identifier.
    ///
    /// # Errors
    ///
    /// Returns error if the identifier is empty or contains invalid characters.
    pub fn new(id: &str) -> Result<Self, ArtifactIdError> {
        if id.is_empty() {
            return Err(ArtifactIdError::Empty);
        }
        if !id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
        {
            return Err(ArtifactIdError::Invalid { id: id.to_string() });
        }
        Ok(Self(id.to_string()))
    }

    /// Creates the identifier of a namespace child (`<namespace>.<name>`).
    ///
    /// # Errors
    ///
    /// Returns error if `name` is not a valid identifier segment.
    pub fn child(&self, name: &str) -> Result<Self, ArtifactIdError> {
        if name.contains('.') {
            return Err(ArtifactIdError::Invalid {
                id: name.to_string(),
            });
        }
        Self::new(&format!("{}.{name}", self.0))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ArtifactId {
    type Err = ArtifactIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Errors from artifact identifier validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArtifactIdError {
    /// The identifier is empty.
    #[error("artifact id must not be empty")]
    Empty,

    /// The identifier contains characters outside `[a-z0-9-.]`.
    #[error("invalid artifact id `{id}`: expected [a-z0-9-.] only")]
    Invalid {
        /// The rejected identifier.
        id: String,
    },
}

/// Producer for lazily generated file contents.
pub type CodeProducer = Arc<dyn Fn() -> String + Send + Sync>;

/// Contents of an artifact file, either ready or produced on demand.
#[derive(Clone)]
pub enum ArtifactCode {
    /// Contents computed up front.
    Ready(String),
    /// Contents computed each time they are resolved.
    Lazy(CodeProducer),
}

impl ArtifactCode {
    /// Creates lazily produced contents.
    pub fn lazy<F>(producer: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Self::Lazy(Arc::new(producer))
    }

    /// Resolves the contents, running the producer if needed.
    #[must_use]
    pub fn resolve(&self) -> String {
        match self {
            Self::Ready(code) => code.clone(),
            Self::Lazy(producer) => producer(),
        }
    }

    /// Returns true if the contents are produced on demand.
    #[must_use]
    pub fn is_lazy(&self) -> bool {
        matches!(self, Self::Lazy(_))
    }
}

impl fmt::Debug for ArtifactCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready(code) => f.debug_tuple("Ready").field(&code.len()).finish(),
            Self::Lazy(_) => f.write_str("Lazy(..)"),
        }
    }
}

impl From<String> for ArtifactCode {
    fn from(code: String) -> Self {
        Self::Ready(code)
    }
}

impl From<&str> for ArtifactCode {
    fn from(code: &str) -> Self {
        Self::Ready(code.to_string())
    }
}

/// A single generated file: relative file name plus contents.
#[derive(Debug, Clone)]
pub struct ArtifactFile {
    /// File name relative to the group directory.
    pub file: String,
    /// Generated contents.
    pub code: ArtifactCode,
}

impl ArtifactFile {
    /// Creates a new artifact file.
    #[must_use]
    pub fn new(file: impl Into<String>, code: impl Into<ArtifactCode>) -> Self {
        Self {
            file: file.into(),
            code: code.into(),
        }
    }
}

/// A group of files emitted together under one directory.
#[derive(Debug, Clone)]
pub struct ArtifactGroup {
    /// Identifier of the group.
    pub id: ArtifactId,
    /// Directory segments relative to the output root (empty for the root).
    pub dir: Vec<String>,
    /// Files in emission order.
    pub files: Vec<ArtifactFile>,
}

impl ArtifactGroup {
    /// Creates a new group.
    #[must_use]
    pub fn new(id: ArtifactId, dir: Vec<String>, files: Vec<ArtifactFile>) -> Self {
        Self { id, dir, files }
    }

    /// Returns the directory prefix, segments joined with `/`.
    #[must_use]
    pub fn dir_prefix(&self) -> String {
        self.dir.join("/")
    }

    /// Returns the output path of every file as `dir + "/" + file`.
    ///
    /// A group without a directory yields `"/" + file`.
    #[must_use]
    pub fn paths(&self) -> Vec<String> {
        let prefix = self.dir_prefix();
        self.files
            .iter()
            .map(|f| format!("{prefix}/{}", f.file))
            .collect()
    }

    /// Returns true if the group has no files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn id(s: &str) -> ArtifactId {
        ArtifactId::new(s).unwrap()
    }

    #[test]
    fn artifact_id_accepts_dotted_names() {
        assert_eq!(id("recipes.button-style").as_str(), "recipes.button-style");
        assert_eq!(id("package.json").as_str(), "package.json");
    }

    #[test]
    fn artifact_id_rejects_invalid() {
        assert_eq!(ArtifactId::new(""), Err(ArtifactIdError::Empty));
        assert!(matches!(
            ArtifactId::new("Recipes"),
            Err(ArtifactIdError::Invalid { .. })
        ));
        assert!(ArtifactId::new("css fn").is_err());
    }

    #[test]
    fn child_id_joins_with_dot() {
        assert_eq!(id("patterns").child("box").unwrap(), id("patterns.box"));
        assert!(id("patterns").child("a.b").is_err());
    }

    #[test]
    fn paths_use_dir_prefix() {
        let group = ArtifactGroup::new(
            id("cx"),
            vec!["css".into()],
            vec![ArtifactFile::new("cx.mjs", ""), ArtifactFile::new("cx.d.ts", "")],
        );
        assert_eq!(group.paths(), vec!["css/cx.mjs", "css/cx.d.ts"]);
    }

    #[test]
    fn paths_without_dir_start_with_slash() {
        let group = ArtifactGroup::new(
            id("helpers"),
            vec![],
            vec![ArtifactFile::new("helpers.mjs", "")],
        );
        assert_eq!(group.paths(), vec!["/helpers.mjs"]);
    }

    #[test]
    fn lazy_code_runs_on_each_resolve() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let code = ArtifactCode::lazy(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            "export {}".to_string()
        });

        assert!(code.is_lazy());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(code.resolve(), "export {}");
        assert_eq!(code.resolve(), "export {}");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
