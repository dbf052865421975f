//! Error types for the build pipeline.

use std::path::PathBuf;

use thiserror::Error;

use stylekit_codegen::GeneratorError;
use stylekit_core::ExtractError;

use crate::output::WriteError;

/// Errors discovering tracked source files.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// An include or exclude glob is invalid.
    #[error("invalid glob `{pattern}`: {source}")]
    Glob {
        /// The offending pattern.
        pattern: String,
        /// Underlying error.
        source: ignore::Error,
    },

    /// Walking the source tree failed.
    #[error("failed to walk source tree: {0}")]
    Walk(#[from] ignore::Error),

    /// The working directory could not be determined.
    #[error("failed to resolve working directory: {0}")]
    Cwd(#[from] std::io::Error),
}

/// Errors from pipeline operations.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The generator could not be built.
    #[error(transparent)]
    Generator(#[from] GeneratorError),

    /// The output root is the working directory or one of its ancestors.
    #[error("output directory {} would contain the project at {}", .out_root.display(), .cwd.display())]
    OutdirContainsCwd {
        /// Resolved output root.
        out_root: PathBuf,
        /// Resolved working directory.
        cwd: PathBuf,
    },

    /// Tracked files could not be discovered.
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    /// A source file could not be extracted.
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// Output could not be written.
    #[error(transparent)]
    Write(#[from] WriteError),

    /// A background task panicked or was cancelled.
    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
