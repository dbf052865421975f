//! The source parsing seam used by the extraction pipeline.

use miette::{Diagnostic, NamedSource, SourceSpan};
use std::path::{Path, PathBuf};

use crate::style::StyleResult;

/// Parses a source file into extracted style data.
///
/// Implementations return `Ok(None)` when the file contains no recognized
/// style usage.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use stylekit_core::{ExtractError, SourceParser, StyleResult};
///
/// struct NoStyles;
///
/// impl SourceParser for NoStyles {
///     fn parse_source_file(&self, _path: &Path) -> Result<Option<StyleResult>, ExtractError> {
///         Ok(None)
///     }
/// }
///
/// fn main() -> Result<(), ExtractError> {
///     assert!(NoStyles.parse_source_file(Path::new("src/App.tsx"))?.is_none());
///     Ok(())
/// }
/// ```
pub trait SourceParser: Send + Sync {
    /// Parses the file at `path` (absolute).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or has syntax errors.
    fn parse_source_file(&self, path: &Path) -> Result<Option<StyleResult>, ExtractError>;
}

/// Errors from extracting styles out of one source file.
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum ExtractError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    #[diagnostic(code(stylekit::extract::io))]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The file has syntax errors.
    #[error("syntax error in {path}")]
    #[diagnostic(code(stylekit::extract::parse), help("fix the syntax error or exclude the file"))]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Source text for diagnostic rendering.
        #[source_code]
        src: NamedSource<String>,
        /// Location of the first error node.
        #[label("unexpected syntax here")]
        span: SourceSpan,
    },

    /// The grammar could not be loaded into the parser.
    #[error("failed to load grammar for {path}: {message}")]
    #[diagnostic(code(stylekit::extract::grammar))]
    Grammar {
        /// Path being parsed.
        path: PathBuf,
        /// Loader error message.
        message: String,
    },

    /// The file extension has no parser.
    #[error("unsupported file type: {path}")]
    #[diagnostic(code(stylekit::extract::unsupported))]
    Unsupported {
        /// Path with the unsupported extension.
        path: PathBuf,
    },
}

impl ExtractError {
    /// Creates a parse error pointing at `offset..offset + length` in `source`.
    #[must_use]
    pub fn parse(path: &Path, source: &str, offset: usize, length: usize) -> Self {
        Self::Parse {
            path: path.to_path_buf(),
            src: NamedSource::new(path.display().to_string(), source.to_string()),
            span: SourceSpan::from((offset, length)),
        }
    }

    /// Returns the path of the file that failed.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. }
            | Self::Parse { path, .. }
            | Self::Grammar { path, .. }
            | Self::Unsupported { path } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_carries_span() {
        let err = ExtractError::parse(Path::new("src/app.tsx"), "css({ color: })", 13, 1);
        assert_eq!(err.path(), Path::new("src/app.tsx"));
        assert!(err.to_string().contains("src/app.tsx"));
        match err {
            ExtractError::Parse { span, .. } => {
                assert_eq!(span.offset(), 13);
                assert_eq!(span.len(), 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
