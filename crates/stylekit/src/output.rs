//! Writes generated files under the output root.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use stylekit_core::ArtifactGroup;

/// Errors writing generated output.
#[derive(Debug, Error)]
pub enum WriteError {
    /// A file or directory could not be written.
    #[error("failed to write {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
}

impl WriteError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Writes artifact groups and single files below a root directory.
#[derive(Debug, Clone)]
pub struct OutputWriter {
    root: PathBuf,
}

impl OutputWriter {
    /// Creates a writer rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the output root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes every file of a group under its directory.
    ///
    /// Lazy contents are produced here. Returns the number of files written.
    ///
    /// # Errors
    ///
    /// Returns the first IO failure; files before it stay written.
    pub async fn write(&self, group: &ArtifactGroup) -> Result<usize, WriteError> {
        let dir = group
            .dir
            .iter()
            .fold(self.root.clone(), |dir, segment| dir.join(segment));

        for file in &group.files {
            write_to(&dir.join(&file.file), &file.code.resolve()).await?;
        }

        debug!("Wrote {} ({} files)", group.id, group.files.len());
        Ok(group.files.len())
    }

    /// Writes one file at `relative` below the root and returns its path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or its parent directory cannot be written.
    pub async fn write_file(&self, relative: &str, contents: &str) -> Result<PathBuf, WriteError> {
        let path = self.root.join(relative);
        write_to(&path, contents).await?;
        Ok(path)
    }

    /// Removes everything below the root, leaving an empty directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be removed or recreated.
    pub async fn empty(&self) -> Result<(), WriteError> {
        match tokio::fs::remove_dir_all(&self.root).await {
            Ok(()) => debug!("Emptied {}", self.root.display()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => return Err(WriteError::io(&self.root, err)),
        }
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| WriteError::io(&self.root, e))
    }
}

/// Writes `contents` to `path`, creating missing parent directories.
///
/// # Errors
///
/// Returns an error if the file or its parent directory cannot be written.
pub async fn write_to(path: &Path, contents: &str) -> Result<(), WriteError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| WriteError::io(parent, e))?;
    }
    tokio::fs::write(path, contents)
        .await
        .map_err(|e| WriteError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use stylekit_core::{ArtifactCode, ArtifactFile, ArtifactId};
    use tempfile::TempDir;

    fn group(dir: &[&str], files: &[(&str, &str)]) -> ArtifactGroup {
        ArtifactGroup::new(
            ArtifactId::new("test").unwrap(),
            dir.iter().map(ToString::to_string).collect(),
            files
                .iter()
                .map(|(file, code)| ArtifactFile::new(*file, *code))
                .collect(),
        )
    }

    #[tokio::test]
    async fn writes_group_under_nested_dir() {
        let tmp = TempDir::new().unwrap();
        let writer = OutputWriter::new(tmp.path());

        let written = writer
            .write(&group(&["tokens", "nested"], &[("index.mjs", "export {}")]))
            .await
            .unwrap();

        assert_eq!(written, 1);
        let path = tmp.path().join("tokens/nested/index.mjs");
        assert_eq!(std::fs::read_to_string(path).unwrap(), "export {}");
    }

    #[tokio::test]
    async fn resolves_lazy_code() {
        let tmp = TempDir::new().unwrap();
        let writer = OutputWriter::new(tmp.path());
        let group = ArtifactGroup::new(
            ArtifactId::new("lazy").unwrap(),
            Vec::new(),
            vec![ArtifactFile::new("a.js", ArtifactCode::lazy(|| "late".to_string()))],
        );

        writer.write(&group).await.unwrap();
        assert_eq!(std::fs::read_to_string(tmp.path().join("a.js")).unwrap(), "late");
    }

    #[tokio::test]
    async fn empty_clears_previous_output() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("out");
        let writer = OutputWriter::new(&root);
        writer.write_file("chunks/a.css", ".a{}").await.unwrap();

        writer.empty().await.unwrap();

        assert!(root.is_dir());
        assert_eq!(std::fs::read_dir(&root).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn empty_creates_missing_root() {
        let tmp = TempDir::new().unwrap();
        let writer = OutputWriter::new(tmp.path().join("missing"));
        writer.empty().await.unwrap();
        assert!(writer.root().is_dir());
    }
}
