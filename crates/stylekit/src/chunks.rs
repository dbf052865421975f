//! Per-source-file CSS chunks under `<outdir>/chunks`.

use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::output::{OutputWriter, WriteError};

/// Directory of chunk files relative to the output root.
pub const CHUNKS_DIR: &str = "chunks";

/// Names, writes and lists chunk files.
#[derive(Debug, Clone)]
pub struct ChunkStore {
    cwd: PathBuf,
    writer: OutputWriter,
}

impl ChunkStore {
    /// Creates a store for sources under `cwd` writing through `writer`.
    #[must_use]
    pub fn new(cwd: impl Into<PathBuf>, writer: OutputWriter) -> Self {
        Self {
            cwd: cwd.into(),
            writer,
        }
    }

    /// Returns the chunk path for a source file, relative to the output root.
    ///
    /// Path segments below `cwd` are joined with `__` and the extension is
    /// replaced: `src/App.tsx` becomes `chunks/src__App.css`.
    #[must_use]
    pub fn chunk_path(&self, source: &Path) -> String {
        let relative = source.strip_prefix(&self.cwd).unwrap_or(source);
        let stem = relative.with_extension("");
        let name = stem
            .components()
            .filter_map(|component| match component {
                Component::Normal(segment) => Some(segment.to_string_lossy()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("__");
        format!("{CHUNKS_DIR}/{name}.css")
    }

    /// Writes the chunk for `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if the chunk cannot be written.
    pub async fn write(&self, source: &Path, css: &str) -> Result<PathBuf, WriteError> {
        let relative = self.chunk_path(source);
        debug!("Writing chunk {relative}");
        self.writer.write_file(&relative, css).await
    }

    /// Lists existing chunk files relative to the output root, sorted.
    ///
    /// A missing chunk directory yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the chunk directory exists but cannot be read.
    pub async fn files(&self) -> Result<Vec<String>, WriteError> {
        let dir = self.writer.root().join(CHUNKS_DIR);
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(WriteError::Io { path: dir, source }),
        };

        let mut files = Vec::new();
        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(source) => return Err(WriteError::Io { path: dir, source }),
            };
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.ends_with(".css") {
                files.push(format!("{CHUNKS_DIR}/{name}"));
            }
        }

        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(cwd: &Path, out: &Path) -> ChunkStore {
        ChunkStore::new(cwd, OutputWriter::new(out))
    }

    #[test]
    fn flattens_relative_paths() {
        let store = store(Path::new("/project"), Path::new("/project/styled-system"));
        assert_eq!(
            store.chunk_path(Path::new("/project/src/App.tsx")),
            "chunks/src__App.css"
        );
        assert_eq!(
            store.chunk_path(Path::new("/project/src/components/button.styles.ts")),
            "chunks/src__components__button.styles.css"
        );
        assert_eq!(store.chunk_path(Path::new("main.js")), "chunks/main.css");
    }

    #[tokio::test]
    async fn lists_written_chunks_sorted() {
        let tmp = TempDir::new().unwrap();
        let store = store(tmp.path(), &tmp.path().join("out"));

        assert!(store.files().await.unwrap().is_empty());

        store.write(&tmp.path().join("src/b.tsx"), ".b{}").await.unwrap();
        store.write(&tmp.path().join("src/a.tsx"), ".a{}").await.unwrap();

        assert_eq!(
            store.files().await.unwrap(),
            vec!["chunks/src__a.css", "chunks/src__b.css"]
        );
    }
}
