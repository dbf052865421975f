//! Build context: configuration, generator, parser and output for one project.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use ignore::overrides::OverrideBuilder;
use tracing::{debug, info};

use stylekit_codegen::Generator;
use stylekit_core::{Config, SourceParser};
use stylekit_extract::{Grammar, TsStyleParser};

use crate::chunks::ChunkStore;
use crate::error::{DiscoveryError, PipelineError};
use crate::output::OutputWriter;

/// Builder for a [`BuildContext`].
#[derive(Default)]
pub struct BuildContextBuilder {
    config: Option<Config>,
    cwd: Option<PathBuf>,
    parser: Option<Arc<dyn SourceParser>>,
}

impl BuildContextBuilder {
    /// Creates a builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Overrides the working directory from the configuration.
    #[must_use]
    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Replaces the default TypeScript parser.
    #[must_use]
    pub fn parser(mut self, parser: Arc<dyn SourceParser>) -> Self {
        self.parser = Some(parser);
        self
    }

    /// Builds the context.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the working
    /// directory cannot be resolved, or the output root contains the
    /// working directory.
    pub fn build(self) -> Result<BuildContext, PipelineError> {
        let mut config = self.config.unwrap_or_default();
        let cwd = self.cwd.unwrap_or_else(|| config.cwd.clone());
        let cwd = if cwd.is_absolute() {
            cwd
        } else {
            std::env::current_dir()
                .map_err(DiscoveryError::Cwd)?
                .join(cwd)
        };
        config.cwd = normalize(&cwd);

        // `clean` empties the output root.
        let out_root = normalize(&config.out_root());
        if config.cwd.starts_with(&out_root) {
            return Err(PipelineError::OutdirContainsCwd {
                out_root,
                cwd: config.cwd,
            });
        }

        let generator = Generator::new(config)?;
        let parser = match self.parser {
            Some(parser) => parser,
            None => Arc::new(default_parser(&generator)) as Arc<dyn SourceParser>,
        };

        let writer = OutputWriter::new(&out_root);
        let chunks = ChunkStore::new(&generator.config().cwd, writer.clone());

        info!("Build context ready at {}", generator.config().cwd.display());

        Ok(BuildContext {
            generator: Arc::new(generator),
            parser,
            writer,
            chunks,
        })
    }
}

/// Lexically resolves `.` and `..` components.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Recognizes configured recipes and every pattern the generator knows.
fn default_parser(generator: &Generator) -> TsStyleParser {
    let mut parser = TsStyleParser::new(generator.conditions().clone());
    for name in generator.config().recipes.keys() {
        parser = parser.recipe(name);
    }
    for (name, pattern) in generator.patterns() {
        parser = parser.pattern(name, pattern.jsx.as_deref());
    }
    parser
}

/// Everything a pipeline operation needs for one project.
///
/// Cheap to clone; clones share the generator and parser.
#[derive(Clone)]
pub struct BuildContext {
    generator: Arc<Generator>,
    parser: Arc<dyn SourceParser>,
    writer: OutputWriter,
    chunks: ChunkStore,
}

impl BuildContext {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> BuildContextBuilder {
        BuildContextBuilder::new()
    }

    /// Returns the configuration, with `cwd` made absolute.
    #[must_use]
    pub fn config(&self) -> &Config {
        self.generator.config()
    }

    /// Returns the absolute working directory.
    #[must_use]
    pub fn cwd(&self) -> &Path {
        &self.config().cwd
    }

    /// Returns the output root.
    #[must_use]
    pub fn out_root(&self) -> &Path {
        self.writer.root()
    }

    /// Returns the generator.
    #[must_use]
    pub fn generator(&self) -> &Generator {
        &self.generator
    }

    /// Returns the source parser.
    #[must_use]
    pub fn parser(&self) -> Arc<dyn SourceParser> {
        Arc::clone(&self.parser)
    }

    /// Returns the output writer.
    #[must_use]
    pub fn output(&self) -> &OutputWriter {
        &self.writer
    }

    /// Returns the chunk store.
    #[must_use]
    pub fn chunks(&self) -> &ChunkStore {
        &self.chunks
    }

    /// Discovers tracked source files below `cwd`, sorted.
    ///
    /// Include globs are whitelisted, exclude globs negated, and `.gitignore`
    /// rules apply. Only extensions the extractor handles are returned.
    ///
    /// # Errors
    ///
    /// Returns an error if a glob is invalid or the tree cannot be walked.
    pub fn files(&self) -> Result<Vec<PathBuf>, DiscoveryError> {
        let cwd = self.cwd();
        let config = self.config();

        let mut overrides = OverrideBuilder::new(cwd);
        for pattern in &config.include {
            overrides.add(pattern).map_err(|source| DiscoveryError::Glob {
                pattern: pattern.clone(),
                source,
            })?;
        }
        for pattern in &config.exclude {
            overrides
                .add(&format!("!{pattern}"))
                .map_err(|source| DiscoveryError::Glob {
                    pattern: pattern.clone(),
                    source,
                })?;
        }
        let overrides = overrides.build()?;

        let mut builder = ignore::WalkBuilder::new(cwd);
        builder.hidden(false).git_ignore(true).overrides(overrides);

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let supported = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| Grammar::EXTENSIONS.contains(&ext));
            if supported && !path.starts_with(self.out_root()) {
                files.push(path.to_path_buf());
            }
        }

        files.sort();
        debug!("Discovered {} tracked files", files.len());
        Ok(files)
    }
}

impl std::fmt::Debug for BuildContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildContext")
            .field("cwd", &self.cwd())
            .field("out_root", &self.out_root())
            .finish_non_exhaustive()
    }
}
