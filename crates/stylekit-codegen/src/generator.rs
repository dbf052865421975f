//! The generator: configuration in, catalog and CSS out.

use indexmap::IndexMap;
use tracing::info;

use stylekit_core::{
    ArtifactGroup, ArtifactId, ArtifactIdError, Catalog, CatalogError, Conditions, Config,
    ConfigError, PatternConfig,
};

use crate::artifacts::build_catalog;
use crate::context::RenderContext;
use crate::presets::base_patterns;
use crate::tokens::TokenDictionary;

/// Errors building a [`Generator`].
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// The configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An artifact identifier could not be formed.
    #[error(transparent)]
    ArtifactId(#[from] ArtifactIdError),

    /// The catalog has conflicting identifiers.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Produces artifacts and CSS for one configuration.
///
/// The catalog is built once in [`Generator::new`] and never changes.
///
/// # Example
///
/// ```no_run
/// use stylekit_codegen::Generator;
/// use stylekit_core::{ArtifactId, Config};
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let generator = Generator::new(Config::default())?;
///     let ids = [ArtifactId::new("css-fn")?];
///     for group in generator.get_artifacts(Some(&ids)) {
///         println!("{:?}", group.paths());
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct Generator {
    config: Config,
    conditions: Conditions,
    tokens: TokenDictionary,
    patterns: IndexMap<String, PatternConfig>,
    catalog: Catalog,
}

impl Generator {
    /// Validates the configuration and builds the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or two artifacts
    /// share an identifier.
    pub fn new(config: Config) -> Result<Self, GeneratorError> {
        config.validate()?;

        let conditions = config.conditions();
        let tokens = TokenDictionary::from_tree(&config.tokens);
        let mut patterns = if config.base_preset {
            base_patterns()
        } else {
            IndexMap::new()
        };
        for (name, pattern) in &config.patterns {
            patterns.insert(name.clone(), pattern.clone());
        }

        let catalog = build_catalog(&RenderContext {
            config: &config,
            conditions: &conditions,
            tokens: &tokens,
            patterns: &patterns,
        })?;

        info!(
            "Generator ready: {} catalog entries, {} tokens",
            catalog.len(),
            tokens.len()
        );

        Ok(Self {
            config,
            conditions,
            tokens,
            patterns,
            catalog,
        })
    }

    /// Selects artifact groups; `None` or no ids means the default build.
    #[must_use]
    pub fn get_artifacts(&self, ids: Option<&[ArtifactId]>) -> Vec<ArtifactGroup> {
        self.catalog.select(ids)
    }

    /// Returns the catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the condition set.
    #[must_use]
    pub fn conditions(&self) -> &Conditions {
        &self.conditions
    }

    /// Returns the token dictionary.
    #[must_use]
    pub fn tokens(&self) -> &TokenDictionary {
        &self.tokens
    }

    /// Returns every pattern: the base preset (if enabled) then configured ones.
    #[must_use]
    pub fn patterns(&self) -> &IndexMap<String, PatternConfig> {
        &self.patterns
    }

    pub(crate) fn render_context(&self) -> RenderContext<'_> {
        RenderContext {
            config: &self.config,
            conditions: &self.conditions,
            tokens: &self.tokens,
            patterns: &self.patterns,
        }
    }
}
