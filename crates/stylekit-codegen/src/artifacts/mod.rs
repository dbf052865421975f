//! Artifact builders and the default catalog.

mod design_tokens;
mod jsx;
mod patterns;
mod recipes;
mod root;
mod runtime;
mod types;

use stylekit_core::{ArtifactId, ArtifactIdError, Catalog, CatalogEntry};
use tracing::debug;

use crate::context::RenderContext;
use crate::GeneratorError;

pub(crate) fn id(id: &str) -> Result<ArtifactId, ArtifactIdError> {
    ArtifactId::new(id)
}

type Builder = fn(&RenderContext<'_>) -> Result<CatalogEntry, ArtifactIdError>;

/// Builders in catalog order. The flag marks entries kept when only tokens
/// are emitted.
const BUILDERS: &[(Builder, bool)] = &[
    (runtime::helpers, false),
    (design_tokens::design_tokens, true),
    (design_tokens::keyframes, true),
    (types::jsx, false),
    (types::entry, false),
    (types::styles, false),
    (types::conditions, false),
    (types::generated, false),
    (types::system, false),
    (runtime::css_fn, false),
    (runtime::cva, false),
    (runtime::sva, false),
    (runtime::cx, false),
    (recipes::create_recipe, false),
    (recipes::index, false),
    (recipes::namespace, false),
    (patterns::index, false),
    (patterns::namespace, false),
    (jsx::is_valid_prop, false),
    (jsx::factory, false),
    (jsx::helpers, false),
    (jsx::patterns, false),
    (jsx::patterns_index, false),
    (runtime::css_index, false),
    (root::package, false),
    (root::global, false),
    (root::static_css, false),
    (root::reset, false),
];

/// Builds the catalog for a configuration.
pub(crate) fn build_catalog(ctx: &RenderContext<'_>) -> Result<Catalog, GeneratorError> {
    let tokens_only = ctx.config.emit_tokens_only;
    let entries = BUILDERS
        .iter()
        .map(|(build, token_artifact)| {
            let entry = build(ctx)?;
            Ok(if *token_artifact {
                entry
            } else {
                entry.when(!tokens_only)
            })
        })
        .collect::<Result<Vec<_>, ArtifactIdError>>()?;

    debug!(
        "Built catalog with {} entries ({} recipes, {} patterns)",
        entries.len(),
        ctx.config.recipes.len(),
        ctx.patterns.len()
    );

    Ok(Catalog::new(entries)?)
}
