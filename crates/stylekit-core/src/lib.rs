//! # stylekit-core
//!
//! Core model for the stylekit extraction and codegen pipeline.
//!
//! This crate provides the types every other stylekit crate builds on:
//!
//! - [`Catalog`] of [`ArtifactGroup`]s with identifier-based selection
//! - [`StyleObject`], [`Atom`] and the per-pass [`StyleResult`]
//! - [`Conditions`] for selector, breakpoint and at-rule conditions
//! - [`SourceParser`], the seam for source file extraction
//! - [`Config`] loaded from TOML
//!
//! ## Example
//!
//! ```
//! use stylekit_core::{ArtifactFile, ArtifactId, Catalog, CatalogEntry, NamespaceChild};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let recipes = ArtifactId::new("recipes")?;
//!     let button = recipes.child("button-style")?;
//!     let catalog = Catalog::new(vec![CatalogEntry::namespace(
//!         recipes.clone(),
//!         &["recipes"],
//!         vec![NamespaceChild::new(
//!             button.clone(),
//!             vec![ArtifactFile::new("button-style.mjs", "export {}")],
//!         )],
//!         vec![ArtifactFile::new("index.mjs", "export * from './button-style.mjs'")],
//!     )])?;
//!
//!     let groups = catalog.select(Some(&[recipes, button]));
//!     assert_eq!(
//!         groups[0].paths(),
//!         ["recipes/button-style.mjs", "recipes/index.mjs"]
//!     );
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod artifact;
mod catalog;
mod conditions;
mod config;
mod parser;
mod style;

/// Naming helpers shared by extraction and codegen.
pub mod utils;

pub use artifact::{
    ArtifactCode, ArtifactFile, ArtifactGroup, ArtifactId, ArtifactIdError, CodeProducer,
};
pub use catalog::{Catalog, CatalogEntry, CatalogError, EntryFiles, NamespaceChild};
pub use conditions::{ConditionKind, Conditions};
pub use config::{
    Config, ConfigError, JsxFramework, OutExtension, PatternConfig, RecipeConfig, StaticRule,
    TokenNode, TokenTree,
};
pub use parser::{ExtractError, SourceParser};
pub use style::{format_number, merge, Atom, StyleCollector, StyleObject, StyleResult, StyleValue};
