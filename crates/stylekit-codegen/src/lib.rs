//! # stylekit-codegen
//!
//! Artifact and CSS generation for stylekit.
//!
//! - [`Generator`] builds the artifact catalog from a [`stylekit_core::Config`]
//!   and renders CSS (root artifacts, extracted styles, bundles)
//! - [`TokenDictionary`] flattens design tokens and resolves references
//! - [`base_patterns`] is the built-in layout pattern preset
//! - [`optimize_css`] normalizes or minifies CSS text

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod artifacts;
mod context;
mod css;
mod generator;
mod optimize;
mod presets;
mod stylesheet;
mod tokens;

pub use css::{CssArtifactKind, CssChunk, UnknownCssArtifact};
pub use generator::{Generator, GeneratorError};
pub use optimize::optimize_css;
pub use presets::base_patterns;
pub use stylesheet::{layer_order, LAYERS};
pub use tokens::{category_for, Token, TokenDictionary};
