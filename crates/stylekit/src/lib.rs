//! # stylekit
//!
//! Style extraction and artifact codegen for CSS-in-JS projects.
//!
//! This is the facade crate: it re-exports the core model, the generator and
//! the TypeScript extractor, and provides the build pipeline on top of them.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stylekit::{BuildContext, Config};
//!
//! let config = Config::from_file("stylekit.toml".as_ref())?;
//! let ctx = BuildContext::builder().config(config).build()?;
//!
//! // Generate the JS runtime, types and root CSS files
//! let report = stylekit::emit_artifacts(&ctx, None).await?;
//!
//! // Extract every tracked file into one stylesheet
//! let report = stylekit::bundle_css(&ctx, "dist/styles.css".as_ref(), true).await?;
//! println!("{}", report.message);
//! ```
//!
//! ## Custom Parsers
//!
//! Any [`SourceParser`] can stand in for the default [`TsStyleParser`]:
//!
//! ```rust,ignore
//! let ctx = BuildContext::builder()
//!     .parser(Arc::new(MyParser))
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chunks;
mod context;
mod error;
pub mod messages;
mod output;
mod pipeline;
mod settle;

pub use stylekit_codegen::{
    optimize_css, CssArtifactKind, CssChunk, Generator, GeneratorError, TokenDictionary,
};
pub use stylekit_core::*;
pub use stylekit_extract::{Grammar, TsStyleParser};

pub use chunks::{ChunkStore, CHUNKS_DIR};
pub use context::{BuildContext, BuildContextBuilder};
pub use error::{DiscoveryError, PipelineError};
pub use output::{write_to, OutputWriter, WriteError};
pub use pipeline::{
    bundle_css, bundle_minimal_files_css, bundle_style_chunks_with_imports, emit_artifacts,
    emit_artifacts_and_css_chunks, extract_file, generate_css_artifact_of_type, write_file_chunk,
    write_and_bundle_css_chunks, ArtifactCounts, BuildReport, CssArtifactOutcome, Failure,
    STYLES_FILE,
};
pub use settle::{settle_all, Settled};
