//! Cssgen command implementation.

use anyhow::{Context, Result};
use std::path::PathBuf;
use stylekit::{
    bundle_css, bundle_minimal_files_css, generate_css_artifact_of_type,
    write_and_bundle_css_chunks, BuildContext, CssArtifactKind, STYLES_FILE,
};

use crate::OutputFormat;

/// Cssgen options.
#[derive(Debug)]
pub struct Args {
    /// Single output stylesheet.
    pub outfile: Option<PathBuf>,
    /// Root artifact kind to generate alone.
    pub kind: Option<String>,
    /// Only write the extracted CSS.
    pub minimal: bool,
}

/// Runs the cssgen command.
///
/// - `--type` renders one root artifact
/// - `--minimal` writes only the extracted CSS
/// - `--outfile` writes one resolved stylesheet
/// - otherwise chunks are written and bundled into `styles.css`
pub async fn run(ctx: BuildContext, args: Args, format: OutputFormat) -> Result<()> {
    if let Some(kind) = args.kind {
        let outfile = args
            .outfile
            .unwrap_or_else(|| default_artifact_path(&ctx, &kind));
        let outcome = generate_css_artifact_of_type(&ctx, &kind, &outfile)
            .await
            .with_context(|| format!("Failed to generate {kind} css"))?;
        return super::output::print_outcome(&outcome, format);
    }

    let result = if args.minimal {
        let outfile = args
            .outfile
            .unwrap_or_else(|| ctx.out_root().join(STYLES_FILE));
        bundle_minimal_files_css(&ctx, &outfile).await
    } else if let Some(outfile) = args.outfile {
        bundle_css(&ctx, &outfile, true).await
    } else {
        write_and_bundle_css_chunks(&ctx).await
    };
    let report = result.context("Css generation failed")?;

    super::output::print_report(&report, format)?;
    super::output::exit_on_failure(&report);
    Ok(())
}

/// Known kinds land at their usual place under the output root.
fn default_artifact_path(ctx: &BuildContext, kind: &str) -> PathBuf {
    match kind.parse::<CssArtifactKind>() {
        Ok(kind) => ctx.out_root().join(kind.file()),
        Err(_) => ctx.out_root().join(format!("{kind}.css")),
    }
}
