//! Build command implementation.

use anyhow::{Context, Result};
use stylekit::{emit_artifacts_and_css_chunks, BuildContext};

use crate::OutputFormat;

/// Runs the build command.
pub async fn run(ctx: BuildContext, format: OutputFormat) -> Result<()> {
    let report = emit_artifacts_and_css_chunks(&ctx)
        .await
        .context("Build failed")?;

    super::output::print_report(&report, format)?;
    super::output::exit_on_failure(&report);
    Ok(())
}
