//! Codegen command implementation.

use anyhow::{Context, Result};
use stylekit::{emit_artifacts, ArtifactId, BuildContext};

use crate::OutputFormat;

/// Runs the codegen command.
pub async fn run(ctx: BuildContext, ids: &[String], format: OutputFormat) -> Result<()> {
    let ids = ids
        .iter()
        .map(|id| ArtifactId::new(id.trim()))
        .collect::<Result<Vec<_>, _>>()
        .context("Invalid artifact id")?;

    tracing::info!("Generating artifacts in {}", ctx.out_root().display());

    let selection = (!ids.is_empty()).then_some(ids.as_slice());
    let report = emit_artifacts(&ctx, selection)
        .await
        .context("Codegen failed")?;

    super::output::print_report(&report, format)?;
    super::output::exit_on_failure(&report);
    Ok(())
}
