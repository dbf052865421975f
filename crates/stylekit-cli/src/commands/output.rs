//! Shared output formatting for reports.

use anyhow::Result;
use serde::Serialize;
use stylekit::{BuildReport, CssArtifactOutcome};

use crate::OutputFormat;

/// Print a build report in the specified format.
pub fn print_report(report: &BuildReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_report_text(report),
        OutputFormat::Json => return print_json(report),
    }
    Ok(())
}

fn print_report_text(report: &BuildReport) {
    for failure in &report.failures {
        println!("\x1b[31merror\x1b[0m {}: {}", failure.target, failure.error);
    }
    if !report.failures.is_empty() {
        println!();
    }

    let color = if report.is_success() {
        "\x1b[32m"
    } else {
        "\x1b[33m"
    };
    if let Some(artifacts) = report.artifacts {
        println!(
            "{} of {} artifact groups written",
            artifacts.written, artifacts.groups
        );
    }
    println!("{color}{}\x1b[0m", report.message);
    if !report.is_success() {
        println!(
            "{} of {} succeeded, {} failed",
            report.succeeded,
            report.files,
            report.failures.len()
        );
    }
}

/// Print a root CSS artifact outcome in the specified format.
pub fn print_outcome(outcome: &CssArtifactOutcome, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            let color = match outcome {
                CssArtifactOutcome::Generated { .. } => "\x1b[32m",
                _ => "\x1b[33m",
            };
            println!("{color}{}\x1b[0m", outcome.message());
            Ok(())
        }
        OutputFormat::Json => print_json(outcome),
    }
}

/// Print any serializable value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

/// Exits with status 1 when the report carries failures.
pub fn exit_on_failure(report: &BuildReport) {
    if !report.is_success() {
        std::process::exit(1);
    }
}
