//! Extraction, bundling and emit operations.
//!
//! Every operation takes a [`BuildContext`] and returns a report. Per-file
//! extraction failures are logged and recorded in the report; failures to
//! write the final output propagate as [`PipelineError`].

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use stylekit_codegen::{optimize_css, CssArtifactKind, CssChunk};
use stylekit_core::{ArtifactId, SourceParser, StyleCollector, StyleResult};

use crate::context::BuildContext;
use crate::error::PipelineError;
use crate::messages;
use crate::output::write_to;
use crate::settle::{settle_all, Settled};

/// Bundle written by [`bundle_style_chunks_with_imports`], relative to the output root.
pub const STYLES_FILE: &str = "styles.css";

/// One input that failed during a batch.
#[derive(Debug, Clone, Serialize)]
pub struct Failure {
    /// Source file or artifact id.
    pub target: String,
    /// Rendered error.
    pub error: String,
}

/// Summary of a pipeline operation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildReport {
    /// Number of inputs considered (tracked files or artifact groups).
    pub files: usize,
    /// Number of inputs processed without error.
    pub succeeded: usize,
    /// Inputs that failed.
    pub failures: Vec<Failure>,
    /// Summary for the user.
    pub message: String,
    /// Artifact groups of a combined build; `files` and `succeeded` then
    /// count chunks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifacts: Option<ArtifactCounts>,
}

/// Artifact groups written by a combined build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ArtifactCounts {
    /// Selected groups.
    pub groups: usize,
    /// Groups written without error.
    pub written: usize,
}

impl BuildReport {
    /// Returns true if nothing failed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Result of [`generate_css_artifact_of_type`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CssArtifactOutcome {
    /// The artifact was rendered and written.
    Generated {
        /// Artifact kind.
        kind: String,
        /// Written file.
        path: PathBuf,
    },
    /// The kind is not a known root artifact.
    NotFound {
        /// Requested kind.
        kind: String,
    },
    /// The artifact rendered no CSS; nothing was written.
    NothingToGenerate {
        /// Artifact kind.
        kind: String,
    },
}

impl CssArtifactOutcome {
    /// Returns the summary for the user.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Generated { kind, .. } => messages::css_artifact_generated(kind),
            Self::NotFound { kind } => messages::css_artifact_not_found(kind),
            Self::NothingToGenerate { kind } => messages::nothing_to_generate(kind),
        }
    }
}

/// Successes and failures of one settled batch.
#[derive(Debug, Default)]
struct Tally {
    succeeded: usize,
    failures: Vec<Failure>,
}

impl Tally {
    fn fail(&mut self, target: impl Into<String>, err: &PipelineError) {
        self.failures.push(Failure {
            target: target.into(),
            error: err.to_string(),
        });
    }
}

fn display_path(ctx: &BuildContext, path: &Path) -> String {
    path.strip_prefix(ctx.cwd())
        .unwrap_or(path)
        .display()
        .to_string()
}

/// Parses one file on the blocking pool.
async fn try_extract(
    parser: Arc<dyn SourceParser>,
    path: PathBuf,
) -> Result<Option<StyleResult>, PipelineError> {
    tokio::task::spawn_blocking(move || {
        let start = Instant::now();
        let result = parser.parse_source_file(&path);
        debug!("Parsed {} in {:?}", path.display(), start.elapsed());
        result
    })
    .await?
    .map_err(PipelineError::from)
}

/// Extracts style data from one file, relative paths resolved against `cwd`.
///
/// Failures are logged and yield `None`, as does a file without styles.
pub async fn extract_file(ctx: &BuildContext, file: &Path) -> Option<StyleResult> {
    let path = ctx.cwd().join(file);
    debug!("Extracting {}", path.display());
    match try_extract(ctx.parser(), path).await {
        Ok(result) => result,
        Err(err) => {
            error!("Failed to extract {}: {err}", file.display());
            None
        }
    }
}

/// Extracts every file concurrently; failures are logged and tallied.
async fn extract_all(
    ctx: &BuildContext,
    files: &[PathBuf],
) -> (Vec<StyleResult>, Tally) {
    let tasks = files
        .iter()
        .map(|file| try_extract(ctx.parser(), file.clone()));

    let mut results = Vec::new();
    let mut tally = Tally::default();
    for (file, outcome) in files.iter().zip(settle_all(tasks).await) {
        match outcome {
            Settled::Fulfilled(result) => {
                tally.succeeded += 1;
                results.extend(result);
            }
            Settled::Rejected(err) => {
                error!("Failed to extract {}: {err}", file.display());
                tally.fail(display_path(ctx, file), &err);
            }
        }
    }
    (results, tally)
}

/// Extracts one file and writes its chunk to `<outdir>/chunks`.
///
/// Returns the chunk path, or `None` when the file produces no CSS.
///
/// # Errors
///
/// Returns an error if extraction or the chunk write fails.
pub async fn write_file_chunk(
    ctx: &BuildContext,
    file: &Path,
) -> Result<Option<PathBuf>, PipelineError> {
    let path = ctx.cwd().join(file);
    debug!("Writing chunk for {}", display_path(ctx, &path));

    let Some(result) = try_extract(ctx.parser(), path.clone()).await? else {
        return Ok(None);
    };
    let Some(css) = ctx.generator().parser_css(&result) else {
        return Ok(None);
    };
    Ok(Some(ctx.chunks().write(&path, &css).await?))
}

/// Writes the chunk of every tracked file concurrently.
async fn write_chunks(ctx: &BuildContext, files: &[PathBuf]) -> Tally {
    let tasks = files.iter().map(|file| {
        let ctx = ctx.clone();
        let file = file.clone();
        async move { write_file_chunk(&ctx, &file).await }
    });

    let mut tally = Tally::default();
    for (file, outcome) in files.iter().zip(settle_all(tasks).await) {
        match outcome {
            Settled::Fulfilled(_) => tally.succeeded += 1,
            Settled::Rejected(err) => {
                error!("Failed to write chunk for {}: {err}", file.display());
                tally.fail(display_path(ctx, file), &err);
            }
        }
    }
    tally
}

/// Writes `<outdir>/styles.css` importing the root artifacts and every chunk.
///
/// # Errors
///
/// Returns an error if the chunk directory cannot be read or the bundle
/// cannot be written.
pub async fn bundle_style_chunks_with_imports(
    ctx: &BuildContext,
) -> Result<BuildReport, PipelineError> {
    let chunks = ctx.chunks().files().await?;
    let imports: Vec<_> = chunks.iter().cloned().map(CssChunk::Import).collect();

    let css = ctx.generator().css(&imports, false);
    let path = ctx.output().write_file(STYLES_FILE, &css).await?;
    info!("Bundled {} chunks into {}", chunks.len(), path.display());

    Ok(BuildReport {
        files: chunks.len(),
        succeeded: chunks.len(),
        failures: Vec::new(),
        message: messages::build_complete(chunks.len()),
        artifacts: None,
    })
}

/// Writes a chunk for every tracked file, then bundles them with imports.
///
/// # Errors
///
/// Returns an error if discovery or the final bundle write fails. Per-file
/// failures are recorded in the report.
pub async fn write_and_bundle_css_chunks(ctx: &BuildContext) -> Result<BuildReport, PipelineError> {
    let files = ctx.files()?;
    let tally = write_chunks(ctx, &files).await;
    let bundle = bundle_style_chunks_with_imports(ctx).await?;

    if !tally.failures.is_empty() {
        warn!("{} of {} files failed", tally.failures.len(), files.len());
    }

    Ok(BuildReport {
        files: files.len(),
        succeeded: tally.succeeded,
        failures: tally.failures,
        message: bundle.message,
        artifacts: None,
    })
}

/// Extracts every tracked file into one stylesheet written to `outfile`.
///
/// With `resolve` the root artifacts are inlined, otherwise imported. The
/// result is minified when `minify` is configured. No chunks are written.
///
/// # Errors
///
/// Returns an error if discovery or the write of `outfile` fails.
pub async fn bundle_css(
    ctx: &BuildContext,
    outfile: &Path,
    resolve: bool,
) -> Result<BuildReport, PipelineError> {
    let files = ctx.files()?;
    let (results, tally) = extract_all(ctx, &files).await;

    let mut collector = StyleCollector::new();
    for result in &results {
        collector.merge_styles(result);
    }
    let parser_css = ctx
        .generator()
        .parser_css(&collector.finish())
        .unwrap_or_default();

    let css = ctx.generator().css(&[CssChunk::Inline(parser_css)], resolve);
    let css = optimize_css(&css, ctx.config().minify);

    let outfile = ctx.cwd().join(outfile);
    write_to(&outfile, &css).await?;
    info!("Wrote {} from {} files", outfile.display(), files.len());

    Ok(BuildReport {
        files: files.len(),
        succeeded: tally.succeeded,
        failures: tally.failures,
        message: messages::build_complete(files.len()),
        artifacts: None,
    })
}

/// Extracts every tracked file and writes only the extracted CSS to `outfile`.
///
/// Nothing is written when no CSS was extracted.
///
/// # Errors
///
/// Returns an error if discovery or the write of `outfile` fails.
pub async fn bundle_minimal_files_css(
    ctx: &BuildContext,
    outfile: &Path,
) -> Result<BuildReport, PipelineError> {
    let files = ctx.files()?;
    let (results, tally) = extract_all(ctx, &files).await;

    let mut collector = StyleCollector::new();
    for result in &results {
        collector.merge(result);
    }
    let merged = collector.finish();
    debug!("{} files contributed css", merged.files().count());

    let report = BuildReport {
        files: files.len(),
        succeeded: tally.succeeded,
        failures: tally.failures,
        message: messages::build_complete(files.len()),
        artifacts: None,
    };

    let Some(css) = ctx.generator().parser_css(&merged) else {
        info!("No css extracted; {} left untouched", outfile.display());
        return Ok(report);
    };

    let outfile = ctx.cwd().join(outfile);
    write_to(&outfile, &optimize_css(&css, ctx.config().minify)).await?;
    info!("Wrote {}", outfile.display());
    Ok(report)
}

/// Renders one root CSS artifact (`preflight`, `tokens`, `static`, `global`,
/// `keyframes`) and writes it to `outfile`.
///
/// # Errors
///
/// Returns an error if `outfile` cannot be written.
pub async fn generate_css_artifact_of_type(
    ctx: &BuildContext,
    kind: &str,
    outfile: &Path,
) -> Result<CssArtifactOutcome, PipelineError> {
    let Ok(parsed) = kind.parse::<CssArtifactKind>() else {
        warn!("Unknown css artifact type `{kind}`");
        return Ok(CssArtifactOutcome::NotFound {
            kind: kind.to_string(),
        });
    };

    let css = ctx.generator().css_artifact(parsed);
    if css.trim().is_empty() {
        return Ok(CssArtifactOutcome::NothingToGenerate {
            kind: parsed.to_string(),
        });
    }

    let path = ctx.cwd().join(outfile);
    write_to(&path, &optimize_css(&css, ctx.config().minify)).await?;
    info!("Wrote {parsed} css to {}", path.display());

    Ok(CssArtifactOutcome::Generated {
        kind: parsed.to_string(),
        path,
    })
}

/// Writes the selected artifact groups; `None` or no ids writes the default
/// build. The output directory is emptied first when `clean` is configured.
///
/// # Errors
///
/// Returns an error if the output directory cannot be emptied. Per-group
/// write failures are recorded in the report.
pub async fn emit_artifacts(
    ctx: &BuildContext,
    ids: Option<&[ArtifactId]>,
) -> Result<BuildReport, PipelineError> {
    if ctx.config().clean {
        ctx.output().empty().await?;
    }

    let groups = ctx.generator().get_artifacts(ids);
    let labels: Vec<_> = groups.iter().map(|g| g.id.to_string()).collect();
    let tasks = groups.into_iter().map(|group| {
        let writer = ctx.output().clone();
        async move { Ok::<_, PipelineError>(writer.write(&group).await?) }
    });

    let mut tally = Tally::default();
    for (label, outcome) in labels.iter().zip(settle_all(tasks).await) {
        match outcome {
            Settled::Fulfilled(_) => tally.succeeded += 1,
            Settled::Rejected(err) => {
                error!("Failed to write artifact {label}: {err}");
                tally.fail(label.clone(), &err);
            }
        }
    }

    info!(
        "Emitted {} of {} artifact groups",
        tally.succeeded,
        labels.len()
    );

    Ok(BuildReport {
        files: labels.len(),
        succeeded: tally.succeeded,
        message: messages::artifacts_generated(tally.succeeded, ctx.out_root()),
        failures: tally.failures,
        artifacts: None,
    })
}

/// Emits the default artifacts, then writes and bundles CSS chunks unless
/// only tokens are emitted.
///
/// # Errors
///
/// Returns an error if emitting or bundling fails.
pub async fn emit_artifacts_and_css_chunks(
    ctx: &BuildContext,
) -> Result<BuildReport, PipelineError> {
    let artifacts = emit_artifacts(ctx, None).await?;
    let counts = ArtifactCounts {
        groups: artifacts.files,
        written: artifacts.succeeded,
    };
    if ctx.config().emit_tokens_only {
        return Ok(BuildReport {
            message: messages::TOKENS_REBUILT.to_string(),
            artifacts: Some(counts),
            ..artifacts
        });
    }

    let mut report = write_and_bundle_css_chunks(ctx).await?;
    let mut failures = artifacts.failures;
    failures.append(&mut report.failures);
    report.failures = failures;
    report.artifacts = Some(counts);
    Ok(report)
}
