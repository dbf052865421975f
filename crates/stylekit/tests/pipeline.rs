//! Integration test: pipeline operations against a temporary project.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use stylekit::{
    bundle_css, bundle_minimal_files_css, emit_artifacts, emit_artifacts_and_css_chunks,
    extract_file, generate_css_artifact_of_type, messages, write_and_bundle_css_chunks,
    ArtifactId, BuildContext, Config, CssArtifactOutcome, ExtractError, PipelineError,
    SourceParser, StyleResult, TsStyleParser,
};
use tempfile::TempDir;

fn project(files: &[(&str, &str)]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for (file, source) in files {
        let path = tmp.path().join(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, source).unwrap();
    }
    tmp
}

fn context(root: &Path, config: Config) -> BuildContext {
    BuildContext::builder()
        .config(config)
        .cwd(root)
        .build()
        .unwrap()
}

const APP: &str = r#"
import { css } from "../styled-system/css";

export const App = () => <div className={css({ color: "red", _hover: { color: "blue" } })} />;
"#;

const PLAIN: &str = "export const add = (a: number, b: number) => a + b;\n";

/// Fails on files named `broken.*`, extracts everything else.
struct FlakyParser(TsStyleParser);

impl SourceParser for FlakyParser {
    fn parse_source_file(&self, path: &Path) -> Result<Option<StyleResult>, ExtractError> {
        if path.file_stem().is_some_and(|stem| stem == "broken") {
            return Err(ExtractError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::other("disk on fire"),
            });
        }
        self.0.parse_source_file(path)
    }
}

#[tokio::test]
async fn emits_default_artifacts() {
    let tmp = project(&[]);
    let ctx = context(tmp.path(), Config::default());

    let report = emit_artifacts(&ctx, None).await.unwrap();

    assert!(report.is_success());
    assert_eq!(report.succeeded, report.files);
    let out = tmp.path().join("styled-system");
    assert!(out.join("css/css.mjs").is_file());
    assert!(out.join("tokens/index.css").is_file());
    assert!(out.join("patterns/box.mjs").is_file());
}

#[tokio::test]
async fn emits_only_requested_artifacts() {
    let tmp = project(&[]);
    let ctx = context(tmp.path(), Config::default());
    let ids = [ArtifactId::new("cx").unwrap()];

    let report = emit_artifacts(&ctx, Some(&ids)).await.unwrap();

    assert_eq!(report.files, 1);
    let out = tmp.path().join("styled-system");
    assert!(out.join("css/cx.mjs").is_file());
    assert!(!out.join("css/css.mjs").exists());
}

#[tokio::test]
async fn clean_removes_stale_output() {
    let tmp = project(&[("styled-system/stale.txt", "old")]);
    let config = Config {
        clean: true,
        ..Config::default()
    };
    let ctx = context(tmp.path(), config);

    emit_artifacts(&ctx, None).await.unwrap();

    assert!(!tmp.path().join("styled-system/stale.txt").exists());
}

#[tokio::test]
async fn clean_refuses_project_as_outdir() {
    let tmp = project(&[("src/App.tsx", APP)]);
    let config = Config {
        outdir: ".".into(),
        clean: true,
        ..Config::default()
    };

    let err = BuildContext::builder()
        .config(config)
        .cwd(tmp.path())
        .build()
        .unwrap_err();

    assert!(matches!(err, PipelineError::OutdirContainsCwd { .. }));
    assert!(tmp.path().join("src/App.tsx").is_file());
}

#[tokio::test]
async fn blocked_group_is_reported_and_others_written() {
    let tmp = project(&[("styled-system/patterns", "not a directory")]);
    let ctx = context(tmp.path(), Config::default());
    let ids = [
        ArtifactId::new("cx").unwrap(),
        ArtifactId::new("patterns").unwrap(),
    ];

    let report = emit_artifacts(&ctx, Some(&ids)).await.unwrap();

    assert_eq!(report.files, 2);
    assert_eq!(report.succeeded, 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].target, "patterns");
    assert!(tmp.path().join("styled-system/css/cx.mjs").is_file());
}

#[tokio::test]
async fn writes_chunks_and_bundles_them() {
    let tmp = project(&[("src/App.tsx", APP), ("src/math.ts", PLAIN)]);
    let ctx = context(tmp.path(), Config::default());

    let report = write_and_bundle_css_chunks(&ctx).await.unwrap();

    assert_eq!(report.files, 2);
    assert_eq!(report.succeeded, 2);
    assert_eq!(report.message, messages::build_complete(1));

    let out = tmp.path().join("styled-system");
    let chunk = fs::read_to_string(out.join("chunks/src__App.css")).unwrap();
    assert!(chunk.contains(".color_red {"));
    assert!(chunk.contains(".hover\\:color_blue:hover {"));
    assert!(!out.join("chunks/src__math.css").exists());

    let styles = fs::read_to_string(out.join("styles.css")).unwrap();
    assert!(styles.starts_with("@layer reset, base, tokens, recipes, utilities;"));
    assert!(styles.contains("@import './chunks/src__App.css';"));
}

#[tokio::test]
async fn one_failing_file_does_not_stop_the_batch() {
    let tmp = project(&[("src/App.tsx", APP), ("src/broken.tsx", APP)]);
    let config = Config::default();
    let parser = FlakyParser(TsStyleParser::from_config(&config));
    let ctx = BuildContext::builder()
        .config(config)
        .cwd(tmp.path())
        .parser(Arc::new(parser))
        .build()
        .unwrap();

    let report = write_and_bundle_css_chunks(&ctx).await.unwrap();

    assert_eq!(report.files, 2);
    assert_eq!(report.succeeded, 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].target, "src/broken.tsx");
    assert!(tmp
        .path()
        .join("styled-system/chunks/src__App.css")
        .is_file());
}

#[tokio::test]
async fn bundle_css_inlines_everything() {
    let tmp = project(&[("src/App.tsx", APP)]);
    let config = Config::parse(
        r##"
[tokens.colors]
brand = "#ff0000"
"##,
    )
    .unwrap();
    let ctx = context(tmp.path(), config);

    let report = bundle_css(&ctx, Path::new("dist/app.css"), true).await.unwrap();

    assert_eq!(report.succeeded, 1);
    let css = fs::read_to_string(tmp.path().join("dist/app.css")).unwrap();
    assert!(!css.contains("@import"));
    assert!(css.contains("--colors-brand: #ff0000;"));
    assert!(css.contains(".color_red {"));
    assert!(!tmp.path().join("styled-system/chunks").exists());
}

#[tokio::test]
async fn bundle_css_minifies_when_configured() {
    let tmp = project(&[("src/App.tsx", APP)]);
    let config = Config {
        minify: true,
        ..Config::default()
    };
    let ctx = context(tmp.path(), config);

    bundle_css(&ctx, Path::new("app.css"), true).await.unwrap();

    let css = fs::read_to_string(tmp.path().join("app.css")).unwrap();
    assert!(css.contains(".color_red{color:red}"));
}

#[tokio::test]
async fn bundle_write_failure_is_returned() {
    let tmp = project(&[("src/App.tsx", APP), ("dist", "")]);
    let ctx = context(tmp.path(), Config::default());

    let err = bundle_css(&ctx, Path::new("dist/app.css"), true)
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::Write(_)));

    let err = generate_css_artifact_of_type(&ctx, "preflight", Path::new("dist/reset.css"))
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::Write(_)));
}

#[tokio::test]
async fn minimal_bundle_writes_only_extracted_css() {
    let tmp = project(&[("src/App.tsx", APP)]);
    let ctx = context(tmp.path(), Config::default());

    bundle_minimal_files_css(&ctx, Path::new("min.css"))
        .await
        .unwrap();

    let css = fs::read_to_string(tmp.path().join("min.css")).unwrap();
    assert!(css.starts_with("@layer utilities {"));
    assert!(!css.contains("@layer reset, base"));
}

#[tokio::test]
async fn minimal_bundle_without_css_writes_nothing() {
    let tmp = project(&[("src/math.ts", PLAIN)]);
    let ctx = context(tmp.path(), Config::default());

    let report = bundle_minimal_files_css(&ctx, Path::new("min.css"))
        .await
        .unwrap();

    assert_eq!(report.message, messages::build_complete(1));
    assert!(!tmp.path().join("min.css").exists());
}

#[tokio::test]
async fn css_artifact_outcomes() {
    let tmp = project(&[]);
    let ctx = context(tmp.path(), Config::default());

    let missing = generate_css_artifact_of_type(&ctx, "fonts", Path::new("x.css"))
        .await
        .unwrap();
    assert_eq!(
        missing.message(),
        "No css artifact of type <fonts> was found"
    );

    let empty = generate_css_artifact_of_type(&ctx, "tokens", Path::new("x.css"))
        .await
        .unwrap();
    assert_eq!(
        empty,
        CssArtifactOutcome::NothingToGenerate {
            kind: "tokens".to_string()
        }
    );
    assert!(!tmp.path().join("x.css").exists());

    let reset = generate_css_artifact_of_type(&ctx, "preflight", Path::new("reset.css"))
        .await
        .unwrap();
    assert_eq!(
        reset.message(),
        "Successfully generated preflight css artifact ✨"
    );
    let css = fs::read_to_string(tmp.path().join("reset.css")).unwrap();
    assert!(css.starts_with("@layer reset {"));
}

#[tokio::test]
async fn tokens_only_skips_chunks() {
    let tmp = project(&[("src/App.tsx", APP)]);
    let config = Config {
        emit_tokens_only: true,
        ..Config::default()
    };
    let ctx = context(tmp.path(), config);

    let report = emit_artifacts_and_css_chunks(&ctx).await.unwrap();

    assert_eq!(report.message, messages::TOKENS_REBUILT);
    let out = tmp.path().join("styled-system");
    assert!(out.join("tokens/index.mjs").is_file());
    assert!(!out.join("styles.css").exists());
    assert!(!out.join("css/css.mjs").exists());
}

#[tokio::test]
async fn full_build_emits_artifacts_and_bundle() {
    let tmp = project(&[("src/App.tsx", APP)]);
    let ctx = context(tmp.path(), Config::default());

    let report = emit_artifacts_and_css_chunks(&ctx).await.unwrap();

    assert!(report.is_success());
    let artifacts = report.artifacts.unwrap();
    assert!(artifacts.groups > 0);
    assert_eq!(artifacts.written, artifacts.groups);
    assert_eq!(report.files, 1);
    let out = tmp.path().join("styled-system");
    assert!(out.join("css/css.mjs").is_file());
    assert!(out.join("styles.css").is_file());
}

#[tokio::test]
async fn extraction_failures_yield_none() {
    let tmp = project(&[("src/bad.tsx", "export const = css({")]);
    let ctx = context(tmp.path(), Config::default());

    assert!(extract_file(&ctx, Path::new("src/bad.tsx")).await.is_none());
    assert!(extract_file(&ctx, Path::new("src/missing.tsx")).await.is_none());

    let good = project(&[("src/App.tsx", APP)]);
    let ctx = context(good.path(), Config::default());
    let result = extract_file(&ctx, Path::new("src/App.tsx")).await.unwrap();
    assert_eq!(result.atom_count(), 2);
}
