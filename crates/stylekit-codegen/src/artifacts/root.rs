//! Files at the output root: `package.json` and the root CSS artifacts.

use serde_json::json;
use stylekit_core::{ArtifactFile, ArtifactIdError, CatalogEntry, OutExtension};

use super::id;
use crate::context::RenderContext;
use crate::css;

fn package_json(ctx: &RenderContext<'_>) -> String {
    let entry = |dir: &str| {
        json!({
            "types": format!("./{dir}/index.d.ts"),
            "import": format!("./{dir}/{}", ctx.file("index")),
        })
    };
    let mut package = json!({
        "name": "styled-system",
        "description": "Generated style system",
        "version": "0.0.0",
        "exports": {
            "./css": entry("css"),
            "./tokens": entry("tokens"),
            "./recipes": entry("recipes"),
            "./patterns": entry("patterns"),
            "./types": { "types": "./types/index.d.ts" },
            "./styles.css": "./styles.css",
        },
    });
    if ctx.jsx().is_some() {
        package["exports"]["./jsx"] = entry("jsx");
    }
    if ctx.ext() == OutExtension::Js {
        package["type"] = json!("module");
    }
    let mut out = serde_json::to_string_pretty(&package).unwrap_or_default();
    out.push('\n');
    out
}

pub(super) fn package(ctx: &RenderContext<'_>) -> Result<CatalogEntry, ArtifactIdError> {
    let files = if ctx.config.emit_package {
        vec![ArtifactFile::new("package.json", package_json(ctx))]
    } else {
        Vec::new()
    };
    Ok(CatalogEntry::flat(id("package.json")?, &[], files))
}

pub(super) fn global(ctx: &RenderContext<'_>) -> Result<CatalogEntry, ArtifactIdError> {
    Ok(CatalogEntry::flat(
        id("styles.css")?,
        &[],
        vec![ArtifactFile::new("global.css", css::global_css(ctx))],
    ))
}

pub(super) fn static_css(ctx: &RenderContext<'_>) -> Result<CatalogEntry, ArtifactIdError> {
    Ok(CatalogEntry::flat(
        id("static.css")?,
        &[],
        vec![ArtifactFile::new("static.css", css::static_css(ctx))],
    ))
}

pub(super) fn reset(ctx: &RenderContext<'_>) -> Result<CatalogEntry, ArtifactIdError> {
    let files = if ctx.config.preflight {
        vec![ArtifactFile::new("reset.css", css::reset_css())]
    } else {
        Vec::new()
    };
    Ok(CatalogEntry::flat(id("reset.css")?, &[], files))
}
