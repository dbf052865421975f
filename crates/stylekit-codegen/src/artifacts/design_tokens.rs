//! Token artifacts: css variables, token lookup and keyframes.

use std::fmt::Write as _;

use indexmap::IndexMap;
use serde_json::json;
use stylekit_core::{ArtifactFile, ArtifactIdError, CatalogEntry};

use super::id;
use crate::context::RenderContext;
use crate::css;

const INDEX_DTS: &str = r"import type { Token } from './tokens'

interface TokenFn {
  (path: Token, fallback?: string): string
  var: (path: Token, fallback?: string) => string
}

export declare const token: TokenFn
";

fn index_js(ctx: &RenderContext<'_>) -> String {
    let tokens: IndexMap<&str, serde_json::Value> = ctx
        .tokens
        .iter()
        .map(|t| {
            (
                t.path.as_str(),
                json!({ "value": t.value, "variable": t.var_ref() }),
            )
        })
        .collect();
    let tokens = serde_json::to_string_pretty(&tokens).unwrap_or_else(|_| String::from("{}"));

    format!(
        "const tokens = {tokens}

export function token(path, fallback) {{
  return tokens[path]?.value || fallback
}}

function tokenVar(path, fallback) {{
  return tokens[path]?.variable || fallback
}}

token.var = tokenVar
"
    )
}

fn tokens_dts(ctx: &RenderContext<'_>) -> String {
    let union = |paths: Vec<String>| {
        if paths.is_empty() {
            String::from("never")
        } else {
            paths.join(" | ")
        }
    };

    let all = union(ctx.tokens.iter().map(|t| format!("'{}'", t.path)).collect());
    let mut out = format!("export type Token = {all}\n\nexport type Tokens = {{\n");
    for category in ctx.tokens.categories() {
        let prefix = format!("{category}.");
        let paths = ctx
            .tokens
            .iter()
            .filter(|t| t.category == category)
            .map(|t| format!("'{}'", t.path.strip_prefix(&prefix).unwrap_or(&t.path)))
            .collect();
        let _ = writeln!(out, "  {category}: {}", union(paths));
    }
    out.push_str("}\n");
    out
}

pub(super) fn design_tokens(ctx: &RenderContext<'_>) -> Result<CatalogEntry, ArtifactIdError> {
    Ok(CatalogEntry::flat(
        id("design-tokens")?,
        &["tokens"],
        vec![
            ArtifactFile::new("index.css", css::token_css(ctx)),
            ArtifactFile::new("index.d.ts", INDEX_DTS),
            ArtifactFile::new(ctx.file("index"), index_js(ctx)),
            ArtifactFile::new("tokens.d.ts", tokens_dts(ctx)),
        ],
    ))
}

pub(super) fn keyframes(ctx: &RenderContext<'_>) -> Result<CatalogEntry, ArtifactIdError> {
    Ok(CatalogEntry::flat(
        id("keyframes")?,
        &["tokens"],
        vec![ArtifactFile::new("keyframes.css", css::keyframe_css(ctx))],
    ))
}
