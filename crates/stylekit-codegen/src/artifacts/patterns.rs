//! Pattern artifacts: one module per pattern and the index.

use std::fmt::Write as _;

use serde_json::json;
use stylekit_core::utils::{camel_case, pascal_case};
use stylekit_core::{
    ArtifactCode, ArtifactFile, ArtifactIdError, CatalogEntry, NamespaceChild, OutExtension,
    PatternConfig,
};

use super::id;
use crate::context::RenderContext;

fn pattern_js(name: &str, pattern: &PatternConfig, ext: OutExtension) -> String {
    let fn_name = camel_case(name);
    let style_fn = format!("get{}Style", pascal_case(name));
    let config = serde_json::to_string_pretty(&json!({
        "base": pattern.base,
        "defaults": pattern.defaults,
    }))
    .unwrap_or_else(|_| String::from("{}"));

    format!(
        "import {{ compact }} from '../helpers.{ext}'
import {{ css }} from '../css/index.{ext}'

const {fn_name}Config = {config}

export const {style_fn} = (styles = {{}}) => ({{
  ...{fn_name}Config.base,
  ...{fn_name}Config.defaults,
  ...compact(styles),
}})

export const {fn_name} = (styles) => css({style_fn}(styles))
{fn_name}.raw = {style_fn}
",
        ext = ext.as_str()
    )
}

fn pattern_dts(name: &str, pattern: &PatternConfig) -> String {
    let fn_name = camel_case(name);
    let props = format!("{}Properties", pascal_case(name));
    let mut out = String::from("import type { SystemStyleObject } from '../types/index'\n\n");
    let _ = writeln!(out, "export interface {props} {{");
    for property in &pattern.properties {
        let _ = writeln!(out, "  {property}?: SystemStyleObject['{property}']");
    }
    out.push_str("}\n\n");
    if let Some(description) = &pattern.description {
        let _ = writeln!(out, "/** {description} */");
    }
    let _ = writeln!(
        out,
        "export declare function {fn_name}(styles?: {props} & SystemStyleObject): string"
    );
    out
}

fn index_files(ctx: &RenderContext<'_>) -> Vec<ArtifactFile> {
    let mut js = String::new();
    let mut dts = String::new();
    for name in ctx.patterns.keys() {
        let _ = writeln!(js, "export * from './{}'", ctx.file(name));
        let _ = writeln!(dts, "export * from './{name}'");
    }
    vec![
        ArtifactFile::new(ctx.file("index"), js),
        ArtifactFile::new("index.d.ts", dts),
    ]
}

pub(super) fn index(ctx: &RenderContext<'_>) -> Result<CatalogEntry, ArtifactIdError> {
    Ok(CatalogEntry::flat(
        id("patterns-index")?,
        &["patterns"],
        index_files(ctx),
    ))
}

pub(super) fn namespace(ctx: &RenderContext<'_>) -> Result<CatalogEntry, ArtifactIdError> {
    let ns = id("patterns")?;
    let ext = ctx.ext();
    let children = ctx
        .patterns
        .iter()
        .map(|(name, pattern)| {
            let js = {
                let (name, pattern) = (name.clone(), pattern.clone());
                ArtifactCode::lazy(move || pattern_js(&name, &pattern, ext))
            };
            let dts = {
                let (name, pattern) = (name.clone(), pattern.clone());
                ArtifactCode::lazy(move || pattern_dts(&name, &pattern))
            };
            Ok(NamespaceChild::new(
                ns.child(name)?,
                vec![
                    ArtifactFile::new(ctx.file(name), js),
                    ArtifactFile::new(format!("{name}.d.ts"), dts),
                ],
            ))
        })
        .collect::<Result<Vec<_>, ArtifactIdError>>()?;

    Ok(CatalogEntry::namespace(ns, &["patterns"], children, Vec::new()))
}
