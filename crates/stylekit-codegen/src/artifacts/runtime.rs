//! JavaScript runtime: helpers, `css`, `cva`, `sva`, `cx` and the css index.

use stylekit_core::{ArtifactFile, ArtifactIdError, CatalogEntry};

use super::id;
use crate::context::RenderContext;

const HELPERS: &str = r"const isObject = (value) => typeof value === 'object' && value !== null && !Array.isArray(value)

export function compact(value) {
  return Object.fromEntries(Object.entries(value ?? {}).filter(([, v]) => v !== undefined))
}

export function withoutSpace(value) {
  return typeof value === 'string' ? value.trim().split(/\s+/).join('_') : value
}

export function createCss({ isCondition }) {
  return function css(...styles) {
    const classes = new Set()
    const visit = (object, conditions, property) => {
      for (const [key, value] of Object.entries(object)) {
        if (value == null) continue
        const condition = property && key === 'base' ? undefined : isCondition(key)
        const next = condition ? [...conditions, condition] : conditions
        const target = property ?? (condition || key === 'base' ? undefined : key)
        if (isObject(value)) {
          visit(value, next, target)
          continue
        }
        if (!target) continue
        classes.add([...next.map(withoutSpace), `${target}_${withoutSpace(String(value))}`].join(':'))
      }
    }
    styles.filter(Boolean).forEach((style) => visit(style, [], undefined))
    return Array.from(classes).join(' ')
  }
}

export function mergeProps(...sources) {
  return sources.reduce((merged, source) => {
    for (const [key, value] of Object.entries(source ?? {})) {
      merged[key] = isObject(value) && isObject(merged[key]) ? mergeProps(merged[key], value) : value
    }
    return merged
  }, {})
}

export function splitProps(props, ...keys) {
  const picked = keys.map(() => ({}))
  const rest = {}
  for (const [key, value] of Object.entries(props)) {
    const index = keys.findIndex((group) => group.includes(key))
    if (index === -1) rest[key] = value
    else picked[index][key] = value
  }
  return [...picked, rest]
}

export function memo(fn) {
  const cache = new Map()
  return (...args) => {
    const key = JSON.stringify(args)
    if (!cache.has(key)) cache.set(key, fn(...args))
    return cache.get(key)
  }
}
";

const CSS_FN: &str = r"import { createCss } from '../helpers.{ext}'
import { isCondition } from './conditions.{ext}'

export const css = createCss({ isCondition })
css.raw = (...styles) => Object.assign({}, ...styles)
";

const CSS_DTS: &str = r"import type { SystemStyleObject } from '../types/index'

interface CssFunction {
  (...styles: Array<SystemStyleObject | undefined | null | false>): string
  raw: (...styles: Array<SystemStyleObject | undefined | null | false>) => SystemStyleObject
}

export declare const css: CssFunction
";

const CVA: &str = r"import { compact } from '../helpers.{ext}'
import { css } from './css.{ext}'

export function cva(config) {
  const { base = {}, variants = {}, defaultVariants = {} } = config
  function resolve(props = {}) {
    const selected = { ...defaultVariants, ...compact(props) }
    const styles = [base]
    for (const [name, value] of Object.entries(selected)) {
      const style = variants[name]?.[String(value)]
      if (style) styles.push(style)
    }
    return css(...styles)
  }
  return Object.assign(resolve, { variantKeys: Object.keys(variants), config })
}
";

const CVA_DTS: &str = r"import type { RecipeCreatorFn } from '../types/recipe'

export declare const cva: RecipeCreatorFn
";

const SVA: &str = r"import { compact } from '../helpers.{ext}'
import { css } from './css.{ext}'

export function sva(config) {
  const { slots = [], base = {}, variants = {}, defaultVariants = {} } = config
  function resolve(props = {}) {
    const selected = { ...defaultVariants, ...compact(props) }
    return Object.fromEntries(
      slots.map((slot) => {
        const styles = [base[slot]]
        for (const [name, value] of Object.entries(selected)) {
          styles.push(variants[name]?.[String(value)]?.[slot])
        }
        return [slot, css(...styles)]
      }),
    )
  }
  return Object.assign(resolve, { variantKeys: Object.keys(variants), config })
}
";

const SVA_DTS: &str = r"import type { SlotRecipeCreatorFn } from '../types/recipe'

export declare const sva: SlotRecipeCreatorFn
";

const CX: &str = r"export function cx(...args) {
  const seen = new Set()
  for (const arg of args) {
    if (!arg) continue
    for (const name of String(arg).split(/\s+/)) if (name) seen.add(name)
  }
  return Array.from(seen).join(' ')
}
";

const CX_DTS: &str = r"type Argument = string | boolean | null | undefined

export declare function cx(...args: Argument[]): string
";

const CSS_INDEX: &str = r"export * from './css.{ext}'
export * from './cx.{ext}'
export * from './cva.{ext}'
export * from './sva.{ext}'
";

const CSS_INDEX_DTS: &str = r"export * from './css'
export * from './cx'
export * from './cva'
export * from './sva'
";

pub(super) fn helpers(ctx: &RenderContext<'_>) -> Result<CatalogEntry, ArtifactIdError> {
    Ok(CatalogEntry::flat(
        id("helpers")?,
        &[],
        vec![ArtifactFile::new(ctx.file("helpers"), HELPERS)],
    ))
}

fn conditions_js(ctx: &RenderContext<'_>) -> String {
    let names = serde_json::to_string(&ctx.conditions.names().collect::<Vec<_>>())
        .unwrap_or_else(|_| String::from("[]"));
    let breakpoints = serde_json::to_string(&ctx.conditions.breakpoints().collect::<Vec<_>>())
        .unwrap_or_else(|_| String::from("[]"));
    format!(
        "export const conditions = new Set({names})
const breakpoints = new Set({breakpoints})

export function isCondition(key) {{
  if (key.startsWith('_')) return key.slice(1)
  if (breakpoints.has(key) || key.includes('&') || key.startsWith('@')) return key
  return undefined
}}
"
    )
}

pub(super) fn css_fn(ctx: &RenderContext<'_>) -> Result<CatalogEntry, ArtifactIdError> {
    Ok(CatalogEntry::flat(
        id("css-fn")?,
        &["css"],
        vec![
            ArtifactFile::new(ctx.file("conditions"), conditions_js(ctx)),
            ArtifactFile::new(ctx.file("css"), ctx.render(CSS_FN)),
            ArtifactFile::new("css.d.ts", CSS_DTS),
        ],
    ))
}

pub(super) fn cva(ctx: &RenderContext<'_>) -> Result<CatalogEntry, ArtifactIdError> {
    Ok(CatalogEntry::flat(
        id("cva")?,
        &["css"],
        vec![
            ArtifactFile::new(ctx.file("cva"), ctx.render(CVA)),
            ArtifactFile::new("cva.d.ts", CVA_DTS),
        ],
    ))
}

pub(super) fn sva(ctx: &RenderContext<'_>) -> Result<CatalogEntry, ArtifactIdError> {
    Ok(CatalogEntry::flat(
        id("sva")?,
        &["css"],
        vec![
            ArtifactFile::new(ctx.file("sva"), ctx.render(SVA)),
            ArtifactFile::new("sva.d.ts", SVA_DTS),
        ],
    ))
}

pub(super) fn cx(ctx: &RenderContext<'_>) -> Result<CatalogEntry, ArtifactIdError> {
    Ok(CatalogEntry::flat(
        id("cx")?,
        &["css"],
        vec![
            ArtifactFile::new(ctx.file("cx"), CX),
            ArtifactFile::new("cx.d.ts", CX_DTS),
        ],
    ))
}

pub(super) fn css_index(ctx: &RenderContext<'_>) -> Result<CatalogEntry, ArtifactIdError> {
    Ok(CatalogEntry::flat(
        id("css-index")?,
        &["css"],
        vec![
            ArtifactFile::new(ctx.file("index"), ctx.render(CSS_INDEX)),
            ArtifactFile::new("index.d.ts", CSS_INDEX_DTS),
        ],
    ))
}
