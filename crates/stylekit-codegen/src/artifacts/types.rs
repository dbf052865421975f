//! TypeScript declaration artifacts under `types/`.

use std::fmt::Write as _;

use stylekit_core::{ArtifactFile, ArtifactIdError, CatalogEntry};

use super::id;
use crate::context::RenderContext;

const GLOBAL_DTS: &str = r"import type { SystemStyleObject } from './system-types'

declare module 'styled-system' {
  export type Styles = SystemStyleObject
}
";

const INDEX_DTS: &str = r"export * from './system-types'
export * from './conditions'
export * from './recipe'
export * from './pattern'
export * from './composition'
";

const PROP_TYPE_DTS: &str = r"import type { Tokens } from '../tokens/tokens'

type TokenOr<Category extends keyof Tokens, Fallback> = Tokens[Category] | Fallback

export type PropertyValue<T> = T | (string & {}) | number
export type ColorValue = TokenOr<'colors', string>
export type SpacingValue = TokenOr<'spacing', string | number>
";

const STYLE_PROPS_DTS: &str = r"import type { PropertyValue } from './prop-type'
import type * as CSS from './csstype'

export type SystemProperties = {
  [K in keyof CSS.Properties]?: PropertyValue<CSS.Properties[K]>
}
";

const CSSTYPE_DTS: &str = r"export interface Properties {
  [property: string]: string | number | undefined
}

export type Property = keyof Properties
";

const SELECTORS_DTS: &str = r"export type AnySelector = `${string}&${string}`
export type AtRule = `@${string}`
";

const COMPOSITION_DTS: &str = r"import type { SystemStyleObject } from './system-types'

export type CompositionStyles = Record<string, SystemStyleObject>
";

const RECIPE_DTS: &str = r"import type { SystemStyleObject } from './system-types'

export type RecipeVariantRecord = Record<string, Record<string, SystemStyleObject>>

export interface RecipeConfig<V extends RecipeVariantRecord = RecipeVariantRecord> {
  base?: SystemStyleObject
  variants?: V
  defaultVariants?: { [K in keyof V]?: keyof V[K] }
}

export interface RecipeRuntimeFn<V extends RecipeVariantRecord> {
  (props?: { [K in keyof V]?: keyof V[K] }): string
  variantKeys: Array<keyof V>
}

export type RecipeCreatorFn = <V extends RecipeVariantRecord>(config: RecipeConfig<V>) => RecipeRuntimeFn<V>

export interface SlotRecipeConfig<S extends string = string> {
  slots: S[]
  base?: Partial<Record<S, SystemStyleObject>>
  variants?: Record<string, Record<string, Partial<Record<S, SystemStyleObject>>>>
  defaultVariants?: Record<string, string>
}

export type SlotRecipeCreatorFn = <S extends string>(
  config: SlotRecipeConfig<S>,
) => (props?: Record<string, string>) => Record<S, string>
";

const PATTERN_DTS: &str = r"import type { SystemStyleObject } from './system-types'

export interface PatternConfig {
  base?: SystemStyleObject
  defaults?: SystemStyleObject
}
";

const PARTS_DTS: &str = r"export type Part = { selector: string }
export type Parts = Record<string, Part>
";

const JSX_DTS: &str = r"import type { ComponentPropsWithoutRef, ElementType, FunctionComponent } from '{framework}'
import type { SystemStyleObject } from './system-types'

export type StyledProps<T extends ElementType> = ComponentPropsWithoutRef<T> & { css?: SystemStyleObject }
export type StyledComponent<T extends ElementType> = FunctionComponent<StyledProps<T>>
";

fn conditions_dts(ctx: &RenderContext<'_>) -> String {
    let mut out = String::from("export type Conditions = {\n");
    for name in ctx.conditions.names() {
        let _ = writeln!(out, "  '_{name}': string");
    }
    for name in ctx.conditions.breakpoints() {
        let _ = writeln!(out, "  '{name}': string");
    }
    out.push_str("}\n\nexport type Condition = keyof Conditions\n");
    out
}

const SYSTEM_TYPES_DTS: &str = r"import type { Conditions } from './conditions'
import type { SystemProperties } from './style-props'
import type { AnySelector, AtRule } from './selectors'

type Nested<P> = P & {
  [K in keyof Conditions]?: Nested<P>
} & {
  [K in AnySelector | AtRule]?: Nested<P>
}

export type SystemStyleObject = Nested<SystemProperties>
";

pub(super) fn jsx(ctx: &RenderContext<'_>) -> Result<CatalogEntry, ArtifactIdError> {
    let files = ctx
        .jsx()
        .map(|framework| {
            vec![ArtifactFile::new(
                "jsx.d.ts",
                JSX_DTS.replace("{framework}", framework.import_source()),
            )]
        })
        .unwrap_or_default();
    Ok(CatalogEntry::flat(id("types-jsx")?, &["types"], files))
}

pub(super) fn entry(_ctx: &RenderContext<'_>) -> Result<CatalogEntry, ArtifactIdError> {
    Ok(CatalogEntry::flat(
        id("types-entry")?,
        &["types"],
        vec![
            ArtifactFile::new("global.d.ts", GLOBAL_DTS),
            ArtifactFile::new("index.d.ts", INDEX_DTS),
        ],
    ))
}

pub(super) fn styles(_ctx: &RenderContext<'_>) -> Result<CatalogEntry, ArtifactIdError> {
    Ok(CatalogEntry::flat(
        id("types-styles")?,
        &["types"],
        vec![
            ArtifactFile::new("prop-type.d.ts", PROP_TYPE_DTS),
            ArtifactFile::new("style-props.d.ts", STYLE_PROPS_DTS),
        ],
    ))
}

pub(super) fn conditions(ctx: &RenderContext<'_>) -> Result<CatalogEntry, ArtifactIdError> {
    Ok(CatalogEntry::flat(
        id("types-conditions")?,
        &["types"],
        vec![ArtifactFile::new("conditions.d.ts", conditions_dts(ctx))],
    ))
}

pub(super) fn generated(_ctx: &RenderContext<'_>) -> Result<CatalogEntry, ArtifactIdError> {
    Ok(CatalogEntry::flat(
        id("types-gen")?,
        &["types"],
        vec![
            ArtifactFile::new("csstype.d.ts", CSSTYPE_DTS),
            ArtifactFile::new("selectors.d.ts", SELECTORS_DTS),
            ArtifactFile::new("composition.d.ts", COMPOSITION_DTS),
            ArtifactFile::new("recipe.d.ts", RECIPE_DTS),
            ArtifactFile::new("pattern.d.ts", PATTERN_DTS),
            ArtifactFile::new("parts.d.ts", PARTS_DTS),
        ],
    ))
}

pub(super) fn system(_ctx: &RenderContext<'_>) -> Result<CatalogEntry, ArtifactIdError> {
    Ok(CatalogEntry::flat(
        id("types-gen-system")?,
        &["types"],
        vec![ArtifactFile::new("system-types.d.ts", SYSTEM_TYPES_DTS)],
    ))
}
