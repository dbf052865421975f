//! Recipe artifacts: the recipe runtime, one module per recipe and the index.

use std::fmt::Write as _;

use indexmap::IndexMap;
use stylekit_core::utils::camel_case;
use stylekit_core::{
    ArtifactCode, ArtifactFile, ArtifactIdError, CatalogEntry, NamespaceChild, OutExtension,
    RecipeConfig,
};

use super::id;
use crate::context::RenderContext;

const CREATE_RECIPE: &str = r"import { compact, splitProps, withoutSpace } from '../helpers.{ext}'

export function createRecipe(name, defaultVariants, variantKeys) {
  const recipe = (props = {}) => {
    const selected = { ...defaultVariants, ...compact(props) }
    const variants = Object.entries(selected)
      .filter(([key]) => variantKeys.includes(key))
      .map(([key, value]) => `${name}--${key}_${withoutSpace(String(value))}`)
    return [name, ...variants].join(' ')
  }
  return Object.assign(recipe, {
    variantKeys,
    splitVariantProps: (props) => splitProps(props, variantKeys),
  })
}
";

const CREATE_RECIPE_DTS: &str = r"export declare function createRecipe<V extends Record<string, string>>(
  name: string,
  defaultVariants: Partial<V>,
  variantKeys: Array<keyof V>,
): (props?: Partial<V>) => string
";

pub(super) fn create_recipe(ctx: &RenderContext<'_>) -> Result<CatalogEntry, ArtifactIdError> {
    Ok(CatalogEntry::flat(
        id("create-recipe")?,
        &["recipes"],
        vec![
            ArtifactFile::new(ctx.file("create-recipe"), ctx.render(CREATE_RECIPE)),
            ArtifactFile::new("create-recipe.d.ts", CREATE_RECIPE_DTS),
        ],
    ))
}

fn index_files(ctx: &RenderContext<'_>) -> Vec<ArtifactFile> {
    let mut js = String::new();
    let mut dts = String::new();
    for name in ctx.config.recipes.keys() {
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
        id("recipes-index")?,
        &["recipes"],
        index_files(ctx),
    ))
}

/// Recipe module; contents are produced on write.
fn recipe_js(name: &str, recipe: &RecipeConfig, ext: OutExtension) -> String {
    let variant_map: IndexMap<&str, Vec<&str>> = recipe
        .variants
        .iter()
        .map(|(variant, values)| (variant.as_str(), values.keys().map(String::as_str).collect()))
        .collect();
    let defaults = serde_json::to_string(&recipe.default_variants).unwrap_or_else(|_| "{}".into());
    let variant_map = serde_json::to_string(&variant_map).unwrap_or_else(|_| "{}".into());
    let fn_name = camel_case(name);
    let class_name = recipe.class_name_for(name);

    format!(
        "import {{ createRecipe }} from './create-recipe.{ext}'

const {fn_name}DefaultVariants = {defaults}
const {fn_name}VariantMap = {variant_map}

export const {fn_name} = Object.assign(
  createRecipe('{class_name}', {fn_name}DefaultVariants, Object.keys({fn_name}VariantMap)),
  {{ variantMap: {fn_name}VariantMap }},
)
",
        ext = ext.as_str()
    )
}

fn recipe_dts(name: &str, recipe: &RecipeConfig) -> String {
    let fn_name = camel_case(name);
    let mut out = String::new();
    if let Some(description) = &recipe.description {
        let _ = writeln!(out, "/** {description} */");
    }
    let _ = writeln!(out, "export type {fn_name}Variant = {{");
    for (variant, values) in &recipe.variants {
        let values: Vec<String> = values.keys().map(|v| format!("'{v}'")).collect();
        let _ = writeln!(out, "  {variant}?: {}", values.join(" | "));
    }
    out.push_str("}\n\n");
    let _ = writeln!(
        out,
        "export declare const {fn_name}: ((props?: {fn_name}Variant) => string) & {{\n  variantKeys: Array<keyof {fn_name}Variant>\n}}"
    );
    out
}

pub(super) fn namespace(ctx: &RenderContext<'_>) -> Result<CatalogEntry, ArtifactIdError> {
    let ns = id("recipes")?;
    let ext = ctx.ext();
    let children = ctx
        .config
        .recipes
        .iter()
        .map(|(name, recipe)| {
            let js = {
                let (name, recipe) = (name.clone(), recipe.clone());
                ArtifactCode::lazy(move || recipe_js(&name, &recipe, ext))
            };
            let dts = {
                let (name, recipe) = (name.clone(), recipe.clone());
                ArtifactCode::lazy(move || recipe_dts(&name, &recipe))
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

    Ok(CatalogEntry::namespace(
        ns,
        &["recipes"],
        children,
        index_files(ctx),
    ))
}
