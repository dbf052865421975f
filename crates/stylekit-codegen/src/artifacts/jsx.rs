//! JSX artifacts, emitted only when a JSX framework is configured.

use std::fmt::Write as _;

use stylekit_core::utils::{camel_case, pascal_case};
use stylekit_core::{ArtifactFile, ArtifactIdError, CatalogEntry, JsxFramework};

use super::id;
use crate::context::RenderContext;

const FACTORY: &str = r"import { createElement, forwardRef } from '{framework}'
import { css } from '../css/index.{ext}'
import { cx } from '../css/cx.{ext}'
import { splitProps } from '../helpers.{ext}'
import { isCssProperty } from './is-valid-prop.{ext}'
import { defaultShouldForwardProp, getDisplayName } from './factory-helper.{ext}'

function styledFn(Dynamic, recipe, options = {}) {
  const shouldForwardProp = options.shouldForwardProp ?? defaultShouldForwardProp

  const StyledComponent = forwardRef(function StyledComponent(props, ref) {
    const { as: Element = Dynamic, className, css: cssProp, ...rest } = props
    const [styleProps, forwardedProps] = splitProps(rest, Object.keys(rest).filter(isCssProperty))
    const elementProps = Object.fromEntries(
      Object.entries(forwardedProps).filter(([key]) => shouldForwardProp(key)),
    )
    const classes = cx(recipe ? recipe(forwardedProps) : '', css(styleProps, cssProp), className)
    return createElement(Element, { ref, ...elementProps, className: classes })
  })

  StyledComponent.displayName = `styled.${getDisplayName(Dynamic)}`
  return StyledComponent
}

function createJsxFactory() {
  const cache = new Map()
  return new Proxy(styledFn, {
    apply(_, __, args) {
      return styledFn(...args)
    },
    get(_, element) {
      if (!cache.has(element)) cache.set(element, styledFn(element))
      return cache.get(element)
    },
  })
}

export const styled = createJsxFactory()
";

const FACTORY_DTS: &str = r"import type { ElementType } from '{framework}'
import type { StyledComponent } from '../types/jsx'

type JsxFactory = {
  <T extends ElementType>(component: T, recipe?: (props: any) => string): StyledComponent<T>
} & {
  [K in keyof JSX.IntrinsicElements]: StyledComponent<K>
}

export declare const styled: JsxFactory
";

const FACTORY_HELPER: &str = r"import { isCssProperty } from './is-valid-prop.{ext}'

export const defaultShouldForwardProp = (prop) => !isCssProperty(prop)

export const getDisplayName = (Component) => {
  if (typeof Component === 'string') return Component
  return Component?.displayName || Component?.name || 'Component'
}
";

const CSS_PROPERTIES: &[&str] = &[
    "alignItems", "alignSelf", "animation", "aspectRatio", "background", "backgroundColor",
    "border", "borderColor", "borderRadius", "borderStyle", "borderWidth", "bottom", "boxShadow",
    "color", "columnGap", "cursor", "display", "flex", "flexBasis", "flexDirection", "flexWrap",
    "fontFamily", "fontSize", "fontWeight", "gap", "gridColumn", "gridRow",
    "gridTemplateColumns", "height", "inset", "justifyContent", "justifySelf", "left",
    "letterSpacing", "lineHeight", "margin", "marginBottom", "marginInline", "marginLeft",
    "marginRight", "marginTop", "maxHeight", "maxWidth", "minHeight", "minWidth", "opacity",
    "outline", "overflow", "padding", "paddingBottom", "paddingInline", "paddingLeft",
    "paddingRight", "paddingTop", "position", "right", "rowGap", "textAlign", "top", "transform",
    "transition", "whiteSpace", "width", "zIndex",
];

fn is_valid_prop_js(ctx: &RenderContext<'_>) -> String {
    let mut props: Vec<String> = CSS_PROPERTIES.iter().map(|p| format!("'{p}'")).collect();
    props.extend(ctx.conditions.names().map(|c| format!("'_{c}'")));
    props.extend(ctx.conditions.breakpoints().map(|b| format!("'{b}'")));
    format!(
        "const cssProperties = new Set([\n  {}\n])\n\nexport const isCssProperty = (prop) => cssProperties.has(prop) || prop.startsWith('--')\n",
        props.join(",\n  ")
    )
}

fn render(template: &str, ctx: &RenderContext<'_>, framework: JsxFramework) -> String {
    ctx.render(template)
        .replace("{framework}", framework.import_source())
}

fn component_name(ctx: &RenderContext<'_>, name: &str) -> String {
    ctx.patterns
        .get(name)
        .and_then(|p| p.jsx.clone())
        .unwrap_or_else(|| pascal_case(name))
}

fn pattern_component_js(ctx: &RenderContext<'_>, framework: JsxFramework, name: &str) -> String {
    let component = component_name(ctx, name);
    let fn_name = camel_case(name);
    let properties = ctx
        .patterns
        .get(name)
        .map(|p| serde_json::to_string(&p.properties).unwrap_or_else(|_| "[]".into()))
        .unwrap_or_else(|| "[]".into());
    format!(
        "import {{ createElement, forwardRef }} from '{source}'
import {{ splitProps }} from '../helpers.{ext}'
import {{ {fn_name} }} from '../patterns/{name}.{ext}'
import {{ styled }} from './factory.{ext}'

export const {component} = forwardRef(function {component}(props, ref) {{
  const [patternProps, restProps] = splitProps(props, {properties})
  const className = {fn_name}(patternProps)
  return createElement(styled.div, {{ ref, ...restProps, className: [className, restProps.className].filter(Boolean).join(' ') }})
}})
",
        source = framework.import_source(),
        ext = ctx.ext().as_str()
    )
}

fn pattern_component_dts(ctx: &RenderContext<'_>, framework: JsxFramework, name: &str) -> String {
    let component = component_name(ctx, name);
    let props = format!("{}Properties", pascal_case(name));
    format!(
        "import type {{ FunctionComponent }} from '{source}'
import type {{ {props} }} from '../patterns/{name}'
import type {{ StyledProps }} from '../types/jsx'

export declare const {component}: FunctionComponent<{props} & StyledProps<'div'>>
",
        source = framework.import_source()
    )
}

fn flat(
    ctx: &RenderContext<'_>,
    name: &str,
    build: impl FnOnce(JsxFramework) -> Vec<ArtifactFile>,
) -> Result<CatalogEntry, ArtifactIdError> {
    let files = ctx.jsx().map(build).unwrap_or_default();
    Ok(CatalogEntry::flat(id(name)?, &["jsx"], files))
}

pub(super) fn is_valid_prop(ctx: &RenderContext<'_>) -> Result<CatalogEntry, ArtifactIdError> {
    flat(ctx, "jsx-is-valid-prop", |_| {
        vec![ArtifactFile::new(ctx.file("is-valid-prop"), is_valid_prop_js(ctx))]
    })
}

pub(super) fn factory(ctx: &RenderContext<'_>) -> Result<CatalogEntry, ArtifactIdError> {
    flat(ctx, "jsx-factory", |framework| {
        vec![
            ArtifactFile::new(ctx.file("factory"), render(FACTORY, ctx, framework)),
            ArtifactFile::new("factory.d.ts", render(FACTORY_DTS, ctx, framework)),
        ]
    })
}

pub(super) fn helpers(ctx: &RenderContext<'_>) -> Result<CatalogEntry, ArtifactIdError> {
    flat(ctx, "jsx-helpers", |framework| {
        vec![ArtifactFile::new(
            ctx.file("factory-helper"),
            render(FACTORY_HELPER, ctx, framework),
        )]
    })
}

pub(super) fn patterns(ctx: &RenderContext<'_>) -> Result<CatalogEntry, ArtifactIdError> {
    flat(ctx, "jsx-patterns", |framework| {
        ctx.patterns
            .keys()
            .flat_map(|name| {
                [
                    ArtifactFile::new(ctx.file(name), pattern_component_js(ctx, framework, name)),
                    ArtifactFile::new(
                        format!("{name}.d.ts"),
                        pattern_component_dts(ctx, framework, name),
                    ),
                ]
            })
            .collect()
    })
}

pub(super) fn patterns_index(ctx: &RenderContext<'_>) -> Result<CatalogEntry, ArtifactIdError> {
    flat(ctx, "jsx-patterns-index", |_| {
        let mut js = format!("export * from './{}'\n", ctx.file("factory"));
        let mut dts = String::from("export * from './factory'\n");
        for name in ctx.patterns.keys() {
            let _ = writeln!(js, "export * from './{}'", ctx.file(name));
            let _ = writeln!(dts, "export * from './{name}'");
        }
        vec![
            ArtifactFile::new(ctx.file("index"), js),
            ArtifactFile::new("index.d.ts", dts),
        ]
    })
}
