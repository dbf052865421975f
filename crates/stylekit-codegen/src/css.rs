//! Root CSS artifacts, extracted CSS and bundle assembly.

use std::fmt::{self, Write as _};
use std::str::FromStr;

use tracing::debug;

use stylekit_core::utils::{class_segment, escape_class, hyphenate_property};
use stylekit_core::{Atom, StyleResult, StyleValue};

use crate::context::RenderContext;
use crate::stylesheet::{indent, layer_order, wrap_layer, Stylesheet};
use crate::Generator;

const RESET: &str = r"*, *::before, *::after {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
  border-width: 0;
  border-style: solid;
}

html {
  line-height: 1.5;
  -webkit-text-size-adjust: 100%;
  font-family: system-ui, sans-serif;
}

img, svg, video, canvas, audio, iframe, embed, object {
  display: block;
  vertical-align: middle;
  max-width: 100%;
  height: auto;
}

button, input, optgroup, select, textarea {
  font: inherit;
  color: inherit;
  background: transparent;
}

ol, ul {
  list-style: none;
}

h1, h2, h3, h4, h5, h6 {
  font-size: inherit;
  font-weight: inherit;
}

a {
  color: inherit;
  text-decoration: inherit;
}
";

/// A root CSS artifact that can be generated on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CssArtifactKind {
    /// The CSS reset.
    Preflight,
    /// Token custom properties.
    Tokens,
    /// Static utility classes.
    Static,
    /// Global styles.
    Global,
    /// Keyframe definitions.
    Keyframes,
}

impl CssArtifactKind {
    /// Every kind, in bundle order.
    pub const ALL: [Self; 5] = [
        Self::Preflight,
        Self::Global,
        Self::Static,
        Self::Tokens,
        Self::Keyframes,
    ];

    /// Returns the name used on the command line.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Preflight => "preflight",
            Self::Tokens => "tokens",
            Self::Static => "static",
            Self::Global => "global",
            Self::Keyframes => "keyframes",
        }
    }

    /// Path of the artifact relative to the output root.
    #[must_use]
    pub fn file(self) -> &'static str {
        match self {
            Self::Preflight => "reset.css",
            Self::Tokens => "tokens/index.css",
            Self::Static => "static.css",
            Self::Global => "global.css",
            Self::Keyframes => "tokens/keyframes.css",
        }
    }
}

impl fmt::Display for CssArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognized CSS artifact name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown css artifact type `{0}`")]
pub struct UnknownCssArtifact(pub String);

impl FromStr for CssArtifactKind {
    type Err = UnknownCssArtifact;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownCssArtifact(s.to_string()))
    }
}

/// A piece of CSS appended to a bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CssChunk {
    /// CSS text included as is.
    Inline(String),
    /// A file imported by path relative to the bundle.
    Import(String),
}

pub(crate) fn reset_css() -> String {
    wrap_layer("reset", RESET)
}

pub(crate) fn token_css(ctx: &RenderContext<'_>) -> String {
    if ctx.tokens.is_empty() {
        return String::new();
    }
    let mut body = String::from(":root {\n");
    for token in ctx.tokens.iter() {
        let _ = writeln!(body, "  {}: {};", token.var_name(), token.value);
    }
    body.push_str("}\n");
    wrap_layer("tokens", &body)
}

pub(crate) fn keyframe_css(ctx: &RenderContext<'_>) -> String {
    let mut body = String::new();
    for (name, frames) in &ctx.config.keyframes {
        let mut steps = String::new();
        for (step, value) in frames.iter() {
            let StyleValue::Nested(style) = value else {
                continue;
            };
            let _ = writeln!(steps, "{step} {{");
            for (property, value) in style.iter() {
                let value = ctx.tokens.resolve_value(property, &value.to_string());
                let _ = writeln!(steps, "  {}: {value};", hyphenate_property(property));
            }
            steps.push_str("}\n");
        }
        let _ = write!(body, "@keyframes {name} {{\n{}}}\n", indent(&steps));
    }
    wrap_layer("tokens", &body)
}

pub(crate) fn global_css(ctx: &RenderContext<'_>) -> String {
    let mut sheet = Stylesheet::new(ctx.conditions, ctx.tokens);
    for (selector, style) in &ctx.config.global_css {
        sheet.add_style(selector, style);
    }
    sheet.render("base")
}

pub(crate) fn static_css(ctx: &RenderContext<'_>) -> String {
    let mut sheet = Stylesheet::new(ctx.conditions, ctx.tokens);
    for rule in &ctx.config.static_css {
        for value in &rule.values {
            sheet.add_atom(&Atom::new(Vec::new(), &rule.property, value));
            for condition in &rule.conditions {
                sheet.add_atom(&Atom::new(vec![condition.clone()], &rule.property, value));
            }
        }
    }
    sheet.render("utilities")
}

/// Renders the CSS for extracted style data, or `None` when there is none.
pub(crate) fn parser_css(ctx: &RenderContext<'_>, result: &StyleResult) -> Option<String> {
    let mut utilities = Stylesheet::new(ctx.conditions, ctx.tokens);
    for atom in result.atoms() {
        utilities.add_atom(atom);
    }

    for (name, usages) in result.patterns() {
        let Some(pattern) = ctx.patterns.get(name) else {
            debug!("Skipping usage of unknown pattern `{name}`");
            continue;
        };
        for args in usages {
            let style = pattern.base.overlay(&pattern.defaults).overlay(args);
            for atom in style.atoms(ctx.conditions) {
                utilities.add_atom(&atom);
            }
        }
    }

    let mut recipes = Stylesheet::new(ctx.conditions, ctx.tokens);
    for (name, selections) in result.recipes() {
        let Some(recipe) = ctx.config.recipes.get(name) else {
            debug!("Skipping usage of unknown recipe `{name}`");
            continue;
        };
        let class = recipe.class_name_for(name);
        recipes.add_style(&format!(".{}", escape_class(class)), &recipe.base);

        let defaults = recipe
            .default_variants
            .iter()
            .map(|(variant, value)| (variant.clone(), value.clone()));
        for (variant, value) in defaults.chain(selections.iter().cloned()) {
            let Some(style) = recipe.variants.get(&variant).and_then(|v| v.get(&value)) else {
                continue;
            };
            let variant_class = format!("{class}--{variant}_{}", class_segment(&value));
            recipes.add_style(&format!(".{}", escape_class(&variant_class)), style);
        }
    }

    if utilities.is_empty() && recipes.is_empty() {
        return None;
    }

    let css = [recipes.render("recipes"), utilities.render("utilities")]
        .into_iter()
        .filter(|css| !css.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    (!css.is_empty()).then_some(css)
}

impl Generator {
    /// The CSS reset, regardless of the `preflight` setting.
    #[must_use]
    pub fn reset_css(&self) -> String {
        reset_css()
    }

    /// Token custom properties on `:root`.
    #[must_use]
    pub fn token_css(&self) -> String {
        token_css(&self.render_context())
    }

    /// `@keyframes` rules.
    #[must_use]
    pub fn keyframe_css(&self) -> String {
        keyframe_css(&self.render_context())
    }

    /// Global styles.
    #[must_use]
    pub fn global_css(&self) -> String {
        global_css(&self.render_context())
    }

    /// Static utility classes.
    #[must_use]
    pub fn static_css(&self) -> String {
        static_css(&self.render_context())
    }

    /// Renders one root CSS artifact.
    #[must_use]
    pub fn css_artifact(&self, kind: CssArtifactKind) -> String {
        match kind {
            CssArtifactKind::Preflight => self.reset_css(),
            CssArtifactKind::Tokens => self.token_css(),
            CssArtifactKind::Static => self.static_css(),
            CssArtifactKind::Global => self.global_css(),
            CssArtifactKind::Keyframes => self.keyframe_css(),
        }
    }

    /// Renders extracted style data; `None` if nothing renders.
    #[must_use]
    pub fn parser_css(&self, result: &StyleResult) -> Option<String> {
        parser_css(&self.render_context(), result)
    }

    /// Assembles a stylesheet bundle.
    ///
    /// Starts with the layer order. With `resolve`, root artifacts are
    /// inlined; otherwise they are `@import`ed from the output root. The
    /// reset is only included when `preflight` is on. Chunks follow in order.
    #[must_use]
    pub fn css(&self, chunks: &[CssChunk], resolve: bool) -> String {
        let kinds = CssArtifactKind::ALL
            .into_iter()
            .filter(|kind| *kind != CssArtifactKind::Preflight || self.config().preflight);

        let mut sections = vec![layer_order()];
        let mut imports = Vec::new();
        for kind in kinds {
            if resolve {
                let css = self.css_artifact(kind);
                if !css.is_empty() {
                    sections.push(css);
                }
            } else {
                imports.push(format!("@import './{}';", kind.file()));
            }
        }

        let mut inline = Vec::new();
        for chunk in chunks {
            match chunk {
                CssChunk::Inline(css) if !css.trim().is_empty() => inline.push(css.clone()),
                CssChunk::Inline(_) => {}
                CssChunk::Import(path) => imports.push(format!("@import './{path}';")),
            }
        }

        if !imports.is_empty() {
            sections.insert(1, imports.join("\n"));
        }
        sections.extend(inline);

        let mut css = sections.join("\n\n");
        css.push('\n');
        css
    }
}
