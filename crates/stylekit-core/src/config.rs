//! Configuration types for stylekit.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::artifact::ArtifactId;
use crate::conditions::Conditions;
use crate::style::StyleObject;

/// Top-level configuration for stylekit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Working directory that source paths are resolved against.
    pub cwd: PathBuf,

    /// Output directory for generated artifacts, relative to `cwd`.
    pub outdir: PathBuf,

    /// Glob patterns of source files to extract styles from.
    pub include: Vec<String>,

    /// Glob patterns to exclude from extraction.
    pub exclude: Vec<String>,

    /// Minify generated CSS.
    pub minify: bool,

    /// Empty the output directory before emitting artifacts.
    pub clean: bool,

    /// Only emit token artifacts (css variables and token lookup).
    pub emit_tokens_only: bool,

    /// Emit a `package.json` in the output directory.
    pub emit_package: bool,

    /// Emit the CSS reset.
    pub preflight: bool,

    /// Extension of generated JavaScript files.
    pub out_extension: OutExtension,

    /// Framework for JSX component artifacts; none disables them.
    pub jsx_framework: Option<JsxFramework>,

    /// Include the built-in layout patterns.
    pub base_preset: bool,

    /// Named selector conditions (`hover = "&:hover"`).
    pub conditions: IndexMap<String, String>,

    /// Breakpoint names to min-width values.
    pub breakpoints: IndexMap<String, String>,

    /// Design tokens grouped by category.
    pub tokens: TokenTree,

    /// Keyframe definitions (`spin = { from = {..}, to = {..} }`).
    pub keyframes: IndexMap<String, StyleObject>,

    /// Global styles keyed by selector.
    pub global_css: IndexMap<String, StyleObject>,

    /// Utility classes to always generate.
    pub static_css: Vec<StaticRule>,

    /// Recipe definitions keyed by dash-case name.
    pub recipes: IndexMap<String, RecipeConfig>,

    /// Pattern definitions keyed by dash-case name.
    pub patterns: IndexMap<String, PatternConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cwd: PathBuf::from("."),
            outdir: PathBuf::from("styled-system"),
            include: vec!["src/**/*.{js,jsx,ts,tsx}".to_string()],
            exclude: Vec::new(),
            minify: false,
            clean: false,
            emit_tokens_only: false,
            emit_package: false,
            preflight: false,
            out_extension: OutExtension::default(),
            jsx_framework: None,
            base_preset: true,
            conditions: default_conditions(),
            breakpoints: default_breakpoints(),
            tokens: TokenTree::default(),
            keyframes: IndexMap::new(),
            global_css: IndexMap::new(),
            static_css: Vec::new(),
            recipes: IndexMap::new(),
            patterns: IndexMap::new(),
        }
    }
}

fn default_conditions() -> IndexMap<String, String> {
    [
        ("hover", "&:hover"),
        ("focus", "&:focus"),
        ("focus-visible", "&:focus-visible"),
        ("active", "&:active"),
        ("disabled", "&:disabled"),
        ("first", "&:first-child"),
        ("last", "&:last-child"),
        ("dark", ".dark &"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn default_breakpoints() -> IndexMap<String, String> {
    [
        ("sm", "640px"),
        ("md", "768px"),
        ("lg", "1024px"),
        ("xl", "1280px"),
        ("2xl", "1536px"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks cross-field invariants.
    ///
    /// # Errors
    ///
    /// Returns every problem found, not only the first.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        for (kind, names) in [
            ("recipes", self.recipes.keys().collect::<Vec<_>>()),
            ("patterns", self.patterns.keys().collect::<Vec<_>>()),
        ] {
            for name in names {
                if name.contains('.') || ArtifactId::new(name).is_err() {
                    errors.push(format!(
                        "{kind}.{name}: name must be dash-case ([a-z0-9-])"
                    ));
                }
            }
        }

        for (name, template) in &self.conditions {
            if !template.contains('&') && !template.starts_with('@') {
                errors.push(format!(
                    "conditions.{name}: `{template}` must contain `&` or be an at-rule"
                ));
            }
        }

        for (name, width) in &self.breakpoints {
            if width.trim().is_empty() {
                errors.push(format!("breakpoints.{name}: value must not be empty"));
            }
        }

        for (i, rule) in self.static_css.iter().enumerate() {
            if rule.property.is_empty() {
                errors.push(format!("static_css[{i}]: property must not be empty"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Returns the condition set described by this configuration.
    #[must_use]
    pub fn conditions(&self) -> Conditions {
        Conditions::new(self.conditions.clone(), self.breakpoints.clone())
    }

    /// Returns the output directory resolved against `cwd`.
    #[must_use]
    pub fn out_root(&self) -> PathBuf {
        if self.outdir.is_absolute() {
            self.outdir.clone()
        } else {
            self.cwd.join(&self.outdir)
        }
    }
}

/// Extension of generated JavaScript modules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutExtension {
    /// `.mjs`
    #[default]
    Mjs,
    /// `.js`
    Js,
}

impl OutExtension {
    /// Returns the extension without the dot.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mjs => "mjs",
            Self::Js => "js",
        }
    }

    /// Appends the extension to a file stem.
    #[must_use]
    pub fn file(self, stem: &str) -> String {
        format!("{stem}.{}", self.as_str())
    }
}

/// Framework targeted by JSX artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsxFramework {
    /// React.
    React,
    /// Preact (through `preact/compat`).
    Preact,
}

impl JsxFramework {
    /// Module that `createElement` and `forwardRef` are imported from.
    #[must_use]
    pub fn import_source(self) -> &'static str {
        match self {
            Self::React => "react",
            Self::Preact => "preact/compat",
        }
    }
}

/// Design tokens: category → nested groups → values.
pub type TokenTree = IndexMap<String, TokenNode>;

/// A node in the token tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenNode {
    /// A token value.
    Value(String),
    /// A group of nested tokens.
    Group(IndexMap<String, TokenNode>),
}

/// Utility classes generated regardless of source usage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticRule {
    /// Property name (camelCase).
    pub property: String,
    /// Values to generate.
    pub values: Vec<String>,
    /// Conditions to generate each value under, in addition to the base.
    #[serde(default)]
    pub conditions: Vec<String>,
}

/// A multi-variant recipe.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecipeConfig {
    /// Class name prefix; defaults to the recipe name.
    pub class_name: Option<String>,
    /// Human-readable description used in generated docs.
    pub description: Option<String>,
    /// Styles applied whenever the recipe is used.
    pub base: StyleObject,
    /// Variant name → variant value → styles.
    pub variants: IndexMap<String, IndexMap<String, StyleObject>>,
    /// Variant selections used when a call omits them.
    pub default_variants: IndexMap<String, String>,
}

impl RecipeConfig {
    /// Returns the class name prefix for a recipe called `name`.
    #[must_use]
    pub fn class_name_for<'a>(&'a self, name: &'a str) -> &'a str {
        self.class_name.as_deref().unwrap_or(name)
    }
}

/// A layout pattern: base styles plus caller-supplied properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    /// Human-readable description used in generated docs.
    pub description: Option<String>,
    /// Properties the pattern accepts (typed in generated declarations).
    pub properties: Vec<String>,
    /// Styles always applied.
    pub base: StyleObject,
    /// Property defaults, overridden by call arguments.
    pub defaults: StyleObject,
    /// Name of the JSX component; defaults to the PascalCase name.
    pub jsx: Option<String>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// Semantically invalid configuration.
    #[error("configuration validation errors:\n{}", format_errors(.0))]
    Validation(Vec<String>),
}

fn format_errors(errors: &[String]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleValue;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.outdir, PathBuf::from("styled-system"));
        assert_eq!(config.out_extension, OutExtension::Mjs);
        assert!(config.base_preset);
        assert!(!config.preflight);
        assert!(config.conditions.contains_key("hover"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_config() {
        let toml = r##"
outdir = "generated"
minify = true
jsx_framework = "react"
out_extension = "js"

[tokens.colors.red]
500 = "#ef4444"

[recipes.button-style]
description = "A button"

[recipes.button-style.base]
display = "inline-flex"

[recipes.button-style.variants.size.sm]
padding = "2"

[recipes.button-style.default_variants]
size = "sm"

[patterns.stack.base]
display = "flex"

[keyframes.spin.from]
transform = "rotate(0deg)"

[global_css."html, body"]
margin = 0

[[static_css]]
property = "color"
values = ["red", "blue"]
conditions = ["hover"]
"##;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.outdir, PathBuf::from("generated"));
        assert!(config.minify);
        assert_eq!(config.jsx_framework, Some(JsxFramework::React));
        assert_eq!(config.out_extension.file("css"), "css.js");

        let recipe = &config.recipes["button-style"];
        assert_eq!(recipe.class_name_for("button-style"), "button-style");
        assert_eq!(recipe.variants["size"]["sm"].len(), 1);
        assert_eq!(recipe.default_variants["size"], "sm");

        assert_eq!(
            config.global_css["html, body"].get("margin"),
            Some(&StyleValue::Number(0.0))
        );
        assert_eq!(config.static_css[0].values.len(), 2);
        assert!(matches!(
            config.tokens.get("colors"),
            Some(TokenNode::Group(_))
        ));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let mut config = Config::default();
        config
            .recipes
            .insert("Button".to_string(), RecipeConfig::default());
        config
            .conditions
            .insert("weird".to_string(), ":hover".to_string());

        match config.validate() {
            Err(ConfigError::Validation(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            Config::parse("outdir = ["),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn out_root_resolves_against_cwd() {
        let config = Config {
            cwd: PathBuf::from("/project"),
            ..Config::default()
        };
        assert_eq!(config.out_root(), PathBuf::from("/project/styled-system"));
    }
}
