//! JavaScript/TypeScript style extractor using Tree-sitter.

use indexmap::IndexMap;
use std::path::Path;
use tracing::debug;
use tree_sitter::{Language, Node, Parser, Tree};

use stylekit_core::utils::{camel_case, pascal_case};
use stylekit_core::{Conditions, Config, ExtractError, SourceParser, StyleObject, StyleResult};

use crate::literals::{key_name, object_value, string_value, style_value, text};

/// Grammar used for a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grammar {
    /// Plain TypeScript (`.ts`, `.mts`, `.cts`); no JSX.
    TypeScript,
    /// TSX, also used for JavaScript (`.js`, `.jsx`, `.tsx`, `.mjs`, `.cjs`).
    Tsx,
}

impl Grammar {
    /// File extensions handled by the extractor.
    pub const EXTENSIONS: &'static [&'static str] =
        &["js", "jsx", "ts", "tsx", "mjs", "cjs", "mts", "cts"];

    /// Picks the grammar for a path, or `None` for unsupported extensions.
    #[must_use]
    pub fn for_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "ts" | "mts" | "cts" => Some(Self::TypeScript),
            "js" | "jsx" | "tsx" | "mjs" | "cjs" => Some(Self::Tsx),
            _ => None,
        }
    }

    fn language(self) -> Language {
        match self {
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

/// Extracts `css()`, recipe and pattern usage from JS/TS sources.
#[derive(Debug, Clone, Default)]
pub struct TsStyleParser {
    conditions: Conditions,
    /// camelCase call name → recipe name.
    recipes: IndexMap<String, String>,
    /// camelCase call name → pattern name.
    patterns: IndexMap<String, String>,
    /// JSX component name → pattern name.
    jsx_patterns: IndexMap<String, String>,
}

impl TsStyleParser {
    /// Creates a parser that only recognizes `css()` calls.
    #[must_use]
    pub fn new(conditions: Conditions) -> Self {
        Self {
            conditions,
            ..Self::default()
        }
    }

    /// Creates a parser recognizing every recipe and pattern in `config`.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let mut parser = Self::new(config.conditions());
        for name in config.recipes.keys() {
            parser = parser.recipe(name);
        }
        for (name, pattern) in &config.patterns {
            parser = parser.pattern(name, pattern.jsx.as_deref());
        }
        parser
    }

    /// Registers a recipe by its dash-case name.
    #[must_use]
    pub fn recipe(mut self, name: &str) -> Self {
        self.recipes.insert(camel_case(name), name.to_string());
        self
    }

    /// Registers a pattern by its dash-case name and optional JSX name.
    #[must_use]
    pub fn pattern(mut self, name: &str, jsx: Option<&str>) -> Self {
        self.patterns.insert(camel_case(name), name.to_string());
        let component = jsx.map_or_else(|| pascal_case(name), str::to_string);
        self.jsx_patterns.insert(component, name.to_string());
        self
    }

    /// Extracts style usage from source text.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Parse`] if the syntax tree contains errors.
    pub fn parse_source(
        &self,
        path: &Path,
        source: &str,
        grammar: Grammar,
    ) -> Result<Option<StyleResult>, ExtractError> {
        let tree = Self::parse_tree(path, source, grammar)?;
        let root = tree.root_node();

        if root.has_error() {
            let (offset, length) = first_error(root)
                .map_or((0, 0), |n| (n.start_byte(), n.end_byte() - n.start_byte()));
            return Err(ExtractError::parse(path, source, offset, length));
        }

        let src = source.as_bytes();
        let mut result = StyleResult::for_file(path);

        let mut cursor = root.walk();
        'walk: loop {
            let node = cursor.node();
            match node.kind() {
                "call_expression" => self.visit_call(&node, src, &mut result),
                "jsx_self_closing_element" | "jsx_opening_element" => {
                    self.visit_jsx(&node, src, &mut result);
                }
                _ => {}
            }

            if cursor.goto_first_child() {
                continue;
            }
            while !cursor.goto_next_sibling() {
                if !cursor.goto_parent() {
                    break 'walk;
                }
            }
        }

        debug!(
            "Extracted {} atom(s) from {}",
            result.atom_count(),
            path.display()
        );

        Ok((!result.is_empty()).then_some(result))
    }

    fn parse_tree(path: &Path, source: &str, grammar: Grammar) -> Result<Tree, ExtractError> {
        let mut parser = Parser::new();
        parser
            .set_language(&grammar.language())
            .map_err(|e| ExtractError::Grammar {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        parser
            .parse(source, None)
            .ok_or_else(|| ExtractError::parse(path, source, 0, 0))
    }

    fn visit_call(&self, node: &Node<'_>, src: &[u8], result: &mut StyleResult) {
        let (Some(function), Some(arguments)) = (
            node.child_by_field_name("function"),
            node.child_by_field_name("arguments"),
        ) else {
            return;
        };
        if function.kind() != "identifier" {
            return;
        }
        let name = text(&function, src);

        let mut cursor = arguments.walk();
        let objects: Vec<Node<'_>> = arguments
            .named_children(&mut cursor)
            .filter_map(object_argument)
            .collect();

        if name == "css" {
            for object in &objects {
                result.add_style(&object_value(object, src), &self.conditions);
            }
        } else if let Some(recipe) = self.recipes.get(name) {
            let mut variants = Vec::new();
            if let Some(object) = objects.first() {
                let mut pairs = object.walk();
                for pair in object.named_children(&mut pairs) {
                    if let Some(selection) = variant_pair(&pair, src) {
                        variants.push(selection);
                    }
                }
            }
            result.add_recipe(recipe.clone(), variants);
        } else if let Some(pattern) = self.patterns.get(name) {
            let args = objects
                .first()
                .map(|o| object_value(o, src))
                .unwrap_or_default();
            result.add_pattern(pattern.clone(), args);
        }
    }

    fn visit_jsx(&self, node: &Node<'_>, src: &[u8], result: &mut StyleResult) {
        let Some(name) = node.child_by_field_name("name") else {
            return;
        };
        let Some(pattern) = self.jsx_patterns.get(text(&name, src)) else {
            return;
        };

        let mut args = StyleObject::new();
        let mut cursor = node.walk();
        for attribute in node.named_children(&mut cursor) {
            if attribute.kind() != "jsx_attribute" {
                continue;
            }
            let (Some(key), Some(value)) = (attribute.named_child(0), attribute.named_child(1))
            else {
                continue;
            };
            let value = if value.kind() == "jsx_expression" {
                value.named_child(0).and_then(|inner| style_value(&inner, src))
            } else {
                style_value(&value, src)
            };
            if let Some(value) = value {
                args.insert(text(&key, src), value);
            }
        }
        result.add_pattern(pattern.clone(), args);
    }
}

/// Unwraps `({...})`, `{...} as const` and `{...} satisfies T` to the object.
fn object_argument(node: Node<'_>) -> Option<Node<'_>> {
    match node.kind() {
        "object" => Some(node),
        "parenthesized_expression" | "as_expression" | "satisfies_expression" => {
            object_argument(node.named_child(0)?)
        }
        _ => None,
    }
}

/// A `variant: "value"` pair of a recipe call. Boolean variants are kept as
/// `"true"`/`"false"`.
fn variant_pair(pair: &Node<'_>, src: &[u8]) -> Option<(String, String)> {
    if pair.kind() != "pair" {
        return None;
    }
    let key = key_name(&pair.child_by_field_name("key")?, src)?;
    let value = pair.child_by_field_name("value")?;
    let value = match value.kind() {
        "true" | "false" | "number" => text(&value, src).to_string(),
        _ => string_value(&value, src)?,
    };
    Some((key, value))
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|c| c.has_error())
        .find_map(first_error)
}

impl SourceParser for TsStyleParser {
    fn parse_source_file(&self, path: &Path) -> Result<Option<StyleResult>, ExtractError> {
        let grammar = Grammar::for_path(path).ok_or_else(|| ExtractError::Unsupported {
            path: path.to_path_buf(),
        })?;
        let source = std::fs::read_to_string(path).map_err(|e| ExtractError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.parse_source(path, &source, grammar)
    }
}
