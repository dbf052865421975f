//! Token dictionary: flattened design tokens and value resolution.

use indexmap::IndexMap;
use stylekit_core::{TokenNode, TokenTree};

/// A flattened design token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Dotted path (`colors.red.500`).
    pub path: String,
    /// First path segment (`colors`).
    pub category: String,
    /// Raw value.
    pub value: String,
}

impl Token {
    /// CSS custom property name (`--colors-red-500`).
    #[must_use]
    pub fn var_name(&self) -> String {
        var_name(&self.path)
    }

    /// `var(--colors-red-500)`.
    #[must_use]
    pub fn var_ref(&self) -> String {
        format!("var({})", self.var_name())
    }
}

fn var_name(path: &str) -> String {
    format!("--{}", path.replace(['.', ' '], "-"))
}

/// Design tokens keyed by dotted path, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct TokenDictionary {
    tokens: IndexMap<String, Token>,
}

impl TokenDictionary {
    /// Flattens a token tree.
    #[must_use]
    pub fn from_tree(tree: &TokenTree) -> Self {
        let mut tokens = IndexMap::new();
        for (category, node) in tree {
            flatten(category, category, node, &mut tokens);
        }
        Self { tokens }
    }

    /// Looks up a token by path.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Token> {
        self.tokens.get(path)
    }

    /// Iterates tokens in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.values()
    }

    /// Returns the number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if there are no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns the distinct categories in declaration order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for token in self.tokens.values() {
            if !seen.contains(&token.category.as_str()) {
                seen.push(&token.category);
            }
        }
        seen
    }

    /// Resolves token references in a declaration value.
    ///
    /// `{colors.red.500}` anywhere in the value is replaced by its variable.
    /// A bare path (`red.500`) is resolved within the property's category.
    #[must_use]
    pub fn resolve_value(&self, property: &str, value: &str) -> String {
        if let Some(token) = category_for(property)
            .and_then(|category| self.get(&format!("{category}.{value}")))
        {
            return token.var_ref();
        }
        self.expand_references(value)
    }

    fn expand_references(&self, value: &str) -> String {
        let mut out = String::with_capacity(value.len());
        let mut rest = value;
        while let Some(start) = rest.find('{') {
            let Some(len) = rest[start..].find('}') else {
                break;
            };
            let path = &rest[start + 1..start + len];
            out.push_str(&rest[..start]);
            match self.get(path) {
                Some(token) => out.push_str(&token.var_ref()),
                None => out.push_str(&rest[start..=start + len]),
            }
            rest = &rest[start + len + 1..];
        }
        out.push_str(rest);
        out
    }
}

fn flatten(category: &str, path: &str, node: &TokenNode, out: &mut IndexMap<String, Token>) {
    match node {
        TokenNode::Value(value) => {
            out.insert(
                path.to_string(),
                Token {
                    path: path.to_string(),
                    category: category.to_string(),
                    value: value.clone(),
                },
            );
        }
        TokenNode::Group(children) => {
            for (key, child) in children {
                // `DEFAULT` names the group itself (`colors.primary`).
                let child_path = if key == "DEFAULT" {
                    path.to_string()
                } else {
                    format!("{path}.{key}")
                };
                flatten(category, &child_path, child, out);
            }
        }
    }
}

/// Maps a camelCase property to the token category its bare values use.
#[must_use]
pub fn category_for(property: &str) -> Option<&'static str> {
    let category = match property {
        "color" | "background" | "backgroundColor" | "borderColor" | "outlineColor" | "fill"
        | "stroke" | "accentColor" | "caretColor" | "textDecorationColor" => "colors",
        "gap" | "rowGap" | "columnGap" | "inset" | "top" | "right" | "bottom" | "left" => {
            "spacing"
        }
        p if p.starts_with("padding") || p.starts_with("margin") || p.starts_with("scroll") => {
            "spacing"
        }
        "width" | "height" | "minWidth" | "maxWidth" | "minHeight" | "maxHeight" | "flexBasis" => {
            "sizes"
        }
        "fontSize" => "fontSizes",
        "fontWeight" => "fontWeights",
        "fontFamily" => "fonts",
        "lineHeight" => "lineHeights",
        "letterSpacing" => "letterSpacings",
        "borderRadius" => "radii",
        "boxShadow" | "textShadow" => "shadows",
        "zIndex" => "zIndex",
        "opacity" => "opacity",
        "animation" => "animations",
        "transitionDuration" | "animationDuration" => "durations",
        "transitionTimingFunction" | "animationTimingFunction" => "easings",
        _ => return None,
    };
    Some(category)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionary() -> TokenDictionary {
        let config = stylekit_core::Config::parse(
            r##"
[tokens.colors.red]
500 = "#ef4444"

[tokens.colors.primary]
DEFAULT = "#2563eb"

[tokens.spacing]
2 = "0.5rem"
"0.5" = "0.125rem"
"##,
        )
        .unwrap();
        TokenDictionary::from_tree(&config.tokens)
    }

    #[test]
    fn flattens_tree_with_default_keys() {
        let dict = dictionary();
        let paths: Vec<&str> = dict.iter().map(|t| t.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["colors.red.500", "colors.primary", "spacing.2", "spacing.0.5"]
        );
        assert_eq!(dict.categories(), vec!["colors", "spacing"]);
    }

    #[test]
    fn var_names_join_segments() {
        let dict = dictionary();
        assert_eq!(dict.get("colors.red.500").unwrap().var_name(), "--colors-red-500");
        assert_eq!(dict.get("spacing.0.5").unwrap().var_name(), "--spacing-0-5");
    }

    #[test]
    fn resolves_bare_paths_by_category() {
        let dict = dictionary();
        assert_eq!(dict.resolve_value("color", "red.500"), "var(--colors-red-500)");
        assert_eq!(dict.resolve_value("paddingX", "2"), "var(--spacing-2)");
        assert_eq!(dict.resolve_value("display", "red.500"), "red.500");
        assert_eq!(dict.resolve_value("color", "tomato"), "tomato");
    }

    #[test]
    fn resolves_braced_references() {
        let dict = dictionary();
        assert_eq!(
            dict.resolve_value("border", "1px solid {colors.primary}"),
            "1px solid var(--colors-primary)"
        );
        assert_eq!(dict.resolve_value("border", "{unknown.path}"), "{unknown.path}");
        assert_eq!(dict.resolve_value("content", "\"{\""), "\"{\"");
    }
}
