//! Conversion of literal syntax nodes into style values.

use stylekit_core::{StyleObject, StyleValue};
use tree_sitter::Node;

pub(crate) fn text<'a>(node: &Node<'_>, src: &'a [u8]) -> &'a str {
    node.utf8_text(src).unwrap_or("")
}

/// Returns the contents of a string literal or a template string without
/// substitutions.
pub(crate) fn string_value(node: &Node<'_>, src: &[u8]) -> Option<String> {
    match node.kind() {
        "string" => {
            let raw = text(node, src);
            Some(raw.get(1..raw.len().saturating_sub(1))?.to_string())
        }
        "template_string" => {
            let mut cursor = node.walk();
            let has_substitution = node
                .named_children(&mut cursor)
                .any(|c| c.kind() == "template_substitution");
            if has_substitution {
                return None;
            }
            let raw = text(node, src);
            Some(raw.get(1..raw.len().saturating_sub(1))?.to_string())
        }
        _ => None,
    }
}

fn number_value(node: &Node<'_>, src: &[u8]) -> Option<f64> {
    match node.kind() {
        "number" => text(node, src).replace('_', "").parse().ok(),
        "unary_expression" => {
            let operator = node.child_by_field_name("operator")?;
            let argument = node.child_by_field_name("argument")?;
            let n = number_value(&argument, src)?;
            match text(&operator, src) {
                "-" => Some(-n),
                "+" => Some(n),
                _ => None,
            }
        }
        "parenthesized_expression" => number_value(&node.named_child(0)?, src),
        _ => None,
    }
}

/// Converts a literal expression into a style value.
pub(crate) fn style_value(node: &Node<'_>, src: &[u8]) -> Option<StyleValue> {
    if let Some(s) = string_value(node, src) {
        return Some(StyleValue::Text(s));
    }
    if let Some(n) = number_value(node, src) {
        return Some(StyleValue::Number(n));
    }
    match node.kind() {
        "object" => Some(StyleValue::Nested(object_value(node, src))),
        "parenthesized_expression" | "as_expression" | "satisfies_expression" => {
            style_value(&node.named_child(0)?, src)
        }
        _ => None,
    }
}

/// Returns the key of an object pair.
pub(crate) fn key_name(node: &Node<'_>, src: &[u8]) -> Option<String> {
    match node.kind() {
        "property_identifier" | "number" => Some(text(node, src).to_string()),
        "string" => string_value(node, src),
        _ => None,
    }
}

/// Converts an `object` node, keeping only pairs with literal keys and values.
pub(crate) fn object_value(node: &Node<'_>, src: &[u8]) -> StyleObject {
    let mut object = StyleObject::new();
    let mut cursor = node.walk();
    for pair in node.named_children(&mut cursor) {
        if pair.kind() != "pair" {
            continue;
        }
        let (Some(key), Some(value)) = (
            pair.child_by_field_name("key"),
            pair.child_by_field_name("value"),
        ) else {
            continue;
        };
        if let (Some(key), Some(value)) = (key_name(&key, src), style_value(&value, src)) {
            object.insert(key, value);
        }
    }
    object
}
