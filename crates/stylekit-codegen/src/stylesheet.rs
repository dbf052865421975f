//! Rule collection and CSS text rendering.

use std::fmt::Write as _;

use indexmap::IndexMap;
use tracing::warn;

use stylekit_core::utils::{escape_class, hyphenate_property};
use stylekit_core::{Atom, ConditionKind, Conditions, StyleObject};

use crate::tokens::TokenDictionary;

/// Cascade layers, in precedence order.
pub const LAYERS: [&str; 5] = ["reset", "base", "tokens", "recipes", "utilities"];

/// Layer order declaration emitted at the top of bundles.
#[must_use]
pub fn layer_order() -> String {
    format!("@layer {};", LAYERS.join(", "))
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RuleKey {
    conditions: Vec<String>,
    selector: String,
}

/// An ordered set of rules rendered into one layer.
#[derive(Debug)]
pub(crate) struct Stylesheet<'a> {
    conditions: &'a Conditions,
    tokens: &'a TokenDictionary,
    rules: IndexMap<RuleKey, IndexMap<String, String>>,
}

impl<'a> Stylesheet<'a> {
    pub(crate) fn new(conditions: &'a Conditions, tokens: &'a TokenDictionary) -> Self {
        Self {
            conditions,
            tokens,
            rules: IndexMap::new(),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn declare(&mut self, conditions: &[String], selector: String, property: &str, value: &str) {
        let value = self.tokens.resolve_value(property, value);
        self.rules
            .entry(RuleKey {
                conditions: conditions.to_vec(),
                selector,
            })
            .or_default()
            .insert(hyphenate_property(property), value);
    }

    /// Adds an atomic class rule.
    pub(crate) fn add_atom(&mut self, atom: &Atom) {
        let selector = format!(".{}", escape_class(&atom.class_name()));
        self.declare(&atom.conditions, selector, &atom.property, &atom.value);
    }

    /// Adds every declaration of `style` under one selector.
    pub(crate) fn add_style(&mut self, selector: &str, style: &StyleObject) {
        for atom in style.atoms(self.conditions) {
            self.declare(&atom.conditions, selector.to_string(), &atom.property, &atom.value);
        }
    }

    /// Renders the rules, wrapped in `@layer <layer>`.
    ///
    /// Unconditioned rules come first, then rules under breakpoints in
    /// breakpoint order. Rules with unknown conditions are dropped.
    pub(crate) fn render(&self, layer: &str) -> String {
        if self.rules.is_empty() {
            return String::new();
        }

        let mut ordered: Vec<(&RuleKey, &IndexMap<String, String>)> = self.rules.iter().collect();
        ordered.sort_by_key(|(key, _)| self.media_rank(&key.conditions));

        let mut body = String::new();
        for (key, declarations) in ordered {
            if let Some(rule) = self.render_rule(key, declarations) {
                body.push_str(&rule);
            }
        }

        wrap_layer(layer, &body)
    }

    fn media_rank(&self, conditions: &[String]) -> usize {
        conditions
            .iter()
            .filter_map(|c| self.conditions.breakpoint_rank(c))
            .map(|rank| rank + 1)
            .max()
            .unwrap_or(0)
    }

    fn render_rule(&self, key: &RuleKey, declarations: &IndexMap<String, String>) -> Option<String> {
        let mut selector = key.selector.clone();
        let mut at_rules = Vec::new();
        for name in &key.conditions {
            match self.conditions.resolve(name) {
                Some(ConditionKind::Selector(template)) => {
                    selector = apply_template(&template, &selector);
                }
                Some(ConditionKind::AtRule(prelude)) => at_rules.push(prelude),
                None => {
                    warn!("Unknown condition `{name}` for {}; rule skipped", key.selector);
                    return None;
                }
            }
        }

        let mut rule = format!("{selector} {{\n");
        for (property, value) in declarations {
            let _ = writeln!(rule, "  {property}: {value};");
        }
        rule.push_str("}\n");

        for prelude in at_rules.iter().rev() {
            rule = format!("{prelude} {{\n{}}}\n", indent(&rule));
        }
        Some(rule)
    }
}

/// Substitutes `&` in a selector template. Comma-separated selectors are
/// expanded for each part.
fn apply_template(template: &str, selector: &str) -> String {
    selector
        .split(", ")
        .map(|part| template.replace('&', part))
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn indent(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::from("\n")
            } else {
                format!("  {line}\n")
            }
        })
        .collect()
}

/// Wraps CSS in `@layer <name> { ... }`; empty input stays empty.
pub(crate) fn wrap_layer(layer: &str, css: &str) -> String {
    if css.trim().is_empty() {
        return String::new();
    }
    format!("@layer {layer} {{\n{}}}\n", indent(css))
}
