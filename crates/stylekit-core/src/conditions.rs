//! Style conditions: named selectors, breakpoints and raw selectors/at-rules.

use indexmap::IndexMap;

/// How a condition wraps a declaration when rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionKind {
    /// A selector template where `&` stands for the class selector.
    Selector(String),
    /// An at-rule prelude wrapping the rule (e.g. `@media print`).
    AtRule(String),
}

/// The set of conditions a project understands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conditions {
    named: IndexMap<String, String>,
    breakpoints: IndexMap<String, String>,
}

impl Conditions {
    /// Creates conditions from named selector templates and breakpoints.
    #[must_use]
    pub fn new(named: IndexMap<String, String>, breakpoints: IndexMap<String, String>) -> Self {
        Self { named, breakpoints }
    }

    /// Returns the condition name for a style object key, or `None` when the
    /// key is a property.
    ///
    /// `_hover` → `hover`, a breakpoint name maps to itself, keys containing
    /// `&` or starting with `@` are kept verbatim.
    #[must_use]
    pub fn condition_name(&self, key: &str) -> Option<String> {
        if let Some(name) = key.strip_prefix('_') {
            return Some(name.to_string());
        }
        if self.breakpoints.contains_key(key) || key.contains('&') || key.starts_with('@') {
            return Some(key.to_string());
        }
        None
    }

    /// Resolves a condition name to its rendering form.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<ConditionKind> {
        if let Some(template) = self.named.get(name) {
            return Some(if template.starts_with('@') {
                ConditionKind::AtRule(template.clone())
            } else {
                ConditionKind::Selector(template.clone())
            });
        }
        if let Some(min_width) = self.breakpoints.get(name) {
            return Some(ConditionKind::AtRule(format!(
                "@media screen and (min-width: {min_width})"
            )));
        }
        if name.contains('&') {
            return Some(ConditionKind::Selector(name.to_string()));
        }
        if name.starts_with('@') {
            return Some(ConditionKind::AtRule(name.to_string()));
        }
        None
    }

    /// Returns the position of a breakpoint, used to order media queries.
    #[must_use]
    pub fn breakpoint_rank(&self, name: &str) -> Option<usize> {
        self.breakpoints.get_index_of(name)
    }

    /// Returns the named condition keys in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.named.keys().map(String::as_str)
    }

    /// Returns the breakpoint names in declaration order.
    pub fn breakpoints(&self) -> impl Iterator<Item = &str> {
        self.breakpoints.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conditions() -> Conditions {
        Conditions::new(
            [
                ("hover".to_string(), "&:hover".to_string()),
                ("dark".to_string(), ".dark &".to_string()),
                ("print".to_string(), "@media print".to_string()),
            ]
            .into_iter()
            .collect(),
            [("md".to_string(), "768px".to_string())]
                .into_iter()
                .collect(),
        )
    }

    #[test]
    fn underscore_keys_are_conditions() {
        assert_eq!(conditions().condition_name("_hover").as_deref(), Some("hover"));
    }

    #[test]
    fn property_keys_are_not_conditions() {
        assert_eq!(conditions().condition_name("color"), None);
    }

    #[test]
    fn breakpoints_resolve_to_media_queries() {
        let c = conditions();
        assert_eq!(c.condition_name("md").as_deref(), Some("md"));
        assert_eq!(
            c.resolve("md"),
            Some(ConditionKind::AtRule(
                "@media screen and (min-width: 768px)".into()
            ))
        );
        assert_eq!(c.breakpoint_rank("md"), Some(0));
    }

    #[test]
    fn raw_selectors_and_at_rules_resolve_verbatim() {
        let c = conditions();
        assert_eq!(
            c.resolve("&:focus-within"),
            Some(ConditionKind::Selector("&:focus-within".into()))
        );
        assert_eq!(
            c.resolve("@supports (display: grid)"),
            Some(ConditionKind::AtRule("@supports (display: grid)".into()))
        );
        assert_eq!(c.resolve("print"), Some(ConditionKind::AtRule("@media print".into())));
    }

    #[test]
    fn unknown_condition_does_not_resolve() {
        assert_eq!(conditions().resolve("unknown"), None);
    }
}
