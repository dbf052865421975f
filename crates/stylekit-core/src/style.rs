//! Style objects, extracted atoms and the per-pass [`StyleResult`].

use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::conditions::Conditions;
use crate::utils::class_segment;

/// A value inside a style object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    /// A string value (`"red"`, `"1px solid"`).
    Text(String),
    /// A numeric value.
    Number(f64),
    /// A nested object (conditions or conditional values).
    Nested(StyleObject),
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(f, "{text}"),
            Self::Number(n) => write!(f, "{}", format_number(*n)),
            Self::Nested(_) => write!(f, "[object]"),
        }
    }
}

/// Formats a number without a trailing `.0` for integral values.
#[must_use]
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// An ordered map of style keys to values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleObject(IndexMap<String, StyleValue>);

impl StyleObject {
    /// Creates an empty style object.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, replacing an existing one in place.
    pub fn insert(&mut self, key: impl Into<String>, value: StyleValue) {
        self.0.insert(key.into(), value);
    }

    /// Builder-style insert of a text value.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, StyleValue::Text(value.into()));
        self
    }

    /// Builder-style insert of a nested object.
    #[must_use]
    pub fn with_nested(mut self, key: impl Into<String>, value: StyleObject) -> Self {
        self.insert(key, StyleValue::Nested(value));
        self
    }

    /// Returns the value for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        self.0.get(key)
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of top-level keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the object has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a copy with every key of `other` applied on top of `self`.
    #[must_use]
    pub fn overlay(&self, other: &StyleObject) -> StyleObject {
        let mut merged = self.clone();
        for (key, value) in other.iter() {
            merged.insert(key, value.clone());
        }
        merged
    }

    /// Flattens the object into atoms.
    ///
    /// Condition keys nest their conditions; a nested object under a
    /// property is a conditional value where `base` means unconditioned.
    #[must_use]
    pub fn atoms(&self, conditions: &Conditions) -> Vec<Atom> {
        let mut atoms = Vec::new();
        flatten(self, conditions, &[], None, &mut atoms);
        atoms
    }
}

fn flatten(
    object: &StyleObject,
    conditions: &Conditions,
    active: &[String],
    property: Option<&str>,
    out: &mut Vec<Atom>,
) {
    for (key, value) in object.iter() {
        let condition = if property.is_some() && key == "base" {
            None
        } else {
            conditions.condition_name(key)
        };

        let mut nested_conditions = active.to_vec();
        if let Some(name) = &condition {
            nested_conditions.push(name.clone());
        }

        let target = match (&condition, property) {
            (None, None) if key != "base" => Some(key),
            (None, None) => None,
            (_, Some(p)) => Some(p),
            (Some(_), None) => None,
        };

        match value {
            StyleValue::Nested(inner) => {
                flatten(inner, conditions, &nested_conditions, target, out);
            }
            leaf => {
                if let Some(p) = target {
                    out.push(Atom::new(nested_conditions, p, leaf.to_string()));
                }
            }
        }
    }
}

/// A single extracted declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Atom {
    /// Condition names, outermost first.
    pub conditions: Vec<String>,
    /// Property name as authored (camelCase).
    pub property: String,
    /// Raw value as authored.
    pub value: String,
}

impl Atom {
    /// Creates a new atom.
    #[must_use]
    pub fn new(conditions: Vec<String>, property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            conditions,
            property: property.into(),
            value: value.into(),
        }
    }

    /// Returns the unescaped class name (`md:hover:color_red`).
    ///
    /// Two atoms with the same class name are the same declaration.
    #[must_use]
    pub fn class_name(&self) -> String {
        let mut parts: Vec<String> = self.conditions.iter().map(|c| class_segment(c)).collect();
        parts.push(format!("{}_{}", self.property, class_segment(&self.value)));
        parts.join(":")
    }
}

/// Extracted style data for one or more source files.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleResult {
    atoms: IndexMap<String, Atom>,
    recipes: IndexMap<String, IndexSet<(String, String)>>,
    patterns: IndexMap<String, Vec<StyleObject>>,
    files: IndexSet<PathBuf>,
}

impl StyleResult {
    /// Creates an empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty result attributed to a source file.
    #[must_use]
    pub fn for_file(path: impl Into<PathBuf>) -> Self {
        let mut result = Self::default();
        result.files.insert(path.into());
        result
    }

    /// Adds an atom; an atom with the same class name is replaced in place.
    pub fn add_atom(&mut self, atom: Atom) {
        self.atoms.insert(atom.class_name(), atom);
    }

    /// Flattens a style object and adds its atoms.
    pub fn add_style(&mut self, style: &StyleObject, conditions: &Conditions) {
        for atom in style.atoms(conditions) {
            self.add_atom(atom);
        }
    }

    /// Records a recipe usage with the selected variants.
    pub fn add_recipe<I>(&mut self, recipe: impl Into<String>, variants: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.recipes
            .entry(recipe.into())
            .or_default()
            .extend(variants);
    }

    /// Records a pattern usage with its arguments.
    pub fn add_pattern(&mut self, pattern: impl Into<String>, args: StyleObject) {
        self.patterns.entry(pattern.into()).or_default().push(args);
    }

    /// Iterates atoms in first-seen order.
    pub fn atoms(&self) -> impl Iterator<Item = &Atom> {
        self.atoms.values()
    }

    /// Iterates recipe usages (recipe name, selected variants).
    pub fn recipes(&self) -> impl Iterator<Item = (&str, &IndexSet<(String, String)>)> {
        self.recipes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates pattern usages (pattern name, argument objects).
    pub fn patterns(&self) -> impl Iterator<Item = (&str, &[StyleObject])> {
        self.patterns.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Returns the source files that contributed to this result.
    pub fn files(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(PathBuf::as_path)
    }

    /// Returns the number of distinct atoms.
    #[must_use]
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// Returns true if no style data was extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty() && self.recipes.is_empty() && self.patterns.is_empty()
    }

    /// Merges the style data of `other` into `self`.
    ///
    /// Atoms with the same class name take `other`'s value (last writer wins)
    /// but keep their first-seen position.
    pub fn merge_styles(&mut self, other: &StyleResult) {
        for (key, atom) in &other.atoms {
            self.atoms.insert(key.clone(), atom.clone());
        }
        for (recipe, variants) in &other.recipes {
            self.recipes
                .entry(recipe.clone())
                .or_default()
                .extend(variants.iter().cloned());
        }
        for (pattern, usages) in &other.patterns {
            self.patterns
                .entry(pattern.clone())
                .or_default()
                .extend(usages.iter().cloned());
        }
    }

    /// Merges style data and contributing files of `other` into `self`.
    pub fn merge(&mut self, other: &StyleResult) {
        self.merge_styles(other);
        self.files.extend(other.files.iter().cloned());
    }
}

/// Accumulates per-file results into one combined [`StyleResult`].
#[derive(Debug, Default)]
pub struct StyleCollector {
    result: StyleResult,
    collected: usize,
}

impl StyleCollector {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges the style data of a result.
    pub fn merge_styles(&mut self, result: &StyleResult) {
        self.result.merge_styles(result);
        self.collected += 1;
    }

    /// Merges a whole result, including its files.
    pub fn merge(&mut self, result: &StyleResult) {
        self.result.merge(result);
        self.collected += 1;
    }

    /// Returns how many results were merged.
    #[must_use]
    pub fn collected(&self) -> usize {
        self.collected
    }

    /// Returns the combined result.
    #[must_use]
    pub fn finish(self) -> StyleResult {
        self.result
    }
}

/// Merges results in order into a new combined result.
#[must_use]
pub fn merge(results: &[StyleResult]) -> StyleResult {
    let mut collector = StyleCollector::new();
    for result in results {
        collector.merge(result);
    }
    collector.finish()
}
