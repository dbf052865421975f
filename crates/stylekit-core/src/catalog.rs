//! The artifact catalog and identifier-based selection.
//!
//! A [`Catalog`] is an ordered list of [`CatalogEntry`] values fixed at
//! construction. An entry is either flat (a plain file list) or a namespace
//! whose files come from registered children such as `recipes.button-style`.
//!
//! Selection rules:
//!
//! - no ids: every enabled entry, in catalog order, fully expanded
//! - an entry is selected only when its own id is requested
//! - a selected namespace narrows to the requested children (registration
//!   order), followed by its shared files once
//! - a child id without its namespace id selects nothing

use std::collections::HashSet;

use tracing::debug;

use crate::artifact::{ArtifactFile, ArtifactGroup, ArtifactId};

/// A registered child of a namespace entry.
#[derive(Debug, Clone)]
pub struct NamespaceChild {
    /// Full dotted identifier (e.g. `patterns.box`).
    pub id: ArtifactId,
    /// Files contributed by this child.
    pub files: Vec<ArtifactFile>,
}

impl NamespaceChild {
    /// Creates a new child.
    #[must_use]
    pub fn new(id: ArtifactId, files: Vec<ArtifactFile>) -> Self {
        Self { id, files }
    }
}

/// File layout of a catalog entry.
#[derive(Debug, Clone)]
pub enum EntryFiles {
    /// A fixed file list.
    Flat(Vec<ArtifactFile>),
    /// Files from registered children plus shared trailing files.
    Namespace {
        /// Children in registration order.
        children: Vec<NamespaceChild>,
        /// Files emitted once after the selected children.
        shared: Vec<ArtifactFile>,
    },
}

/// One entry of the catalog.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    id: ArtifactId,
    condition: Option<bool>,
    dir: Vec<String>,
    files: EntryFiles,
}

impl CatalogEntry {
    /// Creates a flat entry.
    #[must_use]
    pub fn flat(id: ArtifactId, dir: &[&str], files: Vec<ArtifactFile>) -> Self {
        Self {
            id,
            condition: None,
            dir: dir.iter().map(|s| (*s).to_string()).collect(),
            files: EntryFiles::Flat(files),
        }
    }

    /// Creates a namespace entry.
    #[must_use]
    pub fn namespace(
        id: ArtifactId,
        dir: &[&str],
        children: Vec<NamespaceChild>,
        shared: Vec<ArtifactFile>,
    ) -> Self {
        Self {
            id,
            condition: None,
            dir: dir.iter().map(|s| (*s).to_string()).collect(),
            files: EntryFiles::Namespace { children, shared },
        }
    }

    /// Sets the inclusion condition.
    #[must_use]
    pub fn when(mut self, condition: bool) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Returns the entry identifier.
    #[must_use]
    pub fn id(&self) -> &ArtifactId {
        &self.id
    }

    /// Returns the directory segments.
    #[must_use]
    pub fn dir(&self) -> &[String] {
        &self.dir
    }

    /// Returns the file layout.
    #[must_use]
    pub fn files(&self) -> &EntryFiles {
        &self.files
    }

    /// Returns true if the condition holds (an absent condition holds).
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.condition.unwrap_or(true)
    }

    /// Returns the child identifiers of a namespace entry.
    #[must_use]
    pub fn child_ids(&self) -> Vec<&ArtifactId> {
        match &self.files {
            EntryFiles::Flat(_) => Vec::new(),
            EntryFiles::Namespace { children, .. } => children.iter().map(|c| &c.id).collect(),
        }
    }

    /// Builds the group for this entry, narrowing namespaces to `requested`
    /// children when any of them are present.
    fn expand(&self, requested: Option<&HashSet<&ArtifactId>>) -> ArtifactGroup {
        let files = match &self.files {
            EntryFiles::Flat(files) => files.clone(),
            EntryFiles::Namespace { children, shared } => {
                let narrowed: Vec<&NamespaceChild> = requested
                    .map(|ids| children.iter().filter(|c| ids.contains(&c.id)).collect())
                    .unwrap_or_default();

                let selected: Vec<&NamespaceChild> = if narrowed.is_empty() {
                    children.iter().collect()
                } else {
                    narrowed
                };

                selected
                    .into_iter()
                    .flat_map(|c| c.files.iter().cloned())
                    .chain(shared.iter().cloned())
                    .collect()
            }
        };

        ArtifactGroup::new(self.id.clone(), self.dir.clone(), files)
    }
}

/// Errors when constructing a catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// The same identifier is registered twice.
    #[error("duplicate artifact id `{0}` in catalog")]
    DuplicateId(ArtifactId),
}

/// An ordered, immutable list of artifact entries.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Creates a catalog from entries in emission order.
    ///
    /// # Errors
    ///
    /// Returns an error if an entry or child identifier appears twice.
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        let mut seen: HashSet<&ArtifactId> = HashSet::new();
        for entry in &entries {
            if !seen.insert(&entry.id) {
                return Err(CatalogError::DuplicateId(entry.id.clone()));
            }
            for child in entry.child_ids() {
                if !seen.insert(child) {
                    return Err(CatalogError::DuplicateId(child.clone()));
                }
            }
        }
        Ok(Self { entries })
    }

    /// Returns all entries in catalog order.
    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Selects artifact groups by identifier.
    ///
    /// `None` or an empty slice yields the full default build. Output order
    /// always follows catalog order, never request order.
    #[must_use]
    pub fn select(&self, ids: Option<&[ArtifactId]>) -> Vec<ArtifactGroup> {
        let enabled = self.entries.iter().filter(|e| e.is_enabled());

        let Some(ids) = ids.filter(|ids| !ids.is_empty()) else {
            return enabled.map(|e| e.expand(None)).collect();
        };

        let requested: HashSet<&ArtifactId> = ids.iter().collect();
        let groups: Vec<ArtifactGroup> = enabled
            .filter(|e| requested.contains(&e.id))
            .map(|e| e.expand(Some(&requested)))
            .collect();

        debug!(
            "Selected {} artifact group(s) for {} id(s)",
            groups.len(),
            ids.len()
        );

        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ArtifactId {
        ArtifactId::new(s).unwrap()
    }

    fn files(names: &[&str]) -> Vec<ArtifactFile> {
        names.iter().map(|n| ArtifactFile::new(*n, "")).collect()
    }

    fn sample() -> Catalog {
        let ns = id("letters");
        Catalog::new(vec![
            CatalogEntry::flat(id("head"), &[], files(&["head.mjs"])),
            CatalogEntry::flat(id("hidden"), &["x"], files(&["x.mjs"])).when(false),
            CatalogEntry::namespace(
                ns.clone(),
                &["letters"],
                vec![
                    NamespaceChild::new(ns.child("a").unwrap(), files(&["a.mjs"])),
                    NamespaceChild::new(ns.child("b").unwrap(), files(&["b.mjs"])),
                    NamespaceChild::new(ns.child("c").unwrap(), files(&["c.mjs"])),
                ],
                files(&["index.mjs"]),
            ),
            CatalogEntry::flat(id("tail"), &["t"], vec![]),
        ])
        .unwrap()
    }

    fn paths(groups: &[ArtifactGroup]) -> Vec<Vec<String>> {
        groups.iter().map(ArtifactGroup::paths).collect()
    }

    #[test]
    fn select_all_skips_disabled_entries() {
        let groups = sample().select(None);
        assert_eq!(
            paths(&groups),
            vec![
                vec!["/head.mjs".to_string()],
                vec![
                    "letters/a.mjs".into(),
                    "letters/b.mjs".into(),
                    "letters/c.mjs".into(),
                    "letters/index.mjs".into(),
                ],
                vec![],
            ]
        );
    }

    #[test]
    fn empty_request_means_everything() {
        let catalog = sample();
        assert_eq!(
            paths(&catalog.select(Some(&[]))),
            paths(&catalog.select(None))
        );
    }

    #[test]
    fn selection_follows_catalog_order() {
        let groups = sample().select(Some(&[id("tail"), id("head")]));
        let ids: Vec<&str> = groups.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["head", "tail"]);
    }

    #[test]
    fn disabled_entry_is_never_selected() {
        assert!(sample().select(Some(&[id("hidden")])).is_empty());
    }

    #[test]
    fn child_without_namespace_selects_nothing() {
        assert!(sample().select(Some(&[id("letters.a")])).is_empty());
    }

    #[test]
    fn children_follow_registration_order() {
        let groups = sample().select(Some(&[id("letters"), id("letters.c"), id("letters.a")]));
        assert_eq!(
            paths(&groups),
            vec![vec![
                "letters/a.mjs".to_string(),
                "letters/c.mjs".into(),
                "letters/index.mjs".into(),
            ]]
        );
    }

    #[test]
    fn unknown_child_falls_back_to_full_namespace() {
        let groups = sample().select(Some(&[id("letters"), id("letters.z")]));
        assert_eq!(groups[0].files.len(), 4);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let result = Catalog::new(vec![
            CatalogEntry::flat(id("a"), &[], vec![]),
            CatalogEntry::flat(id("a"), &[], vec![]),
        ]);
        assert_eq!(result.unwrap_err(), CatalogError::DuplicateId(id("a")));
    }

    #[test]
    fn selection_is_subset_of_default_build() {
        let catalog = sample();
        let all: Vec<ArtifactId> = catalog.select(None).into_iter().map(|g| g.id).collect();
        let picked: Vec<ArtifactId> = catalog
            .select(Some(&[id("tail"), id("letters"), id("head")]))
            .into_iter()
            .map(|g| g.id)
            .collect();

        let positions: Vec<usize> = picked
            .iter()
            .map(|p| all.iter().position(|a| a == p).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
