//! Resolved layout chains and the frozen mapping returned by a resolution run.

use crate::resolver::identifier;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

/// Ordered layouts (outermost first) followed by the content file itself.
///
/// A chain always holds at least one element: the content file's own
/// identifier, which is always last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LayoutChain(Vec<String>);

impl LayoutChain {
    /// Build a chain from its layouts and the content identifier it ends with.
    pub fn new(mut layouts: Vec<String>, target: String) -> Self {
        layouts.push(target);
        Self(layouts)
    }

    /// A chain with no layouts, only the content file.
    pub fn single(target: impl Into<String>) -> Self {
        Self(vec![target.into()])
    }

    /// The layouts applied to the target, outermost first.
    pub fn layouts(&self) -> &[String] {
        &self.0[..self.0.len().saturating_sub(1)]
    }

    /// The content file this chain ends with.
    pub fn target(&self) -> &str {
        self.0.last().map(String::as_str).unwrap_or_default()
    }

    /// Every element, layouts first.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Number of elements including the target.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    fn map_identifiers(self, f: impl Fn(String) -> String) -> Self {
        Self(self.0.into_iter().map(f).collect())
    }
}

impl std::fmt::Display for LayoutChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

impl<'a> IntoIterator for &'a LayoutChain {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Content identifier to layout chain, as produced by one resolution run.
///
/// Iteration order of [`LayoutMap::iter`] is unspecified. Use
/// [`LayoutMap::sorted`] when a stable order is needed for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LayoutMap {
    chains: HashMap<String, LayoutChain>,
}

impl LayoutMap {
    /// Get the chain for a content identifier.
    pub fn get(&self, identifier: &str) -> Option<&LayoutChain> {
        self.chains.get(identifier)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.chains.contains_key(identifier)
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &LayoutChain)> {
        self.chains.iter()
    }

    /// Entries ordered by content identifier.
    pub fn sorted(&self) -> Vec<(&String, &LayoutChain)> {
        let mut entries: Vec<_> = self.chains.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    pub fn into_inner(self) -> HashMap<String, LayoutChain> {
        self.chains
    }

    /// Rewrite every identifier relative to `root`.
    ///
    /// Identifiers carry the walk root as their prefix; this strips it for
    /// display. Identifiers that do not start with the root are kept as-is.
    pub fn relative_to(self, root: &Path) -> Self {
        let root_id = identifier(root);
        if root_id.is_empty() {
            return self;
        }
        let prefix = if root_id.ends_with('/') {
            root_id
        } else {
            format!("{root_id}/")
        };
        let strip = |id: String| match id.strip_prefix(&prefix) {
            Some(rest) => rest.to_string(),
            None => id,
        };

        let chains = self
            .chains
            .into_iter()
            .map(|(key, chain)| (strip(key), chain.map_identifiers(&strip)))
            .collect();
        Self { chains }
    }
}

impl From<HashMap<String, LayoutChain>> for LayoutMap {
    fn from(chains: HashMap<String, LayoutChain>) -> Self {
        Self { chains }
    }
}

impl IntoIterator for LayoutMap {
    type Item = (String, LayoutChain);
    type IntoIter = std::collections::hash_map::IntoIter<String, LayoutChain>;

    fn into_iter(self) -> Self::IntoIter {
        self.chains.into_iter()
    }
}
