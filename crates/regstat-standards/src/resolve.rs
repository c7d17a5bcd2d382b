//! Source label to canonical key resolution.

use std::collections::BTreeMap;

use crate::registry::default_registry;

/// Source-table labels whose canonical key differs from the label itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionKeyMap {
    map: BTreeMap<String, String>,
}

impl RegionKeyMap {
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            map: pairs.into_iter().collect(),
        }
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.map.get(label).map(String::as_str)
    }

    /// Exact lookup; an unknown label is returned unchanged.
    pub fn resolve(&self, label: &str) -> String {
        self.get(label).unwrap_or(label).to_string()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Resolves a source label against the embedded alias table.
///
/// Labels outside the table come back unchanged, so a label that only
/// matches a display name (e.g. `Карелия`) keeps its Russian spelling.
pub fn resolve(russian_name: &str) -> String {
    default_registry().key_map().resolve(russian_name)
}
