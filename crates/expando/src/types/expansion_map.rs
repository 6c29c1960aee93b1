use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use serde::{Deserialize, Serialize};

/// Mapping from variable name to the text a `${name}` reference expands to.
///
/// Built once from a bindings file and read-only afterwards. A binding
/// `name value` is stored as the text `"name value"`, so one binding serves
/// both as a bare identifier and as a version-bound expression.
///
/// Serialises as a JSON object keyed by name, in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpansionMap {
    entries: BTreeMap<String, String>,
}

impl ExpansionMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `"name value"`.
    ///
    /// Returns `false`, leaving the map untouched, if `name` is already bound.
    pub fn define(&mut self, name: &str, value: &str) -> bool {
        match self.entries.entry(name.to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(format!("{name} {value}"));
                true
            }
        }
    }

    /// Get the expansion text for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all bound names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries sorted by name.
    pub fn sorted(&self) -> Vec<(&str, &str)> {
        self.entries
            .iter()
            .map(|(name, expansion)| (name.as_str(), expansion.as_str()))
            .collect()
    }
}

/// Collect raw `(name, expansion)` pairs; the expansion text is stored as
/// given, without prepending the name. Later pairs win over earlier ones.
impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ExpansionMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, expansion)| (name.into(), expansion.into()))
                .collect(),
        }
    }
}
