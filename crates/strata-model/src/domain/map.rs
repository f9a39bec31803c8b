use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::ConfigEntry;

/// Key-unique configuration mapping based on [`BTreeMap`].
///
/// Iteration is always in ascending lexicographic key order.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigMap(pub BTreeMap<String, String>);

impl ConfigMap {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Returns `true` if no entries are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Insert or overwrite an entry.
    ///
    /// Returns `self` for chaining.
    pub fn insert<K, V>(&mut self, key: K, val: V) -> &mut Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.0.insert(key.into(), val.into());
        self
    }

    /// Get the value for a key, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(|s| s.as_str())
    }

    /// Iterate through all entries as `(&str, &str)` pairs, sorted by key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Snapshot the mapping as owned entries, sorted by key.
    pub fn entries(&self) -> Vec<ConfigEntry> {
        self.iter().map(ConfigEntry::from).collect()
    }
}

impl<K, V> FromIterator<(K, V)> for ConfigMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl FromIterator<ConfigEntry> for ConfigMap {
    fn from_iter<I: IntoIterator<Item = ConfigEntry>>(iter: I) -> Self {
        iter.into_iter()
            .map(|e| (e.key().to_string(), e.value().to_string()))
            .collect()
    }
}
