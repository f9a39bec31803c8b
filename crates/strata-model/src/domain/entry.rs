use serde::{Deserialize, Serialize};

/// Single configuration key with its value.
///
/// Both fields are plain UTF-8 strings; no validation is applied.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConfigEntry {
    key: String,
    value: String,
}

impl ConfigEntry {
    /// Create a new entry.
    pub fn new<K, V>(key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Get the key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Get the value.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl From<(String, String)> for ConfigEntry {
    fn from((key, value): (String, String)) -> Self {
        Self { key, value }
    }
}

impl From<(&str, &str)> for ConfigEntry {
    fn from((key, value): (&str, &str)) -> Self {
        Self::new(key, value)
    }
}
