//! Node configuration: the flat key/value set a node is started with.
//!
//! Files use one setting per line, either `key value` or `key=value`.
//! Blank lines and lines starting with `#` are ignored.
mod error;
pub use error::ConfError;

pub mod keys;

use std::path::Path;

use strata_model::{ConfigMap, NodeRole};
use tracing::debug;

/// Static configuration of one node process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeConf {
    entries: ConfigMap,
}

impl NodeConf {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a properties-style document.
    pub fn parse(text: &str) -> Result<Self, ConfError> {
        let mut conf = Self::new();
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (key, value) = split_line(line).ok_or_else(|| ConfError::Malformed {
                line: idx + 1,
                content: raw.to_string(),
            })?;
            conf.set(key, value);
        }
        Ok(conf)
    }

    /// Read and parse a properties file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let conf = Self::parse(&text)?;
        debug!(path = %path.display(), entries = conf.entries.len(), "node configuration loaded");
        Ok(conf)
    }

    /// Insert or overwrite a setting.
    pub fn set<K, V>(&mut self, key: K, value: V) -> &mut Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.entries.insert(key, value);
        self
    }

    /// Builder-style [`NodeConf::set`].
    pub fn with<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key)
    }

    /// Value of `key`, falling back to `default` when unset.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Boolean setting; accepts `true|false` in any case.
    pub fn get_bool(&self, key: &'static str, default: bool) -> Result<bool, ConfError> {
        match self.get(key) {
            None => Ok(default),
            Some(v) => v
                .trim()
                .to_ascii_lowercase()
                .parse()
                .map_err(|_| ConfError::InvalidValue {
                    key,
                    value: v.to_string(),
                    reason: "expected true or false".to_string(),
                }),
        }
    }

    /// Every setting, sorted by key.
    pub fn as_map(&self) -> &ConfigMap {
        &self.entries
    }

    /// Bind host of the admin endpoint for `role`.
    pub fn http_host(&self, role: NodeRole) -> &str {
        self.get_or(keys::http_host_key(role), keys::DEFAULT_HTTP_HOST)
    }

    /// Bind port of the admin endpoint for `role`.
    pub fn http_port(&self, role: NodeRole) -> Result<u16, ConfError> {
        let key = keys::http_port_key(role);
        match self.get(key) {
            None => Ok(keys::default_http_port(role)),
            Some(v) => v.trim().parse().map_err(|e: std::num::ParseIntError| {
                ConfError::InvalidValue {
                    key,
                    value: v.to_string(),
                    reason: e.to_string(),
                }
            }),
        }
    }

    /// Configured dynamic store backend, `None` when disabled.
    pub fn dynamic_store_backend(&self) -> Option<&str> {
        self.get(keys::DYNAMIC_CONFIG_STORE_BACKEND)
            .map(str::trim)
            .filter(|b| !b.is_empty())
    }
}

fn split_line(line: &str) -> Option<(&str, &str)> {
    let sep = line.find(|c: char| c == '=' || c.is_whitespace())?;
    let key = &line[..sep];
    if key.is_empty() {
        return None;
    }
    let rest = line[sep..].trim_start();
    let value = rest.strip_prefix('=').unwrap_or(rest).trim();
    Some((key, value))
}
