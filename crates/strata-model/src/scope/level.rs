use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize, Serializer};

use crate::error::ModelError;

/// Configuration precedence tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfigScope {
    /// Cluster-wide defaults.
    System,
    /// Overrides for one tenant.
    Tenant,
    /// Overrides for one user of one tenant.
    TenantUser,
}

impl ConfigScope {
    /// Every scope, in listing order.
    pub const ALL: [ConfigScope; 3] = [
        ConfigScope::System,
        ConfigScope::Tenant,
        ConfigScope::TenantUser,
    ];

    /// Canonical upper-case name.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigScope::System => "SYSTEM",
            ConfigScope::Tenant => "TENANT",
            ConfigScope::TenantUser => "TENANT_USER",
        }
    }
}

impl FromStr for ConfigScope {
    type Err = ModelError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scope| scope.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ModelError::UnknownScope(s.to_string()))
    }
}

impl fmt::Display for ConfigScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ConfigScope {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ConfigScope {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}
