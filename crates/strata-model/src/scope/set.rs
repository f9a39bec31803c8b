use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::ConfigMap;

/// Identity of a configuration bundle within its scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScopeKey {
    System,
    Tenant {
        #[serde(rename = "tenantId")]
        tenant_id: String,
    },
    TenantUser {
        #[serde(rename = "tenantId")]
        tenant_id: String,
        name: String,
    },
}

impl ScopeKey {
    pub fn tenant<T: Into<String>>(tenant_id: T) -> Self {
        Self::Tenant {
            tenant_id: tenant_id.into(),
        }
    }

    pub fn tenant_user<T, N>(tenant_id: T, name: N) -> Self
    where
        T: Into<String>,
        N: Into<String>,
    {
        Self::TenantUser {
            tenant_id: tenant_id.into(),
            name: name.into(),
        }
    }

    /// Tenant id, empty for the system scope.
    pub fn tenant_id(&self) -> &str {
        match self {
            ScopeKey::System => "",
            ScopeKey::Tenant { tenant_id } | ScopeKey::TenantUser { tenant_id, .. } => tenant_id,
        }
    }
}

/// Header text used when a bundle is listed: `Tenant: <id>` or
/// `Tenant: <id>, Name: <name>`. The system key has no header.
impl fmt::Display for ScopeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeKey::System => Ok(()),
            ScopeKey::Tenant { tenant_id } => write!(f, "Tenant: {tenant_id}"),
            ScopeKey::TenantUser { tenant_id, name } => {
                write!(f, "Tenant: {tenant_id}, Name: {name}")
            }
        }
    }
}

/// Named configuration bundle: identity plus its entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopedConfigSet {
    pub key: ScopeKey,
    pub entries: ConfigMap,
}

impl ScopedConfigSet {
    pub fn new(key: ScopeKey, entries: ConfigMap) -> Self {
        Self { key, entries }
    }
}
