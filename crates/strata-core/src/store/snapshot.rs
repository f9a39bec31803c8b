use std::path::Path;

use serde::Deserialize;
use strata_model::{ClusterTag, ConfigMap, ScopeKey, ScopedConfigSet};

use crate::store::{ConfigStore, StoreError};

/// In-memory [`ConfigStore`] over a fixed snapshot.
///
/// Bundles keep insertion order, which is what the listing calls return.
#[derive(Debug, Clone, Default)]
pub struct SnapshotStore {
    system: ConfigMap,
    tenants: Vec<ScopedConfigSet>,
    tenant_users: Vec<ScopedConfigSet>,
    tags: Vec<ClusterTag>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_system(mut self, entries: ConfigMap) -> Self {
        self.system = entries;
        self
    }

    pub fn with_tenant(mut self, tenant_id: impl Into<String>, entries: ConfigMap) -> Self {
        self.tenants
            .push(ScopedConfigSet::new(ScopeKey::tenant(tenant_id), entries));
        self
    }

    pub fn with_tenant_user(
        mut self,
        tenant_id: impl Into<String>,
        name: impl Into<String>,
        entries: ConfigMap,
    ) -> Self {
        self.tenant_users.push(ScopedConfigSet::new(
            ScopeKey::tenant_user(tenant_id, name),
            entries,
        ));
        self
    }

    pub fn with_cluster_tag(mut self, tag: ClusterTag) -> Self {
        self.tags.push(tag);
        self
    }

    /// Build from a JSON snapshot document:
    ///
    /// ```json
    /// {
    ///   "system": { "key": "value" },
    ///   "tenants": [ { "tenantId": "t1", "config": { } } ],
    ///   "tenantUsers": [ { "tenantId": "t1", "name": "u1", "config": { } } ],
    ///   "clusterTags": [ ]
    /// }
    /// ```
    /// Every section is optional.
    pub fn from_json(text: &str) -> Result<Self, StoreError> {
        let doc: SnapshotDoc = serde_json::from_str(text)?;
        let store = doc.tenants.into_iter().fold(
            Self::new().with_system(doc.system),
            |store, t| store.with_tenant(t.tenant_id, t.config),
        );
        let store = doc
            .tenant_users
            .into_iter()
            .fold(store, |store, u| store.with_tenant_user(u.tenant_id, u.name, u.config));
        Ok(doc
            .cluster_tags
            .into_iter()
            .fold(store, |store, tag| store.with_cluster_tag(tag)))
    }

    /// Read a JSON snapshot file, see [`SnapshotStore::from_json`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    fn find(sets: &[ScopedConfigSet], key: &ScopeKey) -> Option<ConfigMap> {
        sets.iter()
            .find(|set| &set.key == key)
            .map(|set| set.entries.clone())
    }
}

impl ConfigStore for SnapshotStore {
    fn system_config(&self) -> ConfigMap {
        self.system.clone()
    }

    fn tenant_configs(&self) -> Vec<ScopedConfigSet> {
        self.tenants.clone()
    }

    fn tenant_config(&self, tenant_id: &str) -> Option<ConfigMap> {
        Self::find(&self.tenants, &ScopeKey::tenant(tenant_id))
    }

    fn tenant_user_configs(&self) -> Vec<ScopedConfigSet> {
        self.tenant_users.clone()
    }

    fn tenant_user_config(&self, tenant_id: &str, name: &str) -> Option<ConfigMap> {
        Self::find(&self.tenant_users, &ScopeKey::tenant_user(tenant_id, name))
    }

    fn cluster_tags(&self, cluster_id: i64) -> Vec<ClusterTag> {
        self.tags
            .iter()
            .filter(|t| t.cluster_id == cluster_id)
            .cloned()
            .collect()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SnapshotDoc {
    system: ConfigMap,
    tenants: Vec<TenantDoc>,
    tenant_users: Vec<TenantUserDoc>,
    cluster_tags: Vec<ClusterTag>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TenantDoc {
    tenant_id: String,
    #[serde(default)]
    config: ConfigMap,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TenantUserDoc {
    tenant_id: String,
    name: String,
    #[serde(default)]
    config: ConfigMap,
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "system": { "strata.client.push.buffer.max.size": "64k" },
        "tenants": [
            { "tenantId": "t2", "config": { "quota.disk": "10G" } },
            { "tenantId": "t1", "config": { "quota.disk": "20G" } }
        ],
        "tenantUsers": [
            { "tenantId": "t1", "name": "alice", "config": { "quota.files": "100" } }
        ],
        "clusterTags": [
            { "id": 1, "clusterId": 1, "tag": "ssd", "workerId": "w1",
              "createdAt": "2024-01-01T00:00:00Z", "modifiedAt": "2024-01-01T00:00:00Z" },
            { "id": 2, "clusterId": 2, "tag": "hdd", "workerId": "w2",
              "createdAt": "2024-01-01T00:00:00Z", "modifiedAt": "2024-01-01T00:00:00Z" }
        ]
    }"#;

    #[test]
    fn json_snapshot_keeps_store_order() {
        let store = SnapshotStore::from_json(DOC).unwrap();
        let ids: Vec<_> = store
            .tenant_configs()
            .iter()
            .map(|s| s.key.tenant_id().to_string())
            .collect();
        assert_eq!(ids, vec!["t2", "t1"]);
    }

    #[test]
    fn single_lookups_match_exact_identity() {
        let store = SnapshotStore::from_json(DOC).unwrap();
        assert_eq!(
            store.tenant_config("t1").unwrap().get("quota.disk"),
            Some("20G")
        );
        assert!(store.tenant_config("t3").is_none());
        assert!(store.tenant_user_config("t1", "alice").is_some());
        assert!(store.tenant_user_config("t2", "alice").is_none());
    }

    #[test]
    fn cluster_tags_filter_by_cluster() {
        let store = SnapshotStore::from_json(DOC).unwrap();
        let tags = store.cluster_tags(2);
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].worker_id, "w2");
        assert!(store.cluster_tags(9).is_empty());
    }

    #[test]
    fn empty_document_is_an_empty_store() {
        let store = SnapshotStore::from_json("{}").unwrap();
        assert!(store.system_config().is_empty());
        assert!(store.tenant_configs().is_empty());
        assert!(store.tenant_user_configs().is_empty());
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        let err = SnapshotStore::from_json(r#"{"tenants": [{}]}"#).unwrap_err();
        assert!(matches!(err, StoreError::Parse(_)));
    }
}
