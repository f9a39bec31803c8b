//! Read-only access to dynamic configuration snapshots.
//!
//! The store owns every scoped bundle; the resolver only reads. Implementations
//! are expected to serve from an already-built snapshot, so every call is cheap
//! and never blocks on I/O.
mod error;
pub use error::StoreError;

mod snapshot;
pub use snapshot::SnapshotStore;

use std::sync::Arc;

use strata_model::{ClusterTag, ConfigMap, ScopedConfigSet};
use tracing::info;

use crate::conf::{NodeConf, keys};

/// Source of scoped configuration and cluster tag rows.
pub trait ConfigStore: Send + Sync + 'static {
    /// System-wide settings.
    fn system_config(&self) -> ConfigMap;

    /// Every tenant bundle, in store order.
    fn tenant_configs(&self) -> Vec<ScopedConfigSet>;

    /// Settings of one tenant, `None` if the tenant has no bundle.
    fn tenant_config(&self, tenant_id: &str) -> Option<ConfigMap>;

    /// Every tenant-user bundle, in store order.
    fn tenant_user_configs(&self) -> Vec<ScopedConfigSet>;

    /// Settings of one user of one tenant.
    fn tenant_user_config(&self, tenant_id: &str, name: &str) -> Option<ConfigMap>;

    /// Tag rows of one cluster, in store order.
    fn cluster_tags(&self, cluster_id: i64) -> Vec<ClusterTag>;
}

/// Open the store selected by [`keys::DYNAMIC_CONFIG_STORE_BACKEND`].
///
/// Returns `Ok(None)` when dynamic configuration is disabled.
pub fn open_store(conf: &NodeConf) -> Result<Option<Arc<dyn ConfigStore>>, StoreError> {
    let Some(backend) = conf.dynamic_store_backend() else {
        info!("dynamic configuration store disabled");
        return Ok(None);
    };

    if !backend.eq_ignore_ascii_case("FS") {
        return Err(StoreError::UnknownBackend(backend.to_string()));
    }

    let path = conf
        .get(keys::DYNAMIC_CONFIG_STORE_FS_PATH)
        .ok_or(StoreError::MissingSetting(keys::DYNAMIC_CONFIG_STORE_FS_PATH))?;
    let store = SnapshotStore::load(path)?;
    info!(backend, path, "dynamic configuration store opened");
    Ok(Some(Arc::new(store)))
}
