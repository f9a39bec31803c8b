//! Resolution of configuration queries into rendered text.
//!
//! Static configuration is the node's own [`NodeConf`]. Dynamic configuration
//! comes from an optional [`ConfigStore`] and is layered by [`ConfigScope`]:
//! - no level: every scope in [`ConfigScope::ALL`] order, each under a
//!   `Level: <SCOPE>` banner;
//! - `TENANT`: all tenants sorted by id, or the one named by `tenant`;
//! - `TENANT_USER`: all users sorted by tenant id, or the one named by both
//!   `tenant` and `name`. A half-specified pair matches nothing.
//!
//! Without a store every dynamic query answers with [`dynamic_disabled_message`].
use std::{collections::BTreeMap, sync::Arc};

use strata_model::{ConfigMap, ConfigScope, ScopeKey, ScopedConfigSet};
use tracing::{debug, instrument};

use crate::{
    conf::{NodeConf, keys},
    render::{banner, render},
    store::ConfigStore,
};

/// Text returned for dynamic queries when no store is configured.
pub fn dynamic_disabled_message() -> String {
    format!(
        "Dynamic configuration is disabled. Please check whether to config `{}`.",
        keys::DYNAMIC_CONFIG_STORE_BACKEND
    )
}

/// Stateless resolver over the node configuration and an optional store.
#[derive(Clone)]
pub struct ConfigResolver {
    conf: Arc<NodeConf>,
    store: Option<Arc<dyn ConfigStore>>,
}

impl ConfigResolver {
    pub fn new(conf: Arc<NodeConf>, store: Option<Arc<dyn ConfigStore>>) -> Self {
        Self { conf, store }
    }

    /// Returns `true` when a dynamic store is attached.
    pub fn dynamic_enabled(&self) -> bool {
        self.store.is_some()
    }

    /// Node configuration under the `Configuration` banner.
    pub fn resolve_static(&self) -> String {
        let mut out = banner("Configuration");
        out.push_str(&render(self.conf.as_map()));
        out
    }

    /// Dynamic configuration for `level`, filtered by `tenant` and `name`.
    ///
    /// Empty strings mean "not specified". Unknown levels give an empty body.
    #[instrument(level = "debug", skip(self))]
    pub fn resolve_dynamic(&self, level: &str, tenant: &str, name: &str) -> String {
        let Some(store) = self.store.as_deref() else {
            debug!("dynamic configuration requested but no store is configured");
            return dynamic_disabled_message();
        };

        let mut out = banner("Dynamic Configuration");
        out.push_str(&level_body(store, level, tenant, name));
        out
    }

    /// Tags of `cluster_id`, one line per tag listing its workers.
    #[instrument(level = "debug", skip(self))]
    pub fn resolve_cluster_tags(&self, cluster_id: i64) -> String {
        let Some(store) = self.store.as_deref() else {
            return dynamic_disabled_message();
        };

        let mut workers_by_tag: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for row in store.cluster_tags(cluster_id) {
            workers_by_tag.entry(row.tag).or_default().push(row.worker_id);
        }
        let tags: ConfigMap = workers_by_tag
            .into_iter()
            .map(|(tag, workers)| (tag, workers.join(",")))
            .collect();

        let mut out = banner(&format!("Cluster Tags: {cluster_id}"));
        out.push_str(&render(&tags));
        out
    }
}

fn level_body(store: &dyn ConfigStore, level: &str, tenant: &str, name: &str) -> String {
    if level.is_empty() {
        return ConfigScope::ALL
            .iter()
            .map(|scope| {
                let mut block = banner(&format!("Level: {scope}"));
                block.push_str(&scope_body(store, *scope, tenant, name));
                block
            })
            .collect::<Vec<_>>()
            .join("\n");
    }

    match level.parse::<ConfigScope>() {
        Ok(scope) => scope_body(store, scope, tenant, name),
        Err(e) => {
            debug!(error = %e, "unrecognized level, returning empty section");
            String::new()
        }
    }
}

fn scope_body(store: &dyn ConfigStore, scope: ConfigScope, tenant: &str, name: &str) -> String {
    match scope {
        ConfigScope::System => render(&store.system_config()),
        ConfigScope::Tenant => {
            let sets = if tenant.is_empty() {
                sorted_by_tenant(store.tenant_configs())
            } else {
                store
                    .tenant_config(tenant)
                    .map(|entries| ScopedConfigSet::new(ScopeKey::tenant(tenant), entries))
                    .into_iter()
                    .collect()
            };
            render_sets(&sets)
        }
        ConfigScope::TenantUser => {
            let sets = match (tenant.is_empty(), name.is_empty()) {
                (true, true) => sorted_by_tenant(store.tenant_user_configs()),
                (false, false) => store
                    .tenant_user_config(tenant, name)
                    .map(|entries| {
                        ScopedConfigSet::new(ScopeKey::tenant_user(tenant, name), entries)
                    })
                    .into_iter()
                    .collect(),
                _ => {
                    debug!(tenant, name, "partial tenant/user filter matches nothing");
                    Vec::new()
                }
            };
            render_sets(&sets)
        }
    }
}

/// Stable sort, so users of one tenant keep store order.
fn sorted_by_tenant(mut sets: Vec<ScopedConfigSet>) -> Vec<ScopedConfigSet> {
    sets.sort_by(|a, b| a.key.tenant_id().cmp(b.key.tenant_id()));
    sets
}

fn render_sets(sets: &[ScopedConfigSet]) -> String {
    sets.iter()
        .map(|set| {
            let mut block = banner(&set.key.to_string());
            block.push_str(&render(&set.entries));
            block
        })
        .collect::<Vec<_>>()
        .join("\n")
}
