//! Well-known node configuration keys and their defaults.
use strata_model::NodeRole;

pub const MASTER_HTTP_HOST: &str = "strata.master.http.host";
pub const MASTER_HTTP_PORT: &str = "strata.master.http.port";
pub const WORKER_HTTP_HOST: &str = "strata.worker.http.host";
pub const WORKER_HTTP_PORT: &str = "strata.worker.http.port";

/// Selects the dynamic configuration backend. Unset or empty disables
/// dynamic configuration entirely.
pub const DYNAMIC_CONFIG_STORE_BACKEND: &str = "strata.dynamicConfig.store.backend";
/// Snapshot file read by the `FS` backend.
pub const DYNAMIC_CONFIG_STORE_FS_PATH: &str = "strata.dynamicConfig.store.fs.path";

pub const LOG_FORMAT: &str = "strata.log.format";
pub const LOG_LEVEL: &str = "strata.log.level";
pub const LOG_TIMEZONE: &str = "strata.log.timezone";
pub const LOG_COLOR: &str = "strata.log.color";

pub const DEFAULT_HTTP_HOST: &str = "0.0.0.0";
pub const DEFAULT_MASTER_HTTP_PORT: u16 = 9098;
pub const DEFAULT_WORKER_HTTP_PORT: u16 = 9096;

/// Host key for the admin endpoint of `role`.
pub fn http_host_key(role: NodeRole) -> &'static str {
    match role {
        NodeRole::Master => MASTER_HTTP_HOST,
        NodeRole::Worker => WORKER_HTTP_HOST,
    }
}

/// Port key for the admin endpoint of `role`.
pub fn http_port_key(role: NodeRole) -> &'static str {
    match role {
        NodeRole::Master => MASTER_HTTP_PORT,
        NodeRole::Worker => WORKER_HTTP_PORT,
    }
}

pub fn default_http_port(role: NodeRole) -> u16 {
    match role {
        NodeRole::Master => DEFAULT_MASTER_HTTP_PORT,
        NodeRole::Worker => DEFAULT_WORKER_HTTP_PORT,
    }
}
