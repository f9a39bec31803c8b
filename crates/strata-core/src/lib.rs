pub mod admin;
pub mod conf;
pub mod metrics;
pub mod render;
pub mod resolver;
pub mod store;

pub use admin::{AdminDispatcher, AdminError, AdminHandler, AdminOp, AdminRequest, Capabilities};
pub use conf::{ConfError, NodeConf};
pub use metrics::{AdminMetrics, MetricsHandle, NoOpMetrics, RequestOutcome, noop_metrics};
pub use render::{banner, render};
pub use resolver::{ConfigResolver, dynamic_disabled_message};
pub use store::{ConfigStore, SnapshotStore, StoreError, open_store};

pub mod prelude {
    pub use crate::admin::{AdminDispatcher, AdminError, AdminHandler, AdminOp, AdminRequest};
    pub use crate::conf::NodeConf;
    pub use crate::resolver::ConfigResolver;
    pub use crate::store::ConfigStore;
}
