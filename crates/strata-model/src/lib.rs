mod domain;
pub use domain::{ConfigEntry, ConfigMap, ExitKind, NodeRole};

mod error;
pub use error::ModelError;

mod scope;
pub use scope::{ConfigScope, ScopeKey, ScopedConfigSet};

mod tag;
pub use tag::ClusterTag;
