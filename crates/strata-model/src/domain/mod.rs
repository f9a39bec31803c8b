mod entry;
pub use entry::ConfigEntry;

mod map;
pub use map::ConfigMap;

mod role;
pub use role::{ExitKind, NodeRole};
