//! Configuration scopes and the bundles stored at each of them.
//!
//! Three tiers exist: system-wide defaults, per-tenant overrides and
//! per-tenant-user overrides. [`ConfigScope::ALL`] fixes the order in which
//! they are listed when no explicit scope is requested.
mod level;
pub use level::ConfigScope;

mod set;
pub use set::{ScopeKey, ScopedConfigSet};
