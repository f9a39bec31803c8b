//! Metrics abstraction for the admin surface.
//!
//! Backends (prometheus, etc) implement [`AdminMetrics`] and are handed to the
//! HTTP service; without one, [`NoOpMetrics`] is used.
mod backend;
pub use backend::{AdminMetrics, MetricsHandle, RequestOutcome};

mod noop;
pub use noop::NoOpMetrics;

use std::sync::Arc;

/// Create a no-op metrics handle.
#[inline]
pub fn noop_metrics() -> MetricsHandle {
    Arc::new(NoOpMetrics)
}
