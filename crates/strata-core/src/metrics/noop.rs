use crate::metrics::backend::{AdminMetrics, RequestOutcome};

/// Metrics backend that records nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpMetrics;

impl AdminMetrics for NoOpMetrics {
    #[inline(always)]
    fn record_request(&self, _: &str, _: RequestOutcome) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_metrics_is_zero_size() {
        assert_eq!(std::mem::size_of::<NoOpMetrics>(), 0);
    }

    #[test]
    fn noop_exports_nothing() {
        let metrics = NoOpMetrics;
        metrics.record_request("conf", RequestOutcome::Ok);
        assert!(metrics.export().is_none());
    }
}
