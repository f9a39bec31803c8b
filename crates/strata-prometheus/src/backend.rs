use std::sync::Arc;

use prometheus::{CounterVec, Encoder, Opts, Registry, TextEncoder, proto::MetricFamily};
use tracing::warn;

use strata_core::{AdminMetrics, RequestOutcome};

/// Prometheus metrics backend for the admin endpoint.
///
/// ## Metrics
/// - `strata_admin_requests_total{endpoint, outcome}` - Counter of handled admin requests
///
/// ## Label cardinality
/// Both labels are bounded:
/// - `endpoint`: one value per admin operation or config query
/// - `outcome`: "ok", "unsupported", "invalid", "failed"
#[derive(Clone)]
pub struct PrometheusMetrics {
    requests: CounterVec,
    registry: Arc<Registry>,
}

impl PrometheusMetrics {
    /// Create a new prometheus metrics backend with custom registry.
    pub fn new_with_registry(registry: Arc<Registry>) -> Result<Self, prometheus::Error> {
        let requests = CounterVec::new(
            Opts::new("admin_requests_total", "Total number of handled admin requests")
                .namespace("strata"),
            &["endpoint", "outcome"],
        )?;
        registry.register(Box::new(requests.clone()))?;

        Ok(Self { requests, registry })
    }

    /// Create a new prometheus metrics backend with its own registry.
    pub fn new() -> Result<Self, prometheus::Error> {
        Self::new_with_registry(Arc::new(Registry::new()))
    }

    /// Gather all metric families.
    pub fn gather(&self) -> Vec<MetricFamily> {
        self.registry.gather()
    }

    /// Underlying registry, for registering node metrics next to these.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }
}

impl AdminMetrics for PrometheusMetrics {
    fn record_request(&self, endpoint: &str, outcome: RequestOutcome) {
        self.requests
            .with_label_values(&[endpoint, outcome.as_label()])
            .inc();
    }

    fn export(&self) -> Option<String> {
        let mut buffer = Vec::new();
        if let Err(e) = TextEncoder::new().encode(&self.gather(), &mut buffer) {
            warn!(error = %e, "failed to encode prometheus metrics");
            return None;
        }
        String::from_utf8(buffer).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_create_prometheus_metrics() {
        let _metrics = PrometheusMetrics::new().expect("failed to create metrics");
    }

    #[test]
    fn record_request_counts_per_label_pair() {
        let metrics = PrometheusMetrics::new().unwrap();

        metrics.record_request("conf", RequestOutcome::Ok);
        metrics.record_request("conf", RequestOutcome::Ok);
        metrics.record_request("exit", RequestOutcome::Unsupported);

        let families = metrics.gather();
        let requests = families
            .iter()
            .find(|f| f.name() == "strata_admin_requests_total")
            .expect("metric not found");

        assert_eq!(requests.get_metric().len(), 2);
    }

    #[test]
    fn export_renders_text_format() {
        let metrics = PrometheusMetrics::new().unwrap();
        metrics.record_request("workerInfo", RequestOutcome::Ok);

        let text = metrics.export().expect("text exposition");
        assert!(text.contains("strata_admin_requests_total"));
        assert!(text.contains(r#"endpoint="workerInfo""#));
        assert!(text.contains(r#"outcome="ok""#));
    }

    #[test]
    fn duplicate_registration_fails() {
        let registry = Arc::new(Registry::new());
        let _first = PrometheusMetrics::new_with_registry(registry.clone()).unwrap();
        assert!(PrometheusMetrics::new_with_registry(registry).is_err());
    }
}
