use std::sync::Arc;

use crate::admin::AdminError;

/// How an admin request ended, for metrics classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// Answered successfully.
    Ok,
    /// Operation not implemented by this role.
    Unsupported,
    /// Rejected because of bad parameters.
    Invalid,
    /// Failed inside the role handler.
    Failed,
}

impl RequestOutcome {
    /// Return label value for metrics.
    #[inline]
    pub fn as_label(&self) -> &'static str {
        match self {
            RequestOutcome::Ok => "ok",
            RequestOutcome::Unsupported => "unsupported",
            RequestOutcome::Invalid => "invalid",
            RequestOutcome::Failed => "failed",
        }
    }
}

impl From<&AdminError> for RequestOutcome {
    fn from(e: &AdminError) -> Self {
        match e {
            AdminError::Unsupported { .. } => RequestOutcome::Unsupported,
            AdminError::InvalidRequest(_) => RequestOutcome::Invalid,
            AdminError::Internal(_) => RequestOutcome::Failed,
        }
    }
}

/// Metrics collection interface for the admin endpoint.
pub trait AdminMetrics: Send + Sync + 'static {
    /// Record one handled request.
    ///
    /// # Arguments
    /// - `endpoint`: operation or query name, e.g. `workerInfo`, `conf`
    /// - `outcome`: how the request ended
    fn record_request(&self, endpoint: &str, outcome: RequestOutcome);

    /// Text exposition of the collected metrics, if the backend has one.
    fn export(&self) -> Option<String> {
        None
    }
}

/// Shared handle to a metrics backend.
pub type MetricsHandle = Arc<dyn AdminMetrics>;
