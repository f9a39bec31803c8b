use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::Uri,
    routing::{MethodRouter, get, post},
};
use serde::Deserialize;
use strata_core::{
    AdminDispatcher, AdminError, AdminHandler, AdminOp, AdminRequest, ConfigResolver,
    MetricsHandle, RequestOutcome, noop_metrics,
};
use strata_model::ExitKind;
use tracing::debug;

use crate::error::ApiError;

/// Configuration endpoints, listed ahead of the role operations in `/help`.
const CONF_PATH: &str = "/conf";
const DYNAMIC_CONF_PATH: &str = "/listDynamicConfigs";
const CLUSTER_TAGS_PATH: &str = "/clusterTags";
const HELP_PATH: &str = "/help";
const METRICS_PATH: &str = "/metrics/prometheus";

/// Shared state behind every admin route.
pub struct AdminState<H: ?Sized> {
    resolver: ConfigResolver,
    dispatcher: AdminDispatcher<H>,
    metrics: MetricsHandle,
}

impl<H> AdminState<H>
where
    H: AdminHandler + ?Sized,
{
    pub fn new(resolver: ConfigResolver, handler: Arc<H>, metrics: MetricsHandle) -> Self {
        Self {
            resolver,
            dispatcher: AdminDispatcher::new(handler),
            metrics,
        }
    }

    /// Dispatch one admin request and record its outcome.
    async fn run(&self, request: AdminRequest) -> Result<String, ApiError> {
        let op = request.op();
        let result = self.dispatcher.dispatch(request).await.map_err(ApiError::from);
        self.record(op.name(), &result);
        result
    }

    /// Fail early with `Unsupported` for requests that need parameter checks.
    fn ensure_supported(&self, op: AdminOp) -> Result<(), ApiError> {
        if self.dispatcher.supports(op) {
            return Ok(());
        }
        let err = ApiError::from(AdminError::Unsupported {
            op,
            role: self.dispatcher.role(),
        });
        self.metrics.record_request(op.name(), err.outcome());
        Err(err)
    }

    fn record(&self, endpoint: &str, result: &Result<String, ApiError>) {
        let outcome = match result {
            Ok(_) => RequestOutcome::Ok,
            Err(e) => e.outcome(),
        };
        self.metrics.record_request(endpoint, outcome);
    }
}

/// Admin HTTP API builder.
pub struct HttpApi<H: ?Sized> {
    resolver: ConfigResolver,
    handler: Arc<H>,
    metrics: MetricsHandle,
}

impl<H> HttpApi<H>
where
    H: AdminHandler + ?Sized,
{
    pub fn new(resolver: ConfigResolver, handler: Arc<H>) -> Self {
        Self {
            resolver,
            handler,
            metrics: noop_metrics(),
        }
    }

    /// Replace the metrics backend.
    pub fn with_metrics(mut self, metrics: MetricsHandle) -> Self {
        self.metrics = metrics;
        self
    }

    /// Build the axum router.
    ///
    /// Routes:
    /// - GET /conf - static node configuration
    /// - GET /listDynamicConfigs?level=&tenant=&name= - layered dynamic configuration
    /// - GET /clusterTags?clusterId= - worker tags of a cluster
    /// - one route per [`AdminOp`] (POST for `/exclude`, `/exit`, `/sendWorkerEvent`)
    /// - GET /help - endpoints this role serves
    /// - GET /metrics/prometheus - metrics text, when the backend exports one
    pub fn router(self) -> Router {
        let state = Arc::new(AdminState::new(self.resolver, self.handler, self.metrics));

        let mut router = Router::new()
            .route(CONF_PATH, get(conf::<H>))
            .route(DYNAMIC_CONF_PATH, get(dynamic_configs::<H>))
            .route(CLUSTER_TAGS_PATH, get(cluster_tags::<H>))
            .route(HELP_PATH, get(help::<H>))
            .route(METRICS_PATH, get(metrics::<H>))
            .route(AdminOp::Exclude.path(), post(exclude::<H>))
            .route(AdminOp::Exit.path(), post(exit::<H>))
            .route(AdminOp::WorkerEvent.path(), post(worker_event::<H>));

        for op in AdminOp::ALL {
            if let Some(request) = plain_request(op) {
                router = router.route(op.path(), plain_route::<H>(request));
            }
        }

        router.fallback(unknown_endpoint).with_state(state)
    }
}

/// Request for operations that take no parameters.
fn plain_request(op: AdminOp) -> Option<AdminRequest> {
    let request = match op {
        AdminOp::WorkerInfo => AdminRequest::WorkerInfo,
        AdminOp::ThreadDump => AdminRequest::ThreadDump,
        AdminOp::ShuffleList => AdminRequest::ShuffleList,
        AdminOp::ApplicationList => AdminRequest::ApplicationList,
        AdminOp::TopDiskUsage => AdminRequest::TopDiskUsage,
        AdminOp::MasterGroupInfo => AdminRequest::MasterGroupInfo,
        AdminOp::LostWorkers => AdminRequest::LostWorkers,
        AdminOp::ShutdownWorkers => AdminRequest::ShutdownWorkers,
        AdminOp::ExcludedWorkers => AdminRequest::ExcludedWorkers,
        AdminOp::Hostnames => AdminRequest::Hostnames,
        AdminOp::PartitionLocationInfo => AdminRequest::PartitionLocationInfo,
        AdminOp::UnavailablePeers => AdminRequest::UnavailablePeers,
        AdminOp::ShutdownState => AdminRequest::ShutdownState,
        AdminOp::RegistrationState => AdminRequest::RegistrationState,
        AdminOp::WorkerEventInfo => AdminRequest::WorkerEventInfo,
        AdminOp::Exclude | AdminOp::Exit | AdminOp::WorkerEvent => return None,
    };
    Some(request)
}

fn plain_route<H>(request: AdminRequest) -> MethodRouter<Arc<AdminState<H>>>
where
    H: AdminHandler + ?Sized,
{
    get(move |State(state): State<Arc<AdminState<H>>>| {
        let request = request.clone();
        async move { state.run(request).await }
    })
}

// ============================================================================
// Query types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DynamicConfigQuery {
    level: String,
    tenant: String,
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClusterTagsQuery {
    cluster_id: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ExcludeQuery {
    /// Comma-separated workers to exclude.
    add: String,
    /// Comma-separated workers to bring back.
    remove: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ExitQuery {
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WorkerEventQuery {
    #[serde(rename = "type")]
    kind: String,
    workers: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /conf
async fn conf<H>(State(state): State<Arc<AdminState<H>>>) -> String
where
    H: AdminHandler + ?Sized,
{
    state.metrics.record_request("conf", RequestOutcome::Ok);
    state.resolver.resolve_static()
}

/// GET /listDynamicConfigs
///
/// Every parameter is optional; absent means "all".
async fn dynamic_configs<H>(
    State(state): State<Arc<AdminState<H>>>,
    Query(q): Query<DynamicConfigQuery>,
) -> String
where
    H: AdminHandler + ?Sized,
{
    state.metrics.record_request("listDynamicConfigs", RequestOutcome::Ok);
    state.resolver.resolve_dynamic(&q.level, &q.tenant, &q.name)
}

/// GET /clusterTags?clusterId=
async fn cluster_tags<H>(
    State(state): State<Arc<AdminState<H>>>,
    Query(q): Query<ClusterTagsQuery>,
) -> String
where
    H: AdminHandler + ?Sized,
{
    state.metrics.record_request("clusterTags", RequestOutcome::Ok);
    state.resolver.resolve_cluster_tags(q.cluster_id)
}

/// POST /exclude?add=&remove=
async fn exclude<H>(
    State(state): State<Arc<AdminState<H>>>,
    Query(q): Query<ExcludeQuery>,
) -> Result<String, ApiError>
where
    H: AdminHandler + ?Sized,
{
    state
        .run(AdminRequest::Exclude {
            add: q.add,
            remove: q.remove,
        })
        .await
}

/// POST /exit?type=
///
/// `type` is one of DECOMMISSION, GRACEFUL, IMMEDIATELY; GRACEFUL if omitted.
async fn exit<H>(
    State(state): State<Arc<AdminState<H>>>,
    Query(q): Query<ExitQuery>,
) -> Result<String, ApiError>
where
    H: AdminHandler + ?Sized,
{
    state.ensure_supported(AdminOp::Exit)?;

    let kind = match q.kind.as_deref() {
        None | Some("") => ExitKind::default(),
        Some(raw) => raw.parse::<ExitKind>().map_err(|e| {
            state
                .metrics
                .record_request(AdminOp::Exit.name(), RequestOutcome::Invalid);
            ApiError::InvalidRequest(e.to_string())
        })?,
    };
    state.run(AdminRequest::Exit { kind }).await
}

/// POST /sendWorkerEvent?type=&workers=
async fn worker_event<H>(
    State(state): State<Arc<AdminState<H>>>,
    Query(q): Query<WorkerEventQuery>,
) -> Result<String, ApiError>
where
    H: AdminHandler + ?Sized,
{
    state
        .run(AdminRequest::WorkerEvent {
            kind: q.kind,
            workers: q.workers,
        })
        .await
}

/// GET /help
async fn help<H>(State(state): State<Arc<AdminState<H>>>) -> String
where
    H: AdminHandler + ?Sized,
{
    let mut out = [CONF_PATH, DYNAMIC_CONF_PATH, CLUSTER_TAGS_PATH]
        .iter()
        .map(|p| format!("{p}\n"))
        .collect::<String>();
    out.push_str(&state.dispatcher.help());
    out.push_str(HELP_PATH);
    out.push('\n');
    out
}

/// GET /metrics/prometheus
async fn metrics<H>(State(state): State<Arc<AdminState<H>>>) -> Result<String, ApiError>
where
    H: AdminHandler + ?Sized,
{
    state
        .metrics
        .export()
        .ok_or_else(|| ApiError::NotFound("no metrics exporter installed".into()))
}

async fn unknown_endpoint(uri: Uri) -> ApiError {
    debug!(%uri, "request for unknown admin endpoint");
    ApiError::NotFound(format!("{uri} (see {HELP_PATH})"))
}
