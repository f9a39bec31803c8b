use std::{io, net::SocketAddr, sync::Arc};

use strata_core::{
    AdminError, AdminHandler, ConfError, ConfigResolver, ConfigStore, MetricsHandle, NodeConf,
    noop_metrics,
};
use strata_model::{ExitKind, NodeRole};
use thiserror::Error;
use tokio::{net::TcpListener, task::JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::http::HttpApi;

/// Errors raised while bringing the admin endpoint up or down.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Conf(#[from] ConfError),

    #[error("failed to bind admin endpoint on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("admin endpoint failed: {0}")]
    Serve(#[source] io::Error),

    #[error("admin endpoint task aborted: {0}")]
    Join(String),

    #[error("role setup failed: {0}")]
    Setup(#[source] AdminError),

    #[error("role teardown failed: {0}")]
    Teardown(#[source] AdminError),
}

/// Running server: bound address, shutdown signal and the serving task.
struct ServerHandle {
    addr: SocketAddr,
    shutdown: CancellationToken,
    task: JoinHandle<io::Result<()>>,
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Admin HTTP endpoint of one node, bound to its role's host and port.
///
/// Lifecycle:
/// - [`initialize`](Self::initialize): role setup, then [`start`](Self::start)
/// - [`shutdown`](Self::shutdown): [`stop`](Self::stop), then role teardown
pub struct HttpService<H: ?Sized> {
    conf: Arc<NodeConf>,
    resolver: ConfigResolver,
    handler: Arc<H>,
    metrics: MetricsHandle,
    server: Option<ServerHandle>,
}

impl<H> HttpService<H>
where
    H: AdminHandler + ?Sized,
{
    pub fn new(conf: Arc<NodeConf>, store: Option<Arc<dyn ConfigStore>>, handler: Arc<H>) -> Self {
        let resolver = ConfigResolver::new(Arc::clone(&conf), store);
        Self {
            conf,
            resolver,
            handler,
            metrics: noop_metrics(),
            server: None,
        }
    }

    pub fn with_metrics(mut self, metrics: MetricsHandle) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn role(&self) -> NodeRole {
        self.handler.role()
    }

    pub fn handler(&self) -> &Arc<H> {
        &self.handler
    }

    pub fn is_running(&self) -> bool {
        self.server.as_ref().is_some_and(|s| !s.task.is_finished())
    }

    /// Address the endpoint listens on, while started.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.as_ref().map(|s| s.addr)
    }

    /// Bind the role's admin address and serve in a background task.
    ///
    /// Starting a running service does nothing and returns its address.
    pub async fn start(&mut self) -> Result<SocketAddr, ServiceError> {
        if let Some(server) = &self.server {
            warn!(addr = %server.addr, "admin endpoint already started");
            return Ok(server.addr);
        }

        let role = self.role();
        let addr = format!("{}:{}", self.conf.http_host(role), self.conf.http_port(role)?);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| ServiceError::Bind {
                addr: addr.clone(),
                source,
            })?;
        let bound = listener
            .local_addr()
            .map_err(|source| ServiceError::Bind { addr, source })?;

        let router = HttpApi::new(self.resolver.clone(), Arc::clone(&self.handler))
            .with_metrics(Arc::clone(&self.metrics))
            .router();

        let shutdown = CancellationToken::new();
        let signal = shutdown.clone();
        let task = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async move { signal.cancelled().await })
                .await
        });

        info!(
            %role,
            addr = %bound,
            dynamic_config = self.resolver.dynamic_enabled(),
            "admin endpoint started"
        );
        self.server = Some(ServerHandle {
            addr: bound,
            shutdown,
            task,
        });
        Ok(bound)
    }

    /// Stop serving and wait for in-flight requests to finish.
    ///
    /// A service that was never started stops successfully.
    pub async fn stop(&mut self, exit: ExitKind) -> Result<(), ServiceError> {
        let Some(mut server) = self.server.take() else {
            return Ok(());
        };

        server.shutdown.cancel();
        let result = match (&mut server.task).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(ServiceError::Serve(e)),
            Err(e) => Err(ServiceError::Join(e.to_string())),
        };
        info!(role = %self.role(), addr = %server.addr, %exit, "admin endpoint stopped");
        result
    }

    /// Role setup followed by [`start`](Self::start).
    pub async fn initialize(&mut self) -> Result<SocketAddr, ServiceError> {
        self.handler.setup().await.map_err(ServiceError::Setup)?;
        self.start().await
    }

    /// [`stop`](Self::stop) followed by role teardown.
    ///
    /// Teardown runs even when stopping fails; the first error is returned.
    pub async fn shutdown(&mut self, exit: ExitKind) -> Result<(), ServiceError> {
        let stopped = self.stop(exit).await;
        let torn_down = self
            .handler
            .teardown(exit)
            .await
            .map_err(ServiceError::Teardown);
        stopped.and(torn_down)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubHandler;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpStream,
    };

    fn loopback(role: NodeRole) -> Arc<NodeConf> {
        let conf = NodeConf::new()
            .with(format!("strata.{role}.http.host"), "127.0.0.1")
            .with(format!("strata.{role}.http.port"), "0");
        Arc::new(conf)
    }

    fn service(role: NodeRole) -> HttpService<StubHandler> {
        HttpService::new(loopback(role), None, Arc::new(StubHandler::new(role)))
    }

    async fn get(addr: SocketAddr, path: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        let request =
            format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut raw = Vec::new();
        stream.read_to_end(&mut raw).await.unwrap();
        String::from_utf8_lossy(&raw).into_owned()
    }

    #[tokio::test]
    async fn started_service_answers_conf_over_tcp() {
        let mut svc = service(NodeRole::Worker);
        let addr = svc.start().await.unwrap();
        assert!(svc.is_running());
        assert_eq!(svc.local_addr(), Some(addr));

        let response = get(addr, "/conf").await;
        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.contains("=== Configuration ==="));
        assert!(response.contains("strata.worker.http.host"));

        svc.stop(ExitKind::Graceful).await.unwrap();
        assert!(!svc.is_running());
        assert_eq!(svc.local_addr(), None);
    }

    #[tokio::test]
    async fn dynamic_config_without_store_reports_disabled() {
        let mut svc = service(NodeRole::Master);
        let addr = svc.start().await.unwrap();

        let response = get(addr, "/listDynamicConfigs").await;
        assert!(response.contains("Dynamic configuration is disabled"));

        svc.stop(ExitKind::Graceful).await.unwrap();
    }

    #[tokio::test]
    async fn stop_before_start_is_ok() {
        let mut svc = service(NodeRole::Master);
        svc.stop(ExitKind::Immediately).await.unwrap();
        assert!(!svc.is_running());
    }

    #[tokio::test]
    async fn second_start_keeps_first_endpoint() {
        let mut svc = service(NodeRole::Worker);
        let first = svc.start().await.unwrap();
        let second = svc.start().await.unwrap();
        assert_eq!(first, second);
        svc.stop(ExitKind::Graceful).await.unwrap();
    }

    #[tokio::test]
    async fn occupied_port_is_a_bind_error() {
        let mut first = service(NodeRole::Worker);
        let addr = first.start().await.unwrap();

        let conf = NodeConf::new()
            .with("strata.worker.http.host", "127.0.0.1")
            .with("strata.worker.http.port", addr.port().to_string());
        let mut second =
            HttpService::new(Arc::new(conf), None, Arc::new(StubHandler::new(NodeRole::Worker)));

        let err = second.start().await.unwrap_err();
        assert!(matches!(err, ServiceError::Bind { .. }));
        assert!(!second.is_running());

        first.stop(ExitKind::Graceful).await.unwrap();
    }

    #[tokio::test]
    async fn malformed_port_is_a_conf_error() {
        let conf = NodeConf::new().with("strata.master.http.port", "http");
        let mut svc =
            HttpService::new(Arc::new(conf), None, Arc::new(StubHandler::new(NodeRole::Master)));
        assert!(matches!(svc.start().await, Err(ServiceError::Conf(_))));
    }

    #[tokio::test]
    async fn lifecycle_runs_setup_and_teardown() {
        let mut svc = service(NodeRole::Master);
        svc.initialize().await.unwrap();
        assert_eq!(svc.handler().setup_count(), 1);
        assert!(svc.is_running());

        svc.shutdown(ExitKind::Graceful).await.unwrap();
        assert_eq!(svc.handler().teardown_count(), 1);
        assert!(!svc.is_running());
    }

    #[tokio::test]
    async fn teardown_error_is_reported_after_stop() {
        let handler = Arc::new(StubHandler::new(NodeRole::Worker).failing_teardown());
        let mut svc = HttpService::new(loopback(NodeRole::Worker), None, handler);
        svc.initialize().await.unwrap();

        let err = svc.shutdown(ExitKind::Decommission).await.unwrap_err();
        assert!(matches!(err, ServiceError::Teardown(_)));
        assert!(!svc.is_running());
        assert_eq!(svc.handler().teardown_count(), 1);
    }
}
