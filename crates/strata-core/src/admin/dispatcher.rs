use std::sync::Arc;

use strata_model::NodeRole;
use tracing::{debug, instrument};

use crate::admin::{AdminError, AdminHandler, AdminOp, AdminRequest, Capabilities};

/// Routes [`AdminRequest`]s to a role handler, enforcing its capability set.
pub struct AdminDispatcher<H: ?Sized> {
    handler: Arc<H>,
}

impl<H: ?Sized> Clone for AdminDispatcher<H> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<H> AdminDispatcher<H>
where
    H: AdminHandler + ?Sized,
{
    pub fn new(handler: Arc<H>) -> Self {
        Self { handler }
    }

    pub fn handler(&self) -> &Arc<H> {
        &self.handler
    }

    pub fn role(&self) -> NodeRole {
        self.handler.role()
    }

    pub fn capabilities(&self) -> Capabilities {
        self.handler.capabilities()
    }

    pub fn supports(&self, op: AdminOp) -> bool {
        self.capabilities().contains(op)
    }

    /// Run one admin request.
    ///
    /// Operations outside the handler's capabilities fail with
    /// [`AdminError::Unsupported`] without reaching the handler.
    #[instrument(
        level = "debug",
        skip(self, request),
        fields(op = %request.op(), role = %self.role())
    )]
    pub async fn dispatch(&self, request: AdminRequest) -> Result<String, AdminError> {
        let op = request.op();
        if !self.supports(op) {
            debug!("operation outside role capabilities");
            return Err(AdminError::Unsupported {
                op,
                role: self.role(),
            });
        }

        let h = &self.handler;
        match request {
            AdminRequest::WorkerInfo => h.worker_info().await,
            AdminRequest::ThreadDump => h.thread_dump().await,
            AdminRequest::ShuffleList => h.shuffle_list().await,
            AdminRequest::ApplicationList => h.application_list().await,
            AdminRequest::TopDiskUsage => h.top_disk_usage().await,
            AdminRequest::MasterGroupInfo => h.master_group_info().await,
            AdminRequest::LostWorkers => h.lost_workers().await,
            AdminRequest::ShutdownWorkers => h.shutdown_workers().await,
            AdminRequest::ExcludedWorkers => h.excluded_workers().await,
            AdminRequest::Hostnames => h.hostnames().await,
            AdminRequest::Exclude { add, remove } => h.exclude(&add, &remove).await,
            AdminRequest::PartitionLocationInfo => h.partition_location_info().await,
            AdminRequest::UnavailablePeers => h.unavailable_peers().await,
            AdminRequest::ShutdownState => h.shutdown_state().await,
            AdminRequest::RegistrationState => h.registration_state().await,
            AdminRequest::Exit { kind } => h.exit(kind).await,
            AdminRequest::WorkerEvent { kind, workers } => h.worker_event(&kind, &workers).await,
            AdminRequest::WorkerEventInfo => h.worker_event_info().await,
        }
    }

    /// Endpoint paths of the supported operations, one per line.
    pub fn help(&self) -> String {
        self.capabilities()
            .iter()
            .map(|op| format!("{}\n", op.path()))
            .collect()
    }
}
