use async_trait::async_trait;
use strata_model::{ExitKind, NodeRole};

use crate::admin::{AdminError, AdminOp, Capabilities};

/// Role-specific implementation of the admin operations.
///
/// The five mandatory operations must be implemented by every role. The
/// extended ones default to [`AdminError::Unsupported`]; a role overrides only
/// those it lists in [`AdminHandler::capabilities`].
#[async_trait]
pub trait AdminHandler: Send + Sync + 'static {
    /// Role this handler serves.
    fn role(&self) -> NodeRole;

    /// Operations this handler implements. Defaults to the role's set.
    fn capabilities(&self) -> Capabilities {
        match self.role() {
            NodeRole::Master => Capabilities::MASTER,
            NodeRole::Worker => Capabilities::WORKER,
        }
    }

    /// Role setup, run before the admin endpoint starts listening.
    async fn setup(&self) -> Result<(), AdminError> {
        Ok(())
    }

    /// Role teardown, run after the admin endpoint has been released.
    async fn teardown(&self, _exit: ExitKind) -> Result<(), AdminError> {
        Ok(())
    }

    async fn worker_info(&self) -> Result<String, AdminError>;

    async fn thread_dump(&self) -> Result<String, AdminError>;

    async fn shuffle_list(&self) -> Result<String, AdminError>;

    async fn application_list(&self) -> Result<String, AdminError>;

    async fn top_disk_usage(&self) -> Result<String, AdminError>;

    async fn master_group_info(&self) -> Result<String, AdminError> {
        Err(unsupported(self.role(), AdminOp::MasterGroupInfo))
    }

    async fn lost_workers(&self) -> Result<String, AdminError> {
        Err(unsupported(self.role(), AdminOp::LostWorkers))
    }

    async fn shutdown_workers(&self) -> Result<String, AdminError> {
        Err(unsupported(self.role(), AdminOp::ShutdownWorkers))
    }

    async fn excluded_workers(&self) -> Result<String, AdminError> {
        Err(unsupported(self.role(), AdminOp::ExcludedWorkers))
    }

    async fn hostnames(&self) -> Result<String, AdminError> {
        Err(unsupported(self.role(), AdminOp::Hostnames))
    }

    /// Add and remove workers (comma-separated ids) from the exclusion list.
    async fn exclude(&self, _add: &str, _remove: &str) -> Result<String, AdminError> {
        Err(unsupported(self.role(), AdminOp::Exclude))
    }

    async fn partition_location_info(&self) -> Result<String, AdminError> {
        Err(unsupported(self.role(), AdminOp::PartitionLocationInfo))
    }

    async fn unavailable_peers(&self) -> Result<String, AdminError> {
        Err(unsupported(self.role(), AdminOp::UnavailablePeers))
    }

    async fn shutdown_state(&self) -> Result<String, AdminError> {
        Err(unsupported(self.role(), AdminOp::ShutdownState))
    }

    async fn registration_state(&self) -> Result<String, AdminError> {
        Err(unsupported(self.role(), AdminOp::RegistrationState))
    }

    async fn exit(&self, _kind: ExitKind) -> Result<String, AdminError> {
        Err(unsupported(self.role(), AdminOp::Exit))
    }

    async fn worker_event(&self, _kind: &str, _workers: &str) -> Result<String, AdminError> {
        Err(unsupported(self.role(), AdminOp::WorkerEvent))
    }

    async fn worker_event_info(&self) -> Result<String, AdminError> {
        Err(unsupported(self.role(), AdminOp::WorkerEventInfo))
    }
}

fn unsupported(role: NodeRole, op: AdminOp) -> AdminError {
    AdminError::Unsupported { op, role }
}
