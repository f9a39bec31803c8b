use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use axum::response::Response;
use strata_core::{AdminError, AdminHandler, AdminOp, ConfigResolver, NodeConf, SnapshotStore};
use strata_model::{ExitKind, NodeRole};

/// Handler answering every operation with `"<role>: <op>"`.
///
/// The dispatcher still gates calls by role capabilities.
pub struct StubHandler {
    role: NodeRole,
    fail_teardown: bool,
    pub setups: AtomicUsize,
    pub teardowns: AtomicUsize,
}

impl StubHandler {
    pub fn new(role: NodeRole) -> Self {
        Self {
            role,
            fail_teardown: false,
            setups: AtomicUsize::new(0),
            teardowns: AtomicUsize::new(0),
        }
    }

    pub fn failing_teardown(mut self) -> Self {
        self.fail_teardown = true;
        self
    }

    pub fn setup_count(&self) -> usize {
        self.setups.load(Ordering::SeqCst)
    }

    pub fn teardown_count(&self) -> usize {
        self.teardowns.load(Ordering::SeqCst)
    }

    fn answer(&self, op: AdminOp) -> Result<String, AdminError> {
        Ok(format!("{}: {}", self.role, op.name()))
    }
}

#[async_trait]
impl AdminHandler for StubHandler {
    fn role(&self) -> NodeRole {
        self.role
    }

    async fn setup(&self) -> Result<(), AdminError> {
        self.setups.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn teardown(&self, _exit: ExitKind) -> Result<(), AdminError> {
        self.teardowns.fetch_add(1, Ordering::SeqCst);
        if self.fail_teardown {
            return Err(AdminError::Internal("teardown failed".into()));
        }
        Ok(())
    }

    async fn worker_info(&self) -> Result<String, AdminError> {
        self.answer(AdminOp::WorkerInfo)
    }

    async fn thread_dump(&self) -> Result<String, AdminError> {
        self.answer(AdminOp::ThreadDump)
    }

    async fn shuffle_list(&self) -> Result<String, AdminError> {
        self.answer(AdminOp::ShuffleList)
    }

    async fn application_list(&self) -> Result<String, AdminError> {
        self.answer(AdminOp::ApplicationList)
    }

    async fn top_disk_usage(&self) -> Result<String, AdminError> {
        self.answer(AdminOp::TopDiskUsage)
    }

    async fn lost_workers(&self) -> Result<String, AdminError> {
        self.answer(AdminOp::LostWorkers)
    }

    async fn exclude(&self, add: &str, remove: &str) -> Result<String, AdminError> {
        Ok(format!("excluded [{add}] restored [{remove}]"))
    }

    async fn worker_event(&self, kind: &str, workers: &str) -> Result<String, AdminError> {
        Ok(format!("event {kind} -> {workers}"))
    }

    async fn unavailable_peers(&self) -> Result<String, AdminError> {
        self.answer(AdminOp::UnavailablePeers)
    }

    async fn registration_state(&self) -> Result<String, AdminError> {
        self.answer(AdminOp::RegistrationState)
    }

    async fn exit(&self, kind: ExitKind) -> Result<String, AdminError> {
        Ok(format!("exit {kind}"))
    }
}

const SNAPSHOT: &str = r#"{
    "system": { "strata.quota.enabled": "true" },
    "tenants": [
        { "tenantId": "t2", "config": { "strata.quota.diskBytes": "2g" } },
        { "tenantId": "t1", "config": { "strata.quota.diskBytes": "1g" } }
    ],
    "tenantUsers": [
        { "tenantId": "t1", "name": "alice", "config": { "strata.quota.files": "10" } }
    ],
    "clusterTags": [
        {
            "id": 1, "clusterId": 1, "tag": "ssd", "workerId": "w1",
            "createdAt": "2024-03-01T10:00:00Z", "modifiedAt": "2024-03-01T10:00:00Z"
        }
    ]
}"#;

/// Resolver over a small node conf and an in-memory store.
pub fn populated_resolver() -> ConfigResolver {
    let conf = NodeConf::new().with("strata.worker.flusher.threads", "4");
    let store = SnapshotStore::from_json(SNAPSHOT).unwrap();
    ConfigResolver::new(Arc::new(conf), Some(Arc::new(store)))
}

pub async fn body_text(resp: Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
