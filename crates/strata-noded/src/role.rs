//! Standalone role handlers served by the node daemon.
//!
//! They keep their state in memory; a node embedded in a real cluster plugs
//! its own [`AdminHandler`] into the same service.
use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use strata_core::{AdminError, AdminHandler, render};
use strata_model::{ConfigMap, ExitKind, NodeRole};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tokio::sync::{RwLock, watch};
use tracing::info;

/// Splits a comma-separated worker list, dropping blanks.
fn worker_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

fn runtime_summary() -> String {
    let workers = tokio::runtime::Handle::try_current()
        .map(|h| h.metrics().num_workers())
        .unwrap_or(0);
    let mut map = ConfigMap::new();
    map.insert("pid", std::process::id().to_string())
        .insert("runtime.workers", workers.to_string());
    render(&map)
}

fn rfc3339(at: OffsetDateTime) -> Result<String, AdminError> {
    at.format(&Rfc3339)
        .map_err(|e| AdminError::Internal(format!("timestamp formatting: {e}")))
}

// ============================================================================
// Master
// ============================================================================

#[derive(Default)]
struct MasterState {
    excluded: BTreeSet<String>,
    /// Last event sent to each worker, with its send time.
    events: BTreeMap<String, (String, OffsetDateTime)>,
}

/// Master role: tracks excluded workers and worker events.
#[derive(Default)]
pub struct MasterRole {
    state: RwLock<MasterState>,
}

impl MasterRole {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AdminHandler for MasterRole {
    fn role(&self) -> NodeRole {
        NodeRole::Master
    }

    async fn setup(&self) -> Result<(), AdminError> {
        info!("master role ready");
        Ok(())
    }

    async fn worker_info(&self) -> Result<String, AdminError> {
        let state = self.state.read().await;
        let workers: ConfigMap = state
            .events
            .keys()
            .map(|w| {
                let status = if state.excluded.contains(w) {
                    "excluded"
                } else {
                    "known"
                };
                (w.clone(), status.to_string())
            })
            .collect();
        Ok(render(&workers))
    }

    async fn thread_dump(&self) -> Result<String, AdminError> {
        Ok(runtime_summary())
    }

    async fn shuffle_list(&self) -> Result<String, AdminError> {
        Ok(String::new())
    }

    async fn application_list(&self) -> Result<String, AdminError> {
        Ok(String::new())
    }

    async fn top_disk_usage(&self) -> Result<String, AdminError> {
        Ok(String::new())
    }

    async fn master_group_info(&self) -> Result<String, AdminError> {
        let mut map = ConfigMap::new();
        map.insert("group.size", "1").insert("leader", "self");
        Ok(render(&map))
    }

    async fn lost_workers(&self) -> Result<String, AdminError> {
        Ok(String::new())
    }

    async fn shutdown_workers(&self) -> Result<String, AdminError> {
        let state = self.state.read().await;
        let out = state
            .events
            .iter()
            .filter(|(_, (kind, _))| kind.parse::<ExitKind>().is_ok())
            .map(|(worker, _)| format!("{worker}\n"))
            .collect();
        Ok(out)
    }

    async fn excluded_workers(&self) -> Result<String, AdminError> {
        let state = self.state.read().await;
        Ok(state.excluded.iter().map(|w| format!("{w}\n")).collect())
    }

    async fn hostnames(&self) -> Result<String, AdminError> {
        let state = self.state.read().await;
        let hosts: BTreeSet<&str> = state
            .events
            .keys()
            .chain(state.excluded.iter())
            .map(|w| w.split(':').next().unwrap_or(w.as_str()))
            .collect();
        Ok(hosts.into_iter().map(|h| format!("{h}\n")).collect())
    }

    async fn exclude(&self, add: &str, remove: &str) -> Result<String, AdminError> {
        let add = worker_list(add);
        let remove = worker_list(remove);
        if add.is_empty() && remove.is_empty() {
            return Err(AdminError::InvalidRequest(
                "expected workers in `add` or `remove`".into(),
            ));
        }

        let mut state = self.state.write().await;
        for w in &remove {
            state.excluded.remove(w);
        }
        state.excluded.extend(add.iter().cloned());
        info!(added = add.len(), removed = remove.len(), "exclusion list updated");
        Ok(format!(
            "Excluded workers add [{}] and remove [{}] successfully.",
            add.join(","),
            remove.join(",")
        ))
    }

    async fn worker_event(&self, kind: &str, workers: &str) -> Result<String, AdminError> {
        let kind = kind.trim();
        if kind.is_empty() {
            return Err(AdminError::InvalidRequest("missing event `type`".into()));
        }
        let workers = worker_list(workers);
        if workers.is_empty() {
            return Err(AdminError::InvalidRequest("missing `workers`".into()));
        }

        let at = OffsetDateTime::now_utc();
        let mut state = self.state.write().await;
        for w in &workers {
            state.events.insert(w.clone(), (kind.to_string(), at));
        }
        Ok(format!(
            "Sent event {kind} to workers [{}] successfully.",
            workers.join(",")
        ))
    }

    async fn worker_event_info(&self) -> Result<String, AdminError> {
        let state = self.state.read().await;
        let events = state
            .events
            .iter()
            .map(|(w, (kind, at))| Ok((w.clone(), format!("{kind} @ {}", rfc3339(*at)?))))
            .collect::<Result<ConfigMap, AdminError>>()?;
        Ok(render(&events))
    }
}

// ============================================================================
// Worker
// ============================================================================

/// Worker role: reports its registration and shutdown state, and forwards
/// `/exit` requests to the daemon through a watch channel.
pub struct WorkerRole {
    registered: RwLock<bool>,
    exit: watch::Sender<Option<ExitKind>>,
}

impl WorkerRole {
    pub fn new(exit: watch::Sender<Option<ExitKind>>) -> Self {
        Self {
            registered: RwLock::new(false),
            exit,
        }
    }

    fn shutting_down(&self) -> bool {
        self.exit.borrow().is_some()
    }
}

#[async_trait]
impl AdminHandler for WorkerRole {
    fn role(&self) -> NodeRole {
        NodeRole::Worker
    }

    async fn setup(&self) -> Result<(), AdminError> {
        *self.registered.write().await = true;
        info!("worker role registered");
        Ok(())
    }

    async fn teardown(&self, exit: ExitKind) -> Result<(), AdminError> {
        *self.registered.write().await = false;
        info!(%exit, "worker role released");
        Ok(())
    }

    async fn worker_info(&self) -> Result<String, AdminError> {
        let mut map = ConfigMap::new();
        map.insert("registered", self.registered.read().await.to_string())
            .insert("shutdown", self.shutting_down().to_string());
        Ok(render(&map))
    }

    async fn thread_dump(&self) -> Result<String, AdminError> {
        Ok(runtime_summary())
    }

    async fn shuffle_list(&self) -> Result<String, AdminError> {
        Ok(String::new())
    }

    async fn application_list(&self) -> Result<String, AdminError> {
        Ok(String::new())
    }

    async fn top_disk_usage(&self) -> Result<String, AdminError> {
        Ok(String::new())
    }

    async fn partition_location_info(&self) -> Result<String, AdminError> {
        Ok(String::new())
    }

    async fn unavailable_peers(&self) -> Result<String, AdminError> {
        Ok(String::new())
    }

    async fn shutdown_state(&self) -> Result<String, AdminError> {
        Ok(self.shutting_down().to_string())
    }

    async fn registration_state(&self) -> Result<String, AdminError> {
        Ok(self.registered.read().await.to_string())
    }

    async fn exit(&self, kind: ExitKind) -> Result<String, AdminError> {
        if self.shutting_down() {
            return Err(AdminError::InvalidRequest("worker is already exiting".into()));
        }
        self.exit.send_replace(Some(kind));
        info!(%kind, "exit requested");
        Ok(format!("Worker will exit with {kind}."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worker_list_drops_blanks() {
        assert_eq!(worker_list(" a, ,b,"), vec!["a", "b"]);
        assert!(worker_list("").is_empty());
    }

    #[tokio::test]
    async fn master_exclusion_round_trip() {
        let master = MasterRole::new();
        master.exclude("w1,w2", "").await.unwrap();
        master.exclude("", "w1").await.unwrap();
        assert_eq!(master.excluded_workers().await.unwrap(), "w2\n");

        let err = master.exclude(" ", "").await.unwrap_err();
        assert!(matches!(err, AdminError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn master_records_worker_events() {
        let master = MasterRole::new();
        master
            .worker_event("Decommission", "h1:1,h2:1")
            .await
            .unwrap();
        master.worker_event("Recommission", "h3:1").await.unwrap();

        let info = master.worker_event_info().await.unwrap();
        let first = info.lines().next().unwrap();
        let (_, stamp) = first.split_once("Decommission @ ").unwrap();
        let at = OffsetDateTime::parse(stamp, &Rfc3339).unwrap();
        assert!(OffsetDateTime::now_utc() - at < time::Duration::minutes(1));
        assert_eq!(master.shutdown_workers().await.unwrap(), "h1:1\nh2:1\n");
        assert_eq!(master.hostnames().await.unwrap(), "h1\nh2\nh3\n");
        assert!(master.worker_event("", "h1:1").await.is_err());
    }

    #[tokio::test]
    async fn worker_exit_is_forwarded_once() {
        let (tx, mut rx) = watch::channel(None);
        let worker = WorkerRole::new(tx);
        worker.setup().await.unwrap();
        assert_eq!(worker.registration_state().await.unwrap(), "true");
        assert_eq!(worker.shutdown_state().await.unwrap(), "false");

        worker.exit(ExitKind::Decommission).await.unwrap();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), Some(ExitKind::Decommission));
        assert_eq!(worker.shutdown_state().await.unwrap(), "true");
        assert!(worker.exit(ExitKind::Immediately).await.is_err());

        worker.teardown(ExitKind::Decommission).await.unwrap();
        assert_eq!(worker.registration_state().await.unwrap(), "false");
    }
}
