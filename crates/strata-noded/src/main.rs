mod role;

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use tokio::sync::watch;
use tracing::info;

use strata_api::HttpService;
use strata_core::{AdminHandler, NodeConf, open_store};
use strata_model::{ExitKind, NodeRole};
use strata_observe::{LogConfig, init_logger};
use strata_prometheus::PrometheusMetrics;

use crate::role::{MasterRole, WorkerRole};

/// Node daemon serving the strata admin endpoint.
#[derive(Parser, Debug)]
#[command(name = "strata-noded")]
#[command(about = "Strata node with layered configuration and admin HTTP endpoint")]
#[command(version)]
struct Args {
    /// Node role (master, worker)
    #[arg(short, long, default_value = "worker")]
    role: NodeRole,

    /// Properties file with `key value` lines
    #[arg(short, long)]
    conf: Option<PathBuf>,
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 1) conf + logger
    let conf = match &args.conf {
        Some(path) => NodeConf::load(path)?,
        None => NodeConf::new(),
    };
    init_logger(&LogConfig::from_conf(&conf)?)?;
    info!(role = %args.role, conf = ?args.conf, "logger initialized");

    // 2) dynamic store + metrics
    let store = open_store(&conf)?;
    let metrics = Arc::new(PrometheusMetrics::new()?);

    // 3) role handler; a worker may ask to exit through `/exit`
    let (exit_tx, mut exit_rx) = watch::channel(None::<ExitKind>);
    let handler: Arc<dyn AdminHandler> = match args.role {
        NodeRole::Master => Arc::new(MasterRole::new()),
        NodeRole::Worker => Arc::new(WorkerRole::new(exit_tx.clone())),
    };

    // 4) admin endpoint
    let mut service = HttpService::new(Arc::new(conf), store, handler).with_metrics(metrics);
    let addr = service.initialize().await?;
    info!(%addr, "node running");

    // 5) wait for ctrl-c or an exit request
    let exit = tokio::select! {
        res = tokio::signal::ctrl_c() => {
            res?;
            ExitKind::Graceful
        }
        res = exit_rx.wait_for(Option::is_some) => match res {
            Ok(kind) => (*kind).unwrap_or_default(),
            Err(_) => ExitKind::Graceful,
        },
    };

    info!(%exit, "shutting down");
    service.shutdown(exit).await?;
    Ok(())
}
