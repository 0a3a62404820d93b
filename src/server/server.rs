use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use crate::common::cluster::{NodeId, StaticRegistry};
use crate::common::config::{load_cluster_config, load_console_config};
use crate::common::stats::ConnectionTracker;
use crate::handler::context::ExecutorContext;
use crate::server::dispatch::Executor;
use crate::server::loader::load_request_channel;
use crate::server::rest_server::rest_server_start;
use crate::server::router::Router;
use crate::server::transport;
use crate::sys::proc_info::ProcInfo;
use crate::sys::proc_profiler::ProcProfiler;
use crate::traits::introspect::{ProcessIntrospect, Profiler};
use crate::traits::registry::NodeRegistry;

pub async fn server_start(config_path: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    info!("Starting cluster console node...");

    let cluster_config = load_cluster_config(config_path)?;
    let console_config = load_console_config()?;

    let registry: Arc<dyn NodeRegistry> =
        Arc::new(StaticRegistry::new(cluster_config.nodes.clone()));
    let node = registry
        .lookup(&NodeId(cluster_config.node_id.clone()))
        .context("own node record missing from cluster config")?;

    let introspect: Arc<dyn ProcessIntrospect> = Arc::new(ProcInfo::new());
    let profiler: Arc<dyn Profiler> = Arc::new(ProcProfiler::new());
    let connections = Arc::new(ConnectionTracker::new(node.id.clone()));

    let modules = Arc::new(cluster_config.modules.clone());
    let settings = Arc::new(cluster_config.settings.clone());

    let executor = Arc::new(Executor::new(ExecutorContext {
        node: node.clone(),
        registry: registry.clone(),
        modules: modules.clone(),
        settings: settings.clone(),
        rpc: Arc::new(cluster_config.rpc.clone()),
        connections,
        introspect,
        profiler,
    }));

    let listener = tokio::net::TcpListener::bind((node.host.as_str(), node.port)).await?;
    info!(
        "Console executor {} listening on {}:{}",
        node.id, node.host, node.port
    );
    let transport_executor = executor.clone();
    let max_frame_len = console_config.max_frame_len;
    tokio::spawn(async move {
        if let Err(e) = transport::serve(listener, transport_executor, max_frame_len).await {
            tracing::error!(error = ?e, "executor transport stopped");
        }
    });

    let channel = Arc::new(load_request_channel(
        &console_config,
        registry.clone(),
        executor,
    ));
    let router = Arc::new(Router::new(
        node,
        registry,
        channel,
        modules,
        settings,
        console_config.reply_timeout_ms.map(Duration::from_millis),
    ));

    rest_server_start(&console_config, router).await
}
