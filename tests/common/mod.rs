#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};

use cluster_console::channel::local_channel::LocalRequestChannel;
use cluster_console::common::cluster::{NodeRecord, StaticRegistry};
use cluster_console::common::config::RpcSurface;
use cluster_console::common::stats::ConnectionTracker;
use cluster_console::handler::context::ExecutorContext;
use cluster_console::server::dispatch::Executor;
use cluster_console::server::router::Router;
use cluster_console::sys::proc_info::ProcInfo;
use cluster_console::sys::proc_profiler::ProcProfiler;
use cluster_console::traits::introspect::Profiler;
use cluster_console::traits::registry::NodeRegistry;
use cluster_console::traits::request_channel::RequestChannel;

pub fn record(id: &str, role: &str, port: u16) -> NodeRecord {
    NodeRecord {
        id: id.into(),
        role: role.into(),
        host: "127.0.0.1".to_string(),
        port,
    }
}

pub fn test_settings() -> HashMap<String, Value> {
    serde_json::from_value(json!({
        "masterConfig": {
            "id": "master-server-1",
            "port": 3005,
            "env": "test",
            "plugins": { "chat": true }
        },
        "connectorConfig": {
            "heartbeat": 30,
            "useDict": true,
            "blacklist": []
        },
        "chatConfig": {
            "rooms": { "limit": 200 }
        }
    }))
    .expect("settings fixture")
}

pub fn test_rpc() -> RpcSurface {
    serde_json::from_value(json!({
        "proxies": {
            "connector": {
                "sessionRemote": ["kickBySessionId", "getBackendSessionBySid"]
            },
            "chat": {
                "chatRemote": ["add", "kick", "get"]
            }
        },
        "handlers": {
            "connector": {
                "entryHandler": ["enter", "publish"]
            },
            "gate": {
                "gateHandler": ["queryEntry"]
            }
        }
    }))
    .expect("rpc fixture")
}

pub fn test_modules() -> Vec<String> {
    vec!["watchServer".to_string(), "consoleInfo".to_string()]
}

pub fn executor_for(record: &NodeRecord, registry: Arc<dyn NodeRegistry>) -> Arc<Executor> {
    executor_with_profiler(record, registry, Arc::new(ProcProfiler::new()))
}

pub fn executor_with_profiler(
    record: &NodeRecord,
    registry: Arc<dyn NodeRegistry>,
    profiler: Arc<dyn Profiler>,
) -> Arc<Executor> {
    let connections = Arc::new(ConnectionTracker::new(record.id.clone()));
    executor_with(record, registry, profiler, connections)
}

pub fn executor_with(
    record: &NodeRecord,
    registry: Arc<dyn NodeRegistry>,
    profiler: Arc<dyn Profiler>,
    connections: Arc<ConnectionTracker>,
) -> Arc<Executor> {
    Arc::new(Executor::new(ExecutorContext {
        node: record.clone(),
        registry,
        modules: Arc::new(test_modules()),
        settings: Arc::new(test_settings()),
        rpc: Arc::new(test_rpc()),
        connections,
        introspect: Arc::new(ProcInfo::new()),
        profiler,
    }))
}

/// A registry plus an in-process channel wired with one executor per node.
pub fn local_cluster(records: &[NodeRecord]) -> (Arc<dyn NodeRegistry>, LocalRequestChannel) {
    let registry: Arc<dyn NodeRegistry> = Arc::new(StaticRegistry::new(records.to_vec()));
    let mut channel = LocalRequestChannel::new();
    for r in records {
        channel.register(executor_for(r, registry.clone()));
    }
    (registry, channel)
}

pub fn router_over<C>(
    entry: NodeRecord,
    registry: Arc<dyn NodeRegistry>,
    channel: Arc<C>,
    reply_timeout: Option<Duration>,
) -> Router<C>
where
    C: RequestChannel + Send + Sync,
{
    Router::new(
        entry,
        registry,
        channel,
        Arc::new(test_modules()),
        Arc::new(test_settings()),
        reply_timeout,
    )
}

/// Key set of the `msg` map in an aggregated router response.
pub fn msg_keys(response: &Value) -> Vec<String> {
    let mut keys: Vec<String> = response["msg"]
        .as_object()
        .expect("keyed msg payload")
        .keys()
        .cloned()
        .collect();
    keys.sort();
    keys
}
