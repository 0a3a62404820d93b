use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

use crate::common::cluster::NodeRecord;

/// Which request-channel backend connects the router to executor nodes.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChannelType {
    Tcp,
    Local,
}

/// Declared RPC surface of the cluster, consulted by the `proxy` and
/// `handler` commands. Keyed by role, then proxy/handler name, to the rpc
/// method names it exposes.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct RpcSurface {
    #[serde(default)]
    pub proxies: HashMap<String, HashMap<String, Vec<String>>>,
    #[serde(default)]
    pub handlers: HashMap<String, HashMap<String, Vec<String>>>,
}

/// Cluster description file: this node's identity, the full node list, the
/// settings store served by the `config` command, the declared RPC surface,
/// and the loaded console modules.
#[derive(Debug, Deserialize, Clone)]
pub struct ClusterConfig {
    pub node_id: String,
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub settings: HashMap<String, Value>,
    #[serde(default)]
    pub rpc: RpcSurface,
    #[serde(default = "default_modules")]
    pub modules: Vec<String>,
}

fn default_modules() -> Vec<String> {
    vec!["watchServer".to_string()]
}

pub fn load_cluster_config(path: &str) -> Result<ClusterConfig> {
    let file = File::open(path).with_context(|| format!("open cluster config {path}"))?;
    let reader = BufReader::new(file);
    let config: ClusterConfig = serde_json::from_reader(reader)
        .with_context(|| format!("parse cluster config {path}"))?;
    if !config.nodes.iter().any(|n| n.id.as_str() == config.node_id) {
        anyhow::bail!("node_id {} not present in nodes list", config.node_id);
    }
    Ok(config)
}

/// Process-level settings, read from the environment with a `CONSOLE_`
/// prefix (a `.env` file is honored).
#[derive(Debug, Deserialize, Clone)]
pub struct ConsoleConfig {
    pub rest_host: String,
    pub rest_port: u16,
    pub channel_type: ChannelType,
    /// Per-slot reply deadline in milliseconds. Unset means a slot that
    /// never replies keeps its invocation pending, as the protocol allows.
    pub reply_timeout_ms: Option<u64>,
    pub max_frame_len: usize,
}

pub fn load_console_config() -> Result<ConsoleConfig> {
    dotenv::dotenv().ok();
    let settings = config::Config::builder()
        .set_default("rest_host", "0.0.0.0")?
        .set_default("rest_port", 8080)?
        .set_default("channel_type", "tcp")?
        .set_default("max_frame_len", 1024 * 1024)?
        .add_source(config::Environment::with_prefix("CONSOLE"))
        .build()?;
    let config = settings
        .try_deserialize::<ConsoleConfig>()
        .context("parse console settings from environment")?;
    Ok(config)
}
