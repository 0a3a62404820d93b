use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::common::cluster::NodeRecord;
use crate::common::config::RpcSurface;
use crate::common::stats::ConnectionTracker;
use crate::traits::introspect::{ProcessIntrospect, Profiler};
use crate::traits::registry::NodeRegistry;

/// Everything the executor-side command bodies read: this node's record, the
/// cluster registry, the loaded console modules, the settings store, the
/// declared RPC surface, and the introspection/profiling seams.
#[derive(Clone)]
pub struct ExecutorContext {
    pub node: NodeRecord,
    pub registry: Arc<dyn NodeRegistry>,
    pub modules: Arc<Vec<String>>,
    pub settings: Arc<HashMap<String, Value>>,
    pub rpc: Arc<RpcSurface>,
    pub connections: Arc<ConnectionTracker>,
    pub introspect: Arc<dyn ProcessIntrospect>,
    pub profiler: Arc<dyn Profiler>,
}
