use serde_json::Value;

use crate::common::error::ConsoleError;
use crate::common::stats::ServerInfo;
use crate::handler::context::ExecutorContext;

/// One leaf of the cluster-wide `servers` enumeration: this node's identity
/// plus a coarse resource summary.
pub fn handle_servers(ctx: &ExecutorContext) -> Result<Value, ConsoleError> {
    let info = ServerInfo {
        server_id: ctx.node.id.clone(),
        role: ctx.node.role.clone(),
        host: ctx.node.host.clone(),
        port: ctx.node.port,
        pid: ctx.introspect.pid(),
        heap_used_mb: ctx.introspect.heap_used_mb(),
        uptime_min: ctx.introspect.uptime_minutes(),
    };
    serde_json::to_value(info).map_err(|e| ConsoleError::remote(e.to_string()))
}
