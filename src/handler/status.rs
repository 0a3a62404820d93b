use chrono::Utc;
use serde_json::Value;

use crate::common::error::ConsoleError;
use crate::common::stats::ProcessStats;
use crate::handler::context::ExecutorContext;

/// Point-in-time process snapshot for the `status` command.
pub fn handle_status(ctx: &ExecutorContext) -> Result<Value, ConsoleError> {
    let stats = ProcessStats {
        server_id: ctx.node.id.clone(),
        pid: ctx.introspect.pid(),
        heap_used_mb: ctx.introspect.heap_used_mb(),
        uptime_min: ctx.introspect.uptime_minutes(),
        sampled_at: Utc::now(),
    };
    serde_json::to_value(stats).map_err(|e| ConsoleError::remote(e.to_string()))
}
