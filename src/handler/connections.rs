use serde_json::Value;

use crate::common::error::ConsoleError;
use crate::handler::context::ExecutorContext;

/// Connection statistics of this node's connector frontend. Serves both the
/// `connections` and `logins` verbs.
pub fn handle_connections(ctx: &ExecutorContext) -> Result<Value, ConsoleError> {
    let snapshot = ctx.connections.snapshot();
    serde_json::to_value(snapshot).map_err(|e| ConsoleError::remote(e.to_string()))
}
