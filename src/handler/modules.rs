use serde_json::Value;

use crate::common::error::ConsoleError;
use crate::handler::context::ExecutorContext;

/// Names of the console modules loaded on this node.
pub fn handle_modules(ctx: &ExecutorContext) -> Result<Value, ConsoleError> {
    serde_json::to_value(ctx.modules.as_ref()).map_err(|e| ConsoleError::remote(e.to_string()))
}
