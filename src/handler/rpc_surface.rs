use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::common::error::ConsoleError;
use crate::common::message::RoutingContext;
use crate::handler::context::ExecutorContext;

/// RPC proxy introspection: the proxies this cluster declares for the role
/// of the node named by the context, as `{role: {proxy: {rpc: "function"}}}`.
pub fn handle_proxy(
    ctx: &ExecutorContext,
    context: &RoutingContext,
) -> Result<Value, ConsoleError> {
    if ctx.rpc.proxies.is_empty() {
        return Err(ConsoleError::remote("no proxy loaded"));
    }
    surface_for(ctx, context, &ctx.rpc.proxies)
}

/// Request handler introspection, same shape as `handle_proxy`.
pub fn handle_handler(
    ctx: &ExecutorContext,
    context: &RoutingContext,
) -> Result<Value, ConsoleError> {
    if ctx.rpc.handlers.is_empty() {
        return Err(ConsoleError::remote("no handler loaded"));
    }
    surface_for(ctx, context, &ctx.rpc.handlers)
}

fn surface_for(
    ctx: &ExecutorContext,
    context: &RoutingContext,
    table: &HashMap<String, HashMap<String, Vec<String>>>,
) -> Result<Value, ConsoleError> {
    let id = match context {
        RoutingContext::Node(id) => id,
        RoutingContext::All => return Err(ConsoleError::routing("context error")),
    };
    let record = ctx
        .registry
        .lookup(id)
        .ok_or_else(|| ConsoleError::remote(format!("no server with this id {id}")))?;
    let role = record.role.as_str();

    let mut names = Map::new();
    if let Some(entries) = table.get(role) {
        for (name, rpcs) in entries {
            let flagged: Map<String, Value> = rpcs
                .iter()
                .map(|rpc| (rpc.clone(), Value::String("function".to_string())))
                .collect();
            names.insert(name.clone(), Value::Object(flagged));
        }
    }
    let mut out = Map::new();
    out.insert(role.to_string(), Value::Object(names));
    Ok(Value::Object(out))
}
