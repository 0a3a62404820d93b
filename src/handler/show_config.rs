use serde_json::{Map, Value};

use crate::common::error::ConsoleError;
use crate::handler::context::ExecutorContext;

/// Look up `<key>Config` in the node's settings store and return its scalar
/// fields only. Nested objects and arrays are stripped; a store entry with
/// nothing left (or no entry at all) yields the `no <key>Config info`
/// sentinel string.
pub fn handle_config(
    ctx: &ExecutorContext,
    param: Option<&Value>,
) -> Result<Value, ConsoleError> {
    let key = param
        .and_then(Value::as_str)
        .filter(|k| !k.is_empty())
        .ok_or_else(|| ConsoleError::parameter("lack of param for config"))?;
    let entry = ctx.settings.get(&format!("{key}Config"));
    Ok(scalar_clone(key, entry))
}

pub fn scalar_clone(key: &str, entry: Option<&Value>) -> Value {
    if let Some(Value::Object(map)) = entry {
        let scalars: Map<String, Value> = map
            .iter()
            .filter(|(_, v)| matches!(v, Value::String(_) | Value::Number(_) | Value::Bool(_)))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        if !scalars.is_empty() {
            return Value::Object(scalars);
        }
    }
    Value::String(format!("no {key}Config info"))
}
