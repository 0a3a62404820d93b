use std::path::PathBuf;

use serde_json::Value;
use tracing::info;

use crate::common::error::ConsoleError;
use crate::handler::context::ExecutorContext;

/// Capture a CPU profile to `<filepath>.cpuprofile`. `times` is the sample
/// count and must be a positive integer (string or number form). Parameters
/// are rejected before anything touches the filesystem.
pub async fn handle_dump_cpu(
    ctx: &ExecutorContext,
    param: Option<&Value>,
) -> Result<Value, ConsoleError> {
    let filepath = required_filepath(param)?;
    let times = parse_times(param)?;
    let path = with_extension(filepath, "cpuprofile");
    check_file_path(&path).await?;
    ctx.profiler
        .capture_cpu(&path, times)
        .await
        .map_err(|e| ConsoleError::remote(e.to_string()))?;
    info!(path = %path.display(), times, "cpu dump written");
    Ok(Value::String(format!("{} cpu dump ok", path.display())))
}

/// Capture a heap snapshot to `<filepath>.heapsnapshot`.
pub async fn handle_dump_memory(
    ctx: &ExecutorContext,
    param: Option<&Value>,
) -> Result<Value, ConsoleError> {
    let filepath = required_filepath(param)?;
    let path = with_extension(filepath, "heapsnapshot");
    check_file_path(&path).await?;
    ctx.profiler
        .capture_heap(&path)
        .await
        .map_err(|e| ConsoleError::remote(e.to_string()))?;
    info!(path = %path.display(), "memory dump written");
    Ok(Value::String(format!("{} memory dump ok", path.display())))
}

fn required_filepath(param: Option<&Value>) -> Result<&str, ConsoleError> {
    param
        .and_then(|p| p.get("filepath"))
        .and_then(Value::as_str)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ConsoleError::parameter("lack of filepath param"))
}

fn parse_times(param: Option<&Value>) -> Result<u64, ConsoleError> {
    let times = param.and_then(|p| p.get("times"));
    let parsed = match times {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.parse::<u64>().ok(),
        _ => None,
    };
    match parsed {
        Some(n) if n > 0 => Ok(n),
        _ => Err(ConsoleError::parameter("no times or times invalid error")),
    }
}

fn with_extension(filepath: &str, extension: &str) -> PathBuf {
    let suffix = format!(".{extension}");
    if filepath.ends_with(&suffix) {
        PathBuf::from(filepath)
    } else {
        PathBuf::from(format!("{filepath}{suffix}"))
    }
}

/// Probe that the destination is writable by writing and deleting a scratch
/// file, so the profiler never runs against an unusable path.
async fn check_file_path(path: &std::path::Path) -> Result<(), ConsoleError> {
    tokio::fs::write(path, b"test")
        .await
        .map_err(|_| ConsoleError::validation("filepath invalid error"))?;
    tokio::fs::remove_file(path)
        .await
        .map_err(|_| ConsoleError::validation("filepath invalid error"))?;
    Ok(())
}
