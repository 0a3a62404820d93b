use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;

use crate::traits::introspect::Profiler;

const SAMPLE_INTERVAL: Duration = Duration::from_millis(100);

/// Profiler backed by `/proc` accounting. CPU capture samples the process's
/// utime/stime counters `times` times and writes the series; heap capture
/// writes a snapshot of the kernel's memory accounting for the process.
pub struct ProcProfiler {
    sample_interval: Duration,
}

impl ProcProfiler {
    pub fn new() -> Self {
        Self {
            sample_interval: SAMPLE_INTERVAL,
        }
    }
}

impl Default for ProcProfiler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Profiler for ProcProfiler {
    async fn capture_cpu(&self, path: &Path, times: u64) -> Result<()> {
        let mut samples = Vec::with_capacity(times as usize);
        for _ in 0..times {
            samples.push(cpu_ticks()?);
            tokio::time::sleep(self.sample_interval).await;
        }
        let profile = json!({
            "pid": std::process::id(),
            "captured_at": Utc::now(),
            "interval_ms": self.sample_interval.as_millis() as u64,
            "samples": samples,
        });
        tokio::fs::write(path, serde_json::to_vec_pretty(&profile)?)
            .await
            .with_context(|| format!("write cpu profile {}", path.display()))?;
        Ok(())
    }

    async fn capture_heap(&self, path: &Path) -> Result<()> {
        let snapshot = json!({
            "pid": std::process::id(),
            "captured_at": Utc::now(),
            "memory": memory_accounting()?,
        });
        tokio::fs::write(path, serde_json::to_vec_pretty(&snapshot)?)
            .await
            .with_context(|| format!("write heap snapshot {}", path.display()))?;
        Ok(())
    }
}

/// One utime/stime reading from `/proc/self/stat`, in clock ticks.
fn cpu_ticks() -> Result<serde_json::Value> {
    let stat = std::fs::read_to_string("/proc/self/stat").context("read /proc/self/stat")?;
    // Skip past the parenthesized comm field, which may contain spaces.
    let rest = stat
        .rsplit_once(')')
        .map(|(_, rest)| rest)
        .context("malformed /proc/self/stat")?;
    let fields: Vec<&str> = rest.split_whitespace().collect();
    let utime: u64 = fields
        .get(11)
        .and_then(|f| f.parse().ok())
        .context("utime missing from /proc/self/stat")?;
    let stime: u64 = fields
        .get(12)
        .and_then(|f| f.parse().ok())
        .context("stime missing from /proc/self/stat")?;
    Ok(json!({ "utime": utime, "stime": stime }))
}

/// Memory lines of `/proc/self/status` (Vm* entries, kB values).
fn memory_accounting() -> Result<serde_json::Value> {
    let status = std::fs::read_to_string("/proc/self/status").context("read /proc/self/status")?;
    let mut accounting = serde_json::Map::new();
    for line in status.lines() {
        let Some((name, rest)) = line.split_once(':') else {
            continue;
        };
        if !name.starts_with("Vm") {
            continue;
        }
        if let Some(kb) = rest.split_whitespace().next().and_then(|v| v.parse::<u64>().ok()) {
            accounting.insert(format!("{name}_kb"), json!(kb));
        }
    }
    Ok(serde_json::Value::Object(accounting))
}
