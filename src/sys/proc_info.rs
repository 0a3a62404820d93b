use std::time::Instant;

use crate::traits::introspect::ProcessIntrospect;

/// Process introspection backed by `/proc`. On platforms without procfs the
/// memory reading degrades to zero rather than failing the command.
pub struct ProcInfo {
    started: Instant,
}

impl ProcInfo {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Default for ProcInfo {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessIntrospect for ProcInfo {
    fn pid(&self) -> u32 {
        std::process::id()
    }

    fn heap_used_mb(&self) -> f64 {
        resident_set_mb().unwrap_or(0.0)
    }

    fn uptime_minutes(&self) -> f64 {
        self.started.elapsed().as_secs_f64() / 60.0
    }
}

/// VmRSS of the current process in megabytes.
fn resident_set_mb() -> Option<f64> {
    let status = std::fs::read_to_string("/proc/self/status").ok()?;
    let line = status.lines().find(|l| l.starts_with("VmRSS:"))?;
    let kb: f64 = line.split_whitespace().nth(1)?.parse().ok()?;
    Some(kb / 1024.0)
}
