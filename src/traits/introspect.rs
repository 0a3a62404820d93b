use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;

/// Process-level introspection consumed by the `servers` and `status`
/// command bodies.
pub trait ProcessIntrospect: Send + Sync {
    fn pid(&self) -> u32;
    fn heap_used_mb(&self) -> f64;
    fn uptime_minutes(&self) -> f64;
}

/// Profile capture backend for the `cpu` and `memory` dump commands. The
/// destination path is validated before either method runs.
#[async_trait]
pub trait Profiler: Send + Sync {
    async fn capture_cpu(&self, path: &Path, times: u64) -> Result<()>;
    async fn capture_heap(&self, path: &Path) -> Result<()>;
}
