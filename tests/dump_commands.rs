mod common;

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;

use cluster_console::common::cluster::{NodeId, StaticRegistry};
use cluster_console::common::message::{Command, ConsoleRequest, RoutingContext};
use cluster_console::traits::introspect::Profiler;
use cluster_console::traits::registry::NodeRegistry;

use common::{executor_with_profiler, record};

#[derive(Default)]
struct MockProfiler {
    cpu_calls: AtomicUsize,
    heap_calls: AtomicUsize,
}

#[async_trait]
impl Profiler for MockProfiler {
    async fn capture_cpu(&self, path: &Path, _times: u64) -> Result<()> {
        self.cpu_calls.fetch_add(1, Ordering::SeqCst);
        tokio::fs::write(path, b"{}").await?;
        Ok(())
    }

    async fn capture_heap(&self, path: &Path) -> Result<()> {
        self.heap_calls.fetch_add(1, Ordering::SeqCst);
        tokio::fs::write(path, b"{}").await?;
        Ok(())
    }
}

fn dump_fixture() -> (
    Arc<MockProfiler>,
    Arc<cluster_console::server::dispatch::Executor>,
) {
    let node = record("connector-server-1", "connector", 3150);
    let registry: Arc<dyn NodeRegistry> = Arc::new(StaticRegistry::new(vec![node.clone()]));
    let profiler = Arc::new(MockProfiler::default());
    let executor = executor_with_profiler(&node, registry, profiler.clone());
    (profiler, executor)
}

fn target() -> RoutingContext {
    RoutingContext::Node(NodeId::from("connector-server-1"))
}

#[tokio::test]
async fn cpu_dump_rejects_non_numeric_times_without_profiling() {
    let (profiler, executor) = dump_fixture();
    let dir = tempfile::tempdir().expect("tempdir");
    let filepath = dir.path().join("profile").to_string_lossy().into_owned();

    for times in [json!("abc"), json!(0), json!(null)] {
        let request = ConsoleRequest::with_param(
            Command::DumpCpu,
            target(),
            json!({ "filepath": filepath.as_str(), "times": times }),
        );
        let reply = executor.dispatch(&request).await;
        assert_eq!(reply.error.as_deref(), Some("no times or times invalid error"));
        assert!(reply.body.is_none());
    }

    // Missing times entirely.
    let request = ConsoleRequest::with_param(
        Command::DumpCpu,
        target(),
        json!({ "filepath": filepath.as_str() }),
    );
    let reply = executor.dispatch(&request).await;
    assert_eq!(reply.error.as_deref(), Some("no times or times invalid error"));

    assert_eq!(profiler.cpu_calls.load(Ordering::SeqCst), 0);
    assert!(!dir.path().join("profile.cpuprofile").exists());
}

#[tokio::test]
async fn cpu_dump_normalizes_extension_and_reports_the_path() {
    let (profiler, executor) = dump_fixture();
    let dir = tempfile::tempdir().expect("tempdir");
    let filepath = dir.path().join("profile").to_string_lossy().into_owned();

    let request = ConsoleRequest::with_param(
        Command::DumpCpu,
        target(),
        json!({ "filepath": filepath, "times": "3" }),
    );
    let reply = executor.dispatch(&request).await;

    assert!(reply.error.is_none());
    let msg = reply.body.unwrap();
    let msg = msg.as_str().unwrap();
    assert!(msg.ends_with(".cpuprofile cpu dump ok"), "got: {msg}");
    assert_eq!(profiler.cpu_calls.load(Ordering::SeqCst), 1);
    assert!(dir.path().join("profile.cpuprofile").exists());
}

#[tokio::test]
async fn cpu_dump_keeps_an_existing_extension() {
    let (profiler, executor) = dump_fixture();
    let dir = tempfile::tempdir().expect("tempdir");
    let filepath = dir
        .path()
        .join("profile.cpuprofile")
        .to_string_lossy()
        .into_owned();

    let request = ConsoleRequest::with_param(
        Command::DumpCpu,
        target(),
        json!({ "filepath": filepath.clone(), "times": 2 }),
    );
    let reply = executor.dispatch(&request).await;

    assert!(reply.error.is_none());
    assert_eq!(
        reply.body.unwrap().as_str().unwrap(),
        format!("{filepath} cpu dump ok")
    );
    assert_eq!(profiler.cpu_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn memory_dump_writes_a_heapsnapshot() {
    let (profiler, executor) = dump_fixture();
    let dir = tempfile::tempdir().expect("tempdir");
    let filepath = dir.path().join("heap").to_string_lossy().into_owned();

    let request = ConsoleRequest::with_param(
        Command::DumpMemory,
        target(),
        json!({ "filepath": filepath }),
    );
    let reply = executor.dispatch(&request).await;

    assert!(reply.error.is_none());
    assert!(reply
        .body
        .unwrap()
        .as_str()
        .unwrap()
        .ends_with(".heapsnapshot memory dump ok"));
    assert_eq!(profiler.heap_calls.load(Ordering::SeqCst), 1);
    assert!(dir.path().join("heap.heapsnapshot").exists());
}

#[tokio::test]
async fn unwritable_destination_is_rejected_before_profiling() {
    let (profiler, executor) = dump_fixture();

    let request = ConsoleRequest::with_param(
        Command::DumpMemory,
        target(),
        json!({ "filepath": "/definitely/missing/dir/heap" }),
    );
    let reply = executor.dispatch(&request).await;

    assert_eq!(reply.error.as_deref(), Some("filepath invalid error"));
    assert_eq!(profiler.heap_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn missing_filepath_is_a_parameter_error() {
    let (profiler, executor) = dump_fixture();

    let request =
        ConsoleRequest::with_param(Command::DumpCpu, target(), json!({ "times": 3 }));
    let reply = executor.dispatch(&request).await;

    assert_eq!(reply.error.as_deref(), Some("lack of filepath param"));
    assert_eq!(profiler.cpu_calls.load(Ordering::SeqCst), 0);
}
