use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;

use crate::common::cluster::NodeId;
use crate::common::message::{ConsoleRequest, ExecutorReply};
use crate::server::dispatch::Executor;
use crate::traits::request_channel::RequestChannel;

/// In-process request channel: targets are executors living in this
/// process. Used for single-node deployments and exercised heavily by the
/// integration tests, where it stands in for a whole cluster.
#[derive(Default)]
pub struct LocalRequestChannel {
    executors: HashMap<NodeId, Arc<Executor>>,
}

impl LocalRequestChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(executor: Arc<Executor>) -> Self {
        let mut channel = Self::new();
        channel.register(executor);
        channel
    }

    pub fn register(&mut self, executor: Arc<Executor>) {
        self.executors.insert(executor.node_id().clone(), executor);
    }
}

impl RequestChannel for LocalRequestChannel {
    async fn send(&self, target: &NodeId, request: &ConsoleRequest) -> Result<ExecutorReply> {
        let executor = self
            .executors
            .get(target)
            .ok_or_else(|| anyhow::anyhow!("no route to server {target}"))?;
        Ok(executor.dispatch(request).await)
    }
}
