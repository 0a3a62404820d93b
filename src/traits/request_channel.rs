use anyhow::Result;

use crate::common::cluster::NodeId;
use crate::common::message::{ConsoleRequest, ExecutorReply};

/// Point-to-point call to a remote node: exactly one reply per send. The
/// reply carries the answering node's own id, which may differ from the id
/// used for routing.
#[trait_variant::make(RequestChannel: Send)]
pub trait UnsendRequestChannel {
    async fn send(&self, target: &NodeId, request: &ConsoleRequest) -> Result<ExecutorReply>;
}
