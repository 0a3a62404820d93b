use anyhow::Result;

use crate::channel::local_channel::LocalRequestChannel;
use crate::channel::tcp_channel::TcpRequestChannel;
use crate::common::cluster::NodeId;
use crate::common::message::{ConsoleRequest, ExecutorReply};
use crate::traits::request_channel::RequestChannel;

pub enum RequestChannelImpl {
    Tcp(TcpRequestChannel),
    Local(LocalRequestChannel),
}

impl RequestChannel for RequestChannelImpl {
    async fn send(&self, target: &NodeId, request: &ConsoleRequest) -> Result<ExecutorReply> {
        match self {
            RequestChannelImpl::Tcp(c) => c.send(target, request).await,
            RequestChannelImpl::Local(c) => c.send(target, request).await,
        }
    }
}
