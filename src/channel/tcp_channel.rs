use std::sync::Arc;

use anyhow::{Context, Result};
use bytes::Bytes;
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_util::codec::{Framed, LengthDelimitedCodec};
use tracing::debug;

use crate::common::cluster::NodeId;
use crate::common::message::{ConsoleRequest, ExecutorReply};
use crate::traits::registry::NodeRegistry;
use crate::traits::request_channel::RequestChannel;

/// Point-to-point channel over TCP: one length-delimited JSON frame out,
/// one reply frame back. The connection lives for the duration of a single
/// request.
pub struct TcpRequestChannel {
    registry: Arc<dyn NodeRegistry>,
    max_frame_len: usize,
}

impl TcpRequestChannel {
    pub fn new(registry: Arc<dyn NodeRegistry>, max_frame_len: usize) -> Self {
        Self {
            registry,
            max_frame_len,
        }
    }

    fn codec(&self) -> LengthDelimitedCodec {
        let mut builder = tokio_util::codec::length_delimited::Builder::new();
        builder.length_field_length(4);
        builder.max_frame_length(self.max_frame_len);
        builder.new_codec()
    }
}

impl RequestChannel for TcpRequestChannel {
    async fn send(&self, target: &NodeId, request: &ConsoleRequest) -> Result<ExecutorReply> {
        let record = self
            .registry
            .lookup(target)
            .ok_or_else(|| anyhow::anyhow!("no route to server {target}"))?;

        let stream = TcpStream::connect((record.host.as_str(), record.port))
            .await
            .with_context(|| format!("connect to {target} at {}:{}", record.host, record.port))?;
        let mut framed = Framed::new(stream, self.codec());

        let frame = serde_json::to_vec(request).context("encode console request")?;
        framed.send(Bytes::from(frame)).await.context("send request frame")?;
        debug!(%target, comd = %request.comd, "request sent");

        let reply = framed
            .next()
            .await
            .ok_or_else(|| anyhow::anyhow!("connection closed before reply from {target}"))?
            .context("read reply frame")?;
        let reply: ExecutorReply =
            serde_json::from_slice(&reply).context("decode executor reply")?;
        Ok(reply)
    }
}
