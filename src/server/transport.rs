use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use bytes::Bytes;
use futures::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_util::codec::{Framed, LengthDelimitedCodec};
use tracing::{info_span, Instrument};

use crate::common::message::{ConsoleRequest, ExecutorReply};
use crate::server::dispatch::Executor;

/// Run the executor-side accept loop. For each connection, spawn a task
/// that receives length-delimited frames and forwards them to the executor.
pub async fn serve(
    listener: TcpListener,
    executor: Arc<Executor>,
    max_frame_len: usize,
) -> anyhow::Result<()> {
    loop {
        let (stream, remote) = listener.accept().await?;
        let executor = executor.clone();
        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, remote, executor, max_frame_len).await {
                tracing::warn!(%remote, error = ?e, "connection terminated with error");
            }
        });
    }
}

/// Handle a single peer connection: every frame is one console request, and
/// every request produces exactly one reply frame.
async fn handle_connection(
    stream: TcpStream,
    remote: SocketAddr,
    executor: Arc<Executor>,
    max_frame_len: usize,
) -> anyhow::Result<()> {
    let mut builder = tokio_util::codec::length_delimited::Builder::new();
    builder.length_field_length(4);
    builder.max_frame_length(max_frame_len);
    let codec: LengthDelimitedCodec = builder.new_codec();

    let mut framed = Framed::new(stream, codec);

    let conn_span = info_span!("conn", remote = %remote);
    async move {
        while let Some(frame) = framed.next().await {
            let frame = frame.context("failed to read frame")?;

            let reply = match serde_json::from_slice::<ConsoleRequest>(&frame) {
                Ok(request) => {
                    let req_span = info_span!("req", comd = %request.comd);
                    executor.dispatch(&request).instrument(req_span).await
                }
                Err(e) => {
                    tracing::warn!(%remote, error = %e, "undecodable request frame");
                    ExecutorReply::err(executor.node_id().clone(), format!("bad request: {e}"))
                }
            };

            let response = serde_json::to_vec(&reply).context("encode executor reply")?;
            framed
                .send(Bytes::from(response))
                .await
                .context("failed to send reply")?;
            framed.flush().await.context("failed to flush reply")?;
            tracing::debug!(%remote, "reply sent");
        }
        Ok::<(), anyhow::Error>(())
    }
    .instrument(conn_span)
    .await?;

    Ok(())
}
