mod common;

use std::sync::Arc;

use bytes::Bytes;
use futures::{SinkExt, StreamExt};
use tokio_util::codec::Framed;

use cluster_console::channel::tcp_channel::TcpRequestChannel;
use cluster_console::common::cluster::{NodeRecord, StaticRegistry};
use cluster_console::common::message::{Command, ConsoleRequest, ExecutorReply, RoutingContext};
use cluster_console::server::transport;
use cluster_console::traits::registry::NodeRegistry;
use cluster_console::traits::request_channel::RequestChannel;

use common::{executor_for, msg_keys, record, router_over};

const MAX_FRAME_LEN: usize = 1024 * 1024;

/// Bind an executor on an ephemeral port and return its node record plus a
/// registry that knows about it.
async fn spawn_executor(id: &str, role: &str) -> (NodeRecord, Arc<dyn NodeRegistry>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    let node = record(id, role, port);
    let registry: Arc<dyn NodeRegistry> = Arc::new(StaticRegistry::new(vec![node.clone()]));
    let executor = executor_for(&node, registry.clone());
    tokio::spawn(async move {
        let _ = transport::serve(listener, executor, MAX_FRAME_LEN).await;
    });
    (node, registry)
}

#[tokio::test]
async fn status_round_trips_over_tcp() {
    let (node, registry) = spawn_executor("connector-server-1", "connector").await;
    let channel = TcpRequestChannel::new(registry, MAX_FRAME_LEN);

    let request = ConsoleRequest::new(Command::Status, RoutingContext::Node(node.id.clone()));
    let reply = channel.send(&node.id, &request).await.expect("tcp reply");

    assert_eq!(reply.source, node.id);
    let body = reply.body.expect("status body");
    assert_eq!(body["server_id"], "connector-server-1");
    assert!(body["pid"].as_u64().unwrap() > 0);
}

#[tokio::test]
async fn router_fans_out_over_the_tcp_channel() {
    let (node, registry) = spawn_executor("connector-server-1", "connector").await;
    let channel = Arc::new(TcpRequestChannel::new(registry.clone(), MAX_FRAME_LEN));
    let router = router_over(node.clone(), registry, channel, None);

    let response = router
        .dispatch(&ConsoleRequest::new(Command::Servers, RoutingContext::All))
        .await
        .expect("servers over tcp");

    assert_eq!(msg_keys(&response), vec!["connector-server-1"]);
    assert_eq!(response["msg"]["connector-server-1"]["role"], "connector");
}

#[tokio::test]
async fn undecodable_frame_gets_an_error_reply() {
    let (node, _registry) = spawn_executor("connector-server-1", "connector").await;

    let stream = tokio::net::TcpStream::connect(("127.0.0.1", node.port))
        .await
        .expect("connect");
    let mut builder = tokio_util::codec::length_delimited::Builder::new();
    builder.length_field_length(4);
    builder.max_frame_length(MAX_FRAME_LEN);
    let mut framed = Framed::new(stream, builder.new_codec());

    framed
        .send(Bytes::from_static(b"not json"))
        .await
        .expect("send garbage frame");
    let frame = framed
        .next()
        .await
        .expect("reply frame")
        .expect("read reply");
    let reply: ExecutorReply = serde_json::from_slice(&frame).expect("reply envelope");

    assert_eq!(reply.source, node.id);
    assert!(reply.error.expect("error reply").starts_with("bad request"));
}
