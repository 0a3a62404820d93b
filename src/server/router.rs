use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use indexmap::IndexMap;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::common::cluster::{NodeId, NodeRecord, NodeRole};
use crate::common::error::ConsoleError;
use crate::common::message::{classify, Command, ConsoleRequest, ExecutorReply, RoutingMode};
use crate::handler::show_config::scalar_clone;
use crate::traits::registry::NodeRegistry;
use crate::traits::request_channel::RequestChannel;

/// Router-role entry point: receives the operator's command, classifies it,
/// and answers it locally, via a single routed request, or by fanning out to
/// every node in scope and aggregating the replies.
///
/// Each `dispatch` call is one self-contained invocation: the aggregation
/// map lives on its stack and completes exactly once when every targeted
/// slot has resolved.
pub struct Router<C> {
    node: NodeRecord,
    registry: Arc<dyn NodeRegistry>,
    channel: Arc<C>,
    modules: Arc<Vec<String>>,
    settings: Arc<HashMap<String, Value>>,
    reply_timeout: Option<Duration>,
}

impl<C> Router<C>
where
    C: RequestChannel + Send + Sync,
{
    pub fn new(
        node: NodeRecord,
        registry: Arc<dyn NodeRegistry>,
        channel: Arc<C>,
        modules: Arc<Vec<String>>,
        settings: Arc<HashMap<String, Value>>,
        reply_timeout: Option<Duration>,
    ) -> Self {
        Self {
            node,
            registry,
            channel,
            modules,
            settings,
            reply_timeout,
        }
    }

    pub async fn dispatch(&self, request: &ConsoleRequest) -> Result<Value, ConsoleError> {
        debug!(comd = %request.comd, context = %request.context, "router command");
        match classify(request.comd, &request.context, request.param.as_ref())? {
            RoutingMode::RouterLocal => self.dispatch_local(request),
            RoutingMode::Single(target) => self.single_route(&target, request).await,
            RoutingMode::FanOut { role } => self.fan_out(role, request).await,
        }
    }

    /// Commands the router answers from its own state, no channel traffic.
    fn dispatch_local(&self, request: &ConsoleRequest) -> Result<Value, ConsoleError> {
        match request.comd {
            Command::Modules => Ok(json!({ "msg": self.modules.as_ref() })),
            Command::Config => {
                let master = scalar_clone("master", self.settings.get("masterConfig"));
                Ok(json!({
                    "master_config": master,
                    "master_info": self.node,
                }))
            }
            other => Err(ConsoleError::routing(format!(
                "{other} cannot be answered by the console entry point"
            ))),
        }
    }

    async fn single_route(
        &self,
        target: &NodeId,
        request: &ConsoleRequest,
    ) -> Result<Value, ConsoleError> {
        let record = self
            .registry
            .lookup(target)
            .ok_or_else(|| ConsoleError::routing(format!("no server with this id {target}")))?;
        if matches!(request.comd, Command::Connections | Command::Logins)
            && !record.role.is_connector()
        {
            return Err(ConsoleError::routing(
                "this command should be applied to connector server",
            ));
        }

        let reply = self
            .send_one(&record.id, request)
            .await
            .map_err(|e| ConsoleError::remote(e.to_string()))?;
        if let Some(error) = reply.error {
            return Err(ConsoleError::remote(error));
        }
        let body = reply.body.unwrap_or(Value::Null);

        Ok(match request.comd {
            // Keyed like the fan-out shape, so all/one read the same way.
            Command::Connections | Command::Logins => {
                let mut keyed = serde_json::Map::new();
                keyed.insert(reply.source.to_string(), body);
                json!({ "msg": keyed })
            }
            Command::Config | Command::Proxy | Command::Handler => body,
            _ => json!({ "msg": body }),
        })
    }

    /// Issue one request per node in scope and merge every reply into one
    /// keyed result. Replies merge under the id the node reports for itself.
    async fn fan_out(
        &self,
        role: Option<NodeRole>,
        request: &ConsoleRequest,
    ) -> Result<Value, ConsoleError> {
        let targets: Vec<NodeRecord> = self
            .registry
            .all()
            .into_iter()
            .filter(|n| role.as_ref().is_none_or(|r| &n.role == r))
            .collect();

        // Nothing in scope resolves now; an invocation must never wait on
        // an empty target set.
        if targets.is_empty() {
            return Ok(json!({ "msg": {} }));
        }

        let calls = targets.iter().map(|t| {
            let target = t.id.clone();
            async move {
                let outcome = self.send_one(&target, request).await;
                (target, outcome)
            }
        });

        let mut aggregated: IndexMap<NodeId, Value> = IndexMap::with_capacity(targets.len());
        for (routed, outcome) in join_all(calls).await {
            match outcome {
                Ok(reply) => {
                    aggregated.insert(reply.source.clone(), reply.into_payload());
                }
                Err(e) => {
                    // The slot still resolves under the routed id so the
                    // aggregated key set matches the targeted set.
                    warn!(target = %routed, error = %e, "fan-out slot failed");
                    aggregated.insert(routed, json!({ "error": e.to_string() }));
                }
            }
        }
        Ok(json!({ "msg": aggregated }))
    }

    async fn send_one(
        &self,
        target: &NodeId,
        request: &ConsoleRequest,
    ) -> anyhow::Result<ExecutorReply> {
        match self.reply_timeout {
            Some(limit) => match tokio::time::timeout(limit, self.channel.send(target, request))
                .await
            {
                Ok(outcome) => outcome,
                Err(_) => anyhow::bail!("timeout"),
            },
            None => self.channel.send(target, request).await,
        }
    }
}
