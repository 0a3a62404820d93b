use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::cluster::{NodeId, NodeRole, ROLE_CONNECTOR};
use crate::common::error::ConsoleError;

/// The fixed set of operator verbs. The wire names match the console verbs
/// an operator types (`cpu`/`memory` for the profiling dumps).
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    Servers,
    Connections,
    Logins,
    Modules,
    Status,
    Config,
    Proxy,
    Handler,
    #[serde(rename = "cpu")]
    DumpCpu,
    #[serde(rename = "memory")]
    DumpMemory,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Servers => "servers",
            Command::Connections => "connections",
            Command::Logins => "logins",
            Command::Modules => "modules",
            Command::Status => "status",
            Command::Config => "config",
            Command::Proxy => "proxy",
            Command::Handler => "handler",
            Command::DumpCpu => "cpu",
            Command::DumpMemory => "memory",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Command {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "servers" => Ok(Command::Servers),
            "connections" => Ok(Command::Connections),
            "logins" => Ok(Command::Logins),
            "modules" => Ok(Command::Modules),
            "status" => Ok(Command::Status),
            "config" => Ok(Command::Config),
            "proxy" => Ok(Command::Proxy),
            "handler" => Ok(Command::Handler),
            "cpu" => Ok(Command::DumpCpu),
            "memory" => Ok(Command::DumpMemory),
            other => Err(ConsoleError::UnknownCommand(other.to_string())),
        }
    }
}

/// Routing scope of one invocation: a concrete node, or every node the
/// command applies to. Serialized as the node id string, with "all" reserved.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum RoutingContext {
    All,
    Node(NodeId),
}

impl RoutingContext {
    pub fn parse(s: &str) -> Result<Self, ConsoleError> {
        if s.is_empty() {
            return Err(ConsoleError::parameter("lack of comd or context param"));
        }
        Ok(Self::from(s.to_string()))
    }
}

impl From<String> for RoutingContext {
    fn from(s: String) -> Self {
        if s == "all" {
            RoutingContext::All
        } else {
            RoutingContext::Node(NodeId(s))
        }
    }
}

impl From<RoutingContext> for String {
    fn from(ctx: RoutingContext) -> String {
        match ctx {
            RoutingContext::All => "all".to_string(),
            RoutingContext::Node(id) => id.0,
        }
    }
}

impl fmt::Display for RoutingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutingContext::All => f.write_str("all"),
            RoutingContext::Node(id) => f.write_str(id.as_str()),
        }
    }
}

/// One console command call as carried over the request channel.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ConsoleRequest {
    pub comd: Command,
    pub context: RoutingContext,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param: Option<Value>,
}

impl ConsoleRequest {
    pub fn new(comd: Command, context: RoutingContext) -> Self {
        Self {
            comd,
            context,
            param: None,
        }
    }

    pub fn with_param(comd: Command, context: RoutingContext, param: Value) -> Self {
        Self {
            comd,
            context,
            param: Some(param),
        }
    }
}

/// Executor reply envelope: the answering node's own id plus either a body
/// or an error message. A body error is a payload, not a missing partial.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ExecutorReply {
    pub source: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExecutorReply {
    pub fn ok(source: NodeId, body: Value) -> Self {
        Self {
            source,
            body: Some(body),
            error: None,
        }
    }

    pub fn err(source: NodeId, error: impl Into<String>) -> Self {
        Self {
            source,
            body: None,
            error: Some(error.into()),
        }
    }

    /// The payload this reply contributes to an aggregated result.
    pub fn into_payload(self) -> Value {
        match (self.body, self.error) {
            (Some(body), _) => body,
            (None, Some(error)) => serde_json::json!({ "error": error }),
            (None, None) => Value::Null,
        }
    }
}

/// How the router answers one classified command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutingMode {
    /// Answered by the router itself, no channel traffic.
    RouterLocal,
    /// Forwarded verbatim to exactly one node.
    Single(NodeId),
    /// Forwarded to every node matching the scope, replies aggregated.
    FanOut { role: Option<NodeRole> },
}

/// The command classification table for the router role. A pure function
/// over the command enum: process-wide, immutable, shared by every
/// invocation.
pub fn classify(
    comd: Command,
    context: &RoutingContext,
    param: Option<&Value>,
) -> Result<RoutingMode, ConsoleError> {
    match comd {
        // servers enumerates the whole cluster no matter the context.
        Command::Servers => Ok(RoutingMode::FanOut { role: None }),

        Command::Connections | Command::Logins => match context {
            RoutingContext::All => Ok(RoutingMode::FanOut {
                role: Some(NodeRole::from(ROLE_CONNECTOR)),
            }),
            RoutingContext::Node(id) => Ok(RoutingMode::Single(id.clone())),
        },

        // Router introspects its own loaded capabilities, no remote trip.
        Command::Modules => Ok(RoutingMode::RouterLocal),

        Command::Config => {
            if param.and_then(Value::as_str) == Some("master") {
                return Ok(RoutingMode::RouterLocal);
            }
            match context {
                RoutingContext::Node(id) => Ok(RoutingMode::Single(id.clone())),
                RoutingContext::All => Err(ConsoleError::routing(
                    "config requires a concrete server id context",
                )),
            }
        }

        Command::Proxy | Command::Handler => match context {
            RoutingContext::Node(id) => Ok(RoutingMode::Single(id.clone())),
            RoutingContext::All => Err(ConsoleError::routing("context error")),
        },

        Command::Status | Command::DumpCpu | Command::DumpMemory => match context {
            RoutingContext::Node(id) => Ok(RoutingMode::Single(id.clone())),
            RoutingContext::All => Err(ConsoleError::routing(format!(
                "{comd} requires a concrete server id context"
            ))),
        },
    }
}
