use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::traits::registry::NodeRegistry;

/// Stable identifier of one cluster node, unique for the node's lifetime.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        NodeId(s.to_string())
    }
}

/// Role tag of a node. The role set is open (deployments add their own tags),
/// only "connector" carries special routing rules.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct NodeRole(pub String);

pub const ROLE_CONNECTOR: &str = "connector";

impl NodeRole {
    pub fn is_connector(&self) -> bool {
        self.0 == ROLE_CONNECTOR
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeRole {
    fn from(s: &str) -> Self {
        NodeRole(s.to_string())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NodeRecord {
    pub id: NodeId,
    pub role: NodeRole,
    pub host: String,
    pub port: u16,
}

/// Registry backed by the cluster config file. Membership is fixed for the
/// process lifetime; the dispatcher only ever reads it.
pub struct StaticRegistry {
    nodes: HashMap<NodeId, NodeRecord>,
    order: Vec<NodeId>,
}

impl StaticRegistry {
    pub fn new(records: Vec<NodeRecord>) -> Self {
        let order = records.iter().map(|r| r.id.clone()).collect();
        let nodes = records.into_iter().map(|r| (r.id.clone(), r)).collect();
        Self { nodes, order }
    }
}

impl NodeRegistry for StaticRegistry {
    fn lookup(&self, id: &NodeId) -> Option<NodeRecord> {
        self.nodes.get(id).cloned()
    }

    fn all(&self) -> Vec<NodeRecord> {
        // Config-file order, so aggregated output is stable across calls.
        self.order
            .iter()
            .filter_map(|id| self.nodes.get(id).cloned())
            .collect()
    }
}
