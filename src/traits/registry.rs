use crate::common::cluster::{NodeId, NodeRecord};

/// Read-only view of cluster membership. Mutation happens outside this
/// layer; the dispatcher only enumerates and looks up.
pub trait NodeRegistry: Send + Sync {
    fn lookup(&self, id: &NodeId) -> Option<NodeRecord>;
    fn all(&self) -> Vec<NodeRecord>;
}
