use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a node. `"root"` is reserved for the single root node;
/// every other id is a freshly minted UUID and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn root() -> Self {
        NodeId("root".to_string())
    }

    /// Mint an id for a newly fetched sub-topic.
    pub fn fresh() -> Self {
        NodeId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A point in world space. The tree is laid out flat on the ground plane,
/// so y stays 0 for every node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// A single topic in the knowledge tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    /// Short display label, also the subject sent to the sub-topic source
    /// when this node is expanded.
    pub name: String,
    /// `None` only for the root. Parentage here is authoritative.
    pub parent: Option<NodeId>,
    /// Cache of which nodes have this one as parent. Rebuilt from parent
    /// pointers on every layout pass, never mutated independently.
    pub children: Vec<NodeId>,
    /// Hops from the root. Recomputed on every layout pass.
    pub level: u32,
    /// True while an expansion request for this node is outstanding.
    pub loading: bool,
    pub position: Vec3,
}

impl Node {
    /// The single root node a fresh tree starts from.
    pub fn root(subject: &str) -> Self {
        Node {
            id: NodeId::root(),
            name: subject.to_string(),
            parent: None,
            children: Vec::new(),
            level: 0,
            loading: false,
            position: Vec3::ZERO,
        }
    }

    /// A child minted from one fetched sub-topic label. It starts at the
    /// parent's current position; the next layout pass moves it out to its
    /// ring, and the renderer animates the transition from here.
    pub fn child(name: &str, parent: &Node) -> Self {
        Node {
            id: NodeId::fresh(),
            name: name.to_string(),
            parent: Some(parent.id.clone()),
            children: Vec::new(),
            level: parent.level + 1,
            loading: false,
            position: parent.position,
        }
    }
}

/// A parent-to-child connection. Edges are derived from the node
/// collection's parent pointers on every layout pass, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Stable for a given parent/child pair: `"{source}-{target}"`.
    pub id: String,
    pub source: NodeId,
    pub target: NodeId,
}

impl Edge {
    pub fn between(source: &NodeId, target: &NodeId) -> Self {
        Edge {
            id: format!("{source}-{target}"),
            source: source.clone(),
            target: target.clone(),
        }
    }
}
