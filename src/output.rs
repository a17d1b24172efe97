//! Renderer-facing snapshot types.
//!
//! The controller publishes a full snapshot after every state change; the
//! renderer re-draws from it as its sole source of truth and keeps no
//! state of its own. Snapshots are also deserializable so the stateless
//! wasm entry points can round-trip them.

use serde::{Deserialize, Serialize};

use crate::tree::{Edge, Node};

/// Everything the renderer needs for one frame of the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeSnapshot {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    /// User-visible message from the last failed expansion, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Receives every published snapshot. The rendering side implements this.
pub trait SnapshotSink: Send {
    fn publish(&mut self, snapshot: TreeSnapshot);
}
