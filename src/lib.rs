//! Core of an expanding knowledge-tree visualization.
//!
//! A flat, growing collection of topic nodes is laid out radially around a
//! single root: each expansion asks a sub-topic source for child labels,
//! attaches them, and re-runs a deterministic layout pass over the whole
//! collection. A renderer consumes the published snapshots; this crate
//! never draws anything itself.

pub mod controller;
pub mod layout;
pub mod output;
pub mod topics;
pub mod tree;
pub mod wasm;

pub use controller::{BeginExpand, ExpandOutcome, TreeController, TreeState};
pub use layout::{LayoutConfig, LayoutResult, layout_tree};
pub use output::{SnapshotSink, TreeSnapshot};
pub use topics::{CannedTopics, TopicError, TopicSource};
pub use tree::{Edge, Node, NodeId, Vec3};
