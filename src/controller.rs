// The tree controller: canonical node/edge state plus the two user
// operations, "initialize with subject" and "expand node".
//
// State is layered:
// - TreeState is the synchronous state machine. Every mutation computes a
//   full next collection (replaced wholesale, never patched in place) and
//   ends with a layout pass wherever the structure changed.
// - TreeController drives TreeState, the sub-topic source and the
//   snapshot sink; awaiting the fetch is its only suspension point.
//
// The wasm boundary drives the same TreeState steps directly, with the
// browser performing the fetch in between.

use log::{debug, warn};

use crate::layout::{LayoutConfig, layout_tree};
use crate::output::{SnapshotSink, TreeSnapshot};
use crate::topics::TopicSource;
use crate::tree::{Edge, Node, NodeId};

/// Shown to the user whenever an expansion fails, for any reason.
const EXPAND_ERROR: &str = "Failed to expand the knowledge tree. Try again.";

/// What `TreeState::begin_expand` decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BeginExpand {
    /// The node was marked loading; fetch sub-topics for this subject.
    Fetch(String),
    /// The node already has children. Re-expansion is a silent no-op.
    AlreadyExpanded,
    /// No node carries that id. Also a silent no-op.
    UnknownNode,
}

/// Result of one `TreeController::expand` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpandOutcome {
    /// Children were attached; carries how many.
    Expanded(usize),
    AlreadyExpanded,
    UnknownNode,
    /// The fetch failed or returned nothing; the error state is set.
    Failed,
}

/// The canonical tree: nodes, derived edges, last error, current subject.
#[derive(Debug, Clone)]
pub struct TreeState {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    error: Option<String>,
    subject: String,
    cfg: LayoutConfig,
}

impl TreeState {
    pub fn new(cfg: LayoutConfig) -> Self {
        TreeState {
            nodes: Vec::new(),
            edges: Vec::new(),
            error: None,
            subject: String::new(),
            cfg,
        }
    }

    /// Rebuild a state machine around a previously published snapshot.
    pub fn from_snapshot(snapshot: TreeSnapshot, cfg: LayoutConfig) -> Self {
        let subject = snapshot
            .nodes
            .iter()
            .find(|n| n.id == NodeId::root())
            .map(|n| n.name.clone())
            .unwrap_or_default();
        TreeState {
            nodes: snapshot.nodes,
            edges: snapshot.edges,
            error: snapshot.error,
            subject,
            cfg,
        }
    }

    /// Reset to a single root node named after the subject.
    pub fn initialize(&mut self, subject: &str) {
        self.subject = subject.to_string();
        self.nodes = vec![Node::root(subject)];
        self.error = None;
        self.relayout();
    }

    /// Re-run the layout over the current collection.
    pub fn relayout(&mut self) {
        let laid_out = layout_tree(&self.nodes, &NodeId::root(), &self.cfg);
        self.nodes = laid_out.nodes;
        self.edges = laid_out.edges;
    }

    pub fn snapshot(&self) -> TreeSnapshot {
        TreeSnapshot {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
            error: self.error.clone(),
        }
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == *id)
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Guard and mark: flips the node's loading flag on and clears the
    /// previous error. A node that already has children is left alone, so
    /// a second click cannot re-fetch an expanded subtree.
    pub fn begin_expand(&mut self, id: &NodeId) -> BeginExpand {
        let Some(node) = self.node(id) else {
            return BeginExpand::UnknownNode;
        };
        if !node.children.is_empty() {
            return BeginExpand::AlreadyExpanded;
        }
        let subject = node.name.clone();
        self.set_loading(id, true);
        self.error = None;
        BeginExpand::Fetch(subject)
    }

    /// Attach one child per label under the node and re-run the layout.
    /// An empty label list is routed to the failure path; a response for a
    /// node that gained children in the meantime is discarded.
    pub fn complete_expand(&mut self, id: &NodeId, labels: &[String]) {
        if labels.is_empty() {
            self.fail_expand(id);
            return;
        }
        let Some(parent) = self.node(id) else {
            return;
        };
        if !parent.children.is_empty() {
            debug!("discarding late sub-topics for {id}: already expanded");
            self.set_loading(id, false);
            return;
        }
        let children: Vec<Node> = labels
            .iter()
            .map(|label| Node::child(label, parent))
            .collect();

        self.set_loading(id, false);
        self.nodes.extend(children);
        self.relayout();
    }

    /// Clear the loading flag and raise the user-visible error. The
    /// collection is otherwise untouched, so the node stays retryable.
    pub fn fail_expand(&mut self, id: &NodeId) {
        self.set_loading(id, false);
        self.error = Some(EXPAND_ERROR.to_string());
    }

    fn set_loading(&mut self, id: &NodeId, loading: bool) {
        self.nodes = self
            .nodes
            .iter()
            .map(|n| {
                if n.id == *id {
                    let mut n = n.clone();
                    n.loading = loading;
                    n
                } else {
                    n.clone()
                }
            })
            .collect();
    }
}

/// Async orchestration over a `TreeState`, a `TopicSource` and a
/// `SnapshotSink`.
pub struct TreeController<S> {
    state: TreeState,
    source: S,
    sink: Box<dyn SnapshotSink>,
}

impl<S: TopicSource> TreeController<S> {
    pub fn new(source: S, sink: Box<dyn SnapshotSink>) -> Self {
        Self::with_config(source, sink, LayoutConfig::default())
    }

    pub fn with_config(source: S, sink: Box<dyn SnapshotSink>, cfg: LayoutConfig) -> Self {
        TreeController {
            state: TreeState::new(cfg),
            source,
            sink,
        }
    }

    pub fn state(&self) -> &TreeState {
        &self.state
    }

    /// Reset the tree to a fresh root and publish it.
    pub fn initialize(&mut self, subject: &str) {
        debug!("initializing tree for {subject:?}");
        self.state.initialize(subject);
        self.publish();
    }

    /// Expand a node with sub-topics fetched from the source.
    ///
    /// Publishes the intermediate loading state before the fetch goes out
    /// and the settled state after it resolves. Fetch failures and empty
    /// responses become the published error state, never an `Err`.
    pub async fn expand(&mut self, id: &NodeId) -> ExpandOutcome {
        let subject = match self.state.begin_expand(id) {
            BeginExpand::Fetch(subject) => subject,
            BeginExpand::AlreadyExpanded => return ExpandOutcome::AlreadyExpanded,
            BeginExpand::UnknownNode => return ExpandOutcome::UnknownNode,
        };
        // Let the renderer show the node loading while the fetch runs.
        self.publish();

        match self.source.subtopics(&subject).await {
            Ok(labels) if !labels.is_empty() => {
                debug!("expanding {id} with {} sub-topics", labels.len());
                let count = labels.len();
                self.state.complete_expand(id, &labels);
                self.publish();
                ExpandOutcome::Expanded(count)
            }
            Ok(_) => {
                warn!("sub-topic source returned nothing for {subject:?}");
                self.state.fail_expand(id);
                self.publish();
                ExpandOutcome::Failed
            }
            Err(err) => {
                warn!("sub-topic fetch for {subject:?} failed: {err}");
                self.state.fail_expand(id);
                self.publish();
                ExpandOutcome::Failed
            }
        }
    }

    fn publish(&mut self) {
        self.sink.publish(self.state.snapshot());
    }
}
