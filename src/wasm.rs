//! WASM bindings for the tree core.
//!
//! All functions exposed to JavaScript via wasm-bindgen are defined here.
//! The entry points are stateless: the renderer holds the current snapshot
//! and passes it back in, and each call returns the next snapshot as JSON.
//! The browser performs the sub-topic fetch itself, between `begin_expand`
//! and `apply_subtopics` or `fail_expand`, so this boundary stays free of
//! transport concerns.

use log::error;
use serde_json::to_string;
use wasm_bindgen::prelude::*;

use crate::controller::TreeState;
use crate::layout::LayoutConfig;
use crate::output::TreeSnapshot;
use crate::tree::NodeId;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

fn parse_state(tree: &str) -> Option<TreeState> {
    match serde_json::from_str::<TreeSnapshot>(tree) {
        Ok(snapshot) => Some(TreeState::from_snapshot(snapshot, LayoutConfig::default())),
        Err(e) => {
            error!("ignoring malformed tree snapshot: {e}");
            None
        }
    }
}

fn emit(state: &TreeState) -> String {
    // Snapshot serialization has no fallible fields.
    to_string(&state.snapshot()).unwrap()
}

/// Start a fresh tree from a subject. Returns the first snapshot.
#[wasm_bindgen]
pub fn init_tree(subject: &str) -> String {
    let mut state = TreeState::new(LayoutConfig::default());
    state.initialize(subject);
    emit(&state)
}

/// Mark a node as loading before its fetch goes out. A node that already
/// has children, or an unknown id, leaves the snapshot unchanged.
#[wasm_bindgen]
pub fn begin_expand(tree: &str, node_id: &str) -> String {
    let Some(mut state) = parse_state(tree) else {
        return tree.to_string();
    };
    state.begin_expand(&NodeId(node_id.to_string()));
    emit(&state)
}

/// Attach fetched sub-topic labels (a JSON array of strings) under a node
/// and lay the tree out again. An empty array records a failure instead.
#[wasm_bindgen]
pub fn apply_subtopics(tree: &str, node_id: &str, labels: &str) -> String {
    let Some(mut state) = parse_state(tree) else {
        return tree.to_string();
    };
    let labels: Vec<String> = match serde_json::from_str(labels) {
        Ok(labels) => labels,
        Err(e) => {
            error!("ignoring malformed label list: {e}");
            return tree.to_string();
        }
    };
    state.complete_expand(&NodeId(node_id.to_string()), &labels);
    emit(&state)
}

/// Record a failed fetch: clears the node's loading flag and raises the
/// user-visible error.
#[wasm_bindgen]
pub fn fail_expand(tree: &str, node_id: &str) -> String {
    let Some(mut state) = parse_state(tree) else {
        return tree.to_string();
    };
    state.fail_expand(&NodeId(node_id.to_string()));
    emit(&state)
}

/// Re-run the layout over a snapshot as-is.
#[wasm_bindgen]
pub fn relayout(tree: &str) -> String {
    let Some(mut state) = parse_state(tree) else {
        return tree.to_string();
    };
    state.relayout();
    emit(&state)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> TreeSnapshot {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_expand_round_trip_through_json() {
        let tree = init_tree("Astronomy");
        let tree = begin_expand(&tree, "root");

        let loading = parse(&tree);
        assert!(loading.nodes[0].loading);

        let tree = apply_subtopics(&tree, "root", r#"["Stars","Planets","Galaxies"]"#);
        let settled = parse(&tree);

        assert_eq!(settled.nodes.len(), 4);
        assert_eq!(settled.edges.len(), 3);
        assert!(settled.nodes.iter().all(|n| !n.loading));
        for n in settled.nodes.iter().filter(|n| n.level == 1) {
            assert!((n.position.length() - 15.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_failed_fetch_round_trip() {
        let tree = init_tree("Astronomy");
        let tree = begin_expand(&tree, "root");
        let tree = fail_expand(&tree, "root");

        let snapshot = parse(&tree);
        assert_eq!(snapshot.nodes.len(), 1);
        assert!(!snapshot.nodes[0].loading);
        assert!(snapshot.error.is_some());
    }

    #[test]
    fn test_malformed_snapshot_is_returned_unchanged() {
        let garbage = "not json";
        assert_eq!(begin_expand(garbage, "root"), garbage);
        assert_eq!(relayout(garbage), garbage);
        assert_eq!(apply_subtopics(garbage, "root", "[]"), garbage);

        let tree = init_tree("Astronomy");
        assert_eq!(apply_subtopics(&tree, "root", "not json"), tree);
    }
}
