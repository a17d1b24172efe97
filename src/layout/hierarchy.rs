// Hierarchy construction from flat parent pointers.
//
// The node collection is flat and order-free; parentage lives on each
// child's parent pointer. This module rebuilds the rooted tree view from
// scratch on every layout pass:
// - child lists are derived, never trusted from input
// - depth is recomputed walking down from the root
// - nodes whose parent id does not resolve stay out entirely, along with
//   everything below them (permissive by policy, not an error)

use std::collections::{HashMap, HashSet};

use crate::tree::{Node, NodeId};

/// A node's place in the rebuilt tree.
#[derive(Debug, Clone)]
pub(crate) struct TreeSlot {
    /// Sorted by id so sibling order is independent of input order.
    pub children: Vec<NodeId>,
    pub depth: u32,
}

/// The rooted tree view over one input collection.
#[derive(Debug)]
pub(crate) struct Hierarchy {
    pub root: NodeId,
    pub slots: HashMap<NodeId, TreeSlot>,
    pub parent: HashMap<NodeId, NodeId>,
    /// Root-first traversal order, deterministic for a given collection.
    pub order: Vec<NodeId>,
}

/// Rebuild the tree rooted at `root_id`. Returns None when the designated
/// root is not in the collection.
pub(crate) fn build(nodes: &[Node], root_id: &NodeId) -> Option<Hierarchy> {
    let present: HashSet<&NodeId> = nodes.iter().map(|n| &n.id).collect();
    if !present.contains(root_id) {
        return None;
    }

    // Derive child lists from parent pointers. The root's own parent
    // pointer is ignored so a stray value there cannot detach the tree.
    let mut children: HashMap<&NodeId, Vec<NodeId>> = HashMap::new();
    for node in nodes {
        if node.id == *root_id {
            continue;
        }
        let Some(parent) = &node.parent else {
            continue;
        };
        if present.contains(parent) {
            children.entry(parent).or_default().push(node.id.clone());
        }
    }
    // Sort for determinism, dedup in case the input carries repeated ids.
    for list in children.values_mut() {
        list.sort();
        list.dedup();
    }

    // Walk down from the root recomputing depth. The visited set keeps
    // duplicate or cyclic input from being visited twice.
    let mut slots: HashMap<NodeId, TreeSlot> = HashMap::new();
    let mut parent_map: HashMap<NodeId, NodeId> = HashMap::new();
    let mut order: Vec<NodeId> = Vec::new();
    let mut visited: HashSet<NodeId> = HashSet::new();

    let mut stack: Vec<(NodeId, u32)> = vec![(root_id.clone(), 0)];
    visited.insert(root_id.clone());

    while let Some((id, depth)) = stack.pop() {
        let kids: Vec<NodeId> = children
            .get(&id)
            .map(|list| {
                list.iter()
                    .filter(|c| !visited.contains(*c))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        for child in &kids {
            visited.insert(child.clone());
            parent_map.insert(child.clone(), id.clone());
        }
        // Push in reverse so the stack pops children in sorted order.
        for child in kids.iter().rev() {
            stack.push((child.clone(), depth + 1));
        }

        order.push(id.clone());
        slots.insert(
            id,
            TreeSlot {
                children: kids,
                depth,
            },
        );
    }

    Some(Hierarchy {
        root: root_id.clone(),
        slots,
        parent: parent_map,
        order,
    })
}
