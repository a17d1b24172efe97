// Radial tree layout for the knowledge tree.
//
// Goals:
// - Deterministic: the same collection and root always produce the same
//   coordinates and edges, independent of input order
// - Pure: no side effects, the input collection is never mutated
// - Permissive: orphaned nodes drop out silently, a missing root is a
//   no-op rather than an error
//
// Submodules:
// - hierarchy: rebuilds the rooted tree from flat parent pointers
// - radial: angular subdivision and polar conversion
//
// Output: LayoutResult with repositioned nodes plus the derived edge list.

mod hierarchy;
mod radial;

use std::collections::HashMap;

use crate::tree::{Edge, Node, NodeId};

/// Tunables for the radial layout.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// World-space distance between consecutive depth rings.
    pub level_distance: f64,
    /// Fraction of a parent's angular span kept clear at both ends so
    /// sibling groups read as groups. Not applied at the root ring.
    pub group_margin: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            level_distance: 15.0,
            group_margin: 0.15,
        }
    }
}

/// One full layout pass: repositioned nodes plus the derived edges.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// Lay out the tree rooted at `root_id`.
///
/// Every node reachable from the root comes back with a fresh position,
/// recomputed depth and rebuilt child list; all other fields are carried
/// over from the input record. Each non-root node contributes exactly one
/// edge from its parent. An empty collection yields an empty result; a
/// collection without the designated root is handed back untouched with
/// no edges.
pub fn layout_tree(nodes: &[Node], root_id: &NodeId, cfg: &LayoutConfig) -> LayoutResult {
    if nodes.is_empty() {
        return LayoutResult {
            nodes: Vec::new(),
            edges: Vec::new(),
        };
    }

    let Some(tree) = hierarchy::build(nodes, root_id) else {
        return LayoutResult {
            nodes: nodes.to_vec(),
            edges: Vec::new(),
        };
    };

    let angles = radial::assign_angles(&tree, cfg);

    let index: HashMap<&NodeId, &Node> = nodes.iter().map(|n| (&n.id, n)).collect();
    let mut out = Vec::with_capacity(tree.order.len());
    let mut edges = Vec::with_capacity(tree.order.len().saturating_sub(1));

    for id in &tree.order {
        let slot = &tree.slots[id];
        // An id with no input record is dropped, not invented.
        let Some(original) = index.get(id) else {
            continue;
        };
        let mut node = (*original).clone();
        node.level = slot.depth;
        node.children = slot.children.clone();
        node.position = radial::place(slot.depth, angles[id], cfg);
        out.push(node);

        if let Some(parent) = tree.parent.get(id) {
            edges.push(Edge::between(parent, id));
        }
    }

    if out.len() < nodes.len() {
        log::debug!("layout dropped {} unreachable node(s)", nodes.len() - out.len());
    }

    LayoutResult { nodes: out, edges }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Vec3;

    fn node(id: &str, name: &str, parent: Option<&str>) -> Node {
        Node {
            id: NodeId(id.to_string()),
            name: name.to_string(),
            parent: parent.map(|p| NodeId(p.to_string())),
            children: Vec::new(),
            level: 0,
            loading: false,
            position: Vec3::ZERO,
        }
    }

    fn id(s: &str) -> NodeId {
        NodeId(s.to_string())
    }

    fn cfg() -> LayoutConfig {
        LayoutConfig::default()
    }

    /// Angle of a node around the origin, for ring-spacing assertions.
    fn angle_of(n: &Node) -> f64 {
        n.position.z.atan2(n.position.x)
    }

    #[test]
    fn test_empty_collection_yields_empty_result() {
        let result = layout_tree(&[], &id("root"), &cfg());
        assert!(result.nodes.is_empty());
        assert!(result.edges.is_empty());
    }

    #[test]
    fn test_missing_root_hands_input_back_untouched() {
        let mut orphaned = node("a", "A", None);
        orphaned.position = Vec3 {
            x: 7.0,
            y: 0.0,
            z: 7.0,
        };
        let nodes = vec![orphaned];

        let result = layout_tree(&nodes, &id("root"), &cfg());

        assert_eq!(result.nodes, nodes);
        assert!(result.edges.is_empty());
    }

    #[test]
    fn test_single_root_lands_on_origin() {
        let result = layout_tree(&[node("root", "Astronomy", None)], &id("root"), &cfg());

        assert_eq!(result.nodes.len(), 1);
        assert_eq!(result.nodes[0].position, Vec3::ZERO);
        assert_eq!(result.nodes[0].level, 0);
        assert!(result.edges.is_empty());
    }

    #[test]
    fn test_ring_radius_is_level_times_distance() {
        let nodes = vec![
            node("root", "R", None),
            node("a", "A", Some("root")),
            node("b", "B", Some("a")),
            node("c", "C", Some("b")),
        ];
        let result = layout_tree(&nodes, &id("root"), &cfg());

        for n in &result.nodes {
            let expected = n.level as f64 * 15.0;
            assert!(
                (n.position.length() - expected).abs() < 1e-9,
                "{} at level {} sits {} from origin",
                n.id,
                n.level,
                n.position.length()
            );
            assert_eq!(n.position.y, 0.0);
        }
    }

    #[test]
    fn test_three_siblings_spread_evenly_around_the_ring() {
        let nodes = vec![
            node("root", "R", None),
            node("stars", "Stars", Some("root")),
            node("planets", "Planets", Some("root")),
            node("galaxies", "Galaxies", Some("root")),
        ];
        let result = layout_tree(&nodes, &id("root"), &cfg());

        let mut angles: Vec<f64> = result
            .nodes
            .iter()
            .filter(|n| n.level == 1)
            .map(angle_of)
            .collect();
        assert_eq!(angles.len(), 3);
        angles.sort_by(|a, b| a.partial_cmp(b).unwrap());

        let gaps = [
            angles[1] - angles[0],
            angles[2] - angles[1],
            angles[0] + std::f64::consts::TAU - angles[2],
        ];
        for gap in gaps {
            assert!((gap - std::f64::consts::TAU / 3.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_identical_output_for_shuffled_input() {
        let nodes = vec![
            node("root", "R", None),
            node("a", "A", Some("root")),
            node("b", "B", Some("root")),
            node("a1", "A1", Some("a")),
            node("a2", "A2", Some("a")),
        ];
        let mut shuffled = nodes.clone();
        shuffled.reverse();
        shuffled.swap(1, 3);

        let first = layout_tree(&nodes, &id("root"), &cfg());
        let second = layout_tree(&shuffled, &id("root"), &cfg());

        assert_eq!(first, second);
    }

    #[test]
    fn test_orphans_appear_in_no_output() {
        let nodes = vec![
            node("root", "R", None),
            node("a", "A", Some("root")),
            node("lost", "Lost", Some("gone")),
            node("under-lost", "Deeper", Some("lost")),
        ];
        let result = layout_tree(&nodes, &id("root"), &cfg());

        assert_eq!(result.nodes.len(), 2);
        assert!(result.nodes.iter().all(|n| n.id != id("lost")));
        assert!(
            result
                .edges
                .iter()
                .all(|e| e.source != id("lost") && e.target != id("lost"))
        );
    }

    #[test]
    fn test_one_edge_per_non_root_node_from_its_parent() {
        let nodes = vec![
            node("root", "R", None),
            node("a", "A", Some("root")),
            node("b", "B", Some("root")),
            node("a1", "A1", Some("a")),
        ];
        let result = layout_tree(&nodes, &id("root"), &cfg());

        assert_eq!(result.edges.len(), result.nodes.len() - 1);
        for edge in &result.edges {
            let target = result.nodes.iter().find(|n| n.id == edge.target).unwrap();
            assert_eq!(target.parent.as_ref(), Some(&edge.source));
            assert_eq!(edge.id, format!("{}-{}", edge.source, edge.target));
        }
    }

    #[test]
    fn test_level_and_children_are_recomputed_not_trusted() {
        let mut a = node("a", "A", Some("root"));
        a.level = 9;
        a.children = vec![id("made-up")];
        let mut root = node("root", "R", None);
        root.level = 4;

        let result = layout_tree(&[root, a], &id("root"), &cfg());

        let root_out = result.nodes.iter().find(|n| n.id == id("root")).unwrap();
        let a_out = result.nodes.iter().find(|n| n.id == id("a")).unwrap();
        assert_eq!(root_out.level, 0);
        assert_eq!(root_out.children, vec![id("a")]);
        assert_eq!(a_out.level, 1);
        assert!(a_out.children.is_empty());
    }

    #[test]
    fn test_positions_overwritten_other_fields_preserved() {
        let mut a = node("a", "A", Some("root"));
        a.loading = true;
        a.position = Vec3 {
            x: 99.0,
            y: 99.0,
            z: 99.0,
        };
        let nodes = vec![node("root", "R", None), a];

        let result = layout_tree(&nodes, &id("root"), &cfg());

        let a_out = result.nodes.iter().find(|n| n.id == id("a")).unwrap();
        assert!(a_out.loading);
        assert_eq!(a_out.name, "A");
        assert_eq!(a_out.parent, Some(id("root")));
        assert!((a_out.position.length() - 15.0).abs() < 1e-9);
        assert_eq!(a_out.position.y, 0.0);
    }
}
