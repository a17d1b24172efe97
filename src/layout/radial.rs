// Angular assignment for the radial layout.
//
// Every node owns a wedge of its parent's angular span:
// - a subtree's share of the parent wedge is proportional to its
//   descendant count, so heavy subtrees get the width they need
// - non-root parents keep a fraction of their wedge clear at both ends,
//   which puts more air between cousins than between siblings
// - a node sits at the midpoint of its own wedge
//
// The root's children split the full turn with no end margin: on a circle
// the span ends meet, and a margin there would open one uneven gap.

use std::collections::HashMap;
use std::f64::consts::{FRAC_PI_2, TAU};

use super::LayoutConfig;
use super::hierarchy::Hierarchy;
use crate::tree::{NodeId, Vec3};

/// Assign every reachable node an angle in [0, 2pi).
pub(crate) fn assign_angles(tree: &Hierarchy, cfg: &LayoutConfig) -> HashMap<NodeId, f64> {
    let mut angles = HashMap::with_capacity(tree.order.len());
    subdivide(tree, &tree.root, 0.0, TAU, cfg.group_margin, &mut angles);
    angles
}

fn subdivide(
    tree: &Hierarchy,
    id: &NodeId,
    start: f64,
    span: f64,
    margin: f64,
    angles: &mut HashMap<NodeId, f64>,
) {
    angles.insert(id.clone(), start + span / 2.0);

    let slot = &tree.slots[id];
    if slot.children.is_empty() {
        return;
    }

    let (mut cursor, usable) = if slot.depth == 0 {
        (start, span)
    } else {
        (start + span * margin / 2.0, span * (1.0 - margin))
    };

    let weights: Vec<(&NodeId, usize)> = slot
        .children
        .iter()
        .map(|c| (c, subtree_size(tree, c)))
        .collect();
    let total: usize = weights.iter().map(|(_, w)| w).sum();

    for (child, weight) in weights {
        let share = if total > 0 {
            usable * weight as f64 / total as f64
        } else {
            usable / slot.children.len() as f64
        };
        subdivide(tree, child, cursor, share, margin, angles);
        cursor += share;
    }
}

/// Nodes in the subtree rooted at `id`, including `id` itself.
fn subtree_size(tree: &Hierarchy, id: &NodeId) -> usize {
    let mut count = 1;
    if let Some(slot) = tree.slots.get(id) {
        for child in &slot.children {
            count += subtree_size(tree, child);
        }
    }
    count
}

/// Polar to cartesian on the ground plane. Depth 0 collapses to the
/// origin, so the root always lands on (0, 0, 0).
pub(crate) fn place(depth: u32, angle: f64, cfg: &LayoutConfig) -> Vec3 {
    let radius = depth as f64 * cfg.level_distance;
    // Shift by a quarter turn so the first ring fans out from "up" on
    // screen rather than from "right".
    let theta = angle - FRAC_PI_2;
    Vec3 {
        x: radius * theta.cos(),
        y: 0.0,
        z: radius * theta.sin(),
    }
}
