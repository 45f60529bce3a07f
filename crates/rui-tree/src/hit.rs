//! Pointer target lookup.
//!
//! Picks the element a press at a client point would be dispatched to:
//! the deepest element containing the point, later siblings first since
//! they paint on top.

use crate::tree::ElementTree;
use petgraph::graph::NodeIndex;
use rui_core::{ElementId, Point};

/// Find the topmost element at `p`. Returns `None` when only the document
/// element is hit.
pub fn hit_test(tree: &ElementTree, p: Point) -> Option<ElementId> {
    hit_test_node(tree, tree.root, p)
}

fn hit_test_node(tree: &ElementTree, idx: NodeIndex, p: Point) -> Option<ElementId> {
    // Later siblings paint above earlier ones.
    for child in tree.children(idx).into_iter().rev() {
        if let Some(hit) = hit_test_node(tree, child, p) {
            return Some(hit);
        }
    }

    if idx == tree.root {
        return None;
    }
    let node = &tree.graph[idx];
    node.rect.contains(p).then_some(node.id)
}
