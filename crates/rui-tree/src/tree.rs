//! Element tree data model and its `ElementQuery` implementation.
//!
//! The tree is a DAG of parent→child containment edges. Every element
//! carries its bounding rectangle in client space, the way a browser
//! reports `getBoundingClientRect()`. Moving an element translates its whole
//! subtree, so descendants (drag handles, hotspots) follow their container.
//!
//! Each containment edge carries the child's insertion sequence number.
//! Node indices are recycled after removal, so document order comes from
//! the edge, never from the index.

use crate::selector::Selector;
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableDiGraph;
use petgraph::visit::EdgeRef;
use rui_core::geometry::parent_offset;
use rui_core::{BoundsRef, ClientRect, ElementId, ElementQuery, Position, Rect, Size, Vec2};
use smallvec::SmallVec;
use std::collections::HashMap;

/// One element of the tree.
#[derive(Debug, Clone)]
pub struct ElementNode {
    pub id: ElementId,
    /// Lowercase tag name (`div`, `section`, …).
    pub tag: String,
    pub classes: SmallVec<[String; 2]>,
    /// Bounding rectangle in client space.
    pub rect: ClientRect,
    /// Establishes a containing block, i.e. acts as an offset parent.
    pub positioned: bool,
}

impl ElementNode {
    pub fn new(id: &str, tag: &str) -> Self {
        Self {
            id: ElementId::intern(id),
            tag: tag.to_ascii_lowercase(),
            classes: SmallVec::new(),
            rect: ClientRect::ZERO,
            positioned: false,
        }
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn with_rect(mut self, rect: ClientRect) -> Self {
        self.rect = rect;
        self
    }

    pub fn positioned(mut self) -> Self {
        self.positioned = true;
        self
    }
}

/// The element tree. `root` is the document element and spans the viewport.
pub struct ElementTree {
    pub graph: StableDiGraph<ElementNode, u32>,
    pub root: NodeIndex,
    id_index: HashMap<ElementId, NodeIndex>,
    viewport: Size,
    next_order: u32,
}

impl ElementTree {
    pub fn new(viewport: Size) -> Self {
        let mut graph = StableDiGraph::new();
        let root_node = ElementNode::new("document", "html")
            .with_rect(ClientRect::from_origin_size((0.0, 0.0), viewport));
        let root_id = root_node.id;
        let root = graph.add_node(root_node);

        let mut id_index = HashMap::new();
        id_index.insert(root_id, root);

        Self {
            graph,
            root,
            id_index,
            viewport,
            next_order: 0,
        }
    }

    /// Append `node` as the last child of `parent`.
    pub fn add(&mut self, parent: NodeIndex, node: ElementNode) -> NodeIndex {
        let id = node.id;
        let idx = self.graph.add_node(node);
        self.graph.add_edge(parent, idx, self.next_order);
        self.next_order += 1;
        if self.id_index.insert(id, idx).is_some() {
            log::warn!("duplicate element id {id:?}; lookups now resolve to the newest");
        }
        idx
    }

    /// Remove an element and its subtree.
    pub fn remove(&mut self, idx: NodeIndex) {
        for child in self.children(idx) {
            self.remove(child);
        }
        if let Some(node) = self.graph.remove_node(idx)
            && self.id_index.get(&node.id) == Some(&idx)
        {
            self.id_index.remove(&node.id);
        }
    }

    pub fn index_of(&self, id: ElementId) -> Option<NodeIndex> {
        self.id_index.get(&id).copied()
    }

    pub fn get(&self, id: ElementId) -> Option<&ElementNode> {
        self.index_of(id).map(|idx| &self.graph[idx])
    }

    pub fn parent(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .neighbors_directed(idx, petgraph::Direction::Incoming)
            .next()
    }

    /// Children in document (insertion) order.
    pub fn children(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut children: Vec<(u32, NodeIndex)> = self
            .graph
            .edges_directed(idx, petgraph::Direction::Outgoing)
            .map(|e| (*e.weight(), e.target()))
            .collect();
        children.sort_unstable_by_key(|&(order, _)| order);
        children.into_iter().map(|(_, child)| child).collect()
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
        self.graph[self.root].rect = ClientRect::from_origin_size((0.0, 0.0), viewport);
    }

    /// Whether `node` is `ancestor` or lies in its subtree.
    pub fn is_within(&self, ancestor: NodeIndex, node: NodeIndex) -> bool {
        let mut cursor = Some(node);
        while let Some(idx) = cursor {
            if idx == ancestor {
                return true;
            }
            cursor = self.parent(idx);
        }
        false
    }

    /// Nearest positioned ancestor. The document element never counts:
    /// elements without one are positioned against the viewport.
    pub fn offset_parent(&self, idx: NodeIndex) -> Option<NodeIndex> {
        let mut cursor = self.parent(idx);
        while let Some(p) = cursor {
            if p == self.root {
                return None;
            }
            if self.graph[p].positioned {
                return Some(p);
            }
            cursor = self.parent(p);
        }
        None
    }

    // ─── Selector queries ────────────────────────────────────────────────

    /// First element in document order matching `selector`, anywhere.
    pub fn query_selector(&self, selector: &str) -> Option<NodeIndex> {
        self.query_selector_within(self.root, selector)
            .or_else(|| self.matches(self.root, selector).then_some(self.root))
    }

    /// First strict descendant of `scope`, in document order, matching `selector`.
    pub fn query_selector_within(&self, scope: NodeIndex, selector: &str) -> Option<NodeIndex> {
        let selector = match Selector::parse(selector) {
            Ok(s) => s,
            Err(e) => {
                log::warn!("invalid selector `{selector}`: {e}");
                return None;
            }
        };
        let mut stack: Vec<NodeIndex> = self.children(scope).into_iter().rev().collect();
        while let Some(idx) = stack.pop() {
            if selector.matches(self, idx) {
                return Some(idx);
            }
            stack.extend(self.children(idx).into_iter().rev());
        }
        None
    }

    fn matches(&self, idx: NodeIndex, selector: &str) -> bool {
        Selector::parse(selector).is_ok_and(|s| s.matches(self, idx))
    }

    // ─── Layout mutation ─────────────────────────────────────────────────

    /// Shift an element and every descendant by `delta`.
    pub fn translate_subtree(&mut self, idx: NodeIndex, delta: Vec2) {
        self.graph[idx].rect = self.graph[idx].rect + delta;
        for child in self.children(idx) {
            self.translate_subtree(child, delta);
        }
    }

    /// Move an element so its top-left sits at `pos` in its offset parent's
    /// space, carrying its subtree along. Returns `false` for unknown ids.
    pub fn place(&mut self, id: ElementId, pos: Position) -> bool {
        let Some(idx) = self.index_of(id) else {
            return false;
        };
        let parent_origin = self
            .offset_parent(idx)
            .map(|p| self.graph[p].rect)
            .unwrap_or(ClientRect::ZERO);
        let current = parent_offset(self.graph[idx].rect, parent_origin);
        let delta = Vec2::new(pos.x, pos.y) - current;
        if delta != Vec2::ZERO {
            self.translate_subtree(idx, delta);
        }
        true
    }

    /// Apply a published box: position plus size. Descendants follow the
    /// top-left corner; their own sizes are left alone.
    pub fn place_rect(&mut self, id: ElementId, rect: Rect) -> bool {
        if !self.place(id, rect.origin()) {
            return false;
        }
        self.set_size(id, Size::new(rect.width, rect.height))
    }

    /// Resize an element in place, keeping its top-left corner.
    pub fn set_size(&mut self, id: ElementId, size: Size) -> bool {
        let Some(idx) = self.index_of(id) else {
            return false;
        };
        let r = self.graph[idx].rect;
        self.graph[idx].rect = ClientRect::from_origin_size(r.origin(), size);
        true
    }
}

impl ElementQuery for ElementTree {
    fn resolve_bounds(&self, target: &BoundsRef) -> Option<ClientRect> {
        let idx = match target {
            BoundsRef::Selector(sel) => self.query_selector(sel)?,
            BoundsRef::Element(Some(id)) => self.index_of(*id)?,
            BoundsRef::Element(None) => return None,
        };
        Some(self.graph[idx].rect)
    }

    fn element_rect(&self, element: ElementId) -> Option<ClientRect> {
        self.get(element).map(|n| n.rect)
    }

    fn offset_parent_rect(&self, element: ElementId) -> Option<ClientRect> {
        let idx = self.index_of(element)?;
        self.offset_parent(idx).map(|p| self.graph[p].rect)
    }

    fn handle_contains(&self, root: ElementId, selector: &str, target: ElementId) -> Option<bool> {
        let root = self.index_of(root)?;
        let handle = self.query_selector_within(root, selector)?;
        Some(
            self.index_of(target)
                .is_some_and(|t| self.is_within(handle, t)),
        )
    }

    fn viewport_size(&self) -> Size {
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn stage() -> (ElementTree, NodeIndex, NodeIndex) {
        let mut tree = ElementTree::new(Size::new(800.0, 600.0));
        let stage = tree.add(
            tree.root,
            ElementNode::new("stage", "section")
                .positioned()
                .with_rect(ClientRect::new(32.0, 48.0, 432.0, 348.0)),
        );
        let card = tree.add(
            stage,
            ElementNode::new("stage_card", "div")
                .with_rect(ClientRect::new(52.0, 88.0, 152.0, 138.0)),
        );
        (tree, stage, card)
    }

    #[test]
    fn offset_parent_skips_static_ancestors() {
        let (mut tree, stage, card) = stage();
        let inner = tree.add(card, ElementNode::new("stage_inner", "span"));
        assert_eq!(tree.offset_parent(inner), Some(stage));
        assert_eq!(tree.offset_parent(stage), None);
    }

    #[test]
    fn place_moves_relative_to_offset_parent() {
        let (mut tree, _, card) = stage();
        let grip = tree.add(
            card,
            ElementNode::new("stage_grip", "div").with_rect(ClientRect::new(52.0, 88.0, 152.0, 98.0)),
        );
        assert!(tree.place(ElementId::intern("stage_card"), Position::new(0.0, 0.0)));
        assert_eq!(tree.graph[card].rect, ClientRect::new(32.0, 48.0, 132.0, 98.0));
        // Descendants travel with their container.
        assert_eq!(tree.graph[grip].rect, ClientRect::new(32.0, 48.0, 132.0, 58.0));
        assert!(!tree.place(ElementId::intern("missing"), Position::ORIGIN));
    }

    #[test]
    fn place_rect_sets_size() {
        let (mut tree, _, card) = stage();
        tree.place_rect(
            ElementId::intern("stage_card"),
            Rect::new(120.0, 80.0, 10.0, 20.0),
        );
        assert_eq!(tree.graph[card].rect, ClientRect::new(52.0, 58.0, 172.0, 138.0));
    }

    #[test]
    fn query_selector_document_order() {
        let (mut tree, stage, _) = stage();
        let first = tree.add(stage, ElementNode::new("stage_a", "div").with_class("item"));
        tree.add(stage, ElementNode::new("stage_b", "div").with_class("item"));
        assert_eq!(tree.query_selector(".item"), Some(first));
        assert_eq!(tree.query_selector("#stage"), Some(stage));
        assert_eq!(tree.query_selector(".nothing"), None);
    }

    #[test]
    fn document_order_survives_slot_reuse() {
        let (mut tree, stage, _) = stage();
        let a = tree.add(stage, ElementNode::new("reuse_a", "div").with_class("item"));
        let b = tree.add(stage, ElementNode::new("reuse_b", "div").with_class("item"));
        tree.remove(a);
        let c = tree.add(stage, ElementNode::new("reuse_c", "div").with_class("item"));
        assert_eq!(c, a, "removed slot is recycled");
        assert_eq!(tree.query_selector(".item"), Some(b));
        assert_eq!(tree.children(stage).last(), Some(&c));
    }

    #[test]
    fn removing_shadowed_duplicate_keeps_newest_mapping() {
        let (mut tree, stage, _) = stage();
        let older = tree.add(stage, ElementNode::new("twin", "div"));
        let newer = tree.add(stage, ElementNode::new("twin", "span"));
        tree.remove(older);
        assert_eq!(tree.index_of(ElementId::intern("twin")), Some(newer));
    }

    #[test]
    fn remove_drops_subtree() {
        let (mut tree, stage, card) = stage();
        tree.remove(stage);
        assert!(tree.graph.node_weight(card).is_none());
        assert_eq!(tree.index_of(ElementId::intern("stage_card")), None);
    }

    #[test]
    fn query_contract() {
        let (tree, _, _) = stage();
        let card = ElementId::intern("stage_card");
        assert_eq!(
            tree.offset_parent_rect(card),
            Some(ClientRect::new(32.0, 48.0, 432.0, 348.0))
        );
        assert_eq!(
            tree.resolve_bounds(&BoundsRef::Selector("section".into())),
            Some(ClientRect::new(32.0, 48.0, 432.0, 348.0))
        );
        assert_eq!(tree.resolve_bounds(&BoundsRef::Element(None)), None);
        assert_eq!(tree.viewport_size(), Size::new(800.0, 600.0));
    }
}
