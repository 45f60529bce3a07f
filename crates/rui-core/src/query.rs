//! Host capability interface.
//!
//! The engines never touch a render tree directly. Everything they need to
//! know about layout comes through `ElementQuery`, implemented by the host:
//! the headless `rui-tree` for tests and tools, or the DOM in `rui-wasm`.

use crate::config::BoundsRef;
use crate::geometry::ClientRect;
use crate::id::ElementId;
use kurbo::Size;

pub trait ElementQuery {
    /// Bounding rectangle, in client space, of the element a bounds
    /// reference points at. `None` when nothing matches.
    fn resolve_bounds(&self, target: &BoundsRef) -> Option<ClientRect>;

    /// Live bounding rectangle of an element, in client space.
    fn element_rect(&self, element: ElementId) -> Option<ClientRect>;

    /// Bounding rectangle of the element's offset parent (nearest positioned
    /// ancestor). `None` means the element is positioned against the viewport.
    fn offset_parent_rect(&self, element: ElementId) -> Option<ClientRect>;

    /// Whether `target` lies in the subtree of the first descendant of `root`
    /// matching `selector`. `None` when no descendant matches.
    fn handle_contains(&self, root: ElementId, selector: &str, target: ElementId) -> Option<bool>;

    /// Size of the viewport.
    fn viewport_size(&self) -> Size;
}
