//! Drag engine: pointer movement → constrained element position.
//!
//! The published `Position` is the element's top-left corner in its offset
//! parent's space. On press the engine records where inside the element it
//! was grabbed, so the element stays pinned to that point instead of jumping
//! its corner to the cursor.
//!
//! | Mode | Each move |
//! |------|-----------|
//! | `free` | no transform |
//! | `grid` | both axes rounded to the nearest multiple of `grid_size` |
//! | `bounded` | element kept fully inside the captured bounds rectangle |

use crate::gesture::{GestureHandle, ListenerHost, ListenerScope};
use crate::input::InputEvent;
use crate::interaction::Interaction;
use crate::style::Cursor;
use rui_core::geometry::{parent_offset, rect_to_parent};
use rui_core::{
    BoundsRef, ClientRect, DragConfig, DragMode, ElementId, ElementQuery, Point, Position, Size,
    Vec2, clamp, snap_to_grid,
};

/// Outcome of a press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragStart {
    Started,
    /// A drag is already in progress; the press is ignored.
    AlreadyActive,
    /// A drag handle is configured and the press landed outside it.
    OutsideHandle,
    /// A drag handle is configured but nothing inside the element matches it.
    HandleNotFound,
}

struct DragGesture {
    /// Pointer position minus the element's parent-space position at press.
    offset: Vec2,
    listeners: GestureHandle,
}

pub struct DragEngine<H: ListenerHost> {
    element: ElementId,
    config: DragConfig,
    position: Position,
    /// Bounds snapshot in client space, captured per mode/reference change.
    bounds: Option<ClientRect>,
    gesture: Option<DragGesture>,
    host: H,
}

impl<H: ListenerHost> DragEngine<H> {
    /// Create an engine for `element` and resolve its bounds once.
    pub fn new(element: ElementId, config: DragConfig, host: H, query: &dyn ElementQuery) -> Self {
        if config.mode == DragMode::Grid && config.grid_step().is_none() {
            log::warn!(
                "{element:?}: grid size {} is not a positive number; snapping disabled",
                config.grid_size
            );
        }
        if config.mode == DragMode::Bounded && config.bounds.is_none() {
            log::warn!("{element:?}: bounded drag without a bounds reference; movement is unclamped");
        }

        let mut engine = Self {
            element,
            position: Position::new(config.initial_x, config.initial_y),
            config,
            bounds: None,
            gesture: None,
            host,
        };
        engine.refresh_bounds(query);
        engine
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    /// Last published position.
    pub fn position(&self) -> Position {
        self.position
    }

    /// The captured bounds rectangle, if bounded mode resolved one.
    pub fn bounds(&self) -> Option<ClientRect> {
        self.bounds
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// `default` when only a handle starts drags, `grab` when the whole
    /// element does.
    pub fn cursor(&self) -> Cursor {
        if self.config.drag_handle.is_some() {
            Cursor::Default
        } else {
            Cursor::Grab
        }
    }

    pub fn set_mode(&mut self, mode: DragMode, query: &dyn ElementQuery) {
        if self.config.mode != mode {
            self.config.mode = mode;
            self.refresh_bounds(query);
        }
    }

    pub fn set_bounds(&mut self, bounds: Option<BoundsRef>, query: &dyn ElementQuery) {
        if self.config.bounds != bounds {
            self.config.bounds = bounds;
            self.refresh_bounds(query);
        }
    }

    /// Re-measure the bounds reference. Bounds are a snapshot: layout changes
    /// after this call are not seen until it runs again.
    pub fn refresh_bounds(&mut self, query: &dyn ElementQuery) {
        self.bounds = match (self.config.mode, &self.config.bounds) {
            (DragMode::Bounded, Some(target)) => {
                let rect = query.resolve_bounds(target);
                if rect.is_none() {
                    log::debug!("{:?}: bounds {target:?} not resolvable yet; unclamped", self.element);
                }
                rect
            }
            _ => None,
        };
    }

    // ─── Gesture ─────────────────────────────────────────────────────────

    /// Start a drag from a press at client `(x, y)` on `target`.
    pub fn begin(
        &mut self,
        x: f64,
        y: f64,
        target: Option<ElementId>,
        query: &dyn ElementQuery,
    ) -> DragStart {
        if self.gesture.is_some() {
            return DragStart::AlreadyActive;
        }

        if let Some(selector) = &self.config.drag_handle {
            let Some(target) = target else {
                return DragStart::OutsideHandle;
            };
            match query.handle_contains(self.element, selector, target) {
                None => {
                    log::warn!("{:?}: drag handle `{selector}` not found", self.element);
                    return DragStart::HandleNotFound;
                }
                Some(false) => return DragStart::OutsideHandle,
                Some(true) => {}
            }
        }

        let local = match query.element_rect(self.element) {
            Some(rect) => {
                let parent = query
                    .offset_parent_rect(self.element)
                    .unwrap_or(ClientRect::ZERO);
                parent_offset(rect, parent)
            }
            None => {
                log::debug!("{:?}: not measurable; anchoring to last position", self.element);
                self.position.to_point().to_vec2()
            }
        };

        let listeners = GestureHandle::acquire(&mut self.host, ListenerScope::Document);
        self.gesture = Some(DragGesture {
            offset: Point::new(x, y).to_vec2() - local,
            listeners,
        });
        log::debug!("{:?}: drag started at ({x}, {y})", self.element);
        DragStart::Started
    }

    /// Recompute the position for a pointer at client `(x, y)`.
    /// Returns `None` when no drag is in progress.
    pub fn pointer_move(&mut self, x: f64, y: f64, query: &dyn ElementQuery) -> Option<Position> {
        let gesture = self.gesture.as_ref()?;
        let mut pos = Point::new(x, y) - gesture.offset;

        if let Some(step) = self.config.grid_step() {
            pos.x = snap_to_grid(pos.x, step);
            pos.y = snap_to_grid(pos.y, step);
        } else if self.config.mode == DragMode::Bounded
            && let Some(bounds) = self.bounds
        {
            pos = self.clamp_to_bounds(pos, bounds, query);
        }

        self.position = pos.into();
        Some(self.position)
    }

    /// Finish the drag and give the listeners back. Returns `false` when no
    /// drag was in progress.
    pub fn end(&mut self) -> bool {
        match self.gesture.take() {
            Some(gesture) => {
                gesture.listeners.release(&mut self.host);
                log::debug!("{:?}: drag ended at {:?}", self.element, self.position);
                true
            }
            None => false,
        }
    }

    /// Keep the element's live rectangle inside `bounds`. The element is
    /// measured on every call so size changes mid-drag are respected.
    fn clamp_to_bounds(&self, pos: Point, bounds: ClientRect, query: &dyn ElementQuery) -> Point {
        let parent = query
            .offset_parent_rect(self.element)
            .unwrap_or(ClientRect::ZERO);
        let size = query
            .element_rect(self.element)
            .map(|r| r.size())
            .unwrap_or(Size::ZERO);
        let b = rect_to_parent(bounds, parent);
        Point::new(
            clamp(pos.x, b.x0, b.x1 - size.width),
            clamp(pos.y, b.y0, b.y1 - size.height),
        )
    }
}

impl<H: ListenerHost> Interaction for DragEngine<H> {
    type Output = Position;

    fn handle(&mut self, event: &InputEvent, query: &dyn ElementQuery) -> Option<Position> {
        match event {
            InputEvent::PointerDown { x, y, target, .. } => {
                self.begin(*x, *y, *target, query);
                None
            }
            InputEvent::PointerMove { x, y } => self.pointer_move(*x, *y, query),
            InputEvent::PointerUp { .. } => {
                self.end();
                None
            }
            InputEvent::Hover { .. } => None,
        }
    }

    fn is_active(&self) -> bool {
        self.is_dragging()
    }

    fn teardown(&mut self) -> bool {
        let ended = self.end();
        if ended {
            log::debug!("{:?}: torn down mid-drag", self.element);
        }
        ended
    }
}

impl<H: ListenerHost> Drop for DragEngine<H> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::RecordingHost;
    use pretty_assertions::assert_eq;
    use rui_tree::{ElementNode, ElementTree};

    /// A positioned 400×300 stage at the viewport origin holding a 100×50 box.
    fn stage(box_id: &str) -> ElementTree {
        let mut tree = ElementTree::new(Size::new(800.0, 600.0));
        let stage = tree.add(
            tree.root,
            ElementNode::new("drag_stage", "div")
                .positioned()
                .with_rect(ClientRect::new(0.0, 0.0, 400.0, 300.0)),
        );
        tree.add(
            stage,
            ElementNode::new(box_id, "div").with_rect(ClientRect::new(0.0, 0.0, 100.0, 50.0)),
        );
        tree
    }

    #[test]
    fn free_drag_keeps_grab_point() {
        let tree = stage("free_box");
        let id = ElementId::intern("free_box");
        let mut engine = DragEngine::new(id, DragConfig::free(), RecordingHost::new(), &tree);

        assert_eq!(engine.begin(30.0, 20.0, Some(id), &tree), DragStart::Started);
        // Grabbed 30px in, 20px down: moving the pointer by (15, 5) moves
        // the corner by the same amount rather than snapping it to the cursor.
        assert_eq!(
            engine.pointer_move(45.0, 25.0, &tree),
            Some(Position::new(15.0, 5.0))
        );
        assert_eq!(engine.cursor(), Cursor::Grab);
    }

    #[test]
    fn grid_drag_snaps_to_nearest_multiple() {
        let tree = stage("grid_box");
        let id = ElementId::intern("grid_box");
        let mut engine = DragEngine::new(id, DragConfig::grid(50.0), RecordingHost::new(), &tree);

        engine.begin(0.0, 0.0, Some(id), &tree);
        assert_eq!(
            engine.pointer_move(73.0, -12.0, &tree),
            Some(Position::new(50.0, 0.0))
        );
    }

    #[test]
    fn bounded_drag_clamps_to_bounds() {
        let tree = stage("bounded_box");
        let id = ElementId::intern("bounded_box");
        let cfg = DragConfig::bounded(BoundsRef::Selector("#drag_stage".into()));
        let mut engine = DragEngine::new(id, cfg, RecordingHost::new(), &tree);
        assert_eq!(engine.bounds(), Some(ClientRect::new(0.0, 0.0, 400.0, 300.0)));

        engine.begin(10.0, 10.0, Some(id), &tree);
        assert_eq!(
            engine.pointer_move(1010.0, 1010.0, &tree),
            Some(Position::new(300.0, 250.0))
        );
        assert_eq!(
            engine.pointer_move(-500.0, -500.0, &tree),
            Some(Position::new(0.0, 0.0))
        );
    }

    #[test]
    fn unresolvable_bounds_leave_drag_unclamped() {
        let tree = stage("loose_box");
        let id = ElementId::intern("loose_box");
        let cfg = DragConfig::bounded(BoundsRef::Element(None));
        let mut engine = DragEngine::new(id, cfg, RecordingHost::new(), &tree);
        assert_eq!(engine.bounds(), None);

        engine.begin(0.0, 0.0, Some(id), &tree);
        assert_eq!(
            engine.pointer_move(1000.0, 1000.0, &tree),
            Some(Position::new(1000.0, 1000.0))
        );
    }

    #[test]
    fn second_press_is_ignored() {
        let tree = stage("twice_box");
        let id = ElementId::intern("twice_box");
        let host = RecordingHost::new();
        let mut engine = DragEngine::new(id, DragConfig::free(), host.clone(), &tree);

        assert_eq!(engine.begin(0.0, 0.0, Some(id), &tree), DragStart::Started);
        assert_eq!(engine.begin(50.0, 50.0, Some(id), &tree), DragStart::AlreadyActive);
        assert_eq!(host.attached_count(), 2);
    }

    #[test]
    fn stray_events_are_noops() {
        let tree = stage("stray_box");
        let id = ElementId::intern("stray_box");
        let cfg = DragConfig::free().with_initial(20.0, 40.0);
        let mut engine = DragEngine::new(id, cfg, RecordingHost::new(), &tree);

        assert_eq!(engine.pointer_move(300.0, 300.0, &tree), None);
        assert!(!engine.end());
        assert_eq!(engine.position(), Position::new(20.0, 40.0));
    }

    #[test]
    fn mode_change_recaptures_bounds() {
        let tree = stage("switch_box");
        let id = ElementId::intern("switch_box");
        let mut cfg = DragConfig::free();
        cfg.bounds = Some(BoundsRef::Selector("#drag_stage".into()));
        let mut engine = DragEngine::new(id, cfg, RecordingHost::new(), &tree);
        assert_eq!(engine.bounds(), None);

        engine.set_mode(DragMode::Bounded, &tree);
        assert_eq!(engine.bounds(), Some(ClientRect::new(0.0, 0.0, 400.0, 300.0)));

        engine.set_bounds(None, &tree);
        assert_eq!(engine.bounds(), None);
    }
}
