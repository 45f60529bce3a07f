//! Panel resizer: a docked panel (sidebar, sheet) resized from its free edge.
//!
//! Two anchoring rules:
//!
//! - `Delta`: size at press plus the pointer delta along the panel axis. A
//!   panel docked left grows as the pointer moves right; one docked right
//!   grows as it moves left.
//! - `Viewport`: the distance from the pointer to the viewport edge the panel
//!   is docked to. A top-docked viewport panel has no such rule and does not
//!   resize.
//!
//! The result is clamped to `[min_size, max_size]`. A collapsed panel shows
//! no handle, so presses are ignored until it expands again.

use crate::gesture::{GestureHandle, ListenerHost, ListenerScope};
use crate::input::InputEvent;
use crate::interaction::Interaction;
use rui_core::{Edge, ElementId, ElementQuery, PanelAnchor, PanelConfig, Point, clamp};

/// Outcome of a press on the panel's resize handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelStart {
    Started,
    AlreadyActive,
    /// The panel is collapsed and has no handle.
    Collapsed,
    /// The configuration has no resizable edge (top-docked viewport panel).
    Fixed,
    /// No size is known yet and the panel could not be measured.
    Unmeasured,
}

struct PanelGesture {
    start_pointer: Point,
    start_size: f64,
    listeners: GestureHandle,
}

pub struct PanelResizer<H: ListenerHost> {
    element: ElementId,
    config: PanelConfig,
    /// `None` until the first resize when no initial size is configured.
    size: Option<f64>,
    collapsed: bool,
    gesture: Option<PanelGesture>,
    host: H,
}

impl<H: ListenerHost> PanelResizer<H> {
    pub fn new(element: ElementId, config: PanelConfig, host: H) -> Self {
        Self {
            element,
            size: config.initial_size,
            config,
            collapsed: false,
            gesture: None,
            host,
        }
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Last published extent along the panel axis.
    pub fn size(&self) -> Option<f64> {
        self.size
    }

    /// Extent to render: the collapsed size while collapsed.
    pub fn rendered_size(&self) -> Option<f64> {
        if self.collapsed {
            Some(self.config.collapsed_size)
        } else {
            self.size
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn is_resizing(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Collapse or expand. Collapsing removes the handle, which ends any
    /// resize in progress.
    pub fn set_collapsed(&mut self, collapsed: bool) {
        if collapsed && self.end() {
            log::debug!("{:?}: collapsed mid-resize", self.element);
        }
        self.collapsed = collapsed;
    }

    pub fn toggle(&mut self) {
        self.set_collapsed(!self.collapsed);
    }

    fn is_vertical(&self) -> bool {
        matches!(self.config.edge, Edge::Top | Edge::Bottom)
    }

    // ─── Gesture ─────────────────────────────────────────────────────────

    pub fn begin(&mut self, x: f64, y: f64, query: &dyn ElementQuery) -> PanelStart {
        if self.gesture.is_some() {
            return PanelStart::AlreadyActive;
        }
        if self.collapsed {
            return PanelStart::Collapsed;
        }
        if self.config.anchor == PanelAnchor::Viewport && self.config.edge == Edge::Top {
            return PanelStart::Fixed;
        }

        let measured = || {
            query.element_rect(self.element).map(|r| {
                if self.is_vertical() {
                    r.height()
                } else {
                    r.width()
                }
            })
        };
        let start_size = match (self.config.anchor, self.size.or_else(measured)) {
            (_, Some(size)) => size,
            (PanelAnchor::Viewport, None) => 0.0,
            (PanelAnchor::Delta, None) => {
                log::warn!("{:?}: panel has no size and cannot be measured", self.element);
                return PanelStart::Unmeasured;
            }
        };

        let listeners = GestureHandle::acquire(&mut self.host, ListenerScope::Window);
        self.gesture = Some(PanelGesture {
            start_pointer: Point::new(x, y),
            start_size,
            listeners,
        });
        log::debug!("{:?}: panel resize started at {start_size}", self.element);
        PanelStart::Started
    }

    /// Recompute the panel extent for a pointer at client `(x, y)`.
    /// Returns `None` when no resize is in progress.
    pub fn pointer_move(&mut self, x: f64, y: f64, query: &dyn ElementQuery) -> Option<f64> {
        let gesture = self.gesture.as_ref()?;
        let raw = match self.config.anchor {
            PanelAnchor::Delta => {
                let d = Point::new(x, y) - gesture.start_pointer;
                let s = gesture.start_size;
                match self.config.edge {
                    Edge::Left => s + d.x,
                    Edge::Right => s - d.x,
                    Edge::Top => s + d.y,
                    Edge::Bottom => s - d.y,
                }
            }
            PanelAnchor::Viewport => {
                let viewport = query.viewport_size();
                match self.config.edge {
                    Edge::Left => x,
                    Edge::Right => viewport.width - x,
                    Edge::Bottom => viewport.height - y,
                    Edge::Top => return None,
                }
            }
        };
        let size = clamp(raw, self.config.min_size, self.config.max_size);
        self.size = Some(size);
        Some(size)
    }

    pub fn end(&mut self) -> bool {
        match self.gesture.take() {
            Some(gesture) => {
                gesture.listeners.release(&mut self.host);
                log::debug!("{:?}: panel resize ended at {:?}", self.element, self.size);
                true
            }
            None => false,
        }
    }
}

impl<H: ListenerHost> Interaction for PanelResizer<H> {
    type Output = f64;

    fn handle(&mut self, event: &InputEvent, query: &dyn ElementQuery) -> Option<f64> {
        match event {
            InputEvent::PointerDown { x, y, .. } => {
                self.begin(*x, *y, query);
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
        self.is_resizing()
    }

    fn teardown(&mut self) -> bool {
        self.end()
    }
}

impl<H: ListenerHost> Drop for PanelResizer<H> {
    fn drop(&mut self) {
        self.teardown();
    }
}
