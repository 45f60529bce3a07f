//! Resize engine: pointer movement on edge/corner handles → constrained box.
//!
//! Several handles can be live in one gesture: pressing a second handle
//! before releasing the first adds it to the gesture instead of starting a
//! new one. Every move re-derives the whole box from the box and pointer
//! captured at the first press, so geometry never drifts with move history.
//!
//! Handles are applied in press order and the last one to touch a dimension
//! wins. Each axis contribution is gated on the *edge* handle of that side:
//! with `right` disabled, a `top-right` press still moves the top edge but
//! leaves the width alone.

use crate::gesture::{GestureHandle, ListenerHost, ListenerScope};
use crate::input::InputEvent;
use crate::interaction::Interaction;
use crate::style::{BorderState, Cursor};
use rui_core::{ClientRect, Edge, ElementQuery, Handle, Point, Rect, ResizeConfig, clamp};
use smallvec::SmallVec;

/// Outcome of a press on a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeStart {
    /// A new gesture began with this handle.
    Started,
    /// The handle joined the gesture already in progress.
    Extended,
    /// The handle is already part of the gesture in progress.
    AlreadyActive,
    /// The handle is disabled; nothing happened.
    Disabled,
}

/// A pressable hotspot, in the box's parent space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hotspot {
    pub handle: Handle,
    pub area: ClientRect,
    pub cursor: Cursor,
}

/// Thickness of an edge hotspot strip, centred on the edge.
const EDGE_HOTSPOT: f64 = 6.0;
/// Side of a corner hotspot square.
const CORNER_HOTSPOT: f64 = 10.0;
/// How far a corner hotspot pokes out past the box.
const CORNER_OVERHANG: f64 = 4.0;

struct ResizeGesture {
    /// Live handles in press order.
    handles: SmallVec<[Handle; 4]>,
    start_pointer: Point,
    start_rect: Rect,
    listeners: GestureHandle,
}

pub struct ResizeEngine<H: ListenerHost> {
    config: ResizeConfig,
    rect: Rect,
    hovered: Option<Handle>,
    gesture: Option<ResizeGesture>,
    host: H,
}

impl<H: ListenerHost> ResizeEngine<H> {
    pub fn new(config: ResizeConfig, host: H) -> Self {
        Self {
            rect: Rect::new(
                config.initial_width,
                config.initial_height,
                config.initial_top,
                config.initial_left,
            ),
            config,
            hovered: None,
            gesture: None,
            host,
        }
    }

    pub fn config(&self) -> &ResizeConfig {
        &self.config
    }

    /// Last published box.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn is_resizing(&self) -> bool {
        self.gesture.is_some()
    }

    /// Handles of the gesture in progress, in press order.
    pub fn active_handles(&self) -> &[Handle] {
        match &self.gesture {
            Some(g) => g.handles.as_slice(),
            None => &[],
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn is_disabled(&self, handle: Handle) -> bool {
        self.config.disabled_handles.contains(handle)
    }

    // ─── Gesture ─────────────────────────────────────────────────────────

    /// Press on `handle` at client `(x, y)`.
    pub fn begin_handle(&mut self, handle: Handle, x: f64, y: f64) -> ResizeStart {
        if self.is_disabled(handle) {
            log::trace!("resize handle {handle} is disabled");
            return ResizeStart::Disabled;
        }

        if let Some(gesture) = &mut self.gesture {
            if gesture.handles.contains(&handle) {
                return ResizeStart::AlreadyActive;
            }
            gesture.handles.push(handle);
            log::debug!("resize extended with {handle} ({} live)", gesture.handles.len());
            return ResizeStart::Extended;
        }

        let listeners = GestureHandle::acquire(&mut self.host, ListenerScope::Window);
        self.gesture = Some(ResizeGesture {
            handles: smallvec::smallvec![handle],
            start_pointer: Point::new(x, y),
            start_rect: self.rect,
            listeners,
        });
        log::debug!("resize started from {handle} at ({x}, {y})");
        ResizeStart::Started
    }

    /// Recompute the box for a pointer at client `(x, y)`.
    /// Returns `None` when no gesture is in progress.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<Rect> {
        let gesture = self.gesture.as_ref()?;
        let delta = Point::new(x, y) - gesture.start_pointer;
        self.rect = derive_rect(&self.config, gesture.start_rect, &gesture.handles, delta.x, delta.y);
        Some(self.rect)
    }

    /// Release: ends the whole gesture however many handles were live.
    /// Returns `false` when no gesture was in progress.
    pub fn end_handle(&mut self) -> bool {
        match self.gesture.take() {
            Some(gesture) => {
                gesture.listeners.release(&mut self.host);
                log::debug!("resize ended at {:?}", self.rect);
                true
            }
            None => false,
        }
    }

    // ─── Presentation ────────────────────────────────────────────────────

    /// Pointer entered (`Some`) or left (`None`) a hotspot.
    pub fn set_hovered(&mut self, handle: Option<Handle>) {
        self.hovered = handle;
    }

    pub fn hovered(&self) -> Option<Handle> {
        self.hovered
    }

    /// Visual state of one side of the box.
    pub fn border(&self, edge: Edge) -> BorderState {
        let edge_handle = edge.handle();
        if self.is_disabled(edge_handle) {
            return if self.hovered == Some(edge_handle) {
                BorderState::Thin
            } else {
                BorderState::Hidden
            };
        }
        if self.active_handles().iter().any(|h| h.touches(edge)) {
            BorderState::Thick
        } else if self.hovered.is_some_and(|h| h.touches(edge)) {
            BorderState::Thin
        } else {
            BorderState::Hidden
        }
    }

    /// Hotspots of the enabled handles, edges first, corners last (on top).
    /// Disabled handles have none.
    pub fn hotspots(&self) -> SmallVec<[Hotspot; 8]> {
        Handle::ALL
            .into_iter()
            .filter(|h| !self.is_disabled(*h))
            .map(|handle| Hotspot {
                handle,
                area: hotspot_area(self.rect, handle),
                cursor: Cursor::for_handle(handle),
            })
            .collect()
    }

    /// Topmost enabled handle under `p`, a point in the box's parent space.
    pub fn hotspot_at(&self, p: Point) -> Option<Handle> {
        self.hotspots()
            .iter()
            .rev()
            .find(|h| h.area.contains(p))
            .map(|h| h.handle)
    }
}

/// Rebuild the box from the gesture's start state and total pointer delta.
fn derive_rect(cfg: &ResizeConfig, start: Rect, handles: &[Handle], dx: f64, dy: f64) -> Rect {
    let disabled = |edge: Edge| cfg.disabled_handles.contains(edge.handle());
    let mut rect = start;

    for handle in handles {
        if handle.touches(Edge::Right) && !disabled(Edge::Right) {
            rect.width = clamp(start.width + dx, cfg.min_width, cfg.max_width);
        }
        if handle.touches(Edge::Left) && !disabled(Edge::Left) {
            rect.width = clamp(start.width - dx, cfg.min_width, cfg.max_width);
            // Right edge stays put while the left edge moves.
            rect.left = start.left + (start.width - rect.width);
        }
        if handle.touches(Edge::Bottom) && !disabled(Edge::Bottom) {
            rect.height = clamp(start.height + dy, cfg.min_height, cfg.max_height);
        }
        if handle.touches(Edge::Top) && !disabled(Edge::Top) {
            rect.height = clamp(start.height - dy, cfg.min_height, cfg.max_height);
            rect.top = start.top + (start.height - rect.height);
        }
    }
    rect
}

fn hotspot_area(r: Rect, handle: Handle) -> ClientRect {
    let half = EDGE_HOTSPOT / 2.0;
    let inset = CORNER_HOTSPOT - CORNER_OVERHANG;
    let (l, t, rt, b) = (r.left, r.top, r.right(), r.bottom());
    match handle {
        Handle::Top => ClientRect::new(l, t - half, rt, t + half),
        Handle::Bottom => ClientRect::new(l, b - half, rt, b + half),
        Handle::Left => ClientRect::new(l - half, t, l + half, b),
        Handle::Right => ClientRect::new(rt - half, t, rt + half, b),
        Handle::TopLeft => ClientRect::new(l - CORNER_OVERHANG, t - CORNER_OVERHANG, l + inset, t + inset),
        Handle::TopRight => ClientRect::new(rt - inset, t - CORNER_OVERHANG, rt + CORNER_OVERHANG, t + inset),
        Handle::BottomLeft => ClientRect::new(l - CORNER_OVERHANG, b - inset, l + inset, b + CORNER_OVERHANG),
        Handle::BottomRight => {
            ClientRect::new(rt - inset, b - inset, rt + CORNER_OVERHANG, b + CORNER_OVERHANG)
        }
    }
}

impl<H: ListenerHost> Interaction for ResizeEngine<H> {
    type Output = Rect;

    fn handle(&mut self, event: &InputEvent, _query: &dyn ElementQuery) -> Option<Rect> {
        match event {
            InputEvent::PointerDown {
                x,
                y,
                handle: Some(handle),
                ..
            } => {
                self.begin_handle(*handle, *x, *y);
                None
            }
            InputEvent::PointerDown { handle: None, .. } => None,
            InputEvent::PointerMove { x, y } => self.pointer_move(*x, *y),
            InputEvent::PointerUp { .. } => {
                self.end_handle();
                None
            }
            InputEvent::Hover { handle } => {
                self.set_hovered(*handle);
                None
            }
        }
    }

    fn is_active(&self) -> bool {
        self.is_resizing()
    }

    fn teardown(&mut self) -> bool {
        let ended = self.end_handle();
        if ended {
            log::debug!("resizable torn down mid-gesture");
        }
        ended
    }
}

impl<H: ListenerHost> Drop for ResizeEngine<H> {
    fn drop(&mut self) {
        self.teardown();
    }
}
