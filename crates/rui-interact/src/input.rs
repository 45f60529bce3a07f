//! Pointer events as the engines see them.
//!
//! Hosts translate whatever their platform delivers (DOM pointer events,
//! scenario steps) into `InputEvent`. Coordinates are client pixels.

use rui_core::{ElementId, Handle, Point};

/// One pointer event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed.
    PointerDown {
        x: f64,
        y: f64,
        /// Innermost element under the pointer, if the host knows it.
        target: Option<ElementId>,
        /// Resize hotspot the press landed on.
        handle: Option<Handle>,
    },

    /// Pointer moved anywhere in the document.
    PointerMove { x: f64, y: f64 },

    /// Pointer released anywhere in the document.
    PointerUp { x: f64, y: f64 },

    /// Pointer entered a resize hotspot (`Some`) or left it (`None`).
    Hover { handle: Option<Handle> },
}

impl InputEvent {
    pub fn pointer_down(x: f64, y: f64) -> Self {
        Self::PointerDown {
            x,
            y,
            target: None,
            handle: None,
        }
    }

    /// A press whose target element is known.
    pub fn pointer_down_on(x: f64, y: f64, target: ElementId) -> Self {
        Self::PointerDown {
            x,
            y,
            target: Some(target),
            handle: None,
        }
    }

    /// A press on a resize hotspot.
    pub fn handle_down(handle: Handle, x: f64, y: f64) -> Self {
        Self::PointerDown {
            x,
            y,
            target: None,
            handle: Some(handle),
        }
    }

    pub fn pointer_move(x: f64, y: f64) -> Self {
        Self::PointerMove { x, y }
    }

    pub fn pointer_up(x: f64, y: f64) -> Self {
        Self::PointerUp { x, y }
    }

    /// Client position, for events that carry one.
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::PointerDown { x, y, .. } | Self::PointerMove { x, y } | Self::PointerUp { x, y } => {
                Some(Point::new(*x, *y))
            }
            Self::Hover { .. } => None,
        }
    }
}
