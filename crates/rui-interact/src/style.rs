//! Presentation state the engines expose for renderers: cursors and the
//! resize border states.

use rui_core::Handle;

/// Pointer cursor a renderer should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Default,
    Grab,
    NsResize,
    EwResize,
    NwseResize,
    NeswResize,
}

impl Cursor {
    pub fn for_handle(handle: Handle) -> Self {
        match handle {
            Handle::Top | Handle::Bottom => Cursor::NsResize,
            Handle::Left | Handle::Right => Cursor::EwResize,
            Handle::TopLeft | Handle::BottomRight => Cursor::NwseResize,
            Handle::TopRight | Handle::BottomLeft => Cursor::NeswResize,
        }
    }

    /// CSS `cursor` value.
    pub fn as_css(self) -> &'static str {
        match self {
            Cursor::Default => "default",
            Cursor::Grab => "grab",
            Cursor::NsResize => "ns-resize",
            Cursor::EwResize => "ew-resize",
            Cursor::NwseResize => "nwse-resize",
            Cursor::NeswResize => "nesw-resize",
        }
    }
}

const BORDER_COLOR: &str = "#e1e1e5";

/// Visual state of one side of a resizable box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderState {
    /// Transparent; the default.
    Hidden,
    /// Hovered, or next to a hovered corner.
    Thin,
    /// Being dragged.
    Thick,
}

impl BorderState {
    pub fn width_px(self) -> u32 {
        match self {
            BorderState::Hidden | BorderState::Thin => 2,
            BorderState::Thick => 3,
        }
    }

    /// CSS `border-*` shorthand value.
    pub fn to_css(self) -> String {
        let color = match self {
            BorderState::Hidden => "transparent",
            BorderState::Thin | BorderState::Thick => BORDER_COLOR,
        };
        format!("{}px solid {color}", self.width_px())
    }
}
