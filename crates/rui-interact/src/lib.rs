//! Interaction engines.
//!
//! Each engine turns a stream of pointer events into published geometry:
//!
//! - [`DragEngine`]: a movable point (free, bounded or grid-snapped).
//! - [`ResizeEngine`]: a box resized from up to eight edge/corner handles.
//! - [`PanelResizer`]: a docked panel resized from its free edge.
//!
//! All three follow the same protocol. A press acquires transient move and
//! release listeners, every move re-derives geometry from the state captured
//! at the press, and the release (or teardown) gives the listeners back.

pub mod drag;
pub mod gesture;
pub mod input;
pub mod interaction;
pub mod panel;
pub mod resize;
pub mod style;

pub use drag::{DragEngine, DragStart};
pub use gesture::{GestureHandle, ListenerHost, ListenerKind, ListenerScope, RecordingHost};
pub use input::InputEvent;
pub use interaction::Interaction;
pub use panel::{PanelResizer, PanelStart};
pub use resize::{Hotspot, ResizeEngine, ResizeStart};
pub use style::{BorderState, Cursor};
