//! Uniform event dispatch over the engines.

use crate::input::InputEvent;
use rui_core::ElementQuery;

/// An engine that turns input events into published geometry.
pub trait Interaction {
    /// The geometry this engine publishes.
    type Output;

    /// Handle one input event. Returns the new geometry when it changed.
    fn handle(&mut self, event: &InputEvent, query: &dyn ElementQuery) -> Option<Self::Output>;

    /// Whether a gesture is in progress.
    fn is_active(&self) -> bool;

    /// End any gesture in progress because the owner is going away.
    /// Returns `true` if a gesture was ended.
    fn teardown(&mut self) -> bool;
}
