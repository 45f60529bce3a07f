//! Gesture listener lifetime.
//!
//! While a gesture is live an engine must see every move and release, even
//! those outside its element, so hosts hand out document- or window-wide
//! subscriptions through `ListenerHost`. A `GestureHandle` owns one
//! move+release pair: acquired on press, consumed by `release`. Engines
//! release it on pointer-up, on `teardown()`, and when dropped.

use std::cell::RefCell;
use std::rc::Rc;

/// Where a transient listener is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerScope {
    Document,
    Window,
}

impl ListenerScope {
    pub fn as_str(self) -> &'static str {
        match self {
            ListenerScope::Document => "document",
            ListenerScope::Window => "window",
        }
    }
}

/// Which event a transient listener receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    Move,
    Release,
}

impl ListenerKind {
    /// DOM event name.
    pub fn as_str(self) -> &'static str {
        match self {
            ListenerKind::Move => "pointermove",
            ListenerKind::Release => "pointerup",
        }
    }
}

/// Host side of listener registration.
pub trait ListenerHost {
    fn attach(&mut self, scope: ListenerScope, kind: ListenerKind);
    fn detach(&mut self, scope: ListenerScope, kind: ListenerKind);
}

/// One attached move+release listener pair.
///
/// Not `Clone`: `release` consumes the handle, so a pair can be given back
/// at most once.
#[derive(Debug)]
#[must_use = "listeners stay attached until the handle is released"]
pub struct GestureHandle {
    scope: ListenerScope,
}

impl GestureHandle {
    pub fn acquire<H: ListenerHost + ?Sized>(host: &mut H, scope: ListenerScope) -> Self {
        host.attach(scope, ListenerKind::Move);
        host.attach(scope, ListenerKind::Release);
        log::trace!("gesture listeners attached to {}", scope.as_str());
        Self { scope }
    }

    pub fn scope(&self) -> ListenerScope {
        self.scope
    }

    pub fn release<H: ListenerHost + ?Sized>(self, host: &mut H) {
        host.detach(self.scope, ListenerKind::Move);
        host.detach(self.scope, ListenerKind::Release);
        log::trace!("gesture listeners detached from {}", self.scope.as_str());
    }
}

// ─── Recording host ──────────────────────────────────────────────────────

/// A change in the set of attached listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerChange {
    Attached(ListenerScope, ListenerKind),
    Detached(ListenerScope, ListenerKind),
}

#[derive(Debug, Default)]
struct RecordingState {
    attached: Vec<(ListenerScope, ListenerKind)>,
    history: Vec<ListenerChange>,
}

/// In-memory `ListenerHost` for headless hosts and tests.
///
/// Clones share state, so a caller can keep one clone to observe the
/// listeners of an engine that owns another, even after the engine is gone.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    state: Rc<RefCell<RecordingState>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of listeners currently attached.
    pub fn attached_count(&self) -> usize {
        self.state.borrow().attached.len()
    }

    pub fn is_listening(&self) -> bool {
        self.attached_count() > 0
    }

    /// Every attach/detach so far, oldest first.
    pub fn history(&self) -> Vec<ListenerChange> {
        self.state.borrow().history.clone()
    }
}

impl ListenerHost for RecordingHost {
    fn attach(&mut self, scope: ListenerScope, kind: ListenerKind) {
        let mut state = self.state.borrow_mut();
        state.attached.push((scope, kind));
        state.history.push(ListenerChange::Attached(scope, kind));
    }

    fn detach(&mut self, scope: ListenerScope, kind: ListenerKind) {
        let mut state = self.state.borrow_mut();
        match state.attached.iter().position(|l| *l == (scope, kind)) {
            Some(pos) => {
                state.attached.remove(pos);
                state.history.push(ListenerChange::Detached(scope, kind));
            }
            None => log::warn!(
                "detach of {} listener on {} that was never attached",
                kind.as_str(),
                scope.as_str()
            ),
        }
    }
}
