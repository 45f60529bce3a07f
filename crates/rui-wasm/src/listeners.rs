//! `ListenerHost` backed by JavaScript callbacks.

use js_sys::Function;
use rui_interact::{ListenerHost, ListenerKind, ListenerScope};
use wasm_bindgen::JsValue;

/// Forwards listener changes to host-supplied `attach(scope, kind)` and
/// `detach(scope, kind)` functions, called with strings such as
/// `("document", "pointermove")`. The JS side owns the real DOM listeners
/// and routes their events back into the bridge.
pub struct JsListenerHost {
    attach: Function,
    detach: Function,
}

impl JsListenerHost {
    pub fn new(attach: Function, detach: Function) -> Self {
        Self { attach, detach }
    }

    fn call(f: &Function, what: &str, scope: ListenerScope, kind: ListenerKind) {
        let result = f.call2(
            &JsValue::NULL,
            &JsValue::from_str(scope.as_str()),
            &JsValue::from_str(kind.as_str()),
        );
        if let Err(err) = result {
            log::warn!(
                "{what} of {} listener on {} failed: {err:?}",
                kind.as_str(),
                scope.as_str()
            );
        }
    }
}

impl ListenerHost for JsListenerHost {
    fn attach(&mut self, scope: ListenerScope, kind: ListenerKind) {
        Self::call(&self.attach, "attach", scope, kind);
    }

    fn detach(&mut self, scope: ListenerScope, kind: ListenerKind) {
        Self::call(&self.detach, "detach", scope, kind);
    }
}
