//! `ElementQuery` over the live browser DOM.
//!
//! Elements are addressed by DOM id. A press target often has no id of its
//! own (a span inside a drag handle, say), so the bridge parks it under
//! [`POINTER_TARGET`] for the duration of the press.

use rui_core::{BoundsRef, ClientRect, ElementId, ElementQuery, Size};
use std::cell::RefCell;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

/// Reserved id standing for the element the current press landed on.
pub const POINTER_TARGET: &str = "rui:pointer-target";

pub struct DomQuery {
    window: Window,
    document: Document,
    pointer_target: RefCell<Option<Element>>,
}

impl DomQuery {
    /// `None` outside a browser main thread (no `window` or `document`).
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self {
            window,
            document,
            pointer_target: RefCell::new(None),
        })
    }

    /// Park `target` under [`POINTER_TARGET`] and return the id to pass to
    /// the engine. Elements that carry an id are addressed directly.
    pub fn adopt_target(&self, target: Option<Element>) -> Option<ElementId> {
        let target = target?;
        let id = target.id();
        if !id.is_empty() {
            *self.pointer_target.borrow_mut() = None;
            return Some(ElementId::intern(&id));
        }
        *self.pointer_target.borrow_mut() = Some(target);
        Some(ElementId::intern(POINTER_TARGET))
    }

    pub fn clear_target(&self) {
        self.pointer_target.borrow_mut().take();
    }

    fn lookup(&self, id: ElementId) -> Option<Element> {
        if id.as_str() == POINTER_TARGET {
            return self.pointer_target.borrow().clone();
        }
        self.document.get_element_by_id(id.as_str())
    }
}

fn client_rect(element: &Element) -> ClientRect {
    let r = element.get_bounding_client_rect();
    ClientRect::new(r.left(), r.top(), r.right(), r.bottom())
}

impl ElementQuery for DomQuery {
    fn resolve_bounds(&self, target: &BoundsRef) -> Option<ClientRect> {
        let element = match target {
            BoundsRef::Selector(sel) => match self.document.query_selector(sel) {
                Ok(found) => found?,
                Err(err) => {
                    log::warn!("invalid bounds selector `{sel}`: {err:?}");
                    return None;
                }
            },
            BoundsRef::Element(Some(id)) => self.lookup(*id)?,
            BoundsRef::Element(None) => return None,
        };
        Some(client_rect(&element))
    }

    fn element_rect(&self, element: ElementId) -> Option<ClientRect> {
        self.lookup(element).map(|e| client_rect(&e))
    }

    fn offset_parent_rect(&self, element: ElementId) -> Option<ClientRect> {
        let element = self.lookup(element)?;
        let parent = element.dyn_ref::<HtmlElement>()?.offset_parent()?;
        Some(client_rect(&parent))
    }

    fn handle_contains(&self, root: ElementId, selector: &str, target: ElementId) -> Option<bool> {
        let root = self.lookup(root)?;
        let handle = root.query_selector(selector).ok().flatten()?;
        let target = self.lookup(target);
        Some(target.is_some_and(|t| handle.contains(Some(t.as_ref()))))
    }

    fn viewport_size(&self) -> Size {
        let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
            v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
        };
        Size::new(dim(self.window.inner_width()), dim(self.window.inner_height()))
    }
}
