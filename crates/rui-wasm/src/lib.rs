//! WASM bridge for RUI: drives the interaction engines from browser pointer
//! events.
//!
//! Compiled via `wasm-pack build --target web`. Each exported class owns one
//! engine. The JS component forwards its pointer events and applies the
//! returned geometry to its element; configuration arrives as camelCase
//! JSON with every field optional.
//!
//! ```js
//! const drag = new WasmDraggable("card", '{"mode":"grid","gridSize":50}', attach, detach);
//! el.onpointerdown = (e) => drag.handle_pointer_down(e.clientX, e.clientY, e.target);
//! ```

mod dom;
mod listeners;

pub use dom::{DomQuery, POINTER_TARGET};
pub use listeners::JsListenerHost;

use js_sys::Function;
use rui_core::{
    DragConfig, DragMode, Edge, ElementId, Handle, PanelConfig, Point, ResizeConfig, parse_config,
};
use rui_interact::{DragEngine, DragStart, PanelResizer, PanelStart, ResizeEngine, ResizeStart};
use serde::Serialize;
use wasm_bindgen::prelude::*;

fn query() -> Result<DomQuery, JsValue> {
    DomQuery::new().ok_or_else(|| JsValue::from_str("no window/document available"))
}

// ─── Draggable ───────────────────────────────────────────────────────────

#[wasm_bindgen]
pub struct WasmDraggable {
    engine: DragEngine<JsListenerHost>,
    query: DomQuery,
}

#[wasm_bindgen]
impl WasmDraggable {
    /// Bind to the element with DOM id `element_id`.
    #[wasm_bindgen(constructor)]
    pub fn new(
        element_id: &str,
        config_json: &str,
        attach: Function,
        detach: Function,
    ) -> Result<WasmDraggable, JsValue> {
        console_error_panic_hook_setup();
        let config: DragConfig = parse_config(config_json).map_err(|e| JsValue::from_str(&e))?;
        let query = query()?;
        let engine = DragEngine::new(
            ElementId::intern(element_id),
            config,
            JsListenerHost::new(attach, detach),
            &query,
        );
        Ok(Self { engine, query })
    }

    /// Press on the element. Returns `true` if a drag started.
    pub fn handle_pointer_down(&mut self, x: f64, y: f64, target: Option<web_sys::Element>) -> bool {
        let target = self.query.adopt_target(target);
        let started = self.engine.begin(x, y, target, &self.query);
        self.query.clear_target();
        started == DragStart::Started
    }

    /// Returns `true` if a new position was published.
    pub fn handle_pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.engine.pointer_move(x, y, &self.query).is_some()
    }

    /// Returns `true` if a drag ended.
    pub fn handle_pointer_up(&mut self) -> bool {
        self.engine.end()
    }

    pub fn x(&self) -> f64 {
        self.engine.position().x
    }

    pub fn y(&self) -> f64 {
        self.engine.position().y
    }

    pub fn is_dragging(&self) -> bool {
        self.engine.is_dragging()
    }

    /// CSS cursor for the element.
    pub fn cursor(&self) -> String {
        self.engine.cursor().as_css().to_string()
    }

    /// Switch mode (`free`, `bounded`, `grid`). Returns `false` for an
    /// unknown name.
    pub fn set_mode(&mut self, mode: &str) -> bool {
        let mode = match mode {
            "free" => DragMode::Free,
            "bounded" => DragMode::Bounded,
            "grid" => DragMode::Grid,
            _ => return false,
        };
        self.engine.set_mode(mode, &self.query);
        true
    }

    /// Re-measure the bounds element after a layout change.
    pub fn refresh_bounds(&mut self) {
        self.engine.refresh_bounds(&self.query);
    }

    /// End any drag in progress; call when the component unmounts.
    pub fn dispose(&mut self) -> bool {
        rui_interact::Interaction::teardown(&mut self.engine)
    }
}

// ─── Resizable ───────────────────────────────────────────────────────────

#[wasm_bindgen]
pub struct WasmResizable {
    engine: ResizeEngine<JsListenerHost>,
}

#[wasm_bindgen]
impl WasmResizable {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str, attach: Function, detach: Function) -> Result<WasmResizable, JsValue> {
        console_error_panic_hook_setup();
        let config: ResizeConfig = parse_config(config_json).map_err(|e| JsValue::from_str(&e))?;
        Ok(Self {
            engine: ResizeEngine::new(config, JsListenerHost::new(attach, detach)),
        })
    }

    /// Press on the hotspot named `handle` (`"top-left"`, `"right"`, ...).
    /// Returns `true` if the gesture started or grew.
    pub fn handle_pointer_down(&mut self, handle: &str, x: f64, y: f64) -> bool {
        let handle: Handle = match handle.parse() {
            Ok(h) => h,
            Err(e) => {
                log::warn!("{e}");
                return false;
            }
        };
        matches!(
            self.engine.begin_handle(handle, x, y),
            ResizeStart::Started | ResizeStart::Extended
        )
    }

    pub fn handle_pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.engine.pointer_move(x, y).is_some()
    }

    pub fn handle_pointer_up(&mut self) -> bool {
        self.engine.end_handle()
    }

    /// Pointer entered a hotspot, or left all of them with `None`.
    pub fn set_hovered(&mut self, handle: Option<String>) {
        let handle = handle.and_then(|h| h.parse::<Handle>().ok());
        self.engine.set_hovered(handle);
    }

    pub fn width(&self) -> f64 {
        self.engine.rect().width
    }

    pub fn height(&self) -> f64 {
        self.engine.rect().height
    }

    pub fn top(&self) -> f64 {
        self.engine.rect().top
    }

    pub fn left(&self) -> f64 {
        self.engine.rect().left
    }

    pub fn is_resizing(&self) -> bool {
        self.engine.is_resizing()
    }

    /// CSS border shorthand for `edge` (`top`, `bottom`, `left`, `right`).
    pub fn border(&self, edge: &str) -> String {
        match edge.parse::<Edge>() {
            Ok(edge) => self.engine.border(edge).to_css(),
            Err(e) => {
                log::warn!("{e}");
                String::new()
            }
        }
    }

    /// Enabled hotspots as JSON:
    /// `[{"handle":"top","x0":..,"y0":..,"x1":..,"y1":..,"cursor":"ns-resize"}, ...]`.
    pub fn hotspots(&self) -> String {
        hotspots_json(&self.engine)
    }

    /// Topmost enabled handle at `(x, y)` in the box's parent space.
    pub fn hotspot_at(&self, x: f64, y: f64) -> Option<String> {
        self.engine
            .hotspot_at(Point::new(x, y))
            .map(|h| h.as_str().to_string())
    }

    pub fn dispose(&mut self) -> bool {
        rui_interact::Interaction::teardown(&mut self.engine)
    }
}

/// One enabled hotspot as the JS side lays it out.
#[derive(Serialize)]
struct HotspotView {
    handle: Handle,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    cursor: &'static str,
}

fn hotspots_json<H: rui_interact::ListenerHost>(engine: &ResizeEngine<H>) -> String {
    let spots: Vec<HotspotView> = engine
        .hotspots()
        .iter()
        .map(|h| HotspotView {
            handle: h.handle,
            x0: h.area.x0,
            y0: h.area.y0,
            x1: h.area.x1,
            y1: h.area.y1,
            cursor: h.cursor.as_css(),
        })
        .collect();
    serde_json::to_string(&spots).unwrap_or_else(|e| {
        log::warn!("hotspot serialization failed: {e}");
        "[]".to_string()
    })
}

// ─── Panel ───────────────────────────────────────────────────────────────

#[wasm_bindgen]
pub struct WasmPanel {
    panel: PanelResizer<JsListenerHost>,
    query: DomQuery,
}

#[wasm_bindgen]
impl WasmPanel {
    #[wasm_bindgen(constructor)]
    pub fn new(
        element_id: &str,
        config_json: &str,
        attach: Function,
        detach: Function,
    ) -> Result<WasmPanel, JsValue> {
        console_error_panic_hook_setup();
        let config: PanelConfig = parse_config(config_json).map_err(|e| JsValue::from_str(&e))?;
        Ok(Self {
            panel: PanelResizer::new(
                ElementId::intern(element_id),
                config,
                JsListenerHost::new(attach, detach),
            ),
            query: query()?,
        })
    }

    /// Press on the panel's resize handle. Returns `true` if a resize started.
    pub fn handle_pointer_down(&mut self, x: f64, y: f64) -> bool {
        self.panel.begin(x, y, &self.query) == PanelStart::Started
    }

    pub fn handle_pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.panel.pointer_move(x, y, &self.query).is_some()
    }

    pub fn handle_pointer_up(&mut self) -> bool {
        self.panel.end()
    }

    /// Extent to render along the panel axis; `undefined` until known.
    pub fn size(&self) -> Option<f64> {
        self.panel.rendered_size()
    }

    pub fn is_collapsed(&self) -> bool {
        self.panel.is_collapsed()
    }

    pub fn set_collapsed(&mut self, collapsed: bool) {
        self.panel.set_collapsed(collapsed);
    }

    pub fn toggle(&mut self) {
        self.panel.toggle();
    }

    pub fn dispose(&mut self) -> bool {
        rui_interact::Interaction::teardown(&mut self.panel)
    }
}

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("RUI WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

// ─── Standalone validation (no element needed) ───────────────────────────

/// Validate a config for `kind` (`draggable`, `resizable`, `panel`).
/// Returns JSON: `{"ok":true}` or `{"ok":false,"error":"..."}`.
#[wasm_bindgen]
pub fn validate_config(kind: &str, json: &str) -> String {
    let result = match kind {
        "draggable" => parse_config::<DragConfig>(json).map(drop),
        "resizable" => parse_config::<ResizeConfig>(json).map(drop),
        "panel" => parse_config::<PanelConfig>(json).map(drop),
        other => Err(format!("unknown component kind `{other}`")),
    };
    match result {
        Ok(()) => serde_json::json!({ "ok": true }).to_string(),
        Err(error) => serde_json::json!({ "ok": false, "error": error }).to_string(),
    }
}
