//! Per-instance configuration for the interaction engines.
//!
//! Every config deserializes from camelCase JSON with all fields optional,
//! mirroring the props a host component accepts. Missing fields take the
//! defaults documented on each field.

use crate::handle::{Edge, HandleSet};
use crate::id::ElementId;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Movement policy of a draggable element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragMode {
    #[default]
    Free,
    /// Kept fully inside a bounds element.
    Bounded,
    /// Snapped to multiples of `grid_size`.
    Grid,
}

/// Where a bounded drag's rectangle comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BoundsRef {
    /// Looked up document-wide; the first match wins.
    Selector(String),
    /// A held element reference, `None` while the element is not mounted.
    Element(Option<ElementId>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DragConfig {
    pub mode: DragMode,
    /// Required for `DragMode::Bounded`, ignored otherwise.
    pub bounds: Option<BoundsRef>,
    /// Snap step in pixels for `DragMode::Grid`. Default 20.
    pub grid_size: f64,
    pub initial_x: f64,
    pub initial_y: f64,
    /// Selector of the descendant that must be pressed to start a drag.
    pub drag_handle: Option<String>,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            mode: DragMode::Free,
            bounds: None,
            grid_size: 20.0,
            initial_x: 0.0,
            initial_y: 0.0,
            drag_handle: None,
        }
    }
}

impl DragConfig {
    pub fn free() -> Self {
        Self::default()
    }

    pub fn bounded(bounds: BoundsRef) -> Self {
        Self {
            mode: DragMode::Bounded,
            bounds: Some(bounds),
            ..Self::default()
        }
    }

    pub fn grid(grid_size: f64) -> Self {
        Self {
            mode: DragMode::Grid,
            grid_size,
            ..Self::default()
        }
    }

    pub fn with_initial(mut self, x: f64, y: f64) -> Self {
        self.initial_x = x;
        self.initial_y = y;
        self
    }

    pub fn with_drag_handle(mut self, selector: impl Into<String>) -> Self {
        self.drag_handle = Some(selector.into());
        self
    }

    /// The snap step when grid mode is active and the step is usable.
    pub fn grid_step(&self) -> Option<f64> {
        (self.mode == DragMode::Grid && self.grid_size.is_finite() && self.grid_size > 0.0)
            .then_some(self.grid_size)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResizeConfig {
    pub initial_width: f64,
    pub initial_height: f64,
    pub initial_top: f64,
    pub initial_left: f64,
    pub min_width: f64,
    pub min_height: f64,
    /// `null` or absent means unbounded.
    #[serde(deserialize_with = "unbounded_if_null")]
    pub max_width: f64,
    #[serde(deserialize_with = "unbounded_if_null")]
    pub max_height: f64,
    /// Handles that neither render a hotspot nor start a resize.
    pub disabled_handles: HandleSet,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            initial_width: 300.0,
            initial_height: 200.0,
            initial_top: 100.0,
            initial_left: 100.0,
            min_width: 50.0,
            min_height: 50.0,
            max_width: f64::INFINITY,
            max_height: f64::INFINITY,
            disabled_handles: HandleSet::EMPTY,
        }
    }
}

fn unbounded_if_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
}

/// How a docked panel's extent follows the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelAnchor {
    /// Start size plus the pointer delta along the panel axis.
    #[default]
    Delta,
    /// Distance from the pointer to the viewport edge the panel is docked to.
    Viewport,
}

/// Missing fields fall back to the preset the anchor selects:
/// [`PanelConfig::sidebar`] for `delta`, [`PanelConfig::sheet`] for `viewport`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelConfig {
    /// Side of the viewport the panel is docked to.
    pub edge: Edge,
    pub anchor: PanelAnchor,
    /// `None` until the first resize; the host's stylesheet decides until then.
    pub initial_size: Option<f64>,
    pub min_size: f64,
    pub max_size: f64,
    /// Extent rendered while collapsed.
    pub collapsed_size: f64,
}

/// Wire form of [`PanelConfig`]. The nested options tell an explicit `null`
/// apart from an absent key.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PanelConfigFields {
    edge: Option<Edge>,
    anchor: Option<PanelAnchor>,
    #[serde(default, deserialize_with = "present")]
    initial_size: Option<Option<f64>>,
    min_size: Option<f64>,
    #[serde(default, deserialize_with = "present")]
    max_size: Option<Option<f64>>,
    collapsed_size: Option<f64>,
}

fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Option<f64>>, D::Error> {
    Option::<f64>::deserialize(deserializer).map(Some)
}

impl<'de> Deserialize<'de> for PanelConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = PanelConfigFields::deserialize(deserializer)?;
        let preset = match fields.anchor.unwrap_or_default() {
            PanelAnchor::Delta => PanelConfig::sidebar(fields.edge.unwrap_or(Edge::Left)),
            PanelAnchor::Viewport => PanelConfig::sheet(fields.edge.unwrap_or(Edge::Right)),
        };
        Ok(PanelConfig {
            initial_size: fields.initial_size.unwrap_or(preset.initial_size),
            min_size: fields.min_size.unwrap_or(preset.min_size),
            max_size: fields
                .max_size
                .map_or(preset.max_size, |max| max.unwrap_or(f64::INFINITY)),
            collapsed_size: fields.collapsed_size.unwrap_or(preset.collapsed_size),
            ..preset
        })
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self::sidebar(Edge::Left)
    }
}

impl PanelConfig {
    /// A sidebar: 260px wide, resizable between 180 and 420, 64 when collapsed.
    pub fn sidebar(edge: Edge) -> Self {
        Self {
            edge,
            anchor: PanelAnchor::Delta,
            initial_size: Some(260.0),
            min_size: 180.0,
            max_size: 420.0,
            collapsed_size: 64.0,
        }
    }

    /// A sheet: sized by its stylesheet until dragged, then follows the pointer.
    pub fn sheet(edge: Edge) -> Self {
        Self {
            edge,
            anchor: PanelAnchor::Viewport,
            initial_size: None,
            min_size: 0.0,
            max_size: f64::INFINITY,
            collapsed_size: 0.0,
        }
    }
}

/// Parse a config from JSON. Blank input yields the defaults.
pub fn parse_config<T: DeserializeOwned + Default>(json: &str) -> Result<T, String> {
    if json.trim().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(json).map_err(|e| format!("invalid config: {e}"))
}
