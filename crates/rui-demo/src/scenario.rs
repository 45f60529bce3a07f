//! Scenario files: a page layout, one interactive component, and the pointer
//! steps to replay against it.

use rui_core::{DragConfig, Handle, PanelConfig, ResizeConfig};
use serde::Deserialize;
use std::fmt;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub viewport: ViewportSize,
    /// Parents must be declared before their children.
    #[serde(default)]
    pub elements: Vec<ElementDecl>,
    pub component: Component,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementDecl {
    pub id: String,
    #[serde(default = "default_tag")]
    pub tag: String,
    /// Parent element id; the document root when absent.
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub classes: Vec<String>,
    /// Client rect as `[x0, y0, x1, y1]`.
    pub rect: [f64; 4],
    #[serde(default)]
    pub positioned: bool,
}

fn default_tag() -> String {
    "div".to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Component {
    Draggable {
        element: String,
        #[serde(default)]
        config: DragConfig,
    },
    Resizable {
        element: String,
        #[serde(default)]
        config: ResizeConfig,
    },
    Panel {
        element: String,
        #[serde(default)]
        config: PanelConfig,
    },
}

impl Component {
    pub fn element(&self) -> &str {
        match self {
            Component::Draggable { element, .. }
            | Component::Resizable { element, .. }
            | Component::Panel { element, .. } => element,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Step {
    /// Press. With `handle` set the press lands on that resize hotspot;
    /// otherwise the target is hit-tested from the layout.
    Down {
        x: f64,
        y: f64,
        #[serde(default)]
        handle: Option<Handle>,
    },
    Move {
        x: f64,
        y: f64,
    },
    Up {
        x: f64,
        y: f64,
    },
    Hover {
        #[serde(default)]
        handle: Option<Handle>,
    },
    /// Collapse or expand a panel.
    Toggle,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Down {
                x,
                y,
                handle: Some(h),
            } => write!(f, "down {h} ({x}, {y})"),
            Step::Down { x, y, handle: None } => write!(f, "down ({x}, {y})"),
            Step::Move { x, y } => write!(f, "move ({x}, {y})"),
            Step::Up { x, y } => write!(f, "up ({x}, {y})"),
            Step::Hover { handle: Some(h) } => write!(f, "hover {h}"),
            Step::Hover { handle: None } => f.write_str("hover none"),
            Step::Toggle => f.write_str("toggle"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rui_core::DragMode;

    #[test]
    fn parses_minimal_scenario() {
        let s: Scenario = serde_json::from_str(
            r#"{
                "name": "tiny",
                "elements": [{ "id": "box", "rect": [0, 0, 10, 10] }],
                "component": { "kind": "draggable", "element": "box", "config": { "mode": "grid" } },
                "steps": [{ "type": "down", "x": 1, "y": 2 }, { "type": "toggle" }]
            }"#,
        )
        .unwrap();
        assert_eq!(s.viewport, ViewportSize::default());
        assert_eq!(s.elements[0].tag, "div");
        assert_eq!(s.component.element(), "box");
        let Component::Draggable { config, .. } = &s.component else {
            panic!("expected draggable");
        };
        assert_eq!(config.mode, DragMode::Grid);
        assert_eq!(
            s.steps,
            vec![
                Step::Down {
                    x: 1.0,
                    y: 2.0,
                    handle: None
                },
                Step::Toggle
            ]
        );
    }

    #[test]
    fn step_display() {
        let down = Step::Down {
            x: 4.0,
            y: 8.5,
            handle: Some(Handle::TopLeft),
        };
        assert_eq!(down.to_string(), "down top-left (4, 8.5)");
        assert_eq!(Step::Hover { handle: None }.to_string(), "hover none");
    }

    #[test]
    fn rejects_unknown_handle() {
        let err = serde_json::from_str::<Step>(r#"{ "type": "down", "x": 0, "y": 0, "handle": "middle" }"#);
        assert!(err.is_err());
    }
}
