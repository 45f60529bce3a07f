//! Replays a scenario against the headless element tree.
//!
//! Published geometry is written back into the tree after every step, so
//! later hit tests and measurements see the element where a browser would
//! have rendered it.

use crate::scenario::{Component, Scenario, Step};
use anyhow::{Context, Result, bail};
use rui_core::{ClientRect, Edge, ElementId, Point, Position, Rect, Size};
use rui_interact::{
    DragEngine, InputEvent, Interaction, PanelResizer, RecordingHost, ResizeEngine,
};
use rui_tree::{ElementNode, ElementTree, hit_test};
use serde::Serialize;
use std::fmt;

/// Geometry a component publishes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Geometry {
    Position { x: f64, y: f64 },
    Rect { width: f64, height: f64, top: f64, left: f64 },
    Size { size: f64 },
}

impl From<Position> for Geometry {
    fn from(p: Position) -> Self {
        Geometry::Position { x: p.x, y: p.y }
    }
}

impl From<Rect> for Geometry {
    fn from(r: Rect) -> Self {
        Geometry::Rect {
            width: r.width,
            height: r.height,
            top: r.top,
            left: r.left,
        }
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Geometry::Position { x, y } => write!(f, "position ({x}, {y})"),
            Geometry::Rect {
                width,
                height,
                top,
                left,
            } => write!(f, "{width}×{height} at ({left}, {top})"),
            Geometry::Size { size } => write!(f, "size {size}"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub step: usize,
    pub event: String,
    /// `None` when the step published nothing.
    pub geometry: Option<Geometry>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub name: String,
    pub initial: Option<Geometry>,
    pub frames: Vec<Frame>,
    pub result: Option<Geometry>,
    /// Element rect in the tree after the last step.
    pub element_rect: [f64; 4],
    /// Listeners still attached after the last step.
    pub listeners_left: usize,
}

pub fn run(scenario: &Scenario) -> Result<Report> {
    let mut tree = build_tree(scenario)?;
    let host = RecordingHost::new();
    let mut driver = Driver::new(&scenario.component, host.clone(), &tree)
        .with_context(|| format!("scenario `{}`", scenario.name))?;
    driver.apply(&mut tree);
    let initial = driver.geometry();

    let mut frames = Vec::with_capacity(scenario.steps.len());
    for (i, step) in scenario.steps.iter().enumerate() {
        let geometry = driver.feed(step, &mut tree);
        log::debug!("{}: #{i} {step} → {geometry:?}", scenario.name);
        frames.push(Frame {
            step: i,
            event: step.to_string(),
            geometry,
        });
    }

    let element = driver.element();
    let r = tree
        .get(element)
        .map(|n| n.rect)
        .unwrap_or(ClientRect::ZERO);
    if host.is_listening() {
        log::warn!(
            "{}: {} listeners still attached; missing a final `up` step?",
            scenario.name,
            host.attached_count()
        );
    }
    Ok(Report {
        name: scenario.name.clone(),
        initial,
        frames,
        result: driver.geometry(),
        element_rect: [r.x0, r.y0, r.x1, r.y1],
        listeners_left: host.attached_count(),
    })
}

fn build_tree(scenario: &Scenario) -> Result<ElementTree> {
    let vp = scenario.viewport;
    let mut tree = ElementTree::new(Size::new(vp.width, vp.height));
    for el in &scenario.elements {
        let id = ElementId::intern(&el.id);
        if tree.index_of(id).is_some() {
            bail!("duplicate element `{}`", el.id);
        }
        let parent = match &el.parent {
            Some(p) => tree
                .index_of(ElementId::intern(p))
                .with_context(|| format!("element `{}`: parent `{p}` is not declared before it", el.id))?,
            None => tree.root,
        };
        let [x0, y0, x1, y1] = el.rect;
        let mut node = ElementNode::new(&el.id, &el.tag).with_rect(ClientRect::new(x0, y0, x1, y1));
        for class in &el.classes {
            node = node.with_class(class);
        }
        if el.positioned {
            node = node.positioned();
        }
        tree.add(parent, node);
    }
    Ok(tree)
}

enum Driver {
    Drag(DragEngine<RecordingHost>),
    Resize {
        element: ElementId,
        engine: ResizeEngine<RecordingHost>,
    },
    Panel(PanelResizer<RecordingHost>),
}

impl Driver {
    fn new(component: &Component, host: RecordingHost, tree: &ElementTree) -> Result<Self> {
        let element = ElementId::intern(component.element());
        if tree.index_of(element).is_none() {
            bail!("component element `{element}` is not in the layout");
        }
        Ok(match component {
            Component::Draggable { config, .. } => {
                Driver::Drag(DragEngine::new(element, config.clone(), host, tree))
            }
            Component::Resizable { config, .. } => Driver::Resize {
                element,
                engine: ResizeEngine::new(config.clone(), host),
            },
            Component::Panel { config, .. } => {
                Driver::Panel(PanelResizer::new(element, config.clone(), host))
            }
        })
    }

    fn element(&self) -> ElementId {
        match self {
            Driver::Drag(e) => e.element(),
            Driver::Resize { element, .. } => *element,
            Driver::Panel(p) => p.element(),
        }
    }

    fn geometry(&self) -> Option<Geometry> {
        match self {
            Driver::Drag(e) => Some(e.position().into()),
            Driver::Resize { engine, .. } => Some(engine.rect().into()),
            Driver::Panel(p) => p.rendered_size().map(|size| Geometry::Size { size }),
        }
    }

    /// Write the current geometry into the tree.
    fn apply(&self, tree: &mut ElementTree) {
        match self {
            Driver::Drag(e) => {
                tree.place(e.element(), e.position());
            }
            Driver::Resize { element, engine } => {
                tree.place_rect(*element, engine.rect());
            }
            Driver::Panel(p) => {
                if let (Some(size), Some(idx)) = (p.rendered_size(), tree.index_of(p.element())) {
                    let docked = dock(tree.graph[idx].rect, p.config().edge, size);
                    tree.graph[idx].rect = docked;
                }
            }
        }
    }

    fn feed(&mut self, step: &Step, tree: &mut ElementTree) -> Option<Geometry> {
        let event = match *step {
            Step::Down { x, y, handle } => InputEvent::PointerDown {
                x,
                y,
                target: hit_test(tree, Point::new(x, y)),
                handle,
            },
            Step::Move { x, y } => InputEvent::pointer_move(x, y),
            Step::Up { x, y } => InputEvent::pointer_up(x, y),
            Step::Hover { handle } => InputEvent::Hover { handle },
            Step::Toggle => {
                let Driver::Panel(panel) = self else {
                    log::warn!("toggle only applies to panels; ignored");
                    return None;
                };
                panel.toggle();
                self.apply(tree);
                return self.geometry();
            }
        };

        let published = match self {
            Driver::Drag(e) => e.handle(&event, &*tree).map(Geometry::from),
            Driver::Resize { engine, .. } => engine.handle(&event, &*tree).map(Geometry::from),
            Driver::Panel(p) => p.handle(&event, &*tree).map(|size| Geometry::Size { size }),
        };
        if published.is_some() {
            self.apply(tree);
        }
        published
    }
}

/// Resize `r` to `size` along the panel axis, keeping the docked side fixed.
fn dock(r: ClientRect, edge: Edge, size: f64) -> ClientRect {
    match edge {
        Edge::Left => ClientRect::new(r.x0, r.y0, r.x0 + size, r.y1),
        Edge::Right => ClientRect::new(r.x1 - size, r.y0, r.x1, r.y1),
        Edge::Top => ClientRect::new(r.x0, r.y0, r.x1, r.y0 + size),
        Edge::Bottom => ClientRect::new(r.x0, r.y1 - size, r.x1, r.y1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin;
    use pretty_assertions::assert_eq;

    fn report(name: &str) -> Report {
        let scenario = builtin::get(name).unwrap().unwrap();
        run(&scenario).unwrap()
    }

    #[test]
    fn every_builtin_releases_its_listeners() {
        for scenario in builtin::all().unwrap() {
            let report = run(&scenario).unwrap();
            assert_eq!(report.listeners_left, 0, "{}", report.name);
            assert_eq!(report.frames.len(), scenario.steps.len());
        }
    }

    #[test]
    fn bounded_drag_stays_in_area() {
        let r = report("bounded-drag");
        assert_eq!(r.frames[1].geometry, Some(Geometry::Position { x: 460.0, y: 144.0 }));
        assert_eq!(r.frames[2].geometry, Some(Geometry::Position { x: 0.0, y: 0.0 }));
    }

    #[test]
    fn grid_drag_snaps() {
        let r = report("grid-drag");
        assert_eq!(r.frames[1].geometry, Some(Geometry::Position { x: 120.0, y: 60.0 }));
        assert_eq!(r.result, Some(Geometry::Position { x: 180.0, y: 120.0 }));
        // Parent area starts at (32, 496).
        assert_eq!(r.element_rect, [212.0, 616.0, 352.0, 672.0]);
    }

    #[test]
    fn handle_drag_ignores_body_presses() {
        let r = report("handle-drag");
        assert_eq!(r.frames[1].geometry, None);
        assert_eq!(r.result, Some(Geometry::Position { x: 140.0, y: 90.0 }));
    }

    #[test]
    fn resize_limits_clamp_both_ways() {
        let r = report("resize-limits");
        assert_eq!(
            r.frames[2].geometry,
            Some(Geometry::Rect {
                width: 400.0,
                height: 300.0,
                top: 60.0,
                left: 420.0
            })
        );
        assert_eq!(
            r.result,
            Some(Geometry::Rect {
                width: 200.0,
                height: 120.0,
                top: 60.0,
                left: 420.0
            })
        );
    }

    #[test]
    fn disabled_handles_only_move_enabled_axes() {
        let r = report("resize-disabled");
        assert_eq!(r.frames[1].geometry, None);
        assert_eq!(
            r.frames[4].geometry,
            Some(Geometry::Rect {
                width: 330.0,
                height: 200.0,
                top: 320.0,
                left: 40.0
            })
        );
        assert_eq!(
            r.result,
            Some(Geometry::Rect {
                width: 330.0,
                height: 248.0,
                top: 320.0,
                left: 40.0
            })
        );
    }

    #[test]
    fn sidebar_collapses_and_restores() {
        let r = report("sidebar");
        assert_eq!(r.frames[2].geometry, Some(Geometry::Size { size: 420.0 }));
        assert_eq!(r.frames[4].geometry, Some(Geometry::Size { size: 64.0 }));
        assert_eq!(r.frames[6].geometry, None);
        assert_eq!(r.result, Some(Geometry::Size { size: 420.0 }));
        assert_eq!(r.element_rect, [0.0, 0.0, 420.0, 800.0]);
    }

    #[test]
    fn sheet_docks_to_right_edge() {
        let r = report("sheet");
        assert_eq!(r.initial, None);
        assert_eq!(r.frames[1].geometry, Some(Geometry::Size { size: 500.0 }));
        assert_eq!(r.element_rect, [1200.0, 0.0, 1280.0, 800.0]);
    }

    #[test]
    fn undeclared_parent_is_an_error() {
        let scenario: Scenario = serde_json::from_str(
            r#"{
                "name": "orphan",
                "elements": [{ "id": "kid", "parent": "nobody", "rect": [0, 0, 1, 1] }],
                "component": { "kind": "draggable", "element": "kid" },
                "steps": []
            }"#,
        )
        .unwrap();
        let err = run(&scenario).unwrap_err();
        assert!(err.to_string().contains("parent `nobody`"), "{err}");
    }

    #[test]
    fn toggle_is_ignored_for_draggables() {
        let scenario: Scenario = serde_json::from_str(
            r#"{
                "name": "toggle-drag",
                "elements": [{ "id": "toggle_box", "rect": [0, 0, 10, 10] }],
                "component": { "kind": "draggable", "element": "toggle_box" },
                "steps": [{ "type": "toggle" }]
            }"#,
        )
        .unwrap();
        let r = run(&scenario).unwrap();
        assert_eq!(r.frames[0].geometry, None);
    }
}
