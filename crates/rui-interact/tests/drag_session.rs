//! Integration tests: drag engine driven against a headless element tree
//! (rui-interact ↔ rui-tree).
//!
//! Every published position is written back into the tree before the next
//! event, the way a host re-renders between pointer events.

use pretty_assertions::assert_eq;
use rui_core::geometry::fits_within;
use rui_core::{BoundsRef, ClientRect, DragConfig, ElementId, Point, Position, Size};
use rui_interact::{DragEngine, DragStart, InputEvent, Interaction, RecordingHost};
use rui_tree::{ElementNode, ElementTree, hit_test};

/// Positioned 400×300 stage at (0, 0) holding a 100×50 card. The card has a
/// 20px-tall header.
fn stage(card: &str) -> ElementTree {
    let mut tree = ElementTree::new(Size::new(1024.0, 768.0));
    let stage = tree.add(
        tree.root,
        ElementNode::new("bounds_area", "div")
            .positioned()
            .with_rect(ClientRect::new(0.0, 0.0, 400.0, 300.0)),
    );
    let card_idx = tree.add(
        stage,
        ElementNode::new(card, "div").with_rect(ClientRect::new(0.0, 0.0, 100.0, 50.0)),
    );
    tree.add(
        card_idx,
        ElementNode::new(&format!("{card}_header"), "header")
            .with_class("drag-handle")
            .with_rect(ClientRect::new(0.0, 0.0, 100.0, 20.0)),
    );
    tree
}

/// Feed one event, writing any published position back into the tree.
fn feed<H: rui_interact::ListenerHost>(
    engine: &mut DragEngine<H>,
    tree: &mut ElementTree,
    event: InputEvent,
) -> Option<Position> {
    let published = engine.handle(&event, tree);
    if let Some(pos) = published {
        tree.place(engine.element(), pos);
    }
    published
}

fn press(tree: &ElementTree, x: f64, y: f64) -> InputEvent {
    InputEvent::PointerDown {
        x,
        y,
        target: hit_test(tree, Point::new(x, y)),
        handle: None,
    }
}

// ─── Worked scenarios ────────────────────────────────────────────────────

#[test]
fn grid_scenario_snaps_to_fifty() {
    let mut tree = stage("grid_card");
    let id = ElementId::intern("grid_card");
    let mut engine = DragEngine::new(id, DragConfig::grid(50.0), RecordingHost::new(), &tree);

    let down = press(&tree, 0.0, 0.0);
    feed(&mut engine, &mut tree, down);
    let pos = feed(&mut engine, &mut tree, InputEvent::pointer_move(73.0, -12.0));
    assert_eq!(pos, Some(Position::new(50.0, 0.0)));
}

#[test]
fn bounded_scenario_clamps_to_far_corner() {
    let mut tree = stage("bounded_card");
    let id = ElementId::intern("bounded_card");
    let cfg = DragConfig::bounded(BoundsRef::Selector("#bounds_area".into()));
    let mut engine = DragEngine::new(id, cfg, RecordingHost::new(), &tree);

    let down = press(&tree, 10.0, 10.0);
    feed(&mut engine, &mut tree, down);
    let pos = feed(&mut engine, &mut tree, InputEvent::pointer_move(1010.0, 1010.0));
    assert_eq!(pos, Some(Position::new(300.0, 250.0)));
    assert_eq!(
        tree.get(id).map(|n| n.rect),
        Some(ClientRect::new(300.0, 250.0, 400.0, 300.0))
    );
}

// ─── Invariants over move sequences ──────────────────────────────────────

/// Deterministic zig-zag of pointer positions wandering well outside the
/// stage on every side.
fn wander() -> impl Iterator<Item = (f64, f64)> {
    (0..120).map(|i| {
        let t = i as f64;
        (
            200.0 + (t * 0.7).sin() * 650.0 + (i % 7) as f64 * 3.3,
            150.0 + (t * 0.45).cos() * 520.0 - (i % 5) as f64 * 4.1,
        )
    })
}

#[test]
fn grid_positions_are_always_multiples() {
    let mut tree = stage("grid_wander");
    let id = ElementId::intern("grid_wander");
    let mut engine = DragEngine::new(id, DragConfig::grid(25.0), RecordingHost::new(), &tree);

    let down = press(&tree, 40.0, 30.0);
    feed(&mut engine, &mut tree, down);
    for (x, y) in wander() {
        let pos = feed(&mut engine, &mut tree, InputEvent::pointer_move(x, y)).unwrap();
        assert_eq!(pos.x % 25.0, 0.0, "x = {}", pos.x);
        assert_eq!(pos.y % 25.0, 0.0, "y = {}", pos.y);
    }
}

#[test]
fn bounded_element_never_leaves_bounds() {
    let mut tree = stage("bounded_wander");
    let id = ElementId::intern("bounded_wander");
    let cfg = DragConfig::bounded(BoundsRef::Selector("#bounds_area".into()));
    let mut engine = DragEngine::new(id, cfg, RecordingHost::new(), &tree);
    let bounds = ClientRect::new(0.0, 0.0, 400.0, 300.0);

    let down = press(&tree, 50.0, 25.0);
    feed(&mut engine, &mut tree, down);
    for (x, y) in wander() {
        feed(&mut engine, &mut tree, InputEvent::pointer_move(x, y));
        let rect = tree.get(id).map(|n| n.rect).unwrap();
        assert!(fits_within(rect, bounds), "{rect:?} escapes {bounds:?}");
    }
}

#[test]
fn grid_wins_over_bounds() {
    let mut tree = stage("grid_bounded");
    let id = ElementId::intern("grid_bounded");
    let cfg = DragConfig {
        bounds: Some(BoundsRef::Selector("#bounds_area".into())),
        ..DragConfig::grid(50.0)
    };
    let mut engine = DragEngine::new(id, cfg, RecordingHost::new(), &tree);
    assert_eq!(engine.bounds(), None);

    let down = press(&tree, 0.0, 0.0);
    feed(&mut engine, &mut tree, down);
    let pos = feed(&mut engine, &mut tree, InputEvent::pointer_move(1013.0, 1038.0));
    assert_eq!(pos, Some(Position::new(1000.0, 1050.0)));
}

#[test]
fn same_pointer_gives_same_position() {
    let mut tree = stage("repeat_card");
    let id = ElementId::intern("repeat_card");
    let mut engine = DragEngine::new(id, DragConfig::free(), RecordingHost::new(), &tree);

    let down = press(&tree, 20.0, 20.0);
    feed(&mut engine, &mut tree, down);
    let first = feed(&mut engine, &mut tree, InputEvent::pointer_move(120.0, 90.0));
    for (x, y) in wander().take(10) {
        feed(&mut engine, &mut tree, InputEvent::pointer_move(x, y));
    }
    let again = feed(&mut engine, &mut tree, InputEvent::pointer_move(120.0, 90.0));
    assert_eq!(first, again);
}

#[test]
fn bounded_respects_size_change_mid_drag() {
    let mut tree = stage("growing_card");
    let id = ElementId::intern("growing_card");
    let cfg = DragConfig::bounded(BoundsRef::Selector("#bounds_area".into()));
    let mut engine = DragEngine::new(id, cfg, RecordingHost::new(), &tree);

    let down = press(&tree, 10.0, 10.0);
    feed(&mut engine, &mut tree, down);
    tree.set_size(id, Size::new(200.0, 100.0));
    let pos = feed(&mut engine, &mut tree, InputEvent::pointer_move(1010.0, 1010.0));
    assert_eq!(pos, Some(Position::new(200.0, 200.0)));
}

// ─── Handle gating ───────────────────────────────────────────────────────

#[test]
fn only_the_handle_starts_a_drag() {
    let mut tree = stage("handled_card");
    let id = ElementId::intern("handled_card");
    let cfg = DragConfig::free().with_drag_handle(".drag-handle");
    let mut engine = DragEngine::new(id, cfg, RecordingHost::new(), &tree);

    // Body of the card, below the header.
    assert_eq!(
        engine.begin(50.0, 40.0, hit_test(&tree, Point::new(50.0, 40.0)), &tree),
        DragStart::OutsideHandle
    );
    assert_eq!(
        feed(&mut engine, &mut tree, InputEvent::pointer_move(150.0, 140.0)),
        None
    );
    feed(&mut engine, &mut tree, InputEvent::pointer_up(150.0, 140.0));
    assert_eq!(engine.position(), Position::ORIGIN);

    // Header.
    let down = press(&tree, 50.0, 10.0);
    feed(&mut engine, &mut tree, down);
    assert!(engine.is_dragging());
    assert_eq!(
        feed(&mut engine, &mut tree, InputEvent::pointer_move(150.0, 110.0)),
        Some(Position::new(100.0, 100.0))
    );
}

#[test]
fn missing_handle_blocks_every_press() {
    let tree = stage("orphan_card");
    let id = ElementId::intern("orphan_card");
    let cfg = DragConfig::free().with_drag_handle(".grip");
    let mut engine = DragEngine::new(id, cfg, RecordingHost::new(), &tree);

    assert_eq!(
        engine.begin(50.0, 10.0, Some(id), &tree),
        DragStart::HandleNotFound
    );
    assert!(!engine.is_dragging());
}

// ─── Release and teardown ────────────────────────────────────────────────

#[test]
fn moves_after_release_change_nothing() {
    let mut tree = stage("released_card");
    let id = ElementId::intern("released_card");
    let host = RecordingHost::new();
    let mut engine = DragEngine::new(id, DragConfig::free(), host.clone(), &tree);

    let down = press(&tree, 0.0, 0.0);
    feed(&mut engine, &mut tree, down);
    assert!(host.is_listening());
    feed(&mut engine, &mut tree, InputEvent::pointer_move(30.0, 40.0));
    feed(&mut engine, &mut tree, InputEvent::pointer_up(30.0, 40.0));
    assert!(!host.is_listening());

    assert_eq!(
        feed(&mut engine, &mut tree, InputEvent::pointer_move(300.0, 300.0)),
        None
    );
    assert_eq!(engine.position(), Position::new(30.0, 40.0));
}

#[test]
fn dropping_mid_drag_releases_listeners() {
    let tree = stage("dropped_card");
    let id = ElementId::intern("dropped_card");
    let host = RecordingHost::new();
    {
        let mut engine = DragEngine::new(id, DragConfig::free(), host.clone(), &tree);
        engine.begin(0.0, 0.0, Some(id), &tree);
        assert_eq!(host.attached_count(), 2);
    }
    assert!(!host.is_listening());
    assert_eq!(host.history().len(), 4);
}
