//! Integration tests: component configuration as hosts send it.

use pretty_assertions::assert_eq;
use rui_core::{
    BoundsRef, DragConfig, DragMode, Edge, ElementId, Handle, PanelAnchor, PanelConfig,
    ResizeConfig, parse_config,
};

#[test]
fn draggable_props_round_out_with_defaults() {
    let cfg: DragConfig = parse_config(
        r#"{
            "mode": "bounded",
            "bounds": { "element": "cj_area" },
            "initialY": 12.5
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.mode, DragMode::Bounded);
    assert_eq!(cfg.bounds, Some(BoundsRef::Element(Some(ElementId::intern("cj_area")))));
    assert_eq!((cfg.initial_x, cfg.initial_y), (0.0, 12.5));
    assert_eq!(cfg.grid_size, 20.0);
    assert_eq!(cfg.drag_handle, None);
}

#[test]
fn disabled_handles_accept_list_or_map() {
    let from_list: ResizeConfig =
        parse_config(r#"{ "disabledHandles": ["top", "bottom-left"] }"#).unwrap();
    let from_map: ResizeConfig =
        parse_config(r#"{ "disabledHandles": { "top": true, "bottom-left": true, "right": false } }"#)
            .unwrap();
    assert_eq!(from_list.disabled_handles, from_map.disabled_handles);
    assert_eq!(
        from_map.disabled_handles.iter().collect::<Vec<_>>(),
        vec![Handle::Top, Handle::BottomLeft]
    );
}

#[test]
fn unknown_handle_name_is_rejected() {
    let err = parse_config::<ResizeConfig>(r#"{ "disabledHandles": ["upper-left"] }"#).unwrap_err();
    assert!(err.contains("upper-left"), "{err}");
}

#[test]
fn right_sheet_from_json() {
    let cfg: PanelConfig = parse_config(
        r#"{ "edge": "right", "anchor": "viewport", "initialSize": null, "minSize": 0, "maxSize": null }"#,
    )
    .unwrap();
    assert_eq!(cfg.edge, Edge::Right);
    assert_eq!(cfg.anchor, PanelAnchor::Viewport);
    assert_eq!(cfg.initial_size, None);
    assert_eq!(cfg.max_size, f64::INFINITY);
}

#[test]
fn sheet_without_limits_is_unclamped() {
    let cfg: PanelConfig = parse_config(r#"{ "anchor": "viewport" }"#).unwrap();
    assert_eq!(cfg, PanelConfig::sheet(Edge::Right));
    assert_eq!((cfg.min_size, cfg.max_size), (0.0, f64::INFINITY));

    let sidebar: PanelConfig = parse_config(r#"{ "edge": "right" }"#).unwrap();
    assert_eq!((sidebar.min_size, sidebar.max_size), (180.0, 420.0));
    assert_eq!(sidebar.initial_size, Some(260.0));
}
