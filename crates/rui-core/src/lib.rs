pub mod config;
pub mod geometry;
pub mod handle;
pub mod id;
pub mod query;

pub use config::{
    BoundsRef, DragConfig, DragMode, PanelAnchor, PanelConfig, ResizeConfig, parse_config,
};
pub use geometry::{ClientRect, Position, Rect, clamp, snap_to_grid};
pub use handle::{Edge, Handle, HandleSet};
pub use id::ElementId;
pub use query::ElementQuery;

// Geometry primitives used across the public API.
pub use kurbo::{Point, Size, Vec2};
