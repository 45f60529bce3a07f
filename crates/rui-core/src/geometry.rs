//! Geometry primitives shared by the drag, resize and panel engines.
//!
//! Two coordinate spaces are in play:
//!
//! - **client** space: the viewport. Pointer events and every rectangle a
//!   host reports (`ClientRect`) live here.
//! - **parent** space: relative to an element's offset parent. Published
//!   `Position` and `Rect` values live here.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// A rectangle in viewport (client) coordinates.
/// `x0` = left, `y0` = top, `x1` = right, `y1` = bottom.
pub type ClientRect = kurbo::Rect;

// ─── Position ────────────────────────────────────────────────────────────

/// Top-left corner of a draggable element, in parent space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn to_point(self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl From<Point> for Position {
    fn from(p: Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

// ─── Rect ────────────────────────────────────────────────────────────────

/// A resizable element's box, in parent space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub width: f64,
    pub height: f64,
    pub top: f64,
    pub left: f64,
}

impl Rect {
    pub const fn new(width: f64, height: f64, top: f64, left: f64) -> Self {
        Self {
            width,
            height,
            top,
            left,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn origin(&self) -> Position {
        Position::new(self.left, self.top)
    }

    pub fn to_kurbo(&self) -> kurbo::Rect {
        kurbo::Rect::new(self.left, self.top, self.right(), self.bottom())
    }
}

impl From<kurbo::Rect> for Rect {
    fn from(r: kurbo::Rect) -> Self {
        Self {
            width: r.width(),
            height: r.height(),
            top: r.y0,
            left: r.x0,
        }
    }
}

// ─── Scalar helpers ──────────────────────────────────────────────────────

/// Constrain `v` to `[lo, hi]` as `max(lo, min(hi, v))`.
///
/// Unlike `f64::clamp` this never panics: when `lo > hi` the result is `lo`.
pub fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    lo.max(hi.min(v))
}

/// Round `v` to the nearest multiple of `grid`. Exact halves round toward +∞.
pub fn snap_to_grid(v: f64, grid: f64) -> f64 {
    (v / grid + 0.5).floor() * grid
}

// ─── Coordinate conversion ───────────────────────────────────────────────

/// Translate a client-space rectangle into the space of `parent`.
pub fn rect_to_parent(r: ClientRect, parent: ClientRect) -> ClientRect {
    r - parent.origin().to_vec2()
}

/// Offset of an element's top-left corner from its offset parent's.
pub fn parent_offset(element: ClientRect, parent: ClientRect) -> Vec2 {
    element.origin() - parent.origin()
}

/// Whether `inner` lies entirely inside `outer` (edges may coincide).
pub fn fits_within(inner: ClientRect, outer: ClientRect) -> bool {
    inner.x0 >= outer.x0 && inner.y0 >= outer.y0 && inner.x1 <= outer.x1 && inner.y1 <= outer.y1
}
