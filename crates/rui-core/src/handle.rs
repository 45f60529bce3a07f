//! Resize handles: the eight named edge/corner hotspots of a resizable box.

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

/// One side of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Top,
    Bottom,
    #[default]
    Left,
    Right,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];

    /// The edge-only handle sitting on this side.
    pub fn handle(self) -> Handle {
        match self {
            Edge::Top => Handle::Top,
            Edge::Bottom => Handle::Bottom,
            Edge::Left => Handle::Left,
            Edge::Right => Handle::Right,
        }
    }

    pub fn as_str(self) -> &'static str {
        self.handle().as_str()
    }
}

impl FromStr for Edge {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Edge::ALL
            .into_iter()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| format!("unknown edge `{s}`"))
    }
}

/// A named resize hotspot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Handle {
    /// Every handle, edges first. Corners come last so they sit on top
    /// when hotspots overlap.
    pub const ALL: [Handle; 8] = [
        Handle::Top,
        Handle::Bottom,
        Handle::Left,
        Handle::Right,
        Handle::TopLeft,
        Handle::TopRight,
        Handle::BottomLeft,
        Handle::BottomRight,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Handle::Top => "top",
            Handle::Bottom => "bottom",
            Handle::Left => "left",
            Handle::Right => "right",
            Handle::TopLeft => "top-left",
            Handle::TopRight => "top-right",
            Handle::BottomLeft => "bottom-left",
            Handle::BottomRight => "bottom-right",
        }
    }

    /// Sides this handle moves: one for an edge, two for a corner.
    pub fn edges(self) -> SmallVec<[Edge; 2]> {
        match self {
            Handle::Top => smallvec::smallvec![Edge::Top],
            Handle::Bottom => smallvec::smallvec![Edge::Bottom],
            Handle::Left => smallvec::smallvec![Edge::Left],
            Handle::Right => smallvec::smallvec![Edge::Right],
            Handle::TopLeft => smallvec::smallvec![Edge::Top, Edge::Left],
            Handle::TopRight => smallvec::smallvec![Edge::Top, Edge::Right],
            Handle::BottomLeft => smallvec::smallvec![Edge::Bottom, Edge::Left],
            Handle::BottomRight => smallvec::smallvec![Edge::Bottom, Edge::Right],
        }
    }

    pub fn touches(self, edge: Edge) -> bool {
        self.edges().contains(&edge)
    }

    pub fn is_corner(self) -> bool {
        self.edges().len() == 2
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Handle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Handle::ALL
            .into_iter()
            .find(|h| h.as_str() == s)
            .ok_or_else(|| format!("unknown resize handle `{s}`"))
    }
}

impl Serialize for Handle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Handle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

// ─── HandleSet ───────────────────────────────────────────────────────────

/// A set of handles packed into a bitmask.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct HandleSet(u8);

impl HandleSet {
    pub const EMPTY: HandleSet = HandleSet(0);

    pub fn insert(&mut self, handle: Handle) {
        self.0 |= handle.bit();
    }

    pub fn remove(&mut self, handle: Handle) {
        self.0 &= !handle.bit();
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.0 & handle.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = Handle> + '_ {
        Handle::ALL.into_iter().filter(|h| self.contains(*h))
    }
}

impl FromIterator<Handle> for HandleSet {
    fn from_iter<I: IntoIterator<Item = Handle>>(iter: I) -> Self {
        let mut set = HandleSet::EMPTY;
        for h in iter {
            set.insert(h);
        }
        set
    }
}

impl fmt::Debug for HandleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(Handle::as_str)).finish()
    }
}

impl Serialize for HandleSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

/// Accepts either `["top", "left"]` or `{"top": true, "left": false}`.
impl<'de> Deserialize<'de> for HandleSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct HandleSetVisitor;

        impl<'de> Visitor<'de> for HandleSetVisitor {
            type Value = HandleSet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a list of handle names or a map of handle name to bool")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<HandleSet, A::Error> {
                let mut set = HandleSet::EMPTY;
                while let Some(h) = seq.next_element::<Handle>()? {
                    set.insert(h);
                }
                Ok(set)
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<HandleSet, A::Error> {
                let mut set = HandleSet::EMPTY;
                while let Some((name, disabled)) = map.next_entry::<String, bool>()? {
                    match name.parse::<Handle>() {
                        Ok(h) if disabled => set.insert(h),
                        Ok(_) => {}
                        Err(e) => log::warn!("ignoring disabled handle entry: {e}"),
                    }
                }
                Ok(set)
            }
        }

        deserializer.deserialize_any(HandleSetVisitor)
    }
}
