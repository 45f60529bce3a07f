//! Element identity.
//!
//! Hosts address elements by their DOM id string. Engines copy, compare and
//! log ids on every pointer event, so ids are interned once into a
//! process-wide table and passed around as a 4-byte key.

use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

static ELEMENT_IDS: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Interned DOM id of an element.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(Spur);

impl ElementId {
    /// Intern a DOM id string. The same string always yields the same key.
    pub fn intern(id: &str) -> Self {
        ElementId(ELEMENT_IDS.get_or_intern(id))
    }

    /// The DOM id this key was interned from.
    pub fn as_str(&self) -> &str {
        ELEMENT_IDS.resolve(&self.0)
    }
}

/// Logged as a CSS id selector, e.g. `#sidebar`.
impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ElementId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ElementId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = String::deserialize(deserializer)?;
        Ok(ElementId::intern(&id))
    }
}
