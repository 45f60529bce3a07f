//! Headless element tree.
//!
//! A petgraph-backed stand-in for a browser render tree: elements with
//! client-space rectangles, classes and positioning, enough to answer every
//! `ElementQuery` the interaction engines ask. Used by tests, the demo
//! runner, and any native host that lays out its own elements.

pub mod hit;
pub mod selector;
pub mod tree;

pub use hit::hit_test;
pub use selector::Selector;
pub use tree::{ElementNode, ElementTree};
