//! Minimal CSS selector matching.
//!
//! Supports compound selectors (`div`, `#id`, `.class`, `div.card.active`,
//! `*`) joined by the descendant combinator (`.card .grip`). That covers the
//! drag-handle and bounds selectors components are configured with.

use crate::tree::{ElementNode, ElementTree};
use petgraph::graph::NodeIndex;
use smallvec::SmallVec;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: SmallVec<[String; 2]>,
}

impl Compound {
    fn parse(s: &str) -> Result<Self, String> {
        let mut compound = Compound::default();
        let mut kind: Option<char> = None;
        let mut buf = String::new();

        for ch in s.chars() {
            match ch {
                '#' | '.' => {
                    compound.push(kind, &buf)?;
                    buf.clear();
                    kind = Some(ch);
                }
                '*' if kind.is_none() && buf.is_empty() => {}
                c if c.is_alphanumeric() || c == '-' || c == '_' => buf.push(c),
                other => {
                    return Err(format!("unsupported selector character `{other}` in `{s}`"));
                }
            }
        }
        compound.push(kind, &buf)?;
        Ok(compound)
    }

    fn push(&mut self, kind: Option<char>, name: &str) -> Result<(), String> {
        match kind {
            None => {
                if !name.is_empty() {
                    self.tag = Some(name.to_ascii_lowercase());
                }
                Ok(())
            }
            Some(k) if name.is_empty() => Err(format!("expected a name after `{k}`")),
            Some('#') => {
                self.id = Some(name.to_string());
                Ok(())
            }
            Some(_) => {
                self.classes.push(name.to_string());
                Ok(())
            }
        }
    }

    fn matches(&self, node: &ElementNode) -> bool {
        if let Some(tag) = &self.tag
            && !node.tag.eq_ignore_ascii_case(tag)
        {
            return false;
        }
        if let Some(id) = &self.id
            && node.id.as_str() != id
        {
            return false;
        }
        self.classes
            .iter()
            .all(|c| node.classes.iter().any(|nc| nc == c))
    }
}

/// A parsed selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    /// Compounds left to right; each one must match an ancestor of the next.
    parts: Vec<Compound>,
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, String> {
        let parts = input
            .split_whitespace()
            .map(Compound::parse)
            .collect::<Result<Vec<_>, _>>()?;
        if parts.is_empty() {
            return Err("empty selector".to_string());
        }
        Ok(Self { parts })
    }

    /// Whether the element at `idx` matches. Leading compounds are matched
    /// against its ancestors, anywhere in the tree.
    pub fn matches(&self, tree: &ElementTree, idx: NodeIndex) -> bool {
        let Some((last, rest)) = self.parts.split_last() else {
            return false;
        };
        if !last.matches(&tree.graph[idx]) {
            return false;
        }

        let mut wanted = rest.iter().rev().peekable();
        let mut cursor = tree.parent(idx);
        while let Some(compound) = wanted.peek() {
            let Some(ancestor) = cursor else {
                return false;
            };
            if compound.matches(&tree.graph[ancestor]) {
                wanted.next();
            }
            cursor = tree.parent(ancestor);
        }
        true
    }
}
