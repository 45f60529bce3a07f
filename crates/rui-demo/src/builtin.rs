//! Scenarios mirroring the component demo pages, embedded at build time.

use crate::scenario::Scenario;
use anyhow::{Context, Result};

const SOURCES: [(&str, &str); 8] = [
    ("free-drag", include_str!("../scenarios/free-drag.json")),
    ("bounded-drag", include_str!("../scenarios/bounded-drag.json")),
    ("grid-drag", include_str!("../scenarios/grid-drag.json")),
    ("handle-drag", include_str!("../scenarios/handle-drag.json")),
    ("resize-limits", include_str!("../scenarios/resize-limits.json")),
    ("resize-disabled", include_str!("../scenarios/resize-disabled.json")),
    ("sidebar", include_str!("../scenarios/sidebar.json")),
    ("sheet", include_str!("../scenarios/sheet.json")),
];

pub fn names() -> impl Iterator<Item = &'static str> {
    SOURCES.iter().map(|(name, _)| *name)
}

fn parse(name: &str, source: &str) -> Result<Scenario> {
    serde_json::from_str(source).with_context(|| format!("built-in scenario `{name}`"))
}

/// `None` when no built-in scenario has that name.
pub fn get(name: &str) -> Option<Result<Scenario>> {
    SOURCES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(n, source)| parse(n, source))
}

pub fn all() -> Result<Vec<Scenario>> {
    SOURCES.iter().map(|(n, source)| parse(n, source)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_match_file_contents() {
        for scenario in all().unwrap() {
            assert!(names().any(|n| n == scenario.name), "{}", scenario.name);
        }
        assert!(get("no-such-demo").is_none());
    }
}
