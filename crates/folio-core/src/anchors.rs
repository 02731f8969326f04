//! In-page link targets
//!
//! Sections register the document row they start at under an id; links such
//! as `#my-works` resolve to that row for the page scroller.

use std::collections::HashMap;

pub const MY_WORKS: &str = "my-works";
pub const CONTACT: &str = "contact";

#[derive(Debug, Clone, Default)]
pub struct AnchorMap {
    rows: HashMap<String, usize>,
}

impl AnchorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record where section `id` starts. Re-registering moves the anchor.
    pub fn register(&mut self, id: impl Into<String>, row: usize) {
        self.rows.insert(id.into(), row);
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Row for `target`, accepting either `#id` or a bare `id`
    pub fn resolve(&self, target: &str) -> Option<usize> {
        let id = target.strip_prefix('#').unwrap_or(target);
        self.rows.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
