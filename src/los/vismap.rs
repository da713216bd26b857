//! Sparse visibility output
//!
//! Keyed by (dx, dy) offset from the viewer; absence of a key means
//! "not currently visible".

use std::collections::BTreeMap;

/// Sparse map from viewer-relative offset to the feature seen there.
///
/// Backed by an ordered map so iteration order and serialization are
/// deterministic; two computes over identical inputs compare equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityMap<F> {
    cells: BTreeMap<(i32, i32), F>,
}

impl<F: Copy> VisibilityMap<F> {
    pub fn new() -> Self {
        Self {
            cells: BTreeMap::new(),
        }
    }

    /// Feature visible at an offset, if any.
    pub fn get(&self, dx: i32, dy: i32) -> Option<F> {
        self.cells.get(&(dx, dy)).copied()
    }

    /// Whether the offset is currently visible.
    pub fn contains(&self, dx: i32, dy: i32) -> bool {
        self.cells.contains_key(&(dx, dy))
    }

    /// Number of visible cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Visible offsets with their features, in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = ((i32, i32), F)> + '_ {
        self.cells.iter().map(|(&k, &v)| (k, v))
    }

    pub(crate) fn insert(&mut self, dx: i32, dy: i32, feature: F) {
        self.cells.insert((dx, dy), feature);
    }

    pub(crate) fn remove(&mut self, dx: i32, dy: i32) {
        self.cells.remove(&(dx, dy));
    }
}
