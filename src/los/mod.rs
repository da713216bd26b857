//! Line of sight
//!
//! Symmetric shadow-casting visibility: one row/column sweep reused across
//! 8 octants, with fixed-point shadow bounds so blockers cast shadows that
//! start at themselves and widen away from the viewer.

mod cell;
pub mod circle;
pub mod field;
pub mod octant;
pub mod vismap;

pub use circle::CircleTable;
pub use field::{VisibilityField, DEFAULT_MAX_RADIUS};
pub use octant::{OctantTransform, OCTANTS};
pub use vismap::VisibilityMap;

/// Read-only opacity query over the dungeon grid.
///
/// The sweep may probe the same coordinate more than once per `compute()`
/// call (the cardinal and diagonal axes are shared between adjacent octants),
/// so answers must be consistent for the duration of one call.
pub trait OpacityGrid {
    /// Opaque per-cell feature classification, handed back to the caller
    /// through the visibility map.
    type Feature: Copy;

    /// Feature at (x, y), or `None` when the coordinate is out of bounds.
    /// Out-of-bounds cells are silently skipped by the sweep.
    fn feature_at(&self, x: i32, y: i32) -> Option<Self::Feature>;

    /// Whether this feature blocks sight (walls, closed doors, statues).
    fn blocks_sight(&self, feature: Self::Feature) -> bool;
}
