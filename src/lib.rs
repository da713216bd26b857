//! Duskveil - symmetric shadow-casting line of sight
//!
//! Octant-swept shadow casting with fixed-point bounds: blockers cast
//! shadows that start at themselves and widen away from the viewer, and
//! wall corners at a shadow's edge stay visible.

pub mod geom;
pub mod los;
pub mod world;

// Re-export commonly used types
pub use geom::Position;
pub use los::{OpacityGrid, VisibilityField, VisibilityMap, DEFAULT_MAX_RADIUS};
pub use world::{Map, Tile, TileType};
