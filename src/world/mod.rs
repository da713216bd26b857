//! World module
//!
//! The dungeon grid the visibility field is computed over: tiles, maps,
//! and cave generation for the playground.

pub mod generation;
pub mod map;
pub mod tile;

pub use generation::generate_caves;
pub use map::{Map, MapError};
pub use tile::{Tile, TileType};
