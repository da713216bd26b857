//! Tile definitions
//!
//! Terrain kinds and their sight/movement classification.

use serde::{Deserialize, Serialize};

/// A single tile of the dungeon grid
#[derive(Debug, Clone, Copy)]
pub struct Tile {
    pub kind: TileType,
    /// Remembered from an earlier look, drawn dimmed when out of sight
    pub explored: bool,
}

impl Tile {
    pub fn new(kind: TileType) -> Self {
        Self {
            kind,
            explored: false,
        }
    }

    pub fn blocks_sight(&self) -> bool {
        self.kind.blocks_sight()
    }

    pub fn is_walkable(&self) -> bool {
        self.kind.is_walkable()
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::new(TileType::Wall)
    }
}

/// Terrain kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileType {
    Floor,
    Wall,
    DoorClosed,
    DoorOpen,
    Statue,
    Rubble,
}

impl TileType {
    /// Whether this terrain blocks line of sight
    pub fn blocks_sight(&self) -> bool {
        matches!(
            self,
            TileType::Wall | TileType::DoorClosed | TileType::Statue
        )
    }

    /// Whether this terrain can be walked on
    pub fn is_walkable(&self) -> bool {
        matches!(
            self,
            TileType::Floor | TileType::DoorOpen | TileType::Rubble
        )
    }

    /// Display glyph
    pub fn glyph(&self) -> char {
        match self {
            TileType::Floor => '.',
            TileType::Wall => '#',
            TileType::DoorClosed => '+',
            TileType::DoorOpen => '\'',
            TileType::Statue => '8',
            TileType::Rubble => ',',
        }
    }

    /// Foreground color (RGB)
    pub fn fg_color(&self) -> (u8, u8, u8) {
        match self {
            TileType::Floor => (130, 120, 110),
            TileType::Wall => (180, 170, 150),
            TileType::DoorClosed => (170, 120, 60),
            TileType::DoorOpen => (170, 120, 60),
            TileType::Statue => (150, 150, 165),
            TileType::Rubble => (110, 100, 90),
        }
    }
}
