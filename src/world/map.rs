//! Map data structure
//!
//! The 2D grid of tiles a visibility field is computed over.

use thiserror::Error;

use super::tile::{Tile, TileType};
use crate::geom::Position;
use crate::los::OpacityGrid;

/// Errors from parsing an ASCII map
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("map has no rows")]
    Empty,
    #[error("ragged map: row {row} is {found} wide, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("unknown map glyph {0:?}")]
    UnknownGlyph(char),
}

/// A dungeon floor map
#[derive(Debug, Clone)]
pub struct Map {
    pub width: i32,
    pub height: i32,
    pub tiles: Vec<Tile>,
    start_pos: Option<Position>,
}

impl Map {
    /// Create a new map filled with walls
    pub fn new(width: i32, height: i32) -> Self {
        Self::filled(width, height, TileType::Wall)
    }

    /// Create a new map filled with one terrain kind
    pub fn filled(width: i32, height: i32, kind: TileType) -> Self {
        let tiles = vec![Tile::new(kind); (width * height) as usize];
        Self {
            width,
            height,
            tiles,
            start_pos: None,
        }
    }

    /// Parse a map from ASCII art.
    ///
    /// `#` wall, `.` floor, `+` closed door, `'` open door, `8` statue,
    /// `,` rubble, `@` floor marked as the start position. All rows must be
    /// the same width.
    pub fn from_ascii(text: &str) -> Result<Self, MapError> {
        let rows: Vec<&str> = text.lines().collect();
        if rows.is_empty() {
            return Err(MapError::Empty);
        }

        let width = rows[0].chars().count();
        let mut tiles = Vec::with_capacity(width * rows.len());
        let mut start_pos = None;

        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(MapError::RaggedRow {
                    row: y,
                    found,
                    expected: width,
                });
            }
            for (x, glyph) in row.chars().enumerate() {
                let kind = match glyph {
                    '#' => TileType::Wall,
                    '.' => TileType::Floor,
                    '+' => TileType::DoorClosed,
                    '\'' => TileType::DoorOpen,
                    '8' => TileType::Statue,
                    ',' => TileType::Rubble,
                    '@' => {
                        start_pos = Some(Position::new(x as i32, y as i32));
                        TileType::Floor
                    }
                    other => return Err(MapError::UnknownGlyph(other)),
                };
                tiles.push(Tile::new(kind));
            }
        }

        Ok(Self {
            width: width as i32,
            height: rows.len() as i32,
            tiles,
            start_pos,
        })
    }

    /// Start position marked with `@` in the ASCII source, if any
    pub fn start_pos(&self) -> Option<Position> {
        self.start_pos
    }

    pub fn set_start_pos(&mut self, pos: Position) {
        self.start_pos = Some(pos);
    }

    /// Convert 2D coordinates to 1D index
    #[inline]
    pub fn xy_to_idx(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    /// Check if coordinates are within bounds
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Get tile at position
    pub fn tile(&self, x: i32, y: i32) -> Option<&Tile> {
        if self.in_bounds(x, y) {
            Some(&self.tiles[self.xy_to_idx(x, y)])
        } else {
            None
        }
    }

    /// Get mutable tile at position
    pub fn tile_mut(&mut self, x: i32, y: i32) -> Option<&mut Tile> {
        if self.in_bounds(x, y) {
            let idx = self.xy_to_idx(x, y);
            Some(&mut self.tiles[idx])
        } else {
            None
        }
    }

    /// Set terrain kind at position
    pub fn set_tile(&mut self, x: i32, y: i32, kind: TileType) {
        if self.in_bounds(x, y) {
            let idx = self.xy_to_idx(x, y);
            self.tiles[idx].kind = kind;
        }
    }

    /// Check if a position is walkable
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.tile(x, y).is_some_and(|t| t.is_walkable())
    }

    /// Mark a tile as explored (remembered terrain)
    pub fn mark_explored(&mut self, x: i32, y: i32) {
        if let Some(tile) = self.tile_mut(x, y) {
            tile.explored = true;
        }
    }
}

impl OpacityGrid for Map {
    type Feature = TileType;

    fn feature_at(&self, x: i32, y: i32) -> Option<TileType> {
        self.tile(x, y).map(|t| t.kind)
    }

    fn blocks_sight(&self, feature: TileType) -> bool {
        feature.blocks_sight()
    }
}
