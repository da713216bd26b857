//! Grid geometry
//!
//! Integer coordinates and distances on the dungeon grid.

use serde::{Deserialize, Serialize};

/// Position on the dungeon grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset from another position, as (dx, dy)
    pub fn offset_from(&self, other: &Position) -> (i32, i32) {
        (self.x - other.x, self.y - other.y)
    }

    /// Chebyshev distance (allows diagonal)
    pub fn chebyshev_distance(&self, other: &Position) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_from() {
        let a = Position::new(10, 10);
        let b = Position::new(7, 12);
        assert_eq!(b.offset_from(&a), (-3, 2));
        assert_eq!(a.offset_from(&a), (0, 0));
    }

    #[test]
    fn test_chebyshev_distance() {
        let a = Position::new(0, 0);
        assert_eq!(a.chebyshev_distance(&Position::new(3, -2)), 3);
        assert_eq!(a.chebyshev_distance(&Position::new(-1, 5)), 5);
    }
}
