//! Octant coordinate transforms
//!
//! The sweep walks octant-local (row, column) pairs; these transforms turn
//! them into grid offsets for each of the 8 wedges around the viewer.

/// One of the 8 reflection/rotation matrices mapping sweep coordinates
/// to grid offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OctantTransform {
    xx: i32,
    xy: i32,
    yx: i32,
    yy: i32,
}

impl OctantTransform {
    /// Map octant-local (row, column) to a (dx, dy) grid offset.
    #[inline]
    pub const fn apply(&self, row: i32, col: i32) -> (i32, i32) {
        (row * self.xx + col * self.xy, row * self.yx + col * self.yy)
    }
}

/// The 8 octant transforms, in sweep order.
pub const OCTANTS: [OctantTransform; 8] = [
    OctantTransform { xx: 1, xy: 0, yx: 0, yy: 1 },
    OctantTransform { xx: 0, xy: 1, yx: 1, yy: 0 },
    OctantTransform { xx: 0, xy: -1, yx: 1, yy: 0 },
    OctantTransform { xx: -1, xy: 0, yx: 0, yy: 1 },
    OctantTransform { xx: -1, xy: 0, yx: 0, yy: -1 },
    OctantTransform { xx: 0, xy: -1, yx: -1, yy: 0 },
    OctantTransform { xx: 0, xy: 1, yx: -1, yy: 0 },
    OctantTransform { xx: 1, xy: 0, yx: 0, yy: -1 },
];
