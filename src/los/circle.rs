//! Per-radius circle bounds
//!
//! For each sweep row, how far out the perpendicular column scan may go
//! before leaving the visible circle.

/// Sentinel for rows that are never bounded by the circle.
pub(crate) const CIRC_MAX: i32 = 32_000;

/// Column bounds per sweep row, derived from a sight radius.
///
/// Built once per radius change, not per compute call. Pure function of the
/// radius, so two tables built from the same radius are identical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircleTable {
    radius: i32,
    bounds: Vec<i32>,
}

impl CircleTable {
    /// Build the table for a radius. Expects a radius of at least 1.
    pub fn new(radius: i32) -> Self {
        // Rows 0 and 1 always go to infinity.
        let mut bounds = vec![CIRC_MAX; (radius + 1) as usize];

        for i in 2..=radius {
            // Rows close to the origin are unbounded too.
            if 2 * i * i <= radius * radius {
                continue;
            }

            for j in (0..i).rev() {
                // Keep (i, j) while i^2 + j^2 stays within (R + 0.5)^2.
                // This rounding gives much better looking circles.
                if i * i + j * j <= radius * radius + radius {
                    bounds[i as usize] = j;
                    break;
                }
            }
        }

        Self { radius, bounds }
    }

    /// The radius this table was built for.
    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// Maximum column for a sweep row in `[0, radius]`.
    pub fn bound(&self, row: i32) -> i32 {
        self.bounds[row as usize]
    }
}
