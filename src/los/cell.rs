//! Sweep cell state machine
//!
//! One cell per column position within the octant currently being swept,
//! reused from row to row. Shadow bounds are fixed-point integers scaled
//! by 10 so the math stays integral with one decimal digit of precision.

/// One fixed-point step per row.
pub(crate) const STEP: i32 = 10;

/// Half a step, the tolerance window of the reached tests.
const HALF_STEP: i32 = 5;

/// Per-column sweep state: shadow bound counters plus lighting flags.
#[derive(Debug, Clone)]
pub(crate) struct SweepCell {
    pub up_count: i32,
    pub up_max: i32,
    pub low_count: i32,
    pub low_max: i32,
    pub lit: bool,
    pub lit_delay: bool,
    /// Blockers only: dark wall at a shadow's edge that is still drawn.
    pub visible: bool,
}

impl SweepCell {
    pub fn new() -> Self {
        Self {
            up_count: 0,
            up_max: 0,
            low_count: 0,
            low_max: 0,
            lit: true,
            lit_delay: false,
            visible: true,
        }
    }

    /// Fresh state for a cell entering the sweep on the diagonal.
    pub fn reset(&mut self) {
        *self = SweepCell::new();
    }

    /// Whether the lower-bound counter is within half a step of its max.
    /// The half-step window matters: a plain comparison makes shadow
    /// edges look jagged and asymmetric.
    pub fn reached_lower(&self) -> bool {
        self.low_max != 0
            && self.low_count + HALF_STEP >= self.low_max
            && self.low_count - HALF_STEP < self.low_max
    }

    /// Whether the upper-bound counter is within half a step of its max.
    pub fn reached_upper(&self) -> bool {
        self.up_max != 0
            && self.up_count + HALF_STEP >= self.up_max
            && self.up_count - HALF_STEP < self.up_max
    }
}
