//! Visibility field
//!
//! The octant sweep driver: walks each of the 8 octants outward row by row,
//! runs the shadow state machine over a reused row of sweep cells, and
//! writes visible cells into a sparse offset-keyed map.

use crate::geom::Position;
use crate::los::cell::{SweepCell, STEP};
use crate::los::circle::CircleTable;
use crate::los::octant::{OctantTransform, OCTANTS};
use crate::los::vismap::VisibilityMap;
use crate::los::OpacityGrid;

/// Implementation cap on the sight radius unless a custom bound is given.
pub const DEFAULT_MAX_RADIUS: i32 = 20;

/// View narrowness: 1 = widest sight cone .. 5 = narrowest.
const VIEW: i32 = 2;

/// Sentinel lower bound for a blocker straight along the sweep axis.
const BIG_SHADOW: i32 = 32_000;

/// Upper shadow bound cast by a blocker at octant-local (row, col),
/// scaled by 10 for the integer math.
fn calc_upper(row: i32, col: i32) -> i32 {
    let upper = (10 * (10 * row - VIEW)) / (10 * col + VIEW);
    // a blocker on the diagonal never shades below the diagonal itself
    upper.max(10)
}

/// Lower shadow bound cast by a blocker at octant-local (row, col).
fn calc_lower(row: i32, col: i32) -> i32 {
    if col == 0 {
        return BIG_SHADOW;
    }
    10 * (10 * row + VIEW) / (10 * col - VIEW)
}

/// Shadow-casting visibility solver.
///
/// Owns the per-radius circle table, so a stale table can never pair with a
/// freshly set radius. `compute` is pure: it reads the grid through
/// [`OpacityGrid`] and touches no other state.
#[derive(Debug, Clone)]
pub struct VisibilityField {
    radius: i32,
    max_radius: i32,
    circle: CircleTable,
}

impl VisibilityField {
    /// Field with the default radius cap.
    pub fn new(radius: i32) -> Self {
        Self::with_max_radius(radius, DEFAULT_MAX_RADIUS)
    }

    /// Field with a custom radius cap (for larger viewports).
    pub fn with_max_radius(radius: i32, max_radius: i32) -> Self {
        let max_radius = max_radius.max(1);
        let radius = radius.clamp(1, max_radius);
        Self {
            radius,
            max_radius,
            circle: CircleTable::new(radius),
        }
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    pub fn max_radius(&self) -> i32 {
        self.max_radius
    }

    /// Change the sight radius, clamping to `[1, max_radius]`.
    ///
    /// No-op when the clamped radius is unchanged; otherwise the circle
    /// table is rebuilt together with the radius.
    pub fn set_radius(&mut self, radius: i32) {
        let radius = radius.clamp(1, self.max_radius);
        if radius == self.radius {
            return;
        }
        log::debug!("sight radius {} -> {}", self.radius, radius);
        self.radius = radius;
        self.circle = CircleTable::new(radius);
    }

    /// Compute the visible cells around `origin`.
    ///
    /// The result maps (dx, dy) offsets to the feature seen there; offsets
    /// absent from the map are not visible. The origin itself is always
    /// recorded when it is in bounds.
    pub fn compute<G: OpacityGrid>(
        &self,
        origin: Position,
        grid: &G,
    ) -> VisibilityMap<G::Feature> {
        self.compute_with_shortcut(origin, grid, true)
    }

    fn compute_with_shortcut<G: OpacityGrid>(
        &self,
        origin: Position,
        grid: &G,
        shortcut: bool,
    ) -> VisibilityMap<G::Feature> {
        let mut out = VisibilityMap::new();

        if let Some(feature) = grid.feature_at(origin.x, origin.y) {
            out.insert(0, 0, feature);
        }

        for octant in &OCTANTS {
            self.sweep_octant(octant, origin, grid, shortcut, &mut out);
        }

        out
    }

    /// One octant of the sweep. All 8 octants run this same row/column walk
    /// through their coordinate transform.
    fn sweep_octant<G: OpacityGrid>(
        &self,
        octant: &OctantTransform,
        origin: Position,
        grid: &G,
        shortcut: bool,
        out: &mut VisibilityMap<G::Feature>,
    ) {
        // cells[0] starts fresh here; every other slot is initialized when
        // the sweep first reaches it on the diagonal.
        let mut cells = vec![SweepCell::new(); (self.radius + 1) as usize];
        let mut all_dark = false;

        for row in 1..=self.radius {
            let mut row_dark = true;
            // the corner flag never carries over between rows
            let mut vis_corner = false;

            let top = self.circle.bound(row).min(row);

            for col in 0..=top {
                let (dx, dy) = octant.apply(row, col);

                let Some(feature) = grid.feature_at(origin.x + dx, origin.y + dy)
                else {
                    continue;
                };

                // Octant already finished; the remaining cells still need
                // their entries cleared.
                if all_dark && shortcut {
                    out.remove(dx, dy);
                    continue;
                }

                let blocker = grid.blocks_sight(feature);

                let mut up_inc = STEP;
                let mut low_inc = STEP;

                let (before, rest) = cells.split_at_mut(col as usize);
                let cur = &mut rest[0];
                let mut west = before.last_mut();

                // STEP 1: inherit from the immediate west neighbor where
                // geometrically valid.
                if col < row {
                    if cur.lit_delay {
                        // blockers never light up from a delayed relight
                        if !blocker {
                            if let Some(w) = west.as_deref_mut() {
                                if w.lit {
                                    if w.low_max != 0 {
                                        cur.lit = false;
                                        // steal the lower shadow, don't copy it
                                        cur.low_max = w.low_max;
                                        cur.low_count = w.low_count;
                                        w.low_count = 0;
                                        w.low_max = 0;
                                        low_inc = 0;
                                    } else {
                                        cur.lit = true;
                                    }
                                }
                            }
                        }
                        cur.lit_delay = false;
                    }
                } else {
                    // new cell entering the sweep on the diagonal
                    cur.reset();
                }

                // STEP 2: blockers. A dark blocker at a shadow's edge is
                // still drawn, so wall corners don't vanish into nothing.
                if blocker {
                    let west_lit = west.as_deref().is_some_and(|w| w.lit);
                    if cur.lit || (col != 0 && west_lit) || vis_corner {
                        vis_corner = cur.lit;

                        cur.lit = false;
                        cur.visible = true;

                        let upper = calc_upper(row, col);
                        let lower = calc_lower(row, col);

                        if upper < cur.up_max || cur.up_max == 0 {
                            // new upper shadow
                            cur.up_max = upper;
                            cur.up_count = 0;
                            up_inc = 0;
                        }

                        if lower > cur.low_max || cur.low_max == 0 {
                            // new lower shadow
                            cur.low_max = lower;
                            cur.low_count = -STEP;
                            low_inc = 0;
                            if lower <= 30 {
                                cur.lit_delay = true;
                            }
                        }
                    } else {
                        cur.visible = false;
                    }
                } else {
                    // the visible flag is meaningful for blockers only
                    cur.visible = false;
                }

                // STEP 3: advance the counters toward their bounds.
                cur.up_count += up_inc;
                cur.low_count += low_inc;

                // STEP 4: upper shadows propagate outward along the row.
                if let Some(w) = west.as_deref() {
                    if w.reached_upper() {
                        if !cur.reached_upper() {
                            cur.up_max = w.up_max;
                            cur.up_count = w.up_count - w.up_max;
                        }
                        cur.lit = false;
                        cur.visible = false;
                    }
                }

                // STEP 5: lower shadows hand off to the next cell.
                if let Some(w) = west.as_deref_mut() {
                    if w.reached_lower() {
                        cur.low_max = w.low_max;
                        cur.low_count = w.low_count - w.low_max;
                        w.low_count = 0;
                        w.low_max = 0;
                    }

                    if w.low_max != 0 || (!w.lit && w.low_max == 0) {
                        cur.low_count = cur.low_max + STEP;
                    }
                }

                // STEP 6: light up once the lower bound is reached.
                if cur.reached_lower() {
                    cur.lit = true;
                }

                if cur.lit || (blocker && cur.visible) {
                    out.insert(dx, dy, feature);
                } else {
                    out.remove(dx, dy);
                }

                if cur.lit {
                    row_dark = false;
                }
            }

            if row_dark {
                all_dark = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Map, TileType};

    fn open_map(width: i32, height: i32) -> Map {
        Map::filled(width, height, TileType::Floor)
    }

    /// Walls on all 8 neighbors of (5, 5), floor everywhere else.
    fn walled_in_map() -> Map {
        let mut map = open_map(11, 11);
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx != 0 || dy != 0 {
                    map.set_tile(5 + dx, 5 + dy, TileType::Wall);
                }
            }
        }
        map
    }

    #[test]
    fn test_empty_grid_symmetry() {
        let field = VisibilityField::new(7);
        let origin = Position::new(20, 20);
        let vis = field.compute(origin, &open_map(41, 41));

        assert!(vis.contains(0, 0));
        for ((dx, dy), _) in vis.iter() {
            for (rx, ry) in [
                (dx, dy),
                (dy, dx),
                (-dx, dy),
                (-dy, dx),
                (dx, -dy),
                (dy, -dx),
                (-dx, -dy),
                (-dy, -dx),
            ] {
                assert!(vis.contains(rx, ry), "({}, {}) missing", rx, ry);
            }
        }
    }

    #[test]
    fn test_single_blocker_casts_shadow() {
        let mut map = open_map(11, 11);
        map.set_tile(6, 5, TileType::Wall);

        let field = VisibilityField::new(5);
        let vis = field.compute(Position::new(5, 5), &map);

        // The blocker itself is visible, the cells straight behind it are not.
        assert!(vis.contains(1, 0));
        assert!(!vis.contains(2, 0));
        assert!(!vis.contains(3, 0));

        // Cells beside the shadow line stay visible.
        assert!(vis.contains(2, 1));
        assert!(vis.contains(2, -1));
        assert!(vis.contains(1, 1));
        assert!(vis.contains(1, -1));
    }

    #[test]
    fn test_walled_in_blockers_visible() {
        let field = VisibilityField::new(5);
        let vis = field.compute(Position::new(5, 5), &walled_in_map());

        // All 8 adjacent walls are visible even though they are opaque.
        for dy in -1..=1 {
            for dx in -1..=1 {
                assert!(vis.contains(dx, dy), "({}, {}) missing", dx, dy);
                if dx != 0 || dy != 0 {
                    assert_eq!(vis.get(dx, dy), Some(TileType::Wall));
                }
            }
        }

        // Nothing beyond the enclosing ring is visible.
        assert_eq!(vis.len(), 9);
    }

    #[test]
    fn test_monotonic_radius() {
        let map = Map::from_ascii(
            "...............\n\
             ....#..........\n\
             ....#....#.....\n\
             .........#.....\n\
             ...............\n\
             ..##...........\n\
             .......@.......\n\
             ...........8...\n\
             ...............\n\
             ...+...........\n\
             .........##....\n\
             ...............\n\
             ......#........\n\
             ...............\n\
             ...............",
        )
        .unwrap();
        let origin = map.start_pos().unwrap();

        let small = VisibilityField::new(3).compute(origin, &map);
        let medium = VisibilityField::new(5).compute(origin, &map);
        let large = VisibilityField::new(7).compute(origin, &map);

        for ((dx, dy), _) in small.iter() {
            assert!(medium.contains(dx, dy), "({}, {}) lost at 5", dx, dy);
        }
        for ((dx, dy), _) in medium.iter() {
            assert!(large.contains(dx, dy), "({}, {}) lost at 7", dx, dy);
        }
    }

    #[test]
    fn test_compute_is_pure() {
        let mut map = open_map(21, 21);
        map.set_tile(12, 10, TileType::Wall);
        map.set_tile(12, 11, TileType::Statue);
        map.set_tile(8, 8, TileType::DoorClosed);

        let field = VisibilityField::new(6);
        let origin = Position::new(10, 10);

        let first = field.compute(origin, &map);
        let second = field.compute(origin, &map);
        assert_eq!(first, second);

        // Deterministic iteration order makes the serialized form
        // byte-identical as well.
        let a = serde_json::to_string(&first.iter().collect::<Vec<_>>()).unwrap();
        let b = serde_json::to_string(&second.iter().collect::<Vec<_>>()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_radius_clamped_not_rejected() {
        assert_eq!(VisibilityField::new(0).radius(), 1);
        assert_eq!(VisibilityField::new(-4).radius(), 1);
        assert_eq!(VisibilityField::new(99).radius(), DEFAULT_MAX_RADIUS);

        let mut field = VisibilityField::new(5);
        field.set_radius(0);
        assert_eq!(field.radius(), 1);
        field.set_radius(50);
        assert_eq!(field.radius(), DEFAULT_MAX_RADIUS);

        let wide = VisibilityField::with_max_radius(30, 40);
        assert_eq!(wide.radius(), 30);
    }

    #[test]
    fn test_set_radius_rebuilds_table() {
        // A stale circle table paired with a new radius would silently
        // produce wrong visibility, so the two must move as one unit.
        let map = open_map(41, 41);
        let origin = Position::new(20, 20);

        let mut reused = VisibilityField::new(7);
        let _ = reused.compute(origin, &map);
        reused.set_radius(3);

        let fresh = VisibilityField::new(3);
        assert_eq!(reused.compute(origin, &map), fresh.compute(origin, &map));
    }

    #[test]
    fn test_all_dark_shortcut_equivalence() {
        let field = VisibilityField::new(5);

        // Enclosed: the shortcut engages after the first ring.
        let enclosed = walled_in_map();
        let origin = Position::new(5, 5);
        assert_eq!(
            field.compute_with_shortcut(origin, &enclosed, true),
            field.compute_with_shortcut(origin, &enclosed, false),
        );

        // Open: the shortcut never engages.
        let open = open_map(11, 11);
        assert_eq!(
            field.compute_with_shortcut(origin, &open, true),
            field.compute_with_shortcut(origin, &open, false),
        );

        // Partially walled: some octants go dark, others don't.
        let mut walled = open_map(21, 21);
        for x in 10..=14 {
            walled.set_tile(x, 12, TileType::Wall);
        }
        let origin = Position::new(10, 10);
        assert_eq!(
            field.compute_with_shortcut(origin, &walled, true),
            field.compute_with_shortcut(origin, &walled, false),
        );
    }

    #[test]
    fn test_wall_segment_end_to_end() {
        // Horizontal wall two cells south of the viewer: everything behind
        // it is dark, everything beside or in front of it stays visible.
        let mut map = open_map(21, 21);
        for x in 10..=14 {
            map.set_tile(x, 12, TileType::Wall);
        }

        let field = VisibilityField::new(5);
        let origin = Position::new(10, 10);
        let vis = field.compute(origin, &map);
        let baseline = field.compute(origin, &open_map(21, 21));

        for ((dx, dy), _) in baseline.iter() {
            let (x, y) = (origin.x + dx, origin.y + dy);
            if y <= 12 || x <= 9 {
                assert!(vis.contains(dx, dy), "({}, {}) should be visible", x, y);
            } else {
                assert!(!vis.contains(dx, dy), "({}, {}) should be dark", x, y);
            }
        }

        // The shadow never exposes cells outside the open-grid footprint.
        for ((dx, dy), _) in vis.iter() {
            assert!(baseline.contains(dx, dy));
        }

        // The wall itself is visible edge to edge.
        for x in 10..=14 {
            assert_eq!(vis.get(x - origin.x, 2), Some(TileType::Wall));
        }
    }

    #[test]
    fn test_out_of_bounds_skipped() {
        // Viewer in the corner of a tiny map: no panic, and only in-bounds
        // cells appear in the result.
        let field = VisibilityField::new(5);
        let vis = field.compute(Position::new(0, 0), &open_map(3, 3));

        for ((dx, dy), _) in vis.iter() {
            assert!((0..3).contains(&dx), "dx {}", dx);
            assert!((0..3).contains(&dy), "dy {}", dy);
        }
        assert!(vis.contains(2, 2));
        assert!(!vis.contains(-1, 0));
    }

    #[test]
    fn test_awareness_check() {
        // The AI-side consumer: a watcher sees a target iff the target's
        // offset is in the watcher's map.
        let mut map = open_map(15, 15);
        for y in 3..=11 {
            map.set_tile(7, y, TileType::Wall);
        }

        let field = VisibilityField::new(6);
        let watcher = Position::new(5, 7);
        let vis = field.compute(watcher, &map);

        let hidden = Position::new(9, 7);
        let exposed = Position::new(5, 3);
        let (hx, hy) = hidden.offset_from(&watcher);
        let (ex, ey) = exposed.offset_from(&watcher);
        assert!(!vis.contains(hx, hy));
        assert!(vis.contains(ex, ey));
    }

    #[test]
    fn test_calc_upper_diagonal_clamp() {
        assert_eq!(calc_upper(1, 0), 40);
        assert_eq!(calc_upper(2, 0), 90);
        // on the diagonal the raw quotient dips below 10 and is clamped
        assert_eq!(calc_upper(1, 1), 10);
        assert_eq!(calc_upper(2, 2), 10);
    }

    #[test]
    fn test_calc_lower_axis_sentinel() {
        assert_eq!(calc_lower(1, 0), BIG_SHADOW);
        assert_eq!(calc_lower(1, 1), 15);
        assert_eq!(calc_lower(2, 1), 27);
        assert_eq!(calc_lower(2, 2), 12);
    }
}
