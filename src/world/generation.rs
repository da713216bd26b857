//! Cave generator using cellular automata
//!
//! Produces organic occlusion for the FOV playground.

use rand::rngs::StdRng;
use rand::Rng;

use super::map::Map;
use super::tile::TileType;
use crate::geom::Position;

/// Generate a cave map using cellular automata
pub fn generate_caves(rng: &mut StdRng, width: i32, height: i32) -> Map {
    let mut map = Map::new(width, height);

    // Initial random fill
    let fill_probability = 0.45;
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            if rng.gen_bool(fill_probability) {
                map.set_tile(x, y, TileType::Floor);
            }
        }
    }

    // Run cellular automata iterations
    for _ in 0..5 {
        let mut new_tiles = map.tiles.clone();

        for y in 1..height - 1 {
            for x in 1..width - 1 {
                let wall_count = count_neighbors(&map, x, y);
                let idx = map.xy_to_idx(x, y);

                if wall_count > 4 {
                    new_tiles[idx].kind = TileType::Wall;
                } else if wall_count < 4 {
                    new_tiles[idx].kind = TileType::Floor;
                }
            }
        }

        map.tiles = new_tiles;
    }

    // A little debris makes the caves read better without hurting sight
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            if map.is_walkable(x, y) && rng.gen_bool(0.02) {
                map.set_tile(x, y, TileType::Rubble);
            }
        }
    }

    place_start(&mut map, rng);

    map
}

/// Count wall neighbors (8-directional)
fn count_neighbors(map: &Map, x: i32, y: i32) -> i32 {
    let mut count = 0;
    for dy in -1..=1 {
        for dx in -1..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            let nx = x + dx;
            let ny = y + dy;
            if !map.in_bounds(nx, ny) || !map.is_walkable(nx, ny) {
                count += 1;
            }
        }
    }
    count
}

/// Pick a walkable start tile, carving one out if the automata left none
fn place_start(map: &mut Map, rng: &mut StdRng) {
    let mut floors: Vec<Position> = Vec::new();
    for y in 0..map.height {
        for x in 0..map.width {
            if map.is_walkable(x, y) {
                floors.push(Position::new(x, y));
            }
        }
    }

    let start = if floors.is_empty() {
        let center = Position::new(map.width / 2, map.height / 2);
        map.set_tile(center.x, center.y, TileType::Floor);
        center
    } else {
        floors[rng.gen_range(0..floors.len())]
    };

    map.set_start_pos(start);
}
