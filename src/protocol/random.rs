//! Seeded synthetic maps for demos and benchmarks.

use std::collections::{BTreeMap, HashSet};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::snapshot::{ResourceTile, TurnSnapshot};
use crate::board::{Cell, ResourceType, Unit, ALL_DIRECTIONS};

/// Generates a reproducible snapshot: a handful of resource clusters grown
/// by random walks, a few player and opponent cities, and units scattered
/// over the map. Units that start on a resource tile are listed as mining it.
/// A map with no cells comes back empty.
pub fn random_snapshot(seed: u64, width: usize, height: usize) -> TurnSnapshot {
    if width == 0 || height == 0 {
        return TurnSnapshot {
            width,
            height,
            ..TurnSnapshot::default()
        };
    }
    let mut rng = SmallRng::seed_from_u64(seed);
    let (w, h) = (width as i32, height as i32);
    let random_cell = |rng: &mut SmallRng| Cell::new(rng.gen_range(0..w), rng.gen_range(0..h));

    let mut taken: HashSet<Cell> = HashSet::new();
    let mut resources = Vec::new();
    let cluster_count = (width * height / 40).max(1);
    for _ in 0..cluster_count {
        let kind = match rng.gen_range(0..100) {
            0..=59 => ResourceType::Wood,
            60..=84 => ResourceType::Coal,
            _ => ResourceType::Uranium,
        };
        let mut cell = random_cell(&mut rng);
        for _ in 0..rng.gen_range(2..7) {
            if taken.insert(cell) {
                let amount = if kind == ResourceType::Wood {
                    f64::from(rng.gen_range(300u32..=500))
                } else {
                    350.0
                };
                resources.push(ResourceTile {
                    x: cell.x,
                    y: cell.y,
                    kind,
                    amount,
                    point: 1.0,
                });
            }
            let step = cell.translate(ALL_DIRECTIONS[rng.gen_range(0..4)]);
            if step.in_bounds(width, height) {
                cell = step;
            }
        }
    }

    let free_cell = |rng: &mut SmallRng, taken: &mut HashSet<Cell>| loop {
        let c = random_cell(rng);
        if taken.len() >= width * height || taken.insert(c) {
            return c;
        }
    };

    let mut player_city_tiles = Vec::new();
    let mut opponent_city_tiles = Vec::new();
    for _ in 0..2 {
        player_city_tiles.push(free_cell(&mut rng, &mut taken));
        opponent_city_tiles.push(free_cell(&mut rng, &mut taken));
    }

    let resource_cells: HashSet<Cell> = resources.iter().map(ResourceTile::cell).collect();
    let mut units = Vec::new();
    let mut mining = BTreeMap::new();
    let unit_count = (width * height / 60).clamp(1, 12);
    for i in 0..unit_count {
        let pos = random_cell(&mut rng);
        let id = format!("u_{}", i + 1);
        if resource_cells.contains(&pos) {
            mining.insert(id.clone(), pos);
        }
        units.push(Unit::new(id, pos, rng.gen_range(6..=15) as f64));
    }

    TurnSnapshot {
        width,
        height,
        resources,
        player_city_tiles,
        opponent_city_tiles,
        units,
        mining,
        ..TurnSnapshot::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CollectionRates;

    #[test]
    fn same_seed_same_map() {
        assert_eq!(random_snapshot(7, 16, 16), random_snapshot(7, 16, 16));
        assert_ne!(random_snapshot(7, 16, 16), random_snapshot(8, 16, 16));
    }

    #[test]
    fn zero_sized_map_is_empty() {
        for (w, h) in [(0, 5), (5, 0), (0, 0)] {
            let snap = random_snapshot(1, w, h);
            assert!(snap.resources.is_empty());
            assert!(snap.units.is_empty());
        }
    }

    #[test]
    fn generated_snapshot_is_valid() {
        for seed in 1..20 {
            let snap = random_snapshot(seed, 12, 12);
            assert!(!snap.resources.is_empty());
            assert!(!snap.units.is_empty());
            snap.validated_units().unwrap();
            let ctx = snap.build_context(&CollectionRates::default()).unwrap();
            assert!(!ctx.registry.is_empty());
        }
    }
}
