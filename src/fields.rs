//! Builders for the static per-cell fields.
//!
//! The turn loop normally supplies these matrices itself; the builders
//! fill in whatever a snapshot leaves out.

use std::collections::{HashSet, VecDeque};

use crate::board::{Cell, CollectionRates, Grid, ResourceSets};

/// Steps to the nearest map edge: `min(x, y, w-1-x, h-1-y)`.
pub fn distance_from_edge(width: usize, height: usize) -> Grid<f64> {
    let (w, h) = (width as i32, height as i32);
    Grid::from_fn(width, height, |c| {
        c.x.min(c.y).min(w - 1 - c.x).min(h - 1 - c.y) as f64
    })
}

/// Amount collected per turn by a unit standing on each cell.
///
/// A unit harvests its own tile and the four orthogonal neighbours, so
/// each cell sums the collection rate of up to five tiles.
pub fn convolved_yield(
    width: usize,
    height: usize,
    resources: &ResourceSets,
    rates: &CollectionRates,
) -> Grid<f64> {
    Grid::from_fn(width, height, |c| {
        std::iter::once(c)
            .chain(c.neighbors())
            .map(|t| rates.rate(resources.resource_at(t)))
            .sum::<f64>()
    })
}

/// Multi-source BFS distance to the nearest cell in `sources`.
///
/// Cells with no reachable source get `width + height`, which exceeds any
/// in-map distance.
pub fn distance_from_cells(width: usize, height: usize, sources: &HashSet<Cell>) -> Grid<f64> {
    let far = (width + height) as f64;
    let mut dist = Grid::filled(width, height, f64::INFINITY);
    let mut queue = VecDeque::new();

    let mut seeds: Vec<Cell> = sources.iter().copied().filter(|&c| dist.contains(c)).collect();
    seeds.sort();
    for cell in seeds {
        dist.set(cell, 0.0);
        queue.push_back(cell);
    }

    while let Some(cur) = queue.pop_front() {
        let d = dist.value(cur);
        for next in cur.neighbors() {
            if matches!(dist.get(next), Some(v) if v.is_infinite()) {
                dist.set(next, d + 1.0);
                queue.push_back(next);
            }
        }
    }

    Grid::from_fn(width, height, |c| {
        let d = dist.value(c);
        if d.is_finite() {
            d
        } else {
            far
        }
    })
}

/// Distance to the nearest cell holding neither a resource nor a city.
pub fn distance_from_buildable(
    width: usize,
    height: usize,
    resources: &ResourceSets,
    cities: &HashSet<Cell>,
) -> Grid<f64> {
    let buildable: HashSet<Cell> = Grid::filled(width, height, ())
        .cells()
        .filter(|c| !resources.has_resource(*c) && !cities.contains(c))
        .collect();
    distance_from_cells(width, height, &buildable)
}
