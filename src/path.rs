//! Path-distance oracles.
//!
//! The scorer asks for the travel distance from a unit to every candidate
//! cell, so implementations should answer in O(1). `DistanceTable`
//! precomputes all pairs with one BFS per source cell.

use std::collections::{HashSet, VecDeque};

use thiserror::Error;

use crate::board::{Cell, Grid};

/// Shortest travel distance between two cells.
pub trait PathDistance {
    /// Returns the path length from `from` to `to`, or `f64::INFINITY` if
    /// `to` cannot be reached.
    fn path_distance(&self, from: Cell, to: Cell) -> f64;
}

impl<P: PathDistance + ?Sized> PathDistance for &P {
    fn path_distance(&self, from: Cell, to: Cell) -> f64 {
        (**self).path_distance(from, to)
    }
}

/// Straight Manhattan distance, ignoring obstacles.
#[derive(Debug, Clone, Copy, Default)]
pub struct Manhattan;

impl PathDistance for Manhattan {
    #[inline]
    fn path_distance(&self, from: Cell, to: Cell) -> f64 {
        from.manhattan(to) as f64
    }
}

/// Errors raised while precomputing path distances.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("a {width}x{height} map has {cells} cells, distance tables hold at most {max}")]
    MapTooLarge {
        width: usize,
        height: usize,
        cells: usize,
        max: usize,
    },
}

/// All-pairs BFS distances over a map with impassable cells.
///
/// Impassable cells can still be the start of a path (a unit may be
/// standing on one) but are never entered. The table holds one `u16` per
/// ordered cell pair, so maps are capped at [`DistanceTable::MAX_CELLS`].
pub struct DistanceTable {
    width: usize,
    height: usize,
    /// `dist[src * n + dst]`, `UNREACHABLE` when no path exists.
    dist: Vec<u16>,
}

const UNREACHABLE: u16 = u16::MAX;

impl DistanceTable {
    /// Largest map the table accepts (a 64×64 grid). Any path is shorter
    /// than the cell count, so distances always fit below `UNREACHABLE`.
    pub const MAX_CELLS: usize = 4096;

    /// Builds the table for a `width × height` map.
    pub fn build(
        width: usize,
        height: usize,
        impassable: &HashSet<Cell>,
    ) -> Result<Self, PathError> {
        let n = width.saturating_mul(height);
        if n > Self::MAX_CELLS {
            return Err(PathError::MapTooLarge {
                width,
                height,
                cells: n,
                max: Self::MAX_CELLS,
            });
        }
        let mut dist = vec![UNREACHABLE; n * n];
        let blocked = Grid::from_fn(width, height, |c| impassable.contains(&c));
        let mut queue = VecDeque::with_capacity(n);

        for src in 0..n {
            let row = &mut dist[src * n..(src + 1) * n];
            row[src] = 0;
            queue.clear();
            queue.push_back(src);

            while let Some(cur) = queue.pop_front() {
                let d = row[cur];
                let cell = Cell::new((cur % width) as i32, (cur / width) as i32);
                for next in cell.neighbors() {
                    let Some(ni) = blocked.index_of(next) else {
                        continue;
                    };
                    if blocked.get(next).copied().unwrap_or(true) {
                        continue;
                    }
                    if row[ni] == UNREACHABLE {
                        row[ni] = d + 1;
                        queue.push_back(ni);
                    }
                }
            }
        }

        Ok(DistanceTable {
            width,
            height,
            dist,
        })
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        cell.in_bounds(self.width, self.height)
            .then(|| cell.y as usize * self.width + cell.x as usize)
    }
}

impl PathDistance for DistanceTable {
    #[inline]
    fn path_distance(&self, from: Cell, to: Cell) -> f64 {
        let (Some(a), Some(b)) = (self.index(from), self.index(to)) else {
            return f64::INFINITY;
        };
        match self.dist[a * self.width * self.height + b] {
            UNREACHABLE => f64::INFINITY,
            d => f64::from(d),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_ignores_obstacles() {
        assert_eq!(Manhattan.path_distance(Cell::new(0, 0), Cell::new(2, 3)), 5.0);
    }

    #[test]
    fn open_table_matches_manhattan() {
        let table = DistanceTable::build(4, 4, &HashSet::new()).unwrap();
        for a in Grid::filled(4, 4, ()).cells() {
            for b in Grid::filled(4, 4, ()).cells() {
                assert_eq!(
                    table.path_distance(a, b),
                    Manhattan.path_distance(a, b),
                    "{} -> {}",
                    a,
                    b
                );
            }
        }
    }

    #[test]
    fn walls_force_detours() {
        // Column x=1 blocked except at y=2.
        let wall: HashSet<Cell> = [Cell::new(1, 0), Cell::new(1, 1)].into_iter().collect();
        let table = DistanceTable::build(3, 3, &wall).unwrap();
        assert_eq!(table.path_distance(Cell::new(0, 0), Cell::new(2, 0)), 6.0);
        assert_eq!(table.path_distance(Cell::new(0, 0), Cell::new(1, 0)), f64::INFINITY);
    }

    #[test]
    fn sealed_cells_are_unreachable() {
        let wall: HashSet<Cell> = [Cell::new(1, 0), Cell::new(0, 1)].into_iter().collect();
        let table = DistanceTable::build(3, 3, &wall).unwrap();
        assert_eq!(table.path_distance(Cell::new(2, 2), Cell::new(0, 0)), f64::INFINITY);
        // A unit standing on a blocked cell can still walk off it.
        assert_eq!(table.path_distance(Cell::new(1, 0), Cell::new(2, 0)), 1.0);
    }

    #[test]
    fn off_map_is_infinite() {
        let table = DistanceTable::build(2, 2, &HashSet::new()).unwrap();
        assert_eq!(table.path_distance(Cell::new(0, 0), Cell::new(5, 5)), f64::INFINITY);
    }

    #[test]
    fn longest_corridor_fits() {
        // A 1-wide strip of the maximum size has the longest possible path.
        let table = DistanceTable::build(DistanceTable::MAX_CELLS, 1, &HashSet::new()).unwrap();
        let far = (DistanceTable::MAX_CELLS - 1) as i32;
        assert_eq!(
            table.path_distance(Cell::new(0, 0), Cell::new(far, 0)),
            f64::from(far)
        );
    }

    #[test]
    fn rejects_oversized_maps() {
        let err = DistanceTable::build(65, 64, &HashSet::new()).err().unwrap();
        assert_eq!(
            err,
            PathError::MapTooLarge {
                width: 65,
                height: 64,
                cells: 4160,
                max: DistanceTable::MAX_CELLS,
            }
        );
        assert!(DistanceTable::build(64, 64, &HashSet::new()).is_ok());
    }
}
