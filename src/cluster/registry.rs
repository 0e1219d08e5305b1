//! Resource clusters.
//!
//! A cluster is a maximal set of resource tiles connected through
//! orthogonal adjacency, regardless of resource kind. The registry is
//! assembled once per turn by `ClusterBuilder` and is read-only afterwards;
//! the scorer only sees `find` and the per-cluster aggregates.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::Serialize;
use thiserror::Error;

use super::disjoint_set::DisjointSet;
use crate::board::{Cell, Direction, Grid, ResourceType};

/// Identifies a cluster by its leader (union-find root) cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ClusterId(Cell);

impl ClusterId {
    pub const fn leader(self) -> Cell {
        self.0
    }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cluster@{}", self.0)
    }
}

/// Errors raised while building or querying the registry.
#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("unknown cluster {0}")]
    UnknownCluster(ClusterId),

    #[error("resource tile {0} lies outside the {1}x{2} map")]
    OutOfBounds(Cell, usize, usize),

    #[error("resource tile {0} registered twice")]
    DuplicateTile(Cell),
}

/// Aggregate statistics of one cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    pub id: ClusterId,
    /// Number of member tiles, at least 1.
    pub size: usize,
    /// Point mass: summed strategic weight of the member tiles.
    pub point: f64,
    /// Kind of the leader tile.
    pub resource_type: ResourceType,
    /// Harvestable amount across all member tiles at build time.
    pub remaining_amount: f64,
}

#[derive(Debug, Clone, Copy)]
struct Tile {
    kind: ResourceType,
    amount: f64,
    point: f64,
}

/// Collects resource tiles for one turn and unions them into clusters.
#[derive(Debug, Clone)]
pub struct ClusterBuilder {
    width: usize,
    height: usize,
    tiles: HashMap<Cell, Tile>,
}

impl ClusterBuilder {
    pub fn new(width: usize, height: usize) -> Self {
        ClusterBuilder {
            width,
            height,
            tiles: HashMap::new(),
        }
    }

    /// Registers a resource tile. Tiles of kind `None` are skipped.
    pub fn add_tile(
        &mut self,
        cell: Cell,
        kind: ResourceType,
        amount: f64,
        point: f64,
    ) -> Result<&mut Self, RegistryError> {
        if !cell.in_bounds(self.width, self.height) {
            return Err(RegistryError::OutOfBounds(cell, self.width, self.height));
        }
        if !kind.is_harvestable() {
            return Ok(self);
        }
        if self.tiles.contains_key(&cell) {
            return Err(RegistryError::DuplicateTile(cell));
        }
        self.tiles.insert(cell, Tile { kind, amount, point });
        Ok(self)
    }

    /// Unions adjacent tiles and freezes the result.
    pub fn build(self) -> ClusterRegistry {
        let index = |c: Cell| c.y as usize * self.width + c.x as usize;
        let mut sets = DisjointSet::new(self.width * self.height);
        let mut occupied = vec![false; self.width * self.height];

        let mut cells: Vec<Cell> = self.tiles.keys().copied().collect();
        cells.sort();

        for &cell in &cells {
            occupied[index(cell)] = true;
        }
        // Each adjacency is seen once by looking only east and south.
        for &cell in &cells {
            for dir in [Direction::East, Direction::South] {
                let next = cell.translate(dir);
                if self.tiles.contains_key(&next) {
                    sets.union(index(cell), index(next));
                }
            }
        }
        sets.flatten();

        let to_cell = |i: usize| Cell::new((i % self.width) as i32, (i / self.width) as i32);
        let mut clusters: BTreeMap<ClusterId, Cluster> = BTreeMap::new();
        for &cell in &cells {
            let tile = self.tiles[&cell];
            let leader = to_cell(sets.root(index(cell)));
            let id = ClusterId(leader);
            let entry = clusters.entry(id).or_insert_with(|| Cluster {
                id,
                size: 0,
                point: 0.0,
                resource_type: self.tiles[&leader].kind,
                remaining_amount: 0.0,
            });
            entry.size += 1;
            entry.point += tile.point;
            entry.remaining_amount += tile.amount;
        }

        tracing::debug!(
            tiles = cells.len(),
            clusters = clusters.len(),
            "built cluster registry"
        );

        ClusterRegistry {
            width: self.width,
            height: self.height,
            sets,
            occupied: Grid::from_fn(self.width, self.height, |c| occupied[index(c)]),
            clusters,
        }
    }
}

/// Frozen per-turn cluster lookup.
#[derive(Debug, Clone)]
pub struct ClusterRegistry {
    width: usize,
    height: usize,
    sets: DisjointSet,
    occupied: Grid<bool>,
    clusters: BTreeMap<ClusterId, Cluster>,
}

impl ClusterRegistry {
    /// A registry with no resource tiles.
    pub fn empty(width: usize, height: usize) -> Self {
        ClusterBuilder::new(width, height).build()
    }

    pub fn dims(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Returns the cluster holding `cell`, or `None` for non-resource and off-map cells.
    #[inline]
    pub fn find(&self, cell: Cell) -> Option<ClusterId> {
        if !self.occupied.get(cell).copied().unwrap_or(false) {
            return None;
        }
        let i = cell.y as usize * self.width + cell.x as usize;
        let root = self.sets.root(i);
        Some(ClusterId(Cell::new(
            (root % self.width) as i32,
            (root / self.width) as i32,
        )))
    }

    pub fn cluster(&self, id: ClusterId) -> Result<&Cluster, RegistryError> {
        self.clusters
            .get(&id)
            .ok_or(RegistryError::UnknownCluster(id))
    }

    pub fn get_point(&self, id: ClusterId) -> Result<f64, RegistryError> {
        self.cluster(id).map(|c| c.point)
    }

    pub fn get_size(&self, id: ClusterId) -> Result<usize, RegistryError> {
        self.cluster(id).map(|c| c.size)
    }

    pub fn get_remaining_amount(&self, id: ClusterId) -> Result<f64, RegistryError> {
        self.cluster(id).map(|c| c.remaining_amount)
    }

    /// All clusters, ordered by leader cell in scan order.
    pub fn clusters(&self) -> impl Iterator<Item = &Cluster> {
        self.clusters.values()
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}
