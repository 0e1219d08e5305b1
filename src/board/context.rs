//! Per-turn read-only state consumed by the target scorer.
//!
//! `TurnContext` bundles everything the scorer reads: static per-cell
//! fields, occupancy sets, resource sets, the cluster registry and the
//! assignment index. The scorer borrows it immutably; only the turn loop
//! mutates occupancy and assignments between decisions.

use std::collections::HashSet;

use thiserror::Error;

use super::cell::Cell;
use super::grid::Grid;
use super::resource::ResourceSets;
use crate::cluster::{ClusterAssignments, ClusterRegistry};

/// Errors raised when assembling a turn context.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContextError {
    #[error("{field} is {found:?} but the map is {expected:?}")]
    DimensionMismatch {
        field: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("map dimensions must be non-zero, got {0}x{1}")]
    EmptyMap(usize, usize),
}

/// Cells nobody else may target this turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Occupancy {
    /// Cells already chosen as a destination by another unit.
    pub targeted: HashSet<Cell>,
    /// Cells reserved for city construction.
    pub targeted_for_building: HashSet<Cell>,
    pub opponent_city_tiles: HashSet<Cell>,
    pub player_city_tiles: HashSet<Cell>,
}

impl Occupancy {
    /// True if `cell` is in any of the four exclusion sets.
    #[inline]
    pub fn is_blocked(&self, cell: Cell) -> bool {
        self.targeted.contains(&cell)
            || self.targeted_for_building.contains(&cell)
            || self.opponent_city_tiles.contains(&cell)
            || self.player_city_tiles.contains(&cell)
    }
}

/// Precomputed per-cell matrices.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticFields {
    /// Amount a unit standing here collects per turn from its own and adjacent tiles.
    pub local_yield: Grid<f64>,
    pub distance_from_edge: Grid<f64>,
    pub distance_from_opponent_assets: Grid<f64>,
    /// Distance to the nearest cell a city could be built on.
    pub distance_from_buildable_tile: Grid<f64>,
}

impl StaticFields {
    /// All-zero fields for a `width × height` map.
    pub fn zeroed(width: usize, height: usize) -> Self {
        let zero = Grid::filled(width, height, 0.0);
        StaticFields {
            local_yield: zero.clone(),
            distance_from_edge: zero.clone(),
            distance_from_opponent_assets: zero.clone(),
            distance_from_buildable_tile: zero,
        }
    }

    fn named(&self) -> [(&'static str, (usize, usize)); 4] {
        [
            ("local_yield", self.local_yield.dims()),
            ("distance_from_edge", self.distance_from_edge.dims()),
            (
                "distance_from_opponent_assets",
                self.distance_from_opponent_assets.dims(),
            ),
            (
                "distance_from_buildable_tile",
                self.distance_from_buildable_tile.dims(),
            ),
        ]
    }
}

/// Snapshot of the map state for one turn.
#[derive(Debug, Clone)]
pub struct TurnContext {
    width: usize,
    height: usize,
    pub fields: StaticFields,
    pub occupancy: Occupancy,
    pub resources: ResourceSets,
    pub registry: ClusterRegistry,
    pub assignments: ClusterAssignments,
}

impl TurnContext {
    /// Assembles a context, checking that every matrix and the registry
    /// cover exactly `width × height` cells.
    pub fn new(
        width: usize,
        height: usize,
        fields: StaticFields,
        occupancy: Occupancy,
        resources: ResourceSets,
        registry: ClusterRegistry,
        assignments: ClusterAssignments,
    ) -> Result<Self, ContextError> {
        if width == 0 || height == 0 {
            return Err(ContextError::EmptyMap(width, height));
        }
        let expected = (width, height);
        let named = fields.named();
        let checks = named
            .iter()
            .copied()
            .chain(std::iter::once(("cluster registry", registry.dims())));
        for (field, found) in checks {
            if found != expected {
                return Err(ContextError::DimensionMismatch {
                    field,
                    expected,
                    found,
                });
            }
        }
        Ok(TurnContext {
            width,
            height,
            fields,
            occupancy,
            resources,
            registry,
            assignments,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Every cell in scan order: rows ascending, then columns ascending.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let (width, height) = (self.width as i32, self.height as i32);
        (0..height).flat_map(move |y| (0..width).map(move |x| Cell::new(x, y)))
    }
}
