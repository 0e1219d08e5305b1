//! JSON turn snapshots.
//!
//! A snapshot is the serialised input of one planning turn: map size,
//! resource tiles, optional precomputed matrices, occupancy cell lists,
//! units, and the current mining/locating assignments. Matrices the
//! snapshot omits are derived from the resource layout.
//!
//! ```json
//! {
//!   "width": 5, "height": 5,
//!   "resources": [{"x": 1, "y": 1, "kind": "wood", "amount": 10}],
//!   "player_city_tiles": [[0, 4]],
//!   "units": [{"id": "u1", "pos": [0, 0], "travel_range": 10}],
//!   "mining": {"u2": [1, 1]}
//! }
//! ```

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{
    Cell, CollectionRates, ContextError, Grid, Occupancy, ResourceSets, ResourceType,
    StaticFields, TurnContext, Unit,
};
use crate::cluster::{ClusterAssignments, ClusterBuilder, RegistryError};
use crate::fields;
use crate::path::{DistanceTable, PathError};

/// Errors that can occur while reading a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse snapshot JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{what} cell {cell} lies outside the {width}x{height} map")]
    OutOfBounds {
        what: &'static str,
        cell: Cell,
        width: usize,
        height: usize,
    },

    #[error("matrix '{0}' has ragged or empty rows")]
    RaggedMatrix(&'static str),

    #[error("duplicate unit id '{0}'")]
    DuplicateUnit(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Context(#[from] ContextError),

    #[error(transparent)]
    Path(#[from] PathError),
}

fn default_point() -> f64 {
    1.0
}

/// One resource tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceTile {
    pub x: i32,
    pub y: i32,
    pub kind: ResourceType,
    pub amount: f64,
    /// Strategic weight the tile adds to its cluster's point mass.
    #[serde(default = "default_point")]
    pub point: f64,
}

impl ResourceTile {
    pub fn cell(&self) -> Cell {
        Cell::new(self.x, self.y)
    }
}

/// Serialised input of one planning turn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TurnSnapshot {
    pub width: usize,
    pub height: usize,
    #[serde(default)]
    pub resources: Vec<ResourceTile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_yield: Option<Vec<Vec<f64>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_from_edge: Option<Vec<Vec<f64>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_from_opponent_assets: Option<Vec<Vec<f64>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_from_buildable_tile: Option<Vec<Vec<f64>>>,
    #[serde(default)]
    pub targeted: Vec<Cell>,
    #[serde(default)]
    pub targeted_for_building: Vec<Cell>,
    #[serde(default)]
    pub opponent_city_tiles: Vec<Cell>,
    #[serde(default)]
    pub player_city_tiles: Vec<Cell>,
    #[serde(default)]
    pub units: Vec<Unit>,
    /// Unit id -> resource tile it is mining this turn.
    #[serde(default)]
    pub mining: BTreeMap<String, Cell>,
    /// Unit id -> cell it is already heading for.
    #[serde(default)]
    pub locating: BTreeMap<String, Cell>,
}

impl TurnSnapshot {
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let data = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&data)
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn check_cell(&self, what: &'static str, cell: Cell) -> Result<Cell, SnapshotError> {
        if cell.in_bounds(self.width, self.height) {
            Ok(cell)
        } else {
            Err(SnapshotError::OutOfBounds {
                what,
                cell,
                width: self.width,
                height: self.height,
            })
        }
    }

    fn cell_set(&self, what: &'static str, cells: &[Cell]) -> Result<HashSet<Cell>, SnapshotError> {
        cells.iter().map(|&c| self.check_cell(what, c)).collect()
    }

    fn matrix(
        name: &'static str,
        rows: &Option<Vec<Vec<f64>>>,
        derive: impl FnOnce() -> Grid<f64>,
    ) -> Result<Grid<f64>, SnapshotError> {
        match rows {
            Some(rows) => Grid::from_rows(rows.clone()).ok_or(SnapshotError::RaggedMatrix(name)),
            None => Ok(derive()),
        }
    }

    /// The units of this snapshot, checked for bounds and unique ids.
    pub fn validated_units(&self) -> Result<Vec<Unit>, SnapshotError> {
        let mut seen = HashSet::new();
        for unit in &self.units {
            self.check_cell("unit", unit.pos)?;
            if !seen.insert(unit.id.as_str()) {
                return Err(SnapshotError::DuplicateUnit(unit.id.clone()));
            }
        }
        Ok(self.units.clone())
    }

    /// Path distances for this map, treating opponent cities as impassable.
    /// Fails for maps larger than [`DistanceTable::MAX_CELLS`].
    pub fn distance_table(&self) -> Result<DistanceTable, SnapshotError> {
        let blocked: HashSet<Cell> = self.opponent_city_tiles.iter().copied().collect();
        Ok(DistanceTable::build(self.width, self.height, &blocked)?)
    }

    /// Builds the turn context: clusters, resource sets, occupancy, the
    /// assignment index, and every static field (derived when omitted).
    pub fn build_context(&self, rates: &CollectionRates) -> Result<TurnContext, SnapshotError> {
        let (w, h) = (self.width, self.height);

        let mut builder = ClusterBuilder::new(w, h);
        let mut resources = ResourceSets::default();
        for tile in &self.resources {
            builder.add_tile(tile.cell(), tile.kind, tile.amount, tile.point)?;
            resources.insert(tile.cell(), tile.kind);
        }
        let registry = builder.build();

        let occupancy = Occupancy {
            targeted: self.cell_set("targeted", &self.targeted)?,
            targeted_for_building: self
                .cell_set("targeted_for_building", &self.targeted_for_building)?,
            opponent_city_tiles: self.cell_set("opponent city", &self.opponent_city_tiles)?,
            player_city_tiles: self.cell_set("player city", &self.player_city_tiles)?,
        };

        let cities: HashSet<Cell> = occupancy
            .opponent_city_tiles
            .union(&occupancy.player_city_tiles)
            .copied()
            .collect();
        let static_fields = StaticFields {
            local_yield: Self::matrix("local_yield", &self.local_yield, || {
                fields::convolved_yield(w, h, &resources, rates)
            })?,
            distance_from_edge: Self::matrix("distance_from_edge", &self.distance_from_edge, || {
                fields::distance_from_edge(w, h)
            })?,
            distance_from_opponent_assets: Self::matrix(
                "distance_from_opponent_assets",
                &self.distance_from_opponent_assets,
                || fields::distance_from_cells(w, h, &occupancy.opponent_city_tiles),
            )?,
            distance_from_buildable_tile: Self::matrix(
                "distance_from_buildable_tile",
                &self.distance_from_buildable_tile,
                || fields::distance_from_buildable(w, h, &resources, &cities),
            )?,
        };

        let mut assignments = ClusterAssignments::new();
        for (unit, &cell) in &self.mining {
            match registry.find(self.check_cell("mining", cell)?) {
                Some(cluster) => {
                    assignments.assign_mining(cluster, unit.as_str());
                }
                None => {
                    tracing::warn!(unit = %unit, cell = %cell, "mining cell is not a resource tile")
                }
            }
        }
        for (unit, &cell) in &self.locating {
            if let Some(cluster) = registry.find(self.check_cell("locating", cell)?) {
                assignments.assign_locating(cluster, unit.as_str());
            }
        }

        Ok(TurnContext::new(
            w,
            h,
            static_fields,
            occupancy,
            resources,
            registry,
            assignments,
        )?)
    }
}
