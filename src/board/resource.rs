//! Harvestable resource kinds and per-kind cell sets.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::cell::Cell;

/// The kind of resource lying on a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Wood,
    Coal,
    Uranium,
    None,
}

impl ResourceType {
    /// True for every kind a unit can actually collect.
    pub const fn is_harvestable(self) -> bool {
        !matches!(self, ResourceType::None)
    }
}

/// Amount collected per turn from one adjacent tile of each kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionRates {
    pub wood: f64,
    pub coal: f64,
    pub uranium: f64,
}

impl Default for CollectionRates {
    fn default() -> Self {
        CollectionRates {
            wood: 20.0,
            coal: 5.0,
            uranium: 2.0,
        }
    }
}

impl CollectionRates {
    pub fn rate(&self, kind: ResourceType) -> f64 {
        match kind {
            ResourceType::Wood => self.wood,
            ResourceType::Coal => self.coal,
            ResourceType::Uranium => self.uranium,
            ResourceType::None => 0.0,
        }
    }
}

/// Cells currently holding each harvestable resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceSets {
    pub wood: HashSet<Cell>,
    pub coal: HashSet<Cell>,
    pub uranium: HashSet<Cell>,
}

impl ResourceSets {
    /// Adds `cell` to the set for `kind`. `ResourceType::None` is ignored.
    pub fn insert(&mut self, cell: Cell, kind: ResourceType) {
        match kind {
            ResourceType::Wood => {
                self.wood.insert(cell);
            }
            ResourceType::Coal => {
                self.coal.insert(cell);
            }
            ResourceType::Uranium => {
                self.uranium.insert(cell);
            }
            ResourceType::None => {}
        }
    }

    /// Returns the resource on `cell`, checking wood, then coal, then uranium.
    pub fn resource_at(&self, cell: Cell) -> ResourceType {
        if self.wood.contains(&cell) {
            ResourceType::Wood
        } else if self.coal.contains(&cell) {
            ResourceType::Coal
        } else if self.uranium.contains(&cell) {
            ResourceType::Uranium
        } else {
            ResourceType::None
        }
    }

    pub fn has_resource(&self, cell: Cell) -> bool {
        self.resource_at(cell).is_harvestable()
    }

    /// True if any orthogonal neighbour of `cell` holds wood.
    pub fn wood_adjacent(&self, cell: Cell) -> bool {
        cell.neighbors().iter().any(|n| self.wood.contains(n))
    }
}
