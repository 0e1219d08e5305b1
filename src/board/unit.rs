//! Workers that travel to and harvest resource tiles.

use serde::{Deserialize, Serialize};

use super::cell::Cell;

/// A movable unit as seen by the target scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: String,
    pub pos: Cell,
    /// Maximum path distance the unit may target this turn, computed by
    /// the turn loop before scoring.
    pub travel_range: f64,
}

impl Unit {
    pub fn new(id: impl Into<String>, pos: Cell, travel_range: f64) -> Self {
        Unit {
            id: id.into(),
            pos,
            travel_range,
        }
    }

    /// True if a target `distance` away is within this turn's range.
    /// The boundary itself is reachable.
    #[inline]
    pub fn can_reach(&self, distance: f64) -> bool {
        distance <= self.travel_range
    }
}
