//! The four-part target score and its ordering.
//!
//! Components are compared one at a time in declaration order; a later
//! component only matters when every earlier one is equal:
//!
//! 1. `target_bonus` - cluster preference (stay, migrate, forced switch)
//! 2. `yield_term` - empty-tile bonus × local yield × distance weighting
//! 3. `edge_distance` - distance from the map edge
//! 4. `opponent_proximity` - negated distance from opponent assets

use std::cmp::Ordering;

use serde::Serialize;

/// Score of one candidate cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TargetScore {
    pub target_bonus: f64,
    pub yield_term: f64,
    pub edge_distance: f64,
    pub opponent_proximity: f64,
}

impl TargetScore {
    /// The baseline every candidate must beat.
    pub const ZERO: TargetScore = TargetScore {
        target_bonus: 0.0,
        yield_term: 0.0,
        edge_distance: 0.0,
        opponent_proximity: 0.0,
    };

    pub fn as_array(&self) -> [f64; 4] {
        [
            self.target_bonus,
            self.yield_term,
            self.edge_distance,
            self.opponent_proximity,
        ]
    }

    /// Element-wise lexicographic comparison. The first component that is
    /// not equal decides; if that component cannot be ordered (NaN) the
    /// scores are unordered and `None` is returned.
    pub fn lexicographic_cmp(&self, other: &TargetScore) -> Option<Ordering> {
        for (a, b) in self.as_array().into_iter().zip(other.as_array()) {
            match a.partial_cmp(&b) {
                Some(Ordering::Equal) => continue,
                decided => return decided,
            }
        }
        Some(Ordering::Equal)
    }

    /// True only when `self` ranks strictly above `other`. Unordered
    /// scores never rank above anything.
    #[inline]
    pub fn is_better_than(&self, other: &TargetScore) -> bool {
        self.lexicographic_cmp(other) == Some(Ordering::Greater)
    }

    /// Collapses the tuple to one number for heat-map display. Not used
    /// for ranking.
    pub fn diagnostic_value(&self) -> f64 {
        self.target_bonus * 1000.0
            + self.yield_term * 100.0
            + self.edge_distance * 10.0
            + self.opponent_proximity
    }
}

impl Default for TargetScore {
    fn default() -> Self {
        TargetScore::ZERO
    }
}
