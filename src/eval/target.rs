//! Cluster-aware target selection.
//!
//! For one unit, scans every cell of the map in row-major order, drops
//! cells that are blocked, yield nothing or lie outside every cluster,
//! scores the rest with a four-part lexicographic `TargetScore`, and keeps
//! the first cell that strictly beats the running best.
//!
//! Design: the scorer only borrows the turn context. Committing a choice
//! (marking the cell targeted, counting the unit against the cluster) is
//! left to the caller, so several units may be scored against the same
//! snapshot at once.

use serde::Serialize;
use thiserror::Error;

use super::crowding::CrowdingDecision;
use super::diagnostics::DiagnosticsSink;
use super::score::TargetScore;
use crate::board::{Cell, Grid, TurnContext, Unit};
use crate::cluster::{ClusterId, RegistryError};
use crate::config::ScoringConfig;
use crate::path::PathDistance;

/// Errors raised while scoring. Only reachable when the registry and the
/// rest of the context disagree.
#[derive(Debug, Error, PartialEq)]
pub enum ScoringError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// The destination picked for a unit this turn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TargetChoice {
    pub position: Cell,
    pub score: TargetScore,
    /// Cluster of `position`, if any.
    pub cluster: Option<ClusterId>,
}

impl TargetChoice {
    /// True when no cell beat the zero score and the unit stays put.
    pub fn is_stay(&self, unit: &Unit) -> bool {
        self.position == unit.pos && self.score == TargetScore::ZERO
    }
}

/// Where the unit stands relative to the cluster layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitSituation {
    pub current_cluster: Option<ClusterId>,
    pub units_on_current: usize,
    pub capacity: usize,
    pub crowding: CrowdingDecision,
}

/// Scores candidate cells for units against one turn context.
pub struct TargetScorer<'a, P: ?Sized> {
    ctx: &'a TurnContext,
    pathing: &'a P,
    config: &'a ScoringConfig,
}

impl<'a, P: PathDistance + ?Sized> TargetScorer<'a, P> {
    pub fn new(ctx: &'a TurnContext, pathing: &'a P, config: &'a ScoringConfig) -> Self {
        TargetScorer {
            ctx,
            pathing,
            config,
        }
    }

    /// Looks up the unit's current cluster and applies the crowding policy.
    /// Capacity is the cluster's tile count.
    pub fn situation(&self, unit: &Unit) -> Result<UnitSituation, ScoringError> {
        let current_cluster = self.ctx.registry.find(unit.pos);
        let units_on_current = self.ctx.assignments.units_mining(current_cluster);
        let capacity = match current_cluster {
            Some(id) => self.ctx.registry.get_size(id)?,
            None => 0,
        };
        Ok(UnitSituation {
            current_cluster,
            units_on_current,
            capacity,
            crowding: CrowdingDecision::assess(units_on_current, capacity),
        })
    }

    /// Collection rate of the resource on the cluster's leader tile, or
    /// zero if the leader holds nothing collectable any more.
    pub fn collection_rate(&self, cluster: ClusterId) -> f64 {
        let rates = &self.config.rates;
        let resources = &self.ctx.resources;
        let leader = cluster.leader();
        if resources.wood.contains(&leader) {
            rates.wood
        } else if resources.coal.contains(&leader) {
            rates.coal
        } else if resources.uranium.contains(&leader) {
            rates.uranium
        } else {
            0.0
        }
    }

    /// Cluster-preference component of the score.
    ///
    /// - Other clusters in play: an untouched cluster is worth
    ///   `point × rate × average amount / sqrt(distance)`, a contested one 1;
    ///   either is multiplied when the current cluster is saturated.
    /// - Otherwise the unit's own cluster gets the stay bonus and
    ///   everything else 1.
    fn target_bonus(
        &self,
        target: ClusterId,
        situation: &UnitSituation,
        distance: f64,
    ) -> Result<f64, ScoringError> {
        let crowding = situation.crowding;
        if crowding.consider_other {
            let mut bonus = 1.0;
            if self.ctx.assignments.units_locating_or_targeting(target) == 0 {
                let registry = &self.ctx.registry;
                let point = registry.get_point(target)?;
                let size = registry.get_size(target)? as f64;
                let avg_amount = registry.get_remaining_amount(target)? / size;
                bonus = point * self.collection_rate(target) * avg_amount / distance.sqrt();
            }
            if crowding.must_switch {
                bonus *= self.config.must_switch_multiplier;
            }
            Ok(bonus)
        } else if situation.current_cluster == Some(target) {
            Ok(self.config.stay_bonus)
        } else {
            Ok(1.0)
        }
    }

    /// Preference for tiles close to buildable ground. Cells with no wood
    /// neighbour get no credit for being buildable-adjacent.
    fn empty_tile_bonus(&self, cell: Cell) -> f64 {
        let d = self.ctx.fields.distance_from_buildable_tile.value(cell);
        if self.ctx.resources.wood_adjacent(cell) {
            1.0 / (0.5 + d)
        } else {
            1.0 / (0.5 + d.max(1.0))
        }
    }

    /// Scores a single cell for `unit`. Returns `None` when the cell is
    /// ineligible or beyond the unit's travel range.
    pub fn score_cell(
        &self,
        unit: &Unit,
        cell: Cell,
        situation: &UnitSituation,
    ) -> Result<Option<TargetScore>, ScoringError> {
        if self.ctx.occupancy.is_blocked(cell) {
            return Ok(None);
        }
        let local_yield = self.ctx.fields.local_yield.value(cell);
        if local_yield == 0.0 {
            return Ok(None);
        }
        let Some(target) = self.ctx.registry.find(cell) else {
            return Ok(None);
        };

        let distance = self
            .pathing
            .path_distance(unit.pos, cell)
            .max(self.config.min_distance);
        if !unit.can_reach(distance) {
            return Ok(None);
        }

        let target_bonus = self.target_bonus(target, situation, distance)?;
        let yield_term = self.empty_tile_bonus(cell)
            * local_yield
            * distance.powf(self.config.distance_exponent);

        Ok(Some(TargetScore {
            target_bonus,
            yield_term,
            edge_distance: self.ctx.fields.distance_from_edge.value(cell),
            opponent_proximity: -self.ctx.fields.distance_from_opponent_assets.value(cell),
        }))
    }

    /// Picks the best destination for `unit`.
    ///
    /// Falls back to the unit's own position with a zero score when no cell
    /// qualifies. Ties go to the earliest cell in scan order. When the sink
    /// is enabled it receives the diagnostic value of every scored cell,
    /// keyed by the unit's position.
    pub fn best_target(
        &self,
        unit: &Unit,
        sink: &mut dyn DiagnosticsSink,
    ) -> Result<TargetChoice, ScoringError> {
        let situation = self.situation(unit)?;
        tracing::debug!(
            unit = %unit.id,
            pos = %unit.pos,
            cluster = ?situation.current_cluster,
            miners = situation.units_on_current,
            capacity = situation.capacity,
            consider_other = situation.crowding.consider_other,
            must_switch = situation.crowding.must_switch,
            "assessing targets"
        );

        let mut matrix = sink
            .enabled()
            .then(|| Grid::filled(self.ctx.width(), self.ctx.height(), 0.0));

        let mut best = TargetChoice {
            position: unit.pos,
            score: TargetScore::ZERO,
            cluster: self.ctx.registry.find(unit.pos),
        };

        for cell in self.ctx.cells() {
            let Some(score) = self.score_cell(unit, cell, &situation)? else {
                continue;
            };
            if let Some(m) = matrix.as_mut() {
                m.set(cell, score.diagnostic_value());
            }
            if score.is_better_than(&best.score) {
                best = TargetChoice {
                    position: cell,
                    score,
                    cluster: self.ctx.registry.find(cell),
                };
            }
        }

        if let Some(m) = matrix {
            sink.record(unit.pos, m);
        }

        if best.is_stay(unit) {
            tracing::debug!(unit = %unit.id, "no eligible target, staying put");
        } else {
            tracing::debug!(
                unit = %unit.id,
                target = %best.position,
                bonus = best.score.target_bonus,
                "selected target"
            );
        }
        Ok(best)
    }
}
