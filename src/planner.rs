//! Turn orchestration.
//!
//! Runs the target scorer for each unit and commits every decision before
//! the next unit is scored, so later units see earlier claims. Also offers
//! a parallel, commit-free pass that scores all units against one snapshot.

use rayon::prelude::*;
use serde::Serialize;

use crate::board::{Cell, TurnContext, Unit};
use crate::cluster::ClusterId;
use crate::config::ScoringConfig;
use crate::eval::{
    DiagnosticsSink, NoDiagnostics, ScoringError, TargetChoice, TargetScore, TargetScorer,
};
use crate::path::PathDistance;

/// A committed decision for one unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    pub unit_id: String,
    pub from: Cell,
    pub target: Cell,
    pub cluster: Option<ClusterId>,
    pub score: TargetScore,
    /// No cell qualified; the unit holds its position and claims nothing.
    pub staying: bool,
}

impl Assignment {
    /// Wraps a scorer decision for `unit`.
    pub fn new(unit: &Unit, choice: &TargetChoice) -> Self {
        Assignment {
            unit_id: unit.id.clone(),
            from: unit.pos,
            target: choice.position,
            cluster: choice.cluster,
            score: choice.score,
            staying: choice.is_stay(unit),
        }
    }
}

/// Records `assignment` in the context: the target cell becomes taken and
/// the unit counts as heading for the target's cluster.
pub fn commit(ctx: &mut TurnContext, assignment: &Assignment) {
    if assignment.staying {
        return;
    }
    ctx.occupancy.targeted.insert(assignment.target);
    if let Some(cluster) = assignment.cluster {
        ctx.assignments
            .assign_locating(cluster, assignment.unit_id.as_str());
    }
}

/// Plans every unit in order, committing each choice before the next unit
/// is scored.
pub fn plan_turn<P: PathDistance + ?Sized>(
    ctx: &mut TurnContext,
    units: &[Unit],
    pathing: &P,
    config: &ScoringConfig,
    sink: &mut dyn DiagnosticsSink,
) -> Result<Vec<Assignment>, ScoringError> {
    let mut plan = Vec::with_capacity(units.len());
    for unit in units {
        let choice = TargetScorer::new(ctx, pathing, config).best_target(unit, sink)?;
        let assignment = Assignment::new(unit, &choice);
        commit(ctx, &assignment);
        plan.push(assignment);
    }

    let moving = plan.iter().filter(|a| !a.staying).count();
    tracing::info!(
        units = plan.len(),
        moving,
        staying = plan.len() - moving,
        "planned turn"
    );
    Ok(plan)
}

/// Scores every unit against the same snapshot in parallel. Nothing is
/// committed, so two units may pick the same cell. Results keep the order
/// of `units`.
pub fn score_units<P: PathDistance + Sync + ?Sized>(
    ctx: &TurnContext,
    units: &[Unit],
    pathing: &P,
    config: &ScoringConfig,
) -> Result<Vec<TargetChoice>, ScoringError> {
    let scorer = TargetScorer::new(ctx, pathing, config);
    units
        .par_iter()
        .map(|unit| scorer.best_target(unit, &mut NoDiagnostics))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Occupancy, ResourceSets, ResourceType, StaticFields};
    use crate::cluster::{ClusterAssignments, ClusterBuilder};
    use crate::eval::ScoreMatrixRecorder;
    use crate::path::Manhattan;

    /// A 6×1 strip with two separate wood tiles at x=1 and x=4.
    fn strip() -> TurnContext {
        let mut builder = ClusterBuilder::new(6, 1);
        let mut sets = ResourceSets::default();
        let mut fields = StaticFields::zeroed(6, 1);
        for x in [1, 4] {
            let cell = Cell::new(x, 0);
            builder.add_tile(cell, ResourceType::Wood, 100.0, 1.0).unwrap();
            sets.insert(cell, ResourceType::Wood);
            fields.local_yield.set(cell, 20.0);
        }
        TurnContext::new(
            6,
            1,
            fields,
            Occupancy::default(),
            sets,
            builder.build(),
            ClusterAssignments::new(),
        )
        .unwrap()
    }

    #[test]
    fn later_units_avoid_claimed_cells() {
        let mut ctx = strip();
        let units = vec![
            Unit::new("a", Cell::new(0, 0), 10.0),
            Unit::new("b", Cell::new(0, 0), 10.0),
            Unit::new("c", Cell::new(0, 0), 10.0),
        ];
        let cfg = ScoringConfig::default();
        let plan = plan_turn(&mut ctx, &units, &Manhattan, &cfg, &mut NoDiagnostics).unwrap();
        assert_eq!(plan[0].target, Cell::new(1, 0));
        assert_eq!(plan[1].target, Cell::new(4, 0));
        assert!(plan[2].staying);
        assert_eq!(plan[2].target, Cell::new(0, 0));

        assert!(ctx.occupancy.targeted.contains(&Cell::new(1, 0)));
        assert!(ctx.occupancy.targeted.contains(&Cell::new(4, 0)));
        let first = ctx.registry.find(Cell::new(1, 0)).unwrap();
        assert_eq!(ctx.assignments.units_locating_or_targeting(first), 1);
    }

    #[test]
    fn parallel_scoring_commits_nothing() {
        let ctx = strip();
        let units = vec![
            Unit::new("a", Cell::new(0, 0), 10.0),
            Unit::new("b", Cell::new(5, 0), 10.0),
        ];
        let choices = score_units(&ctx, &units, &Manhattan, &ScoringConfig::default()).unwrap();
        assert_eq!(choices[0].position, Cell::new(1, 0));
        assert_eq!(choices[1].position, Cell::new(4, 0));
        assert!(ctx.occupancy.targeted.is_empty());
    }

    #[test]
    fn parallel_matches_sequential_scorer() {
        let ctx = strip();
        let cfg = ScoringConfig::default();
        let units: Vec<Unit> = (0..6)
            .map(|x| Unit::new(format!("u{}", x), Cell::new(x, 0), 3.0))
            .collect();
        let parallel = score_units(&ctx, &units, &Manhattan, &cfg).unwrap();
        let scorer = TargetScorer::new(&ctx, &Manhattan, &cfg);
        for (unit, got) in units.iter().zip(parallel.iter()) {
            let want = scorer.best_target(unit, &mut NoDiagnostics).unwrap();
            assert_eq!(*got, want);
        }
    }

    #[test]
    fn sink_sees_every_unit() {
        let mut ctx = strip();
        let units = vec![
            Unit::new("a", Cell::new(0, 0), 10.0),
            Unit::new("b", Cell::new(5, 0), 10.0),
        ];
        let mut rec = ScoreMatrixRecorder::new();
        plan_turn(&mut ctx, &units, &Manhattan, &ScoringConfig::default(), &mut rec).unwrap();
        assert_eq!(rec.origins(), vec![Cell::new(0, 0), Cell::new(5, 0)]);
    }
}
