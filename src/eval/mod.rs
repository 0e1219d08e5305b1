//! Target evaluation.
//!
//! Decides where a unit should head this turn: the crowding policy picks
//! between staying on the current cluster and competing for another, and
//! the target scorer ranks every eligible cell with a lexicographic score.

pub mod crowding;
pub mod diagnostics;
pub mod score;
pub mod target;

pub use crowding::CrowdingDecision;
pub use diagnostics::{DiagnosticsSink, NoDiagnostics, ScoreMatrixRecorder};
pub use score::TargetScore;
pub use target::{ScoringError, TargetChoice, TargetScorer, UnitSituation};
