//! Snapshot input and report output.
//!
//! The binary reads a `TurnSnapshot` as JSON and writes a `TurnReport`.
//! `random_snapshot` produces seeded synthetic inputs.

pub mod random;
pub mod report;
pub mod snapshot;

pub use random::random_snapshot;
pub use report::TurnReport;
pub use snapshot::{ResourceTile, SnapshotError, TurnSnapshot};
