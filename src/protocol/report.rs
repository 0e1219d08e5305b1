//! JSON output of a planned turn.

use std::io::Write;

use serde::Serialize;

use crate::planner::Assignment;

/// Every unit's decision for one turn, in planning order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnReport {
    /// False when units were scored independently and nothing was committed.
    pub committed: bool,
    pub assignments: Vec<Assignment>,
}

impl TurnReport {
    pub fn new(committed: bool, assignments: Vec<Assignment>) -> Self {
        TurnReport {
            committed,
            assignments,
        }
    }

    /// Writes the report as pretty-printed JSON followed by a newline.
    pub fn write_json<W: Write>(&self, out: &mut W) -> Result<(), serde_json::Error> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out).map_err(serde_json::Error::io)
    }
}
