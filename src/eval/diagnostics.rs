//! Optional recording of full score matrices for visualisation.

use std::collections::HashMap;

use crate::board::{Cell, Grid};

/// Receives the per-cell diagnostic score grid of each scoring call.
pub trait DiagnosticsSink {
    /// When false the scorer skips building the matrix entirely.
    fn enabled(&self) -> bool {
        true
    }

    /// Stores the matrix computed for a unit that started at `origin`.
    fn record(&mut self, origin: Cell, scores: Grid<f64>);
}

/// Discards everything. The production default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDiagnostics;

impl DiagnosticsSink for NoDiagnostics {
    fn enabled(&self) -> bool {
        false
    }

    fn record(&mut self, _origin: Cell, _scores: Grid<f64>) {}
}

/// Keeps the most recent score matrix per unit start position.
#[derive(Debug, Clone, Default)]
pub struct ScoreMatrixRecorder {
    matrices: HashMap<Cell, Grid<f64>>,
}

impl ScoreMatrixRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, origin: Cell) -> Option<&Grid<f64>> {
        self.matrices.get(&origin)
    }

    pub fn len(&self) -> usize {
        self.matrices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrices.is_empty()
    }

    /// Recorded origins in scan order.
    pub fn origins(&self) -> Vec<Cell> {
        let mut origins: Vec<Cell> = self.matrices.keys().copied().collect();
        origins.sort();
        origins
    }
}

impl DiagnosticsSink for ScoreMatrixRecorder {
    fn record(&mut self, origin: Cell, scores: Grid<f64>) {
        self.matrices.insert(origin, scores);
    }
}
