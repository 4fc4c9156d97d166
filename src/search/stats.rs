//! Search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics collected during one search call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Nodes visited, terminal and interior.
    pub nodes: u64,

    /// Terminal evaluations performed.
    pub terminals: u64,

    /// Probes answered from the transposition table.
    pub table_hits: u64,

    /// Entries written to the transposition table.
    pub table_stores: u64,

    /// (A, B) candidate-team combinations searched at the root.
    pub combinations: u32,

    /// Total time spent searching (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Visited nodes per second.
    #[must_use]
    pub fn nodes_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.nodes as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }

    /// Share of visited nodes answered by the table.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        if self.nodes == 0 {
            0.0
        } else {
            self.table_hits as f64 / self.nodes as f64
        }
    }
}
