//! Solver statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics collected by a `BacktrackSolver`.
///
/// Counters accumulate across solves until `reset` is called.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SolverStats {
    /// Calls to `solve_line` (and everything built on it).
    pub solves: u32,

    /// Solves answered straight from the memo table.
    pub cache_hits: u32,

    /// Turns produced by enumeration (what `max_nodes` limits).
    pub turns_enumerated: u64,

    /// Child states produced by applying a turn.
    pub nodes_expanded: u64,

    /// Frames popped after every turn was tried.
    pub backtracks: u64,

    /// Children skipped because they were already proven lost.
    pub pruned: u64,

    /// Deepest stack reached (turns from the root state).
    pub max_depth: usize,

    /// Total time spent searching (microseconds).
    pub time_us: u64,
}

impl SolverStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Nodes expanded per second of search.
    #[must_use]
    pub fn nodes_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.nodes_expanded as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }

    /// Fraction of solves answered from the memo table.
    #[must_use]
    pub fn cache_hit_rate(&self) -> f64 {
        if self.solves == 0 {
            0.0
        } else {
            f64::from(self.cache_hits) / f64::from(self.solves)
        }
    }
}
