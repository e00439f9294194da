//! Backtracking solver configuration.

use serde::{Deserialize, Serialize};

/// What the solver hands back when it proves a state lost.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fallback {
    /// Report `GameError::NoWinningContinuation`.
    #[default]
    Error,
    /// Return the first valid turn anyway, so a simulation can play on.
    FirstTurn,
}

/// Solver configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Behaviour on a proven loss.
    pub fallback: Fallback,

    /// Maximum turns to enumerate per solve (`None` = unlimited).
    ///
    /// Every enumerated turn is a candidate child, so this bounds both
    /// time and memory. Hitting the limit yields
    /// `GameError::SearchLimitReached`. Memo tables stay valid: only fully
    /// explored states are recorded as lost. Without a limit, the first
    /// frame of a fresh deal alone holds tens of millions of turns.
    pub max_nodes: Option<u64>,
}

impl SolverConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fallback policy.
    pub fn with_fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = fallback;
        self
    }

    /// Set a node budget per solve.
    pub fn with_max_nodes(mut self, max_nodes: u64) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }
}
