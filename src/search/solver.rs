//! Backtracking solver.
//!
//! An oracle that knows the deck order and searches whole games for a
//! sequence of turns that places every card. It is an upper bound on what
//! any real strategy could achieve, not a realistic player.
//!
//! ## Algorithm
//!
//! Depth-first over turns with an explicit stack of frames, each frame
//! holding a state, its enumerated turns and the index of the next turn to
//! try. Trying a turn applies it (refill draw included) and pushes the
//! child; a frame with no turns left is popped. The search ends when a
//! child has won or the stack empties.
//!
//! ## Memo tables
//!
//! - `wins`: for every state on a found winning line, the turn taken from it.
//! - `losses`: every state whose frame was popped after trying all turns.
//!
//! A state fixes its own future (the deck order is part of it), so both
//! tables are exact. They live as long as the solver and only grow; call
//! `clear_cache` or use a fresh solver per game to bound memory. The
//! solver is not shared between threads; run one per thread or put it
//! behind a lock.

use std::ops::ControlFlow;
use std::time::Instant;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::core::{GameError, GameState, PlayerTurn};
use crate::rules::take_turn;

use super::config::{Fallback, SolverConfig};
use super::stats::SolverStats;
use super::turns::{first_valid_turn, try_for_each_valid_turn};

/// One level of the search stack.
struct Frame {
    state: GameState,
    turns: Vec<PlayerTurn>,
    next: usize,
}

impl Frame {
    /// Enumerate the turns of `state`, charging each one to `budget`.
    fn build(state: GameState, budget: &mut Budget) -> Result<Self, GameError> {
        let mut turns = Vec::new();
        let flow = try_for_each_valid_turn(&state, |turn, _| {
            if budget.exhausted() {
                return ControlFlow::Break(());
            }
            budget.used += 1;
            turns.push(turn.clone());
            ControlFlow::Continue(())
        });

        if flow.is_break() {
            return Err(GameError::SearchLimitReached { nodes: budget.used });
        }
        Ok(Self {
            state,
            turns,
            next: 0,
        })
    }

    /// Turn most recently tried from this frame.
    fn chosen(&self) -> Option<&PlayerTurn> {
        self.next.checked_sub(1).and_then(|i| self.turns.get(i))
    }
}

/// Enumerated turns allowed in one solve.
struct Budget {
    used: u64,
    limit: Option<u64>,
}

impl Budget {
    fn exhausted(&self) -> bool {
        self.limit.is_some_and(|limit| self.used >= limit)
    }
}

/// Exhaustive solver with memoization that persists across calls.
#[derive(Debug, Default)]
pub struct BacktrackSolver {
    config: SolverConfig,
    wins: FxHashMap<GameState, PlayerTurn>,
    losses: FxHashSet<GameState>,
    stats: SolverStats,
}

impl BacktrackSolver {
    /// Create a solver with the given configuration and empty memo tables.
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Find the turn to play from `state` on some winning line.
    ///
    /// Memoized states answer without searching. On a proven loss the
    /// result depends on `SolverConfig::fallback`: either
    /// `GameError::NoWinningContinuation`, or the first valid turn.
    pub fn backtrack_solve(&mut self, state: &GameState) -> Result<PlayerTurn, GameError> {
        if let Some(turn) = self.wins.get(state) {
            self.stats.solves += 1;
            self.stats.cache_hits += 1;
            return Ok(turn.clone());
        }

        match self.solve_line(state) {
            Ok(line) => line
                .into_iter()
                .next()
                .ok_or(GameError::NoWinningContinuation),
            Err(GameError::NoWinningContinuation) if self.config.fallback == Fallback::FirstTurn => {
                log::debug!("no winning line, falling back to the first valid turn");
                first_valid_turn(state).ok_or(GameError::NoValidTurn)
            }
            Err(e) => Err(e),
        }
    }

    /// Find a complete winning sequence of turns from `state`.
    ///
    /// Returns an empty line if `state` has already won.
    pub fn solve_line(&mut self, state: &GameState) -> Result<Vec<PlayerTurn>, GameError> {
        self.stats.solves += 1;

        if state.has_won() {
            return Ok(Vec::new());
        }
        if let Some(line) = self.cached_line(state) {
            self.stats.cache_hits += 1;
            return Ok(line);
        }
        if self.losses.contains(state) {
            self.stats.cache_hits += 1;
            return Err(GameError::NoWinningContinuation);
        }

        let start = Instant::now();
        let result = self.search(state);
        self.stats.time_us += start.elapsed().as_micros() as u64;

        match result {
            Ok(()) => {
                let line = self
                    .cached_line(state)
                    .ok_or(GameError::NoWinningContinuation)?;
                log::debug!(
                    "found winning line of {} turns ({} nodes, {} cached states)",
                    line.len(),
                    self.stats.nodes_expanded,
                    self.wins.len()
                );
                Ok(line)
            }
            Err(e) => {
                log::debug!("solve failed: {e} ({} proven losses)", self.losses.len());
                Err(e)
            }
        }
    }

    /// Explicit-stack depth-first search. On success the winning line is
    /// recorded in `wins`.
    fn search(&mut self, root: &GameState) -> Result<(), GameError> {
        let mut budget = Budget {
            used: 0,
            limit: self.config.max_nodes,
        };
        let result = self.explore(root, &mut budget);
        self.stats.turns_enumerated += budget.used;
        result
    }

    fn explore(&mut self, root: &GameState, budget: &mut Budget) -> Result<(), GameError> {
        let mut stack = vec![Frame::build(root.clone(), budget)?];

        loop {
            let Some(frame) = stack.last_mut() else {
                return Err(GameError::NoWinningContinuation);
            };

            let Some(turn) = frame.turns.get(frame.next).cloned() else {
                if let Some(exhausted) = stack.pop() {
                    self.losses.insert(exhausted.state);
                }
                self.stats.backtracks += 1;
                continue;
            };

            frame.next += 1;
            let child = take_turn(&frame.state, &turn)?;
            self.stats.nodes_expanded += 1;

            if self.losses.contains(&child) {
                self.stats.pruned += 1;
                continue;
            }

            if child.has_won() || self.wins.contains_key(&child) {
                self.record(&stack);
                return Ok(());
            }

            stack.push(Frame::build(child, budget)?);
            self.stats.max_depth = self.stats.max_depth.max(stack.len() - 1);
        }
    }

    /// Memoize the chosen turn of every frame on the stack.
    fn record(&mut self, stack: &[Frame]) {
        for frame in stack {
            if let Some(turn) = frame.chosen() {
                self.wins.insert(frame.state.clone(), turn.clone());
            }
        }
    }

    /// Replay the memo from `state` to a win, if it leads to one.
    fn cached_line(&self, state: &GameState) -> Option<Vec<PlayerTurn>> {
        let mut line = Vec::new();
        let mut current = state.clone();
        while !current.has_won() {
            let turn = self.wins.get(&current)?;
            current = take_turn(&current, turn).ok()?;
            line.push(turn.clone());
        }
        Some(line)
    }

    /// Check whether `state` is already known to be lost.
    #[must_use]
    pub fn is_proven_loss(&self, state: &GameState) -> bool {
        self.losses.contains(state)
    }

    /// Check whether `state` has a memoized winning turn.
    #[must_use]
    pub fn is_proven_win(&self, state: &GameState) -> bool {
        self.wins.contains_key(state)
    }

    /// Number of memoized states (wins plus losses).
    #[must_use]
    pub fn cache_len(&self) -> usize {
        self.wins.len() + self.losses.len()
    }

    /// Drop both memo tables.
    pub fn clear_cache(&mut self) {
        self.wins.clear();
        self.losses.clear();
    }

    /// Get solver statistics.
    #[must_use]
    pub fn stats(&self) -> &SolverStats {
        &self.stats
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }
}
