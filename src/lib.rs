//! # the-game
//!
//! Rules engine, turn enumerator and backtracking solver for the patience
//! card game *The Game*.
//!
//! ## Rules
//!
//! Cards 2..=99 are shuffled into a deck. Four piles start the game: two
//! ascending from 1 and two descending from 100. The player holds up to
//! eight cards and must play at least two per turn. A card goes on an
//! ascending pile if it is higher than the face card, on a descending pile
//! if it is lower, and on either kind if it differs from the face card by
//! exactly ten. The hand refills after each turn. The game is won once
//! every card is placed and lost when no turn is left.
//!
//! ## Design Principles
//!
//! 1. **Immutable States**: Every transition returns a new `GameState`.
//!    Storage is `im-rs`, so clones are O(1) and the solver can hold many
//!    states at once.
//!
//! 2. **Deterministic Deals**: The only randomness is the seeded deck
//!    permutation. A state also fixes its own future, which is what makes
//!    memoizing by state exact.
//!
//! 3. **Errors, Not Panics**: Illegal actions, empty decks and lost
//!    positions come back as `GameError`.
//!
//! ## Modules
//!
//! - `core`: Cards, piles, actions, state, RNG, rule constants, errors
//! - `rules`: Setup and state transitions
//! - `search`: Turn enumeration and the backtracking solver
//! - `strategies`: Heuristic and random strategies over the public API
//! - `simulation`: Batch driver and win/loss statistics

pub mod core;
pub mod rules;
pub mod search;
pub mod simulation;
pub mod strategies;

// Re-export commonly used types
pub use crate::core::{
    placement_is_valid, Card, CardPile, Direction, GameError, GameRng, GameState,
    InvalidActionReason, PlayerAction, PlayerTurn,
};

pub use crate::rules::{
    draw_card, draw_cards, initial_deck, initial_piles, initial_state, take_action, take_turn,
};

pub use crate::search::{all_valid_turns, BacktrackSolver, Fallback, SolverConfig, SolverStats};

pub use crate::strategies::{Greedy, GreedyTracksTens, JumpFirst, RandomPlay, Strategy};

pub use crate::simulation::{AggregateStats, ReportLevel, SimulationConfig, Simulator};
