//! Core types: cards, piles, actions, state, RNG, rule constants, errors.
//!
//! Everything here is a plain value. Transitions that build new states
//! live in `rules`; search over those transitions lives in `search`.

pub mod card;
pub mod pile;
pub mod action;
pub mod state;
pub mod rng;
pub mod config;
pub mod error;

pub use card::Card;
pub use pile::{placement_is_valid, CardPile, Direction};
pub use action::{PlayerAction, PlayerTurn};
pub use state::GameState;
pub use rng::{fresh_seed, GameRng};
pub use error::{GameError, InvalidActionReason};
