//! Game rules: setup and state transitions.
//!
//! - `setup`: seeded deck, starting piles, opening hand
//! - `engine`: play a card, draw, play a whole turn
//!
//! Every function here is pure. A strategy or search can hold on to any
//! number of earlier states and keep using them.

pub mod engine;
pub mod setup;

pub use engine::{draw_card, draw_cards, take_action, take_actions, take_turn};
pub use setup::{initial_deck, initial_piles, initial_state};
