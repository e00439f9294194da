//! Game setup: deck permutation, fresh piles and the opening hand.
//!
//! This is the only place randomness enters a game. The deck is a
//! permutation of 2..=99 produced by tagging every card with a random key
//! from a seeded `GameRng` and sorting by key, so the same seed always
//! deals the same game.

use crate::core::config::{ASCENDING_PILES, PILE_COUNT};
use crate::core::{fresh_seed, Card, CardPile, GameRng, GameState};

use super::engine::draw_cards;

/// Deal a full deck.
///
/// With `None` a fresh high-entropy seed is used. The last card of the
/// returned deck is drawn first.
#[must_use]
pub fn initial_deck(seed: Option<u64>) -> Vec<Card> {
    let mut rng = GameRng::new(seed.unwrap_or_else(fresh_seed));

    let mut keyed: Vec<(u64, Card)> = Card::all_playable()
        .map(|card| (rng.next_key(), card))
        .collect();
    keyed.sort_unstable();

    keyed.into_iter().map(|(_, card)| card).collect()
}

/// The four starting piles: two ascending from 1, then two descending from 100.
#[must_use]
pub fn initial_piles() -> [CardPile; PILE_COUNT] {
    std::array::from_fn(|index| {
        if index < ASCENDING_PILES {
            CardPile::ascending()
        } else {
            CardPile::descending()
        }
    })
}

/// Deal a new game and draw the opening hand.
#[must_use]
pub fn initial_state(seed: Option<u64>) -> GameState {
    let state = GameState::new(initial_piles(), std::iter::empty(), initial_deck(seed));
    draw_cards(&state)
}
