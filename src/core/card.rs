//! Card values.
//!
//! A card is nothing more than its face value. Playable cards run from
//! `LOWEST_CARD` to `HIGHEST_CARD`; the piles are seeded with the sentinel
//! values `ASCENDING_SEED` (1) and `DESCENDING_SEED` (100), which never
//! appear in the deck.

use serde::{Deserialize, Serialize};

use super::config::{ASCENDING_SEED, DESCENDING_SEED, HIGHEST_CARD, LOWEST_CARD};

/// A single card, identified by its value.
///
/// Equality, ordering and hashing are all by value, so a hand kept in
/// ascending order is simply a sorted sequence of `Card`s.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Card(pub u8);

impl Card {
    /// Create a card with the given value.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Get the face value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Signed distance from `other` to this card (`self - other`).
    #[must_use]
    pub fn delta(self, other: Card) -> i32 {
        i32::from(self.0) - i32::from(other.0)
    }

    /// Check if this card can appear in a deck (not a pile sentinel).
    #[must_use]
    pub fn is_playable(self) -> bool {
        (LOWEST_CARD..=HIGHEST_CARD).contains(&self.0)
    }

    /// Check if this is one of the pile seed values.
    #[must_use]
    pub fn is_sentinel(self) -> bool {
        self.0 == ASCENDING_SEED || self.0 == DESCENDING_SEED
    }

    /// Iterate over every playable card in ascending order.
    pub fn all_playable() -> impl Iterator<Item = Card> {
        (LOWEST_CARD..=HIGHEST_CARD).map(Card)
    }
}

impl From<u8> for Card {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
