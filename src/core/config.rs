//! Rule constants.
//!
//! The engine plays exactly one rule set: four piles (two climbing from 1,
//! two falling from 100), a hand of eight, cards 2 through 99 and the
//! backward jump of ten. These are fixed, so they live here as constants
//! rather than in a runtime configuration object.

/// Number of cards a player refills to at the end of each turn.
pub const HAND_SIZE: usize = 8;

/// Number of discard piles.
pub const PILE_COUNT: usize = 4;

/// Number of ascending piles. They come first in pile order.
pub const ASCENDING_PILES: usize = 2;

/// A play exactly this far from a pile's face card is legal in either direction.
pub const JUMP_DISTANCE: i32 = 10;

/// Minimum number of plays that make up a turn.
///
/// Used both by the end-of-game check (`has_one_valid_turn`) and as the
/// length floor of turn enumeration; the two must agree.
pub const MIN_PLAYS_PER_TURN: usize = 2;

/// Lowest playable card.
pub const LOWEST_CARD: u8 = 2;

/// Highest playable card.
pub const HIGHEST_CARD: u8 = 99;

/// Face card of a fresh ascending pile.
pub const ASCENDING_SEED: u8 = 1;

/// Face card of a fresh descending pile.
pub const DESCENDING_SEED: u8 = 100;

/// Number of playable cards in a full deck.
pub const DECK_SIZE: usize = (HIGHEST_CARD - LOWEST_CARD + 1) as usize;

/// Cards across hand, deck and piles at any point of a full game
/// (the deck plus one seed card per pile).
pub const TOTAL_CARDS: usize = DECK_SIZE + PILE_COUNT;
