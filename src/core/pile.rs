//! Discard piles and the placement rule.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::card::Card;
use super::config::{ASCENDING_SEED, DESCENDING_SEED, JUMP_DISTANCE};
use super::error::GameError;

/// Direction a pile climbs in. Fixed when the pile is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Accepts higher cards (seeded with 1).
    Ascending,
    /// Accepts lower cards (seeded with 100).
    Descending,
}

impl Direction {
    /// Glyph used when rendering a pile.
    #[must_use]
    pub fn glyph(self) -> char {
        match self {
            Direction::Ascending => '^',
            Direction::Descending => 'v',
        }
    }
}

/// A discard pile: the full history of plays plus its direction.
///
/// The last card is the face card. Piles are never empty; they start
/// with their seed card and only ever grow through legal plays.
///
/// Backed by `im::Vector`, so cloning a pile (and therefore a whole
/// game state) shares structure instead of copying.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PileParts")]
pub struct CardPile {
    cards: Vector<Card>,
    direction: Direction,
}

impl CardPile {
    /// Create a fresh ascending pile seeded with 1.
    #[must_use]
    pub fn ascending() -> Self {
        Self::with_cards(Direction::Ascending, [Card::new(ASCENDING_SEED)])
    }

    /// Create a fresh descending pile seeded with 100.
    #[must_use]
    pub fn descending() -> Self {
        Self::with_cards(Direction::Descending, [Card::new(DESCENDING_SEED)])
    }

    /// Create a pile with an explicit history (oldest first).
    ///
    /// Used to set up positions directly.
    ///
    /// # Panics
    ///
    /// Panics on an empty history. Use [`try_with_cards`](Self::try_with_cards)
    /// for histories that come from outside the program.
    #[must_use]
    pub fn with_cards(direction: Direction, cards: impl IntoIterator<Item = Card>) -> Self {
        let cards: Vector<Card> = cards.into_iter().collect();
        assert!(!cards.is_empty(), "A pile needs at least its seed card");
        Self { cards, direction }
    }

    /// Fallible form of [`with_cards`](Self::with_cards).
    ///
    /// Fails with `GameError::EmptyPile` on an empty history.
    pub fn try_with_cards(
        direction: Direction,
        cards: impl IntoIterator<Item = Card>,
    ) -> Result<Self, GameError> {
        let cards: Vector<Card> = cards.into_iter().collect();
        if cards.is_empty() {
            return Err(GameError::EmptyPile);
        }
        Ok(Self { cards, direction })
    }

    /// The top card, the only one that matters for legality.
    #[must_use]
    pub fn face_card(&self) -> Card {
        // Non-empty by construction.
        self.cards[self.cards.len() - 1]
    }

    /// Pile direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn is_ascending(&self) -> bool {
        self.direction == Direction::Ascending
    }

    #[must_use]
    pub fn is_descending(&self) -> bool {
        self.direction == Direction::Descending
    }

    /// Full play history, oldest first.
    #[must_use]
    pub fn cards(&self) -> &Vector<Card> {
        &self.cards
    }

    /// Number of cards on the pile, seed included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Always false: every constructor, deserialization included, rejects
    /// an empty history.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Check whether `card` may be placed on this pile.
    ///
    /// Legal when the card moves in the pile's direction, or when it is
    /// exactly `JUMP_DISTANCE` away from the face card in either direction.
    #[must_use]
    pub fn placement_is_valid(&self, card: Card) -> bool {
        let delta = card.delta(self.face_card());
        match self.direction {
            Direction::Ascending if delta > 0 => true,
            Direction::Descending if delta < 0 => true,
            _ => delta.abs() == JUMP_DISTANCE,
        }
    }

    /// Cards from `hand` that this pile accepts, in hand order.
    pub fn valid_cards<'a>(&'a self, hand: &'a Vector<Card>) -> impl Iterator<Item = Card> + 'a {
        hand.iter().copied().filter(move |&c| self.placement_is_valid(c))
    }

    /// Return a new pile with `card` on top. Does not check legality.
    #[must_use]
    pub(crate) fn with_card_on_top(&self, card: Card) -> Self {
        let mut cards = self.cards.clone();
        cards.push_back(card);
        Self {
            cards,
            direction: self.direction,
        }
    }
}

/// Serialized shape of a pile, checked on the way in.
#[derive(Deserialize)]
struct PileParts {
    cards: Vector<Card>,
    direction: Direction,
}

impl TryFrom<PileParts> for CardPile {
    type Error = GameError;

    fn try_from(parts: PileParts) -> Result<Self, Self::Error> {
        CardPile::try_with_cards(parts.direction, parts.cards)
    }
}

/// Free-function form of [`CardPile::placement_is_valid`].
#[must_use]
pub fn placement_is_valid(pile: &CardPile, card: Card) -> bool {
    pile.placement_is_valid(card)
}

impl std::fmt::Display for CardPile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[ {} {} ]", self.face_card(), self.direction.glyph())
    }
}
