//! Game state: piles, hand and deck.
//!
//! ## GameState
//!
//! An immutable snapshot of a game:
//! - Four discard piles (two ascending, two descending in a standard setup)
//! - The player's hand, kept sorted ascending
//! - The remaining deck, drawn from the back
//!
//! States are values. Transitions (see `rules`) build new states and never
//! touch the old ones, and equality/hashing are structural so states can
//! key the solver's memo tables.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::action::PlayerAction;
use super::card::Card;
use super::config::PILE_COUNT;
use super::error::{GameError, InvalidActionReason};
use super::pile::CardPile;

/// Complete game state.
///
/// Uses `im` persistent vectors for O(1) cloning: the backtracking solver
/// holds a whole stack of related states at once, and they share most of
/// their structure.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "StateParts")]
pub struct GameState {
    piles: [CardPile; PILE_COUNT],
    hand: Vector<Card>,
    /// Top of the deck is the back of the vector.
    deck: Vector<Card>,
}

impl GameState {
    /// Create a state from its parts.
    ///
    /// The hand is sorted; the deck keeps the given order (last card is
    /// drawn first). No card-count invariant is enforced, so partial
    /// positions can be built for analysis and tests.
    #[must_use]
    pub fn new(
        piles: [CardPile; PILE_COUNT],
        hand: impl IntoIterator<Item = Card>,
        deck: impl IntoIterator<Item = Card>,
    ) -> Self {
        let mut hand: Vector<Card> = hand.into_iter().collect();
        hand.sort();
        Self {
            piles,
            hand,
            deck: deck.into_iter().collect(),
        }
    }

    /// Create a state from its parts, rejecting repeated cards.
    ///
    /// Like [`new`](Self::new), but fails with `GameError::DuplicateCard`
    /// if a card sits in two places (seed cards at the bottom of each
    /// pile excepted). Deserialized states go through here.
    pub fn try_new(
        piles: [CardPile; PILE_COUNT],
        hand: impl IntoIterator<Item = Card>,
        deck: impl IntoIterator<Item = Card>,
    ) -> Result<Self, GameError> {
        let state = Self::new(piles, hand, deck);

        let mut seen = FxHashSet::default();
        let played = state.piles.iter().flat_map(|pile| pile.cards().iter().skip(1));
        for &card in state.hand.iter().chain(state.deck.iter()).chain(played) {
            if !seen.insert(card) {
                return Err(GameError::DuplicateCard { card });
            }
        }
        Ok(state)
    }

    /// Build a state without re-sorting the hand. Callers keep it sorted.
    pub(crate) fn from_sorted(
        piles: [CardPile; PILE_COUNT],
        hand: Vector<Card>,
        deck: Vector<Card>,
    ) -> Self {
        Self { piles, hand, deck }
    }

    // === Accessors ===

    #[must_use]
    pub fn piles(&self) -> &[CardPile; PILE_COUNT] {
        &self.piles
    }

    /// Get a pile by index.
    #[must_use]
    pub fn pile(&self, index: usize) -> Option<&CardPile> {
        self.piles.get(index)
    }

    /// Cards in hand, ascending.
    #[must_use]
    pub fn hand(&self) -> &Vector<Card> {
        &self.hand
    }

    /// Remaining deck; the last element is drawn next.
    #[must_use]
    pub fn deck(&self) -> &Vector<Card> {
        &self.deck
    }

    /// Total cards across hand, deck and piles (seed cards included).
    ///
    /// Equals `TOTAL_CARDS` for every state reached from `initial_state`.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.hand.len() + self.deck.len() + self.piles.iter().map(CardPile::len).sum::<usize>()
    }

    /// Cards not yet placed on a pile.
    #[must_use]
    pub fn cards_left(&self) -> usize {
        self.hand.len() + self.deck.len()
    }

    // === Legality ===

    /// Check an action against this state.
    pub fn validate(&self, action: &PlayerAction) -> Result<(), GameError> {
        let reason = if self.hand.binary_search(&action.chosen_card).is_err() {
            Some(InvalidActionReason::NotInHand)
        } else {
            match self.pile(action.chosen_pile_index) {
                None => Some(InvalidActionReason::NoSuchPile),
                Some(pile) if !pile.placement_is_valid(action.chosen_card) => {
                    Some(InvalidActionReason::RejectedByPile)
                }
                Some(_) => None,
            }
        };

        match reason {
            Some(reason) => Err(GameError::InvalidAction {
                action: *action,
                reason,
            }),
            None => Ok(()),
        }
    }

    /// Check whether an action is legal here.
    #[must_use]
    pub fn is_valid_action(&self, action: &PlayerAction) -> bool {
        self.validate(action).is_ok()
    }

    /// Every legal action, hand order outer and pile index inner.
    #[must_use]
    pub fn all_valid_actions(&self) -> Vec<PlayerAction> {
        self.valid_actions().collect()
    }

    /// Lazy form of [`all_valid_actions`](Self::all_valid_actions).
    pub fn valid_actions(&self) -> impl Iterator<Item = PlayerAction> + '_ {
        self.hand.iter().flat_map(move |&card| {
            self.piles
                .iter()
                .enumerate()
                .filter(move |(_, pile)| pile.placement_is_valid(card))
                .map(move |(index, _)| PlayerAction::new(card, index))
        })
    }

    #[must_use]
    pub fn has_one_valid_action(&self) -> bool {
        self.valid_actions().next().is_some()
    }

    /// True if some legal action leaves a state with another legal action.
    ///
    /// A turn needs at least two plays, so a single playable card with
    /// nothing to follow it does not count.
    #[must_use]
    pub fn has_one_valid_turn(&self) -> bool {
        self.valid_actions()
            .any(|action| self.with_play(&action).is_ok_and(|next| next.has_one_valid_action()))
    }

    /// Won once every card has been placed.
    #[must_use]
    pub fn has_won(&self) -> bool {
        self.hand.is_empty() && self.deck.is_empty()
    }

    // === Action metrics ===

    /// Change of the target pile's face value if `action` were taken.
    ///
    /// Returns `None` for an out-of-range pile index.
    #[must_use]
    pub fn change(&self, action: &PlayerAction) -> Option<i32> {
        self.pile(action.chosen_pile_index)
            .map(|pile| action.chosen_card.delta(pile.face_card()))
    }

    /// `change` with the sign flipped for descending piles, so that
    /// positive always means "used up room" and -10 is a backward jump.
    #[must_use]
    pub fn change_normalized(&self, action: &PlayerAction) -> Option<i32> {
        let pile = self.pile(action.chosen_pile_index)?;
        let change = action.chosen_card.delta(pile.face_card());
        Some(if pile.is_descending() { -change } else { change })
    }

    // === Transitions ===

    /// Move a card from the hand onto a pile without checking the pile's
    /// placement rule.
    ///
    /// Still fails with `GameError::InvalidAction` if the card is not in
    /// hand or the pile does not exist.
    pub(crate) fn with_play(&self, action: &PlayerAction) -> Result<GameState, GameError> {
        let invalid = |reason| GameError::InvalidAction {
            action: *action,
            reason,
        };

        let mut hand = self.hand.clone();
        let pos = hand
            .binary_search(&action.chosen_card)
            .map_err(|_| invalid(InvalidActionReason::NotInHand))?;
        hand.remove(pos);

        let mut piles = self.piles.clone();
        let pile = piles
            .get_mut(action.chosen_pile_index)
            .ok_or_else(|| invalid(InvalidActionReason::NoSuchPile))?;
        *pile = pile.with_card_on_top(action.chosen_card);

        Ok(GameState::from_sorted(piles, hand, self.deck.clone()))
    }
}

/// Serialized shape of a state, checked on the way in.
#[derive(Deserialize)]
struct StateParts {
    piles: [CardPile; PILE_COUNT],
    hand: Vector<Card>,
    deck: Vector<Card>,
}

impl TryFrom<StateParts> for GameState {
    type Error = GameError;

    fn try_from(parts: StateParts) -> Result<Self, Self::Error> {
        GameState::try_new(parts.piles, parts.hand, parts.deck)
    }
}

fn join(cards: impl Iterator<Item = String>, sep: &str) -> String {
    cards.collect::<Vec<_>>().join(sep)
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "hand: | {} |", join(self.hand.iter().map(Card::to_string), " | "))?;
        writeln!(f, "piles: | {} |", join(self.piles.iter().map(CardPile::to_string), " | "))?;
        write!(
            f,
            "deck: {}",
            join(self.deck.iter().rev().take(8).map(Card::to_string), " -> ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pile::Direction;

    fn cards(values: &[u8]) -> Vec<Card> {
        values.iter().copied().map(Card::new).collect()
    }

    fn default_piles() -> [CardPile; PILE_COUNT] {
        [
            CardPile::ascending(),
            CardPile::ascending(),
            CardPile::descending(),
            CardPile::descending(),
        ]
    }

    #[test]
    fn test_new_sorts_hand() {
        let state = GameState::new(default_piles(), cards(&[9, 3, 5]), cards(&[20, 30]));

        let hand: Vec<_> = state.hand().iter().copied().collect();
        assert_eq!(hand, cards(&[3, 5, 9]));

        let deck: Vec<_> = state.deck().iter().copied().collect();
        assert_eq!(deck, cards(&[20, 30]));
    }

    #[test]
    fn test_all_valid_actions_order() {
        let piles = [
            CardPile::with_cards(Direction::Ascending, cards(&[1, 50])),
            CardPile::ascending(),
            CardPile::with_cards(Direction::Descending, cards(&[100, 45])),
            CardPile::descending(),
        ];
        let state = GameState::new(piles, cards(&[40, 60]), cards(&[]));

        let actions = state.all_valid_actions();
        assert_eq!(
            actions,
            vec![
                PlayerAction::new(Card::new(40), 0), // jump back
                PlayerAction::new(Card::new(40), 1),
                PlayerAction::new(Card::new(40), 2),
                PlayerAction::new(Card::new(40), 3),
                PlayerAction::new(Card::new(60), 0),
                PlayerAction::new(Card::new(60), 1),
                PlayerAction::new(Card::new(60), 3),
            ]
        );
    }

    #[test]
    fn test_validate_reasons() {
        let state = GameState::new(default_piles(), cards(&[2, 3]), cards(&[]));

        let not_in_hand = PlayerAction::new(Card::new(4), 0);
        assert_eq!(
            state.validate(&not_in_hand),
            Err(GameError::InvalidAction {
                action: not_in_hand,
                reason: InvalidActionReason::NotInHand,
            })
        );

        let no_pile = PlayerAction::new(Card::new(2), 4);
        assert!(matches!(
            state.validate(&no_pile),
            Err(GameError::InvalidAction {
                reason: InvalidActionReason::NoSuchPile,
                ..
            })
        ));

        assert!(state.is_valid_action(&PlayerAction::new(Card::new(2), 0)));
    }

    #[test]
    fn test_has_one_valid_turn_needs_two_plays() {
        let single = GameState::new(default_piles(), cards(&[2]), cards(&[]));
        assert!(single.has_one_valid_action());
        assert!(!single.has_one_valid_turn());

        let pair = GameState::new(default_piles(), cards(&[2, 3]), cards(&[]));
        assert!(pair.has_one_valid_turn());
    }

    #[test]
    fn test_blocked_state() {
        let piles = [
            CardPile::with_cards(Direction::Ascending, cards(&[1, 99])),
            CardPile::with_cards(Direction::Ascending, cards(&[1, 99])),
            CardPile::with_cards(Direction::Descending, cards(&[100, 2])),
            CardPile::with_cards(Direction::Descending, cards(&[100, 2])),
        ];
        let state = GameState::new(piles, cards(&[50, 51]), cards(&[52]));

        assert!(state.all_valid_actions().is_empty());
        assert!(!state.has_one_valid_action());
        assert!(!state.has_one_valid_turn());
    }

    #[test]
    fn test_has_won() {
        assert!(GameState::new(default_piles(), cards(&[]), cards(&[])).has_won());
        assert!(!GameState::new(default_piles(), cards(&[5]), cards(&[])).has_won());
        assert!(!GameState::new(default_piles(), cards(&[]), cards(&[5])).has_won());
    }

    #[test]
    fn test_change_normalized() {
        let piles = [
            CardPile::with_cards(Direction::Ascending, cards(&[1, 30])),
            CardPile::ascending(),
            CardPile::with_cards(Direction::Descending, cards(&[100, 30])),
            CardPile::descending(),
        ];
        let state = GameState::new(piles, cards(&[20, 40]), cards(&[]));

        let back_up = PlayerAction::new(Card::new(20), 0);
        assert_eq!(state.change(&back_up), Some(-10));
        assert_eq!(state.change_normalized(&back_up), Some(-10));

        let back_down = PlayerAction::new(Card::new(40), 2);
        assert_eq!(state.change(&back_down), Some(10));
        assert_eq!(state.change_normalized(&back_down), Some(-10));

        let forward_down = PlayerAction::new(Card::new(20), 2);
        assert_eq!(state.change_normalized(&forward_down), Some(10));

        assert_eq!(state.change(&PlayerAction::new(Card::new(20), 9)), None);
    }

    #[test]
    fn test_with_play_leaves_original() {
        let state = GameState::new(default_piles(), cards(&[2, 3]), cards(&[4]));
        let before = state.clone();

        let next = state.with_play(&PlayerAction::new(Card::new(2), 0)).unwrap();

        assert_eq!(state, before);
        assert_eq!(next.hand().len(), 1);
        assert_eq!(next.piles()[0].face_card(), Card::new(2));
        assert_eq!(next.deck(), state.deck());
    }

    #[test]
    fn test_with_play_needs_the_card() {
        let state = GameState::new(default_piles(), cards(&[2, 3]), cards(&[4]));

        assert_eq!(
            state.with_play(&PlayerAction::new(Card::new(4), 0)),
            Err(GameError::InvalidAction {
                action: PlayerAction::new(Card::new(4), 0),
                reason: InvalidActionReason::NotInHand,
            })
        );
        assert_eq!(
            state.with_play(&PlayerAction::new(Card::new(2), 7)),
            Err(GameError::InvalidAction {
                action: PlayerAction::new(Card::new(2), 7),
                reason: InvalidActionReason::NoSuchPile,
            })
        );
    }

    #[test]
    fn test_try_new_rejects_duplicates() {
        assert_eq!(
            GameState::try_new(default_piles(), cards(&[2, 3]), cards(&[3])),
            Err(GameError::DuplicateCard { card: Card::new(3) })
        );

        let mut piles = default_piles();
        piles[0] = CardPile::with_cards(Direction::Ascending, cards(&[1, 5]));
        assert_eq!(
            GameState::try_new(piles.clone(), cards(&[5]), Vec::<Card>::new()),
            Err(GameError::DuplicateCard { card: Card::new(5) })
        );

        // Seed cards repeat across piles
        assert!(GameState::try_new(piles, cards(&[2, 3]), cards(&[4])).is_ok());
    }

    #[test]
    fn test_structural_hash() {
        let a = GameState::new(default_piles(), cards(&[3, 2]), cards(&[4]));
        let b = GameState::new(default_piles(), cards(&[2, 3]), cards(&[4]));

        let mut set = FxHashSet::default();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn test_display() {
        let state = GameState::new(default_piles(), cards(&[2, 3]), cards(&[10, 11]));
        let text = state.to_string();

        assert!(text.contains("hand: | 2 | 3 |"));
        assert!(text.contains("[ 1 ^ ] | [ 1 ^ ] | [ 100 v ] | [ 100 v ]"));
        assert!(text.ends_with("deck: 11 -> 10"));
    }

    #[test]
    fn test_serialization() {
        let state = GameState::new(default_piles(), cards(&[2, 3]), cards(&[10]));
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: GameState = serde_json::from_str(&json).unwrap();

        assert_eq!(state, deserialized);
    }

    #[test]
    fn test_deserialization_sorts_the_hand() {
        let mut json = serde_json::to_value(GameState::new(
            default_piles(),
            Vec::<Card>::new(),
            Vec::<Card>::new(),
        ))
        .unwrap();
        json["hand"] = serde_json::json!([9, 3, 5]);

        let state: GameState = serde_json::from_value(json).unwrap();
        assert_eq!(state.hand().iter().map(|c| c.value()).collect::<Vec<_>>(), vec![3, 5, 9]);

        let before = state.card_count();
        let next = state.with_play(&PlayerAction::new(Card::new(9), 0)).unwrap();
        assert_eq!(next.card_count(), before);
        assert!(!next.hand().contains(&Card::new(9)));
    }

    #[test]
    fn test_deserialization_rejects_duplicates() {
        let mut json = serde_json::to_value(GameState::new(
            default_piles(),
            Vec::<Card>::new(),
            Vec::<Card>::new(),
        ))
        .unwrap();
        json["hand"] = serde_json::json!([7, 8]);
        json["deck"] = serde_json::json!([8]);

        let err = serde_json::from_value::<GameState>(json).unwrap_err();
        assert!(err.to_string().contains("card 8 appears more than once"));
    }
}
