//! Transition engine.
//!
//! Pure functions from one `GameState` to the next. Inputs are never
//! modified; each result is a fresh value that shares unchanged structure
//! with its parent through `im`.

use crate::core::config::HAND_SIZE;
use crate::core::{GameError, GameState, PlayerAction, PlayerTurn};

/// Play one card.
///
/// Fails with `GameError::InvalidAction` if the card is not in hand, the
/// pile does not exist, or the pile rejects the card. On success the card
/// leaves the hand and lands on top of the pile; the deck is untouched.
pub fn take_action(state: &GameState, action: &PlayerAction) -> Result<GameState, GameError> {
    state.validate(action)?;
    state.with_play(action)
}

/// Draw the top card of the deck into the hand.
///
/// The hand stays sorted. Fails with `GameError::EmptyDeck` when there is
/// nothing to draw.
pub fn draw_card(state: &GameState) -> Result<GameState, GameError> {
    let mut deck = state.deck().clone();
    let card = deck.pop_back().ok_or(GameError::EmptyDeck)?;

    let mut hand = state.hand().clone();
    hand.insert_ord(card);

    Ok(GameState::from_sorted(state.piles().clone(), hand, deck))
}

/// Draw until the hand holds `HAND_SIZE` cards or the deck runs out.
#[must_use]
pub fn draw_cards(state: &GameState) -> GameState {
    let missing = HAND_SIZE.saturating_sub(state.hand().len());
    let count = missing.min(state.deck().len());
    if count == 0 {
        return state.clone();
    }

    let mut deck = state.deck().clone();
    let mut hand = state.hand().clone();
    for _ in 0..count {
        if let Some(card) = deck.pop_back() {
            hand.insert_ord(card);
        }
    }

    GameState::from_sorted(state.piles().clone(), hand, deck)
}

/// Apply every action of `turn` in order, then refill the hand.
///
/// Any illegal action fails the whole turn; the caller never sees a
/// partially applied turn.
pub fn take_turn(state: &GameState, turn: &PlayerTurn) -> Result<GameState, GameError> {
    let mut next = state.clone();
    for action in turn.iter() {
        next = take_action(&next, action)?;
    }
    Ok(draw_cards(&next))
}

/// Apply a sequence of actions without the refill draw.
///
/// This is the in-turn position a strategy reasons about between plays.
pub fn take_actions<'a>(
    state: &GameState,
    actions: impl IntoIterator<Item = &'a PlayerAction>,
) -> Result<GameState, GameError> {
    let mut next = state.clone();
    for action in actions {
        next = take_action(&next, action)?;
    }
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Card, CardPile, InvalidActionReason};

    fn cards(values: impl IntoIterator<Item = u8>) -> Vec<Card> {
        values.into_iter().map(Card::new).collect()
    }

    fn state(hand: impl IntoIterator<Item = u8>, deck: impl IntoIterator<Item = u8>) -> GameState {
        GameState::new(
            [
                CardPile::ascending(),
                CardPile::ascending(),
                CardPile::descending(),
                CardPile::descending(),
            ],
            cards(hand),
            cards(deck),
        )
    }

    fn play(card: u8, pile: usize) -> PlayerAction {
        PlayerAction::new(Card::new(card), pile)
    }

    #[test]
    fn test_take_action() {
        let s = state([2, 3], [4, 5, 6]);
        let next = take_action(&s, &play(2, 0)).unwrap();

        let pile: Vec<_> = next.piles()[0].cards().iter().copied().collect();
        assert_eq!(pile, cards([1, 2]));
        assert_eq!(next.hand().iter().copied().collect::<Vec<_>>(), cards([3]));
        assert_eq!(next.deck(), s.deck());
    }

    #[test]
    fn test_take_action_rejects() {
        let s = state([2, 50], std::iter::empty());
        let next = take_action(&s, &play(50, 2)).unwrap();

        // 50 has already left the hand
        let err = take_action(&next, &play(50, 0)).unwrap_err();
        assert!(matches!(
            err,
            GameError::InvalidAction {
                reason: InvalidActionReason::NotInHand,
                ..
            }
        ));

        // 60 descending pile only takes lower cards or a jump
        let blocked = GameState::new(
            [
                CardPile::ascending(),
                CardPile::ascending(),
                CardPile::with_cards(crate::core::Direction::Descending, cards([100, 60])),
                CardPile::descending(),
            ],
            cards([65]),
            Vec::<Card>::new(),
        );
        let err = take_action(&blocked, &play(65, 2)).unwrap_err();
        assert!(matches!(
            err,
            GameError::InvalidAction {
                reason: InvalidActionReason::RejectedByPile,
                ..
            }
        ));
    }

    #[test]
    fn test_draw_card() {
        let s = state([5, 9], [20, 3]);
        let next = draw_card(&s).unwrap();

        assert_eq!(next.hand().iter().copied().collect::<Vec<_>>(), cards([3, 5, 9]));
        assert_eq!(next.deck().iter().copied().collect::<Vec<_>>(), cards([20]));
    }

    #[test]
    fn test_draw_card_empty_deck() {
        let s = state([5], std::iter::empty());
        assert_eq!(draw_card(&s), Err(GameError::EmptyDeck));
    }

    #[test]
    fn test_draw_cards_fills_to_hand_size() {
        let s = state(std::iter::empty(), 2..=20);
        let next = draw_cards(&s);

        assert_eq!(next.hand().len(), HAND_SIZE);
        assert_eq!(next.hand().iter().copied().collect::<Vec<_>>(), cards(13..=20));
        assert_eq!(next.deck().len(), 19 - HAND_SIZE);
    }

    #[test]
    fn test_draw_cards_stops_at_empty_deck() {
        let s = state([2], [7, 8]);
        let next = draw_cards(&s);

        assert_eq!(next.hand().len(), 3);
        assert!(next.deck().is_empty());
    }

    #[test]
    fn test_take_turn_example() {
        let s = state([2, 3, 4, 5, 6, 7, 89, 99], 10..=18);
        let turn = PlayerTurn::from_actions(&[
            play(2, 0),
            play(3, 1),
            play(6, 1),
            play(99, 2),
            play(89, 2),
        ]);

        let next = take_turn(&s, &turn).unwrap();

        let piles: Vec<Vec<Card>> = next
            .piles()
            .iter()
            .map(|p| p.cards().iter().copied().collect())
            .collect();
        assert_eq!(
            piles,
            vec![cards([1, 2]), cards([1, 3, 6]), cards([100, 99, 89]), cards([100])]
        );
        assert_eq!(
            next.hand().iter().copied().collect::<Vec<_>>(),
            cards([4, 5, 7, 14, 15, 16, 17, 18])
        );
        assert_eq!(next.deck().iter().copied().collect::<Vec<_>>(), cards(10..=13));
    }

    #[test]
    fn test_take_turn_aborts_on_invalid_action() {
        let s = state([2, 3], [10]);
        let turn = PlayerTurn::from_actions(&[play(3, 0), play(2, 0)]);

        let err = take_turn(&s, &turn).unwrap_err();
        assert!(matches!(err, GameError::InvalidAction { .. }));
    }

    #[test]
    fn test_take_actions_skips_draw() {
        let s = state([2, 3], [10]);
        let next = take_actions(&s, &[play(2, 0), play(3, 0)]).unwrap();

        assert!(next.hand().is_empty());
        assert_eq!(next.deck().len(), 1);
    }
}
