//! Player actions and turns.
//!
//! A `PlayerAction` places one held card on one pile. A `PlayerTurn` is an
//! ordered list of actions applied in sequence before the end-of-turn
//! refill draw.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::card::Card;
use super::config::HAND_SIZE;

/// Intent to place `chosen_card` on the pile at `chosen_pile_index`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerAction {
    /// Card from the hand.
    pub chosen_card: Card,
    /// Target pile index (0..PILE_COUNT).
    pub chosen_pile_index: usize,
}

impl PlayerAction {
    /// Create a new action.
    #[must_use]
    pub fn new(chosen_card: Card, chosen_pile_index: usize) -> Self {
        Self {
            chosen_card,
            chosen_pile_index,
        }
    }
}

impl std::fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> pile {}", self.chosen_card, self.chosen_pile_index)
    }
}

/// An ordered sequence of actions taken as one turn.
///
/// A turn never holds more plays than there are cards in a hand, so the
/// actions live inline in a `SmallVec` sized to `HAND_SIZE`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerTurn {
    /// Actions in the order they are applied.
    pub actions: SmallVec<[PlayerAction; HAND_SIZE]>,
}

impl PlayerTurn {
    /// Create an empty turn.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a turn from a slice of actions.
    #[must_use]
    pub fn from_actions(actions: &[PlayerAction]) -> Self {
        Self {
            actions: SmallVec::from_slice(actions),
        }
    }

    /// Append an action.
    pub fn push(&mut self, action: PlayerAction) {
        self.actions.push(action);
    }

    /// Number of plays in this turn.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Iterate over the actions in order.
    pub fn iter(&self) -> impl Iterator<Item = &PlayerAction> {
        self.actions.iter()
    }
}

impl FromIterator<PlayerAction> for PlayerTurn {
    fn from_iter<I: IntoIterator<Item = PlayerAction>>(iter: I) -> Self {
        Self {
            actions: iter.into_iter().collect(),
        }
    }
}

impl std::fmt::Display for PlayerTurn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for action in &self.actions {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{action}")?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_new() {
        let action = PlayerAction::new(Card::new(7), 2);

        assert_eq!(action.chosen_card, Card::new(7));
        assert_eq!(action.chosen_pile_index, 2);
    }

    #[test]
    fn test_turn_push() {
        let mut turn = PlayerTurn::new();
        assert!(turn.is_empty());

        turn.push(PlayerAction::new(Card::new(2), 0));
        turn.push(PlayerAction::new(Card::new(3), 0));

        assert_eq!(turn.len(), 2);
        assert_eq!(turn.actions[1].chosen_card, Card::new(3));
    }

    #[test]
    fn test_turn_equality() {
        let a = PlayerAction::new(Card::new(2), 0);
        let b = PlayerAction::new(Card::new(3), 1);

        let t1 = PlayerTurn::from_actions(&[a, b]);
        let t2: PlayerTurn = [a, b].into_iter().collect();
        let t3 = PlayerTurn::from_actions(&[b, a]);

        assert_eq!(t1, t2);
        assert_ne!(t1, t3);
    }

    #[test]
    fn test_turn_display() {
        let turn = PlayerTurn::from_actions(&[
            PlayerAction::new(Card::new(2), 0),
            PlayerAction::new(Card::new(99), 3),
        ]);

        assert_eq!(turn.to_string(), "2 -> pile 0, 99 -> pile 3");
    }

    #[test]
    fn test_turn_serialization() {
        let turn = PlayerTurn::from_actions(&[PlayerAction::new(Card::new(12), 1)]);
        let json = serde_json::to_string(&turn).unwrap();
        let deserialized: PlayerTurn = serde_json::from_str(&json).unwrap();

        assert_eq!(turn, deserialized);
    }
}
