//! Engine error type.

use super::action::PlayerAction;
use super::card::Card;

/// Why an action was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidActionReason {
    /// The card is not in the hand.
    NotInHand,
    /// The pile index is out of range.
    NoSuchPile,
    /// The pile's face card does not accept the card.
    RejectedByPile,
}

impl std::fmt::Display for InvalidActionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidActionReason::NotInHand => write!(f, "card is not in hand"),
            InvalidActionReason::NoSuchPile => write!(f, "pile does not exist"),
            InvalidActionReason::RejectedByPile => write!(f, "pile does not accept the card"),
        }
    }
}

/// Errors raised while evaluating a single game.
///
/// None of these are fatal to a process running many games; the
/// simulation driver records the failure and moves on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameError {
    /// A strategy submitted an illegal action.
    InvalidAction {
        action: PlayerAction,
        reason: InvalidActionReason,
    },

    /// Tried to draw from an empty deck.
    EmptyDeck,

    /// The solver proved that no sequence of turns wins from this state.
    NoWinningContinuation,

    /// The solver ran out of its node budget before reaching a verdict.
    SearchLimitReached { nodes: u64 },

    /// A turn was requested from a state that has no valid turn.
    NoValidTurn,

    /// A pile was built without even its seed card.
    EmptyPile,

    /// A card shows up in more than one place, or twice in one place.
    DuplicateCard { card: Card },

    /// A game was stopped at its turn cap with a valid turn still open.
    TurnLimitReached { turns: usize },
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::InvalidAction { action, reason } => {
                write!(f, "invalid action {action}: {reason}")
            }
            GameError::EmptyDeck => write!(f, "cannot draw from an empty deck"),
            GameError::NoWinningContinuation => write!(f, "no winning continuation exists"),
            GameError::SearchLimitReached { nodes } => {
                write!(f, "search stopped after {nodes} nodes without a verdict")
            }
            GameError::NoValidTurn => write!(f, "no valid turn from this state"),
            GameError::EmptyPile => write!(f, "a pile needs at least its seed card"),
            GameError::DuplicateCard { card } => write!(f, "card {card} appears more than once"),
            GameError::TurnLimitReached { turns } => {
                write!(f, "game stopped at the {turns}-turn cap")
            }
        }
    }
}

impl std::error::Error for GameError {}
