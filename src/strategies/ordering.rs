//! Comparator-based action orderings.
//!
//! An ordering ranks two actions against the state they are played from.
//! Smaller is better. Orderings compose with `then`, and ties that survive
//! every comparator keep `all_valid_actions` order.

use std::cmp::Ordering;

use crate::core::config::JUMP_DISTANCE;
use crate::core::{GameState, PlayerAction};

/// Ranking of candidate actions from one state.
pub trait ActionOrdering {
    /// Compare two actions that are both valid from `state`.
    fn compare(&self, state: &GameState, a: &PlayerAction, b: &PlayerAction) -> Ordering;

    /// Break ties of `self` with `next`.
    fn then<O: ActionOrdering>(self, next: O) -> Then<Self, O>
    where
        Self: Sized,
    {
        Then { first: self, next }
    }

    /// Sort `actions` best-first. The sort is stable.
    fn sort(&self, state: &GameState, actions: &mut [PlayerAction]) {
        actions.sort_by(|a, b| self.compare(state, a, b));
    }

    /// The best action, preferring the earliest on ties.
    fn best<I>(&self, state: &GameState, actions: I) -> Option<PlayerAction>
    where
        I: IntoIterator<Item = PlayerAction>,
    {
        actions
            .into_iter()
            .min_by(|a, b| self.compare(state, a, b))
    }
}

/// Two orderings applied lexicographically.
#[derive(Clone, Copy, Debug, Default)]
pub struct Then<A, B> {
    first: A,
    next: B,
}

impl<A: ActionOrdering, B: ActionOrdering> ActionOrdering for Then<A, B> {
    fn compare(&self, state: &GameState, a: &PlayerAction, b: &PlayerAction) -> Ordering {
        self.first
            .compare(state, a, b)
            .then_with(|| self.next.compare(state, a, b))
    }
}

/// Smallest move of the face card in the pile's own direction first.
///
/// A backward jump scores -10, so it already beats every forward play.
#[derive(Clone, Copy, Debug, Default)]
pub struct ByNormalizedChange;

impl ActionOrdering for ByNormalizedChange {
    fn compare(&self, state: &GameState, a: &PlayerAction, b: &PlayerAction) -> Ordering {
        let key = |action: &PlayerAction| state.change_normalized(action).unwrap_or(i32::MAX);
        key(a).cmp(&key(b))
    }
}

/// Backward jumps before anything else.
#[derive(Clone, Copy, Debug, Default)]
pub struct JumpsFirst;

impl ActionOrdering for JumpsFirst {
    fn compare(&self, state: &GameState, a: &PlayerAction, b: &PlayerAction) -> Ordering {
        is_backward_jump(state, b).cmp(&is_backward_jump(state, a))
    }
}

/// Actions that leave a playable card behind before those that don't.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeepsFollowUp;

impl ActionOrdering for KeepsFollowUp {
    fn compare(&self, state: &GameState, a: &PlayerAction, b: &PlayerAction) -> Ordering {
        has_follow_up(state, b).cmp(&has_follow_up(state, a))
    }
}

/// Plays after which a backward jump is open before those without one.
#[derive(Clone, Copy, Debug, Default)]
pub struct SetsUpJump;

impl ActionOrdering for SetsUpJump {
    fn compare(&self, state: &GameState, a: &PlayerAction, b: &PlayerAction) -> Ordering {
        sets_up_jump(state, b).cmp(&sets_up_jump(state, a))
    }
}

/// Whether `action` moves its pile's face card back by exactly the jump distance.
pub fn is_backward_jump(state: &GameState, action: &PlayerAction) -> bool {
    state.change_normalized(action) == Some(-JUMP_DISTANCE)
}

/// Whether a card can still be played after `action`.
pub fn has_follow_up(state: &GameState, action: &PlayerAction) -> bool {
    state.is_valid_action(action)
        && state
            .with_play(action)
            .is_ok_and(|next| next.has_one_valid_action())
}

/// Whether a backward jump is available right after `action`.
pub fn sets_up_jump(state: &GameState, action: &PlayerAction) -> bool {
    if !state.is_valid_action(action) {
        return false;
    }
    let Ok(next) = state.with_play(action) else {
        return false;
    };
    let found = next.valid_actions().any(|a| is_backward_jump(&next, &a));
    found
}
