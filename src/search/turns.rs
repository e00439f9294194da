//! Turn enumeration.
//!
//! Depth-first expansion of every chain of legal plays from a state, with
//! no draws in between. Each chain of at least `MIN_PLAYS_PER_TURN` plays
//! is a turn; shorter prefixes are only followed, never emitted. Longer
//! turns are emitted alongside their own prefixes, since a solver may
//! prefer to stop early.
//!
//! Recursion depth is bounded by the hand size, so plain recursion is fine.
//! The number of turns is not: a fresh eight-card hand has tens of millions
//! of them. Callers that need a bound use `try_for_each_valid_turn`.

use std::ops::ControlFlow;

use crate::core::config::MIN_PLAYS_PER_TURN;
use crate::core::{GameState, PlayerTurn};

/// Every valid turn from `state`, in depth-first order.
///
/// Order follows `all_valid_actions` at each level, so a turn is always
/// listed right before its own extensions.
#[must_use]
pub fn all_valid_turns(state: &GameState) -> Vec<PlayerTurn> {
    let mut turns = Vec::new();
    for_each_valid_turn(state, |turn, _| turns.push(turn.clone()));
    turns
}

/// Call `visit` with every valid turn and the position right after its
/// last play (before the refill draw).
///
/// Avoids materialising the whole turn list when the caller only needs
/// to scan it.
pub fn for_each_valid_turn<F>(state: &GameState, mut visit: F)
where
    F: FnMut(&PlayerTurn, &GameState),
{
    let _ = try_for_each_valid_turn(state, |turn, after| {
        visit(turn, after);
        ControlFlow::Continue(())
    });
}

/// Like `for_each_valid_turn`, but stops as soon as `visit` breaks.
///
/// Returns `ControlFlow::Break` if enumeration was cut short.
pub fn try_for_each_valid_turn<F>(state: &GameState, mut visit: F) -> ControlFlow<()>
where
    F: FnMut(&PlayerTurn, &GameState) -> ControlFlow<()>,
{
    let mut prefix = PlayerTurn::new();
    extend(state, &mut prefix, &mut visit)
}

/// Number of valid turns from `state`.
#[must_use]
pub fn count_valid_turns(state: &GameState) -> usize {
    let mut count = 0;
    for_each_valid_turn(state, |_, _| count += 1);
    count
}

/// The first turn `all_valid_turns` would list, found without
/// enumerating the rest.
#[must_use]
pub fn first_valid_turn(state: &GameState) -> Option<PlayerTurn> {
    let mut prefix = PlayerTurn::new();
    first_from(state, &mut prefix).then_some(prefix)
}

fn first_from(state: &GameState, prefix: &mut PlayerTurn) -> bool {
    for action in state.valid_actions() {
        let Ok(child) = state.with_play(&action) else {
            continue;
        };
        prefix.push(action);
        if prefix.len() >= MIN_PLAYS_PER_TURN {
            return true;
        }
        if first_from(&child, prefix) {
            return true;
        }
        prefix.actions.pop();
    }
    false
}

fn extend<F>(state: &GameState, prefix: &mut PlayerTurn, visit: &mut F) -> ControlFlow<()>
where
    F: FnMut(&PlayerTurn, &GameState) -> ControlFlow<()>,
{
    for action in state.valid_actions() {
        let Ok(child) = state.with_play(&action) else {
            continue;
        };
        prefix.push(action);

        if prefix.len() >= MIN_PLAYS_PER_TURN && visit(&*prefix, &child).is_break() {
            return ControlFlow::Break(());
        }
        if extend(&child, prefix, visit).is_break() {
            return ControlFlow::Break(());
        }

        prefix.actions.pop();
    }
    ControlFlow::Continue(())
}
