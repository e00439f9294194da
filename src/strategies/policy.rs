//! Turn-choosing strategies.
//!
//! A strategy sees the whole state (deck order included) and returns the
//! turn to play. The simulation driver only asks while
//! `has_one_valid_turn` holds.
//!
//! - `Greedy`: two plays, each the one that uses up the least room
//! - `GreedyTracksTens`: greedy, then every backward jump still open
//! - `JumpFirst`: takes and sets up backward jumps before greedy play
//! - `RandomPlay`: uniformly random legal turn of two plays
//! - `BacktrackSolver`: the exhaustive oracle

use crate::core::{GameError, GameRng, GameState, PlayerAction, PlayerTurn};
use crate::rules::{take_action, take_actions};
use crate::search::BacktrackSolver;

use super::ordering::{
    has_follow_up, is_backward_jump, ActionOrdering, ByNormalizedChange, JumpsFirst, SetsUpJump,
};

// =============================================================================
// Strategy trait
// =============================================================================

/// Policy that picks a turn for a state.
pub trait Strategy {
    /// Choose the turn to play from `state`.
    ///
    /// Returns `GameError::NoValidTurn` if no turn exists.
    fn choose_turn(&mut self, state: &GameState) -> Result<PlayerTurn, GameError>;

    /// Short name used in logs and reports.
    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> Strategy for F
where
    F: FnMut(&GameState) -> Result<PlayerTurn, GameError>,
{
    fn choose_turn(&mut self, state: &GameState) -> Result<PlayerTurn, GameError> {
        self(state)
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Two plays ranked by `ordering`. The first must leave a second open.
fn two_plays<O: ActionOrdering>(state: &GameState, ordering: &O) -> Result<PlayerTurn, GameError> {
    let first = ordering
        .best(
            state,
            state.valid_actions().filter(|a| has_follow_up(state, a)),
        )
        .ok_or(GameError::NoValidTurn)?;

    let next = take_action(state, &first)?;
    let second = ordering
        .best(&next, next.valid_actions())
        .ok_or(GameError::NoValidTurn)?;

    Ok(PlayerTurn::from_actions(&[first, second]))
}

/// Extend `turn` with backward jumps for as long as one is open.
fn chase_jumps(state: &GameState, mut turn: PlayerTurn) -> Result<PlayerTurn, GameError> {
    let mut current = take_actions(state, turn.iter())?;
    loop {
        let Some(jump) = current
            .valid_actions()
            .find(|a| is_backward_jump(&current, a))
        else {
            break;
        };
        current = take_action(&current, &jump)?;
        turn.push(jump);
    }
    Ok(turn)
}

// =============================================================================
// Heuristic strategies
// =============================================================================

/// Plays the two cards that move their piles the least.
#[derive(Clone, Copy, Debug, Default)]
pub struct Greedy;

impl Strategy for Greedy {
    fn choose_turn(&mut self, state: &GameState) -> Result<PlayerTurn, GameError> {
        two_plays(state, &ByNormalizedChange)
    }

    fn name(&self) -> &str {
        "greedy"
    }
}

/// Greedy, then keeps playing backward jumps.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyTracksTens;

impl Strategy for GreedyTracksTens {
    fn choose_turn(&mut self, state: &GameState) -> Result<PlayerTurn, GameError> {
        let turn = two_plays(state, &ByNormalizedChange)?;
        chase_jumps(state, turn)
    }

    fn name(&self) -> &str {
        "greedy_tracks_tens"
    }
}

/// Prefers backward jumps, then plays that open one, then greedy play.
/// Chases any jumps left open after the second play.
#[derive(Clone, Copy, Debug, Default)]
pub struct JumpFirst;

impl Strategy for JumpFirst {
    fn choose_turn(&mut self, state: &GameState) -> Result<PlayerTurn, GameError> {
        let ordering = JumpsFirst.then(SetsUpJump).then(ByNormalizedChange);
        let turn = two_plays(state, &ordering)?;
        chase_jumps(state, turn)
    }

    fn name(&self) -> &str {
        "jump_first"
    }
}

/// Uniformly random first play among those with a follow-up, then a
/// uniformly random second play.
#[derive(Clone, Debug)]
pub struct RandomPlay {
    rng: GameRng,
}

impl RandomPlay {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: GameRng::from_entropy(),
        }
    }

    fn pick(&mut self, actions: &[PlayerAction]) -> Result<PlayerAction, GameError> {
        self.rng.choose(actions).copied().ok_or(GameError::NoValidTurn)
    }
}

impl Strategy for RandomPlay {
    fn choose_turn(&mut self, state: &GameState) -> Result<PlayerTurn, GameError> {
        let openers: Vec<_> = state
            .valid_actions()
            .filter(|a| has_follow_up(state, a))
            .collect();
        let first = self.pick(&openers)?;

        let next = take_action(state, &first)?;
        let second = self.pick(&next.all_valid_actions())?;

        Ok(PlayerTurn::from_actions(&[first, second]))
    }

    fn name(&self) -> &str {
        "random"
    }
}

impl Strategy for BacktrackSolver {
    fn choose_turn(&mut self, state: &GameState) -> Result<PlayerTurn, GameError> {
        self.backtrack_solve(state)
    }

    fn name(&self) -> &str {
        "backtrack_solver"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Card, CardPile, Direction};
    use crate::rules::{initial_piles, initial_state, take_turn};
    use crate::search::{Fallback, SolverConfig};

    fn cards(values: &[u8]) -> Vec<Card> {
        values.iter().copied().map(Card::new).collect()
    }

    fn act(card: u8, pile: usize) -> PlayerAction {
        PlayerAction::new(Card::new(card), pile)
    }

    fn state_with_faces(faces: [u8; 4], hand: &[u8]) -> GameState {
        let piles = [
            CardPile::with_cards(Direction::Ascending, cards(&[1, faces[0]])),
            CardPile::with_cards(Direction::Ascending, cards(&[1, faces[1]])),
            CardPile::with_cards(Direction::Descending, cards(&[100, faces[2]])),
            CardPile::with_cards(Direction::Descending, cards(&[100, faces[3]])),
        ];
        GameState::new(piles, cards(hand), Vec::<Card>::new())
    }

    fn blocked() -> GameState {
        state_with_faces([99, 99, 2, 2], &[50, 51])
    }

    #[test]
    fn test_greedy_plays_smallest_moves() {
        let s = GameState::new(initial_piles(), cards(&[2, 3, 50, 97, 98]), Vec::<Card>::new());
        let turn = Greedy.choose_turn(&s).unwrap();
        assert_eq!(turn, PlayerTurn::from_actions(&[act(2, 0), act(3, 0)]));
    }

    #[test]
    fn test_tracks_tens_chases_jump() {
        let s = state_with_faces([30, 40, 80, 60], &[22, 31, 32]);

        let greedy = Greedy.choose_turn(&s).unwrap();
        assert_eq!(greedy, PlayerTurn::from_actions(&[act(31, 0), act(32, 0)]));

        let tens = GreedyTracksTens.choose_turn(&s).unwrap();
        assert_eq!(
            tens,
            PlayerTurn::from_actions(&[act(31, 0), act(32, 0), act(22, 0)])
        );
    }

    #[test]
    fn test_jump_first_sets_up_jump() {
        let s = state_with_faces([30, 40, 80, 60], &[31, 35, 45]);
        let turn = JumpFirst.choose_turn(&s).unwrap();
        assert_eq!(turn, PlayerTurn::from_actions(&[act(45, 1), act(35, 1)]));
    }

    #[test]
    fn test_blocked_state_has_no_turn() {
        let s = blocked();
        assert_eq!(Greedy.choose_turn(&s), Err(GameError::NoValidTurn));
        assert_eq!(GreedyTracksTens.choose_turn(&s), Err(GameError::NoValidTurn));
        assert_eq!(JumpFirst.choose_turn(&s), Err(GameError::NoValidTurn));
        assert_eq!(RandomPlay::new(1).choose_turn(&s), Err(GameError::NoValidTurn));
    }

    #[test]
    fn test_turns_are_legal_on_real_deals() {
        let mut strategies: Vec<Box<dyn Strategy>> = vec![
            Box::new(Greedy),
            Box::new(GreedyTracksTens),
            Box::new(JumpFirst),
            Box::new(RandomPlay::new(3)),
        ];

        for seed in 0..5 {
            let s = initial_state(Some(seed));
            for strategy in &mut strategies {
                let turn = strategy.choose_turn(&s).unwrap();
                assert!(turn.len() >= 2, "{} played {turn}", strategy.name());
                assert!(take_turn(&s, &turn).is_ok());
            }
        }
    }

    #[test]
    fn test_random_is_seeded() {
        let s = initial_state(Some(11));
        let a = RandomPlay::new(5).choose_turn(&s).unwrap();
        let b = RandomPlay::new(5).choose_turn(&s).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_closure_strategy() {
        let mut calls = 0;
        let mut strategy = |state: &GameState| {
            calls += 1;
            Greedy.choose_turn(state)
        };

        let s = initial_state(Some(2));
        assert!(strategy.choose_turn(&s).is_ok());
        assert_eq!(strategy.name(), "custom");
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_solver_strategy() {
        let s = GameState::new(initial_piles(), cards(&[2, 3]), Vec::<Card>::new());
        let mut solver = BacktrackSolver::new(SolverConfig::new().with_fallback(Fallback::FirstTurn));

        assert_eq!(solver.name(), "backtrack_solver");
        let turn = solver.choose_turn(&s).unwrap();
        assert!(take_turn(&s, &turn).unwrap().has_won());
    }
}
