//! Per-game records and batch statistics.

use serde::{Deserialize, Serialize};

use crate::core::{GameError, GameState};

/// How a game ended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    /// Every card was placed.
    Won,
    /// No valid turn was left with cards still to place.
    Lost,
    /// The strategy or the engine returned an error, or the turn cap was hit.
    Failed { error: String },
}

/// Summary of one simulated game.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameRecord {
    /// Position of the game in its batch.
    pub index: usize,

    /// Seed the deck was dealt from.
    pub seed: u64,

    /// Turns played.
    pub turns: usize,

    /// Cards still in hand or deck at the end.
    pub cards_left: usize,

    pub outcome: GameOutcome,
}

impl GameRecord {
    /// Record a game that reached `end_state` without error.
    pub fn finished(index: usize, seed: u64, turns: usize, end_state: &GameState) -> Self {
        let outcome = if end_state.has_won() {
            GameOutcome::Won
        } else {
            GameOutcome::Lost
        };
        Self {
            index,
            seed,
            turns,
            cards_left: end_state.cards_left(),
            outcome,
        }
    }

    /// Record a game aborted by `error` at `last_state`.
    pub fn failed(
        index: usize,
        seed: u64,
        turns: usize,
        last_state: &GameState,
        error: &GameError,
    ) -> Self {
        Self {
            index,
            seed,
            turns,
            cards_left: last_state.cards_left(),
            outcome: GameOutcome::Failed {
                error: error.to_string(),
            },
        }
    }

    pub fn is_win(&self) -> bool {
        self.outcome == GameOutcome::Won
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, GameOutcome::Failed { .. })
    }
}

/// Win/loss statistics over a batch of games.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    pub total_games: usize,
    pub total_wins: usize,
    /// Games that ended without a valid turn. Failures are not losses.
    pub total_losses: usize,
    pub total_failures: usize,
    /// Mean of `cards_left` over every game.
    pub mean_cards_left: f64,
}

impl AggregateStats {
    /// Compute statistics from finished game records.
    pub fn from_records(records: &[GameRecord]) -> Self {
        let total_games = records.len();
        let total_wins = records.iter().filter(|r| r.is_win()).count();
        let total_failures = records.iter().filter(|r| r.is_failure()).count();
        let cards_left: usize = records.iter().map(|r| r.cards_left).sum();

        Self {
            total_games,
            total_wins,
            total_losses: total_games - total_wins - total_failures,
            total_failures,
            mean_cards_left: if total_games == 0 {
                0.0
            } else {
                cards_left as f64 / total_games as f64
            },
        }
    }

    /// Fraction of games won. Zero for an empty batch.
    pub fn win_ratio(&self) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            self.total_wins as f64 / self.total_games as f64
        }
    }
}

impl std::fmt::Display for AggregateStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "total games: {}", self.total_games)?;
        writeln!(f, "wins: {}", self.total_wins)?;
        writeln!(f, "losses: {}", self.total_losses)?;
        if self.total_failures > 0 {
            writeln!(f, "failures: {}", self.total_failures)?;
        }
        writeln!(f, "win ratio: {}", self.win_ratio())?;
        write!(f, "mean cards left: {:.2}", self.mean_cards_left)
    }
}
