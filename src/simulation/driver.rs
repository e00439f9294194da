//! Simulation loop.
//!
//! Deals seeded games, lets a strategy play each one until no valid turn
//! remains, and aggregates the results.

use crate::core::{fresh_seed, GameError, GameState, PlayerTurn};
use crate::rules::{initial_state, take_turn};
use crate::strategies::Strategy;

use super::config::{ReportLevel, SimulationConfig};
use super::stats::{AggregateStats, GameRecord};

/// Runs batches of games for a strategy.
#[derive(Clone, Debug, Default)]
pub struct Simulator {
    config: SimulationConfig,
}

impl Simulator {
    /// Create a new simulator.
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Play every configured game and aggregate the results.
    pub fn run<S: Strategy + ?Sized>(&self, strategy: &mut S) -> AggregateStats {
        let records = self.play_games(strategy);
        let stats = AggregateStats::from_records(&records);

        if self.config.report >= ReportLevel::Aggregate {
            log::info!(
                "{} won {}/{} games ({:.1}%)",
                strategy.name(),
                stats.total_wins,
                stats.total_games,
                stats.win_ratio() * 100.0
            );
        }
        stats
    }

    /// Play every configured game.
    pub fn play_games<S: Strategy + ?Sized>(&self, strategy: &mut S) -> Vec<GameRecord> {
        (0..self.config.num_games)
            .map(|index| self.play_game(index, &mut *strategy))
            .collect()
    }

    /// Play game `index` of the batch.
    ///
    /// Errors from the strategy or the engine end the game and are
    /// recorded as a failure.
    pub fn play_game<S: Strategy + ?Sized>(&self, index: usize, strategy: &mut S) -> GameRecord {
        let seed = self.config.seed_for(index).unwrap_or_else(fresh_seed);
        let mut state = initial_state(Some(seed));
        let mut turns = 0;

        while state.has_one_valid_turn() {
            if turns >= self.config.max_turns {
                let e = GameError::TurnLimitReached { turns };
                if self.config.report > ReportLevel::Nothing {
                    log::warn!("game #{index} (seed {seed}): {e}");
                }
                return GameRecord::failed(index, seed, turns, &state, &e);
            }

            let step = strategy
                .choose_turn(&state)
                .and_then(|turn| take_turn(&state, &turn).map(|next| (turn, next)));

            match step {
                Ok((turn, next)) => {
                    turns += 1;
                    self.report_turn(index, turns, &turn, &next);
                    state = next;
                }
                Err(e) => {
                    if self.config.report > ReportLevel::Nothing {
                        log::warn!("game #{index} (seed {seed}) failed after {turns} turns: {e}");
                    }
                    return GameRecord::failed(index, seed, turns, &state, &e);
                }
            }
        }

        let record = GameRecord::finished(index, seed, turns, &state);
        if self.config.report >= ReportLevel::WinLoss {
            let verdict = if record.is_win() { "won" } else { "lost" };
            log::debug!(
                "{verdict} game #{index} (seed {seed}, {turns} turns, {} cards left)",
                record.cards_left
            );
        }
        record
    }

    fn report_turn(&self, index: usize, turn_number: usize, turn: &PlayerTurn, next: &GameState) {
        if self.config.report >= ReportLevel::EachTurn {
            log::trace!("game #{index} turn {turn_number}: {turn}\n{next}");
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}
