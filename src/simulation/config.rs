//! Simulation run configuration.

use serde::{Deserialize, Serialize};

use crate::core::config::DECK_SIZE;

/// How much a run reports through the `log` facade.
///
/// Levels are cumulative: `WinLoss` also reports the aggregate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ReportLevel {
    /// Nothing at all.
    Nothing,
    /// Aggregate statistics at the end of the run.
    #[default]
    Aggregate,
    /// One line per finished game.
    WinLoss,
    /// Every turn and the state after it.
    EachTurn,
}

impl ReportLevel {
    /// Most verbose log level the driver emits at this setting.
    pub fn level_filter(self) -> log::LevelFilter {
        match self {
            Self::Nothing => log::LevelFilter::Off,
            Self::Aggregate => log::LevelFilter::Info,
            Self::WinLoss => log::LevelFilter::Debug,
            Self::EachTurn => log::LevelFilter::Trace,
        }
    }
}

/// Configuration for a batch of games.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of games to play.
    pub num_games: usize,

    /// Base seed. Game `i` is dealt from `seed + i` (wrapping).
    /// `None` = every game gets a fresh random seed.
    pub seed: Option<u64>,

    /// Turn cap per game. A turn places at least two cards, so the
    /// default is never reached by a legal game.
    pub max_turns: usize,

    /// What to report.
    pub report: ReportLevel,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_games: 10,
            seed: None,
            max_turns: DECK_SIZE,
            report: ReportLevel::default(),
        }
    }
}

impl SimulationConfig {
    /// Create a new simulation config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of games.
    pub fn with_num_games(mut self, num_games: usize) -> Self {
        self.num_games = num_games;
        self
    }

    /// Set the base seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the turn cap per game.
    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Set the report level.
    pub fn with_report(mut self, report: ReportLevel) -> Self {
        self.report = report;
        self
    }

    /// Seed for game `index`, if the run is seeded.
    pub fn seed_for(&self, index: usize) -> Option<u64> {
        self.seed.map(|seed| seed.wrapping_add(index as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimulationConfig::default();
        assert_eq!(config.num_games, 10);
        assert_eq!(config.seed, None);
        assert_eq!(config.max_turns, 98);
        assert_eq!(config.report, ReportLevel::Aggregate);
    }

    #[test]
    fn test_seed_for() {
        let config = SimulationConfig::new().with_seed(u64::MAX);
        assert_eq!(config.seed_for(0), Some(u64::MAX));
        assert_eq!(config.seed_for(1), Some(0));

        assert_eq!(SimulationConfig::new().seed_for(3), None);
    }

    #[test]
    fn test_report_levels_are_ordered() {
        assert!(ReportLevel::Nothing < ReportLevel::Aggregate);
        assert!(ReportLevel::WinLoss < ReportLevel::EachTurn);
        assert_eq!(ReportLevel::EachTurn.level_filter(), log::LevelFilter::Trace);
        assert_eq!(ReportLevel::Nothing.level_filter(), log::LevelFilter::Off);
    }

    #[test]
    fn test_serialization() {
        let config = SimulationConfig::new()
            .with_num_games(3)
            .with_report(ReportLevel::WinLoss);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: SimulationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.num_games, 3);
        assert_eq!(deserialized.report, ReportLevel::WinLoss);
    }
}
