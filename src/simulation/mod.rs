//! Batch simulation of strategies over seeded deals.
//!
//! ## Usage
//!
//! ```rust
//! use the_game::simulation::{ReportLevel, SimulationConfig, Simulator};
//! use the_game::strategies::Greedy;
//!
//! let config = SimulationConfig::new()
//!     .with_num_games(5)
//!     .with_seed(1)
//!     .with_report(ReportLevel::Nothing);
//!
//! let stats = Simulator::new(config).run(&mut Greedy);
//! assert_eq!(stats.total_games, 5);
//! println!("{stats}");
//! ```

pub mod config;
pub mod driver;
pub mod stats;

pub use config::{ReportLevel, SimulationConfig};
pub use driver::Simulator;
pub use stats::{AggregateStats, GameOutcome, GameRecord};
