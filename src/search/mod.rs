//! Turn enumeration and the backtracking solver.
//!
//! ## Overview
//!
//! - `turns`: every valid turn from a state (two or more plays, no draws)
//! - `solver`: depth-first search over whole games with memo tables
//! - `config`, `stats`: solver knobs and counters
//!
//! ## Usage
//!
//! ```rust
//! use the_game::rules::{initial_state, take_turn};
//! use the_game::search::{BacktrackSolver, SolverConfig};
//!
//! let state = initial_state(Some(42));
//! let mut solver = BacktrackSolver::new(SolverConfig::new().with_max_nodes(10_000));
//!
//! match solver.backtrack_solve(&state) {
//!     Ok(turn) => {
//!         let next = take_turn(&state, &turn).unwrap();
//!         println!("{turn}\n{next}");
//!     }
//!     Err(e) => println!("no line found: {e}"),
//! }
//! ```

pub mod config;
pub mod solver;
pub mod stats;
pub mod turns;

pub use config::{Fallback, SolverConfig};
pub use solver::BacktrackSolver;
pub use stats::SolverStats;
pub use turns::{
    all_valid_turns, count_valid_turns, first_valid_turn, for_each_valid_turn, try_for_each_valid_turn,
};
