//! Strategies that play the game through the public rules API.
//!
//! `ordering` holds the comparators the heuristic strategies rank plays
//! with; `policy` holds the `Strategy` trait and its implementations.

pub mod ordering;
pub mod policy;

pub use ordering::{
    ActionOrdering, ByNormalizedChange, JumpsFirst, KeepsFollowUp, SetsUpJump, Then,
};
pub use policy::{Greedy, GreedyTracksTens, JumpFirst, RandomPlay, Strategy};
