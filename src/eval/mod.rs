//! Position evaluation.
//!
//! Scores a game state from the maximizing (Good) side's perspective using
//! handcrafted features: living counts, preserved health, damage dealt,
//! attack opportunities, and approach positioning.

pub(crate) mod heuristic;

pub use heuristic::{evaluate, BLOCKED_PATH_PENALTY};
