//! Search and planning.
//!
//! Depth-limited adversarial search over joint actions: alpha-beta minimax
//! with heuristic move ordering, returning the best joint action for the
//! faction to move.

pub mod alphabeta;

pub use alphabeta::{search, SearchError, SearchResult};
