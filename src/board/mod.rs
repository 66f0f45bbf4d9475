//! Board representation and game-state types.
//!
//! Contains the core data structures for the grid, obstacles, units,
//! per-unit actions, and the overall game state.

pub mod action;
pub mod grid;
pub mod state;
pub mod unit;

pub use action::{Direction, JointAction, UnitAction};
pub use grid::{line_crosses_obstacle, Grid, Obstacle, Pos};
pub use state::{Board, GameState, StateError, MAX_SQUAD_SIZE};
pub use unit::{Faction, Unit, UnitId};
