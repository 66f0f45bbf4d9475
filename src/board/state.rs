//! Board and game-state snapshots.
//!
//! A `Board` owns every unit and obstacle record plus the grid occupancy; a
//! `GameState` pairs a board with the faction to move and a memoized utility.
//! Successor states are produced by deep-copying the board and mutating the
//! copy, so no state is ever aliased between plies of the search tree.

use std::cell::Cell;

use crate::board::action::{Direction, JointAction, UnitAction};
use crate::board::grid::{Grid, Obstacle};
use crate::board::unit::{Faction, Unit, UnitId};

/// The search supports joint actions over at most this many simultaneously
/// acting units per faction (the pairwise cross product in movegen).
pub const MAX_SQUAD_SIZE: usize = 2;

/// Errors raised when building a game state from unit records.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("faction {faction:?} has {count} living units, at most 2 are supported")]
    SquadTooLarge { faction: Faction, count: usize },
}

/// Owns the grid, the obstacle records, and every unit record.
///
/// Dead units (zero health) stay in `units` so ids remain stable; they are
/// filtered out by the alive queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: Grid,
    obstacles: Vec<Obstacle>,
    units: Vec<Unit>,
    good_roster: Vec<UnitId>,
    bad_roster: Vec<UnitId>,
}

impl Board {
    /// Builds a board from unit and obstacle records, deriving the
    /// per-faction rosters in record order.
    pub fn new(width: i32, height: i32, units: Vec<Unit>, obstacles: Vec<Obstacle>) -> Self {
        let mut grid = Grid::new(width, height);
        for obstacle in &obstacles {
            grid.set_obstacle(obstacle.pos);
        }

        let good_roster = units
            .iter()
            .filter(|u| u.faction == Faction::Good)
            .map(|u| u.id)
            .collect();
        let bad_roster = units
            .iter()
            .filter(|u| u.faction == Faction::Bad)
            .map(|u| u.id)
            .collect();

        Board {
            grid,
            obstacles,
            units,
            good_roster,
            bad_roster,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn has_obstacles(&self) -> bool {
        !self.obstacles.is_empty()
    }

    /// Looks up a unit record by id, dead or alive.
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.iter_mut().find(|u| u.id == id)
    }

    /// Ordered roster of unit ids for a faction, including dead units.
    pub fn roster(&self, faction: Faction) -> &[UnitId] {
        match faction {
            Faction::Good => &self.good_roster,
            Faction::Bad => &self.bad_roster,
        }
    }

    /// Currently-living units of a faction in roster order. Recomputed on
    /// demand; never cached, since health mutates between plies.
    pub fn alive_units_of(&self, faction: Faction) -> Vec<&Unit> {
        self.roster(faction)
            .iter()
            .filter_map(|&id| self.unit(id))
            .filter(|u| u.is_alive())
            .collect()
    }

    /// Count of living units of a faction.
    pub fn alive_count(&self, faction: Faction) -> usize {
        self.alive_units_of(faction).len()
    }

    /// Offsets a unit one cell in the given direction, unconditionally.
    /// Legality must already have been established via `Grid::can_enter`;
    /// the hot path does not re-validate.
    pub fn apply_move(&mut self, id: UnitId, direction: Direction) {
        let (dx, dy) = direction.offset();
        if let Some(unit) = self.unit_mut(id) {
            unit.pos = unit.pos.offset(dx, dy);
        }
    }

    /// Reduces the target's health by the attacker's damage. A no-op when
    /// either id denotes a currently-dead unit, which keeps the transition
    /// robust against action maps built from a slightly earlier state.
    pub fn apply_attack(&mut self, attacker: UnitId, target: UnitId) {
        let damage = match self.unit(attacker) {
            Some(u) if u.is_alive() => u.damage,
            _ => return,
        };
        if let Some(victim) = self.unit_mut(target) {
            if victim.is_alive() {
                victim.take_damage(damage);
            }
        }
    }
}

/// One ply's snapshot: an exclusively-owned board plus whose turn it is.
///
/// The utility is computed lazily and memoized per instance, because search
/// backup and move ordering request it many times. Successors never inherit
/// the cached value.
#[derive(Debug)]
pub struct GameState {
    board: Board,
    turn: Faction,
    cached_utility: Cell<Option<f64>>,
}

impl GameState {
    /// Builds the root state for a search, rejecting rosters the joint
    /// action generator cannot enumerate completely.
    pub fn new(board: Board, turn: Faction) -> Result<Self, StateError> {
        for faction in [Faction::Good, Faction::Bad] {
            let count = board.alive_count(faction);
            if count > MAX_SQUAD_SIZE {
                return Err(StateError::SquadTooLarge { faction, count });
            }
        }
        Ok(GameState {
            board,
            turn,
            cached_utility: Cell::new(None),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The faction to move this ply.
    pub fn turn(&self) -> Faction {
        self.turn
    }

    /// Applies a joint action to a deep copy of this state's board and
    /// returns the successor with the turn flag flipped.
    ///
    /// Entries naming dead units are skipped; rosters only ever shrink, so
    /// the squad-size bound established at the root still holds and is not
    /// re-checked here.
    pub fn apply(&self, joint: &JointAction) -> GameState {
        let mut board = self.board.clone();
        for &(id, action) in joint.entries() {
            match action {
                UnitAction::Move(direction) => {
                    let alive = board.unit(id).is_some_and(Unit::is_alive);
                    if alive {
                        board.apply_move(id, direction);
                    }
                }
                UnitAction::Attack(target) => {
                    board.apply_attack(id, target);
                }
            }
        }
        GameState {
            board,
            turn: self.turn.opponent(),
            cached_utility: Cell::new(None),
        }
    }

    /// Scalar value of this state for the maximizing (Good) side, computed
    /// at most once and cached.
    pub fn utility(&self) -> f64 {
        if let Some(value) = self.cached_utility.get() {
            return value;
        }
        let value = crate::eval::evaluate(self);
        self.cached_utility.set(Some(value));
        value
    }
}
