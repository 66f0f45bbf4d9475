//! Actions a unit can take and the joint actions built from them.
//!
//! Each ply, every living unit of the faction to move takes exactly one
//! action: a one-cell move in a cardinal direction, or an attack on a living
//! enemy in range. A joint action bundles one action per acting unit.

use std::fmt;

use super::unit::UnitId;

/// The four cardinal movement directions. North is toward smaller y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Returns the (dx, dy) cell offset for this direction.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    /// Lowercase name used in egress command lines.
    pub const fn name(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single unit's action for one ply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitAction {
    Move(Direction),
    Attack(UnitId),
}

impl UnitAction {
    pub fn is_attack(&self) -> bool {
        matches!(self, UnitAction::Attack(_))
    }
}

/// One action per acting unit, keyed by unit id. Transient search artifact;
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JointAction {
    entries: Vec<(UnitId, UnitAction)>,
}

impl JointAction {
    pub fn new(entries: Vec<(UnitId, UnitAction)>) -> Self {
        JointAction { entries }
    }

    pub fn entries(&self) -> &[(UnitId, UnitAction)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of attack entries, used by move ordering.
    pub fn attack_count(&self) -> usize {
        self.entries.iter().filter(|(_, a)| a.is_attack()).count()
    }

    /// True iff every entry is an attack. An empty joint action is not
    /// considered all-attacks.
    pub fn is_all_attacks(&self) -> bool {
        !self.entries.is_empty() && self.attack_count() == self.entries.len()
    }
}
