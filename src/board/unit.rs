//! Combatant records and factions.
//!
//! A unit is a single combatant with fixed stats and mutable position and
//! health. Death is a derived property: a unit at zero health stays in the
//! board's records (so ids remain stable across plies) but is excluded from
//! all alive queries and from being targeted.

use serde::{Deserialize, Serialize};

use super::grid::Pos;

/// Engine-assigned unit identifier, unique across both factions.
pub type UnitId = u32;

/// Which squad a unit belongs to. Good is the controlled, maximizing side;
/// Bad is the opposing, minimizing side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Faction {
    #[default]
    Good,
    Bad,
}

impl Faction {
    /// Returns the opposing faction.
    pub const fn opponent(self) -> Faction {
        match self {
            Faction::Good => Faction::Bad,
            Faction::Bad => Faction::Good,
        }
    }
}

/// A single combatant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unit {
    pub id: UnitId,
    pub faction: Faction,
    pub pos: Pos,
    /// Current health, clamped to `0..=max_hp`.
    pub hp: i32,
    /// Fixed at creation; positive.
    pub max_hp: i32,
    /// Damage dealt per attack.
    pub damage: i32,
    /// Attack range in Euclidean-floor cells.
    pub range: i32,
}

impl Unit {
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Applies incoming damage, clamping health at zero.
    pub fn take_damage(&mut self, amount: i32) {
        self.hp = (self.hp - amount).max(0);
    }
}
