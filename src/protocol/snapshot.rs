//! JSON snapshot ingestion.
//!
//! The live engine hands over one snapshot per real game turn: board extent,
//! the full unit roster with stats, the obstacle roster, and the faction to
//! move. Parsing validates everything up front so a malformed snapshot
//! aborts the turn with a diagnostic instead of producing an arbitrary move.
//!
//! ```json
//! {
//!   "width": 8, "height": 8, "turn": "good",
//!   "units": [
//!     {"id": 1, "faction": "good", "x": 0, "y": 0,
//!      "hp": 10, "max_hp": 10, "damage": 3, "range": 1}
//!   ],
//!   "obstacles": [{"id": 100, "x": 3, "y": 4}]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::board::{Board, Faction, GameState, Obstacle, Pos, StateError, Unit, UnitId};

/// Errors that can occur while building a game state from a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("malformed snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("board extent must be positive, got {width}x{height}")]
    BadExtent { width: i32, height: i32 },

    #[error("duplicate unit id {0}")]
    DuplicateUnitId(UnitId),

    #[error("duplicate obstacle id {0}")]
    DuplicateObstacleId(u32),

    #[error("obstacle {id} at ({x}, {y}) is outside the board")]
    ObstacleOutOfBounds { id: u32, x: i32, y: i32 },

    #[error("unit {id} at ({x}, {y}) is outside the board")]
    UnitOutOfBounds { id: UnitId, x: i32, y: i32 },

    #[error("unit {0} stands on an obstacle cell")]
    UnitOnObstacle(UnitId),

    #[error("unit {id} has non-positive max health {max_hp}")]
    NonPositiveMaxHealth { id: UnitId, max_hp: i32 },

    #[error("unit {id} has health {hp} outside 0..={max_hp}")]
    HealthOutOfRange { id: UnitId, hp: i32, max_hp: i32 },

    #[error("unit {id} has negative damage {damage}")]
    NegativeDamage { id: UnitId, damage: i32 },

    #[error("unit {id} has negative range {range}")]
    NegativeRange { id: UnitId, range: i32 },

    #[error(transparent)]
    State(#[from] StateError),
}

/// One combatant in a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitSnapshot {
    pub id: UnitId,
    pub faction: Faction,
    pub x: i32,
    pub y: i32,
    pub hp: i32,
    pub max_hp: i32,
    pub damage: i32,
    pub range: i32,
}

/// One obstacle in a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleSnapshot {
    pub id: u32,
    pub x: i32,
    pub y: i32,
}

/// A complete live-engine snapshot, taken once per real game turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub width: i32,
    pub height: i32,
    /// Faction to move; defaults to the controlled (Good) side.
    #[serde(default)]
    pub turn: Faction,
    pub units: Vec<UnitSnapshot>,
    #[serde(default)]
    pub obstacles: Vec<ObstacleSnapshot>,
}

/// Parses a JSON snapshot and builds the validated root game state.
pub fn parse_snapshot(json: &str) -> Result<GameState, SnapshotError> {
    let snapshot: Snapshot = serde_json::from_str(json)?;
    build_state(&snapshot)
}

/// Validates a snapshot and builds the root game state from it.
pub fn build_state(snapshot: &Snapshot) -> Result<GameState, SnapshotError> {
    if snapshot.width <= 0 || snapshot.height <= 0 {
        return Err(SnapshotError::BadExtent {
            width: snapshot.width,
            height: snapshot.height,
        });
    }

    let in_bounds =
        |x: i32, y: i32| x >= 0 && x < snapshot.width && y >= 0 && y < snapshot.height;

    let mut obstacles = Vec::with_capacity(snapshot.obstacles.len());
    for o in &snapshot.obstacles {
        if obstacles.iter().any(|prev: &Obstacle| prev.id == o.id) {
            return Err(SnapshotError::DuplicateObstacleId(o.id));
        }
        if !in_bounds(o.x, o.y) {
            return Err(SnapshotError::ObstacleOutOfBounds {
                id: o.id,
                x: o.x,
                y: o.y,
            });
        }
        obstacles.push(Obstacle {
            id: o.id,
            pos: Pos::new(o.x, o.y),
        });
    }

    let mut units = Vec::with_capacity(snapshot.units.len());
    for u in &snapshot.units {
        if units.iter().any(|prev: &Unit| prev.id == u.id) {
            return Err(SnapshotError::DuplicateUnitId(u.id));
        }
        if !in_bounds(u.x, u.y) {
            return Err(SnapshotError::UnitOutOfBounds {
                id: u.id,
                x: u.x,
                y: u.y,
            });
        }
        let pos = Pos::new(u.x, u.y);
        if obstacles.iter().any(|o| o.pos == pos) {
            return Err(SnapshotError::UnitOnObstacle(u.id));
        }
        if u.max_hp <= 0 {
            return Err(SnapshotError::NonPositiveMaxHealth {
                id: u.id,
                max_hp: u.max_hp,
            });
        }
        if u.hp < 0 || u.hp > u.max_hp {
            return Err(SnapshotError::HealthOutOfRange {
                id: u.id,
                hp: u.hp,
                max_hp: u.max_hp,
            });
        }
        if u.damage < 0 {
            return Err(SnapshotError::NegativeDamage {
                id: u.id,
                damage: u.damage,
            });
        }
        if u.range < 0 {
            return Err(SnapshotError::NegativeRange {
                id: u.id,
                range: u.range,
            });
        }
        units.push(Unit {
            id: u.id,
            faction: u.faction,
            pos,
            hp: u.hp,
            max_hp: u.max_hp,
            damage: u.damage,
            range: u.range,
        });
    }

    let board = Board::new(snapshot.width, snapshot.height, units, obstacles);
    Ok(GameState::new(board, snapshot.turn)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic_json() -> String {
        r#"{
            "width": 8, "height": 8, "turn": "good",
            "units": [
                {"id": 1, "faction": "good", "x": 0, "y": 0,
                 "hp": 10, "max_hp": 10, "damage": 3, "range": 1},
                {"id": 2, "faction": "bad", "x": 5, "y": 5,
                 "hp": 6, "max_hp": 8, "damage": 2, "range": 1}
            ],
            "obstacles": [{"id": 100, "x": 3, "y": 4}]
        }"#
        .to_string()
    }

    #[test]
    fn parses_a_valid_snapshot() {
        let state = parse_snapshot(&basic_json()).expect("snapshot should parse");
        assert_eq!(state.turn(), Faction::Good);
        assert_eq!(state.board().alive_count(Faction::Good), 1);
        assert_eq!(state.board().alive_count(Faction::Bad), 1);
        assert_eq!(state.board().unit(2).unwrap().hp, 6);
        assert!(state.board().grid().is_blocked(Pos::new(3, 4)));
    }

    #[test]
    fn turn_defaults_to_good() {
        let json = r#"{"width": 4, "height": 4, "units": []}"#;
        // Empty rosters still parse; the state just scores as terminal.
        let state = parse_snapshot(json).expect("empty snapshot should parse");
        assert_eq!(state.turn(), Faction::Good);
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            parse_snapshot("{nope"),
            Err(SnapshotError::Json(_))
        ));
    }

    #[test]
    fn rejects_unit_on_obstacle() {
        let json = r#"{
            "width": 8, "height": 8,
            "units": [{"id": 1, "faction": "good", "x": 3, "y": 4,
                       "hp": 10, "max_hp": 10, "damage": 3, "range": 1}],
            "obstacles": [{"id": 100, "x": 3, "y": 4}]
        }"#;
        assert!(matches!(
            parse_snapshot(json),
            Err(SnapshotError::UnitOnObstacle(1))
        ));
    }

    #[test]
    fn rejects_health_above_max() {
        let json = r#"{
            "width": 8, "height": 8,
            "units": [{"id": 1, "faction": "good", "x": 0, "y": 0,
                       "hp": 12, "max_hp": 10, "damage": 3, "range": 1}]
        }"#;
        assert!(matches!(
            parse_snapshot(json),
            Err(SnapshotError::HealthOutOfRange { id: 1, .. })
        ));
    }

    #[test]
    fn rejects_duplicate_unit_ids() {
        let json = r#"{
            "width": 8, "height": 8,
            "units": [
                {"id": 1, "faction": "good", "x": 0, "y": 0,
                 "hp": 10, "max_hp": 10, "damage": 3, "range": 1},
                {"id": 1, "faction": "bad", "x": 5, "y": 5,
                 "hp": 10, "max_hp": 10, "damage": 3, "range": 1}
            ]
        }"#;
        assert!(matches!(
            parse_snapshot(json),
            Err(SnapshotError::DuplicateUnitId(1))
        ));
    }

    #[test]
    fn rejects_oversized_living_squad() {
        let json = r#"{
            "width": 8, "height": 8,
            "units": [
                {"id": 1, "faction": "good", "x": 0, "y": 0,
                 "hp": 10, "max_hp": 10, "damage": 3, "range": 1},
                {"id": 2, "faction": "good", "x": 1, "y": 0,
                 "hp": 10, "max_hp": 10, "damage": 3, "range": 1},
                {"id": 3, "faction": "good", "x": 2, "y": 0,
                 "hp": 10, "max_hp": 10, "damage": 3, "range": 1}
            ]
        }"#;
        assert!(matches!(
            parse_snapshot(json),
            Err(SnapshotError::State(StateError::SquadTooLarge { .. }))
        ));
    }

    #[test]
    fn rejects_out_of_bounds_unit() {
        let json = r#"{
            "width": 4, "height": 4,
            "units": [{"id": 1, "faction": "good", "x": 4, "y": 0,
                       "hp": 10, "max_hp": 10, "damage": 3, "range": 1}]
        }"#;
        assert!(matches!(
            parse_snapshot(json),
            Err(SnapshotError::UnitOutOfBounds { id: 1, .. })
        ));
    }
}
