//! Legal-action generation.
//!
//! Enumerates the individually legal actions for each unit (one-cell moves
//! into enterable cells, attacks on living enemies in range) and the joint
//! actions for the faction to move. Joint actions cover squads of at most
//! two living units: one actor yields its actions singly, two actors yield
//! the full pairwise cross product. Larger squads are rejected when the
//! root `GameState` is built, so the generator never silently produces an
//! incomplete action set.

use crate::board::{Direction, GameState, JointAction, Unit, UnitAction, UnitId, MAX_SQUAD_SIZE};

/// All individually legal actions for the unit with the given id.
///
/// Moves are listed in `Direction::ALL` order, followed by attacks in enemy
/// roster order. Returns an empty list for dead or unknown units.
pub fn legal_actions(state: &GameState, id: UnitId) -> Vec<UnitAction> {
    match state.board().unit(id) {
        Some(unit) if unit.is_alive() => unit_actions(state, unit),
        _ => Vec::new(),
    }
}

fn unit_actions(state: &GameState, unit: &Unit) -> Vec<UnitAction> {
    let board = state.board();
    let mut actions = Vec::new();

    for direction in Direction::ALL {
        let (dx, dy) = direction.offset();
        if board.grid().can_enter(unit.pos.offset(dx, dy)) {
            actions.push(UnitAction::Move(direction));
        }
    }

    for enemy in board.alive_units_of(unit.faction.opponent()) {
        if unit.pos.range_distance(enemy.pos) <= unit.range {
            actions.push(UnitAction::Attack(enemy.id));
        }
    }

    actions
}

/// All joint actions available to the faction to move.
///
/// Zero living actors yield an empty list (the extinct side simply has no
/// moves; the state is scored by its terminal utility terms instead).
pub fn joint_actions(state: &GameState) -> Vec<JointAction> {
    let actors = state.board().alive_units_of(state.turn());
    debug_assert!(actors.len() <= MAX_SQUAD_SIZE);

    match actors.as_slice() {
        [] => Vec::new(),
        [solo] => unit_actions(state, solo)
            .into_iter()
            .map(|action| JointAction::new(vec![(solo.id, action)]))
            .collect(),
        [first, second] => {
            let first_actions = unit_actions(state, first);
            let second_actions = unit_actions(state, second);
            let mut joints = Vec::with_capacity(first_actions.len() * second_actions.len());
            for &a in &first_actions {
                for &b in &second_actions {
                    joints.push(JointAction::new(vec![(first.id, a), (second.id, b)]));
                }
            }
            joints
        }
        _ => unreachable!("squad size validated at GameState construction"),
    }
}

/// Every (joint action, successor state) pair reachable from this state.
pub fn successors(state: &GameState) -> Vec<(JointAction, GameState)> {
    joint_actions(state)
        .into_iter()
        .map(|joint| {
            let child = state.apply(&joint);
            (joint, child)
        })
        .collect()
}
