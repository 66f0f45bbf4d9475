//! Alpha-beta minimax over joint actions.
//!
//! Two mutually recursive walkers, `maximize` for Good and `minimize` for
//! Bad, dispatched by the state's turn flag. Each returns the backed-up
//! value together with the joint action that produced it, so the root knows
//! its best move directly; there is no fragile value re-matching against
//! child utilities. Ties go to the first child in move order.
//!
//! Move ordering: all-attack joint actions first, mixed next, pure movement
//! last sorted by descending static utility of the resulting state. The
//! ordering only affects how much gets pruned, never the returned value.

use std::cmp::Ordering;

use crate::board::{Faction, GameState, JointAction};
use crate::movegen::successors;

/// Errors raised at search entry.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("search depth must be at least 1 ply")]
    ZeroDepth,
}

/// Result of a search: the chosen joint action and diagnostics.
///
/// `action` is `None` only when the side to move has no living units, in
/// which case `value` carries the terminal utility.
#[derive(Debug)]
pub struct SearchResult {
    pub action: Option<JointAction>,
    pub value: f64,
    pub nodes: u64,
}

/// Runs a depth-bounded alpha-beta search from the given root state and
/// returns the best joint action for the faction to move.
pub fn search(state: &GameState, depth: u32) -> Result<SearchResult, SearchError> {
    if depth == 0 {
        return Err(SearchError::ZeroDepth);
    }

    let mut nodes = 0u64;
    let (value, action) = match state.turn() {
        Faction::Good => maximize(state, depth, f64::NEG_INFINITY, f64::INFINITY, &mut nodes),
        Faction::Bad => minimize(state, depth, f64::NEG_INFINITY, f64::INFINITY, &mut nodes),
    };

    Ok(SearchResult {
        action,
        value,
        nodes,
    })
}

fn maximize(
    state: &GameState,
    depth: u32,
    mut alpha: f64,
    beta: f64,
    nodes: &mut u64,
) -> (f64, Option<JointAction>) {
    *nodes += 1;
    if depth == 0 {
        return (state.utility(), None);
    }

    let mut children = successors(state);
    if children.is_empty() {
        // Extinct mover: leaf-like node scored by the terminal terms.
        return (state.utility(), None);
    }
    order_children(&mut children);

    let mut best = f64::NEG_INFINITY;
    let mut best_action = None;

    for (joint, child) in children {
        let (value, _) = minimize(&child, depth - 1, alpha, beta, nodes);
        if best_action.is_none() || value > best {
            best = value;
            best_action = Some(joint);
        }
        if beta <= best {
            return (best, best_action);
        }
        alpha = alpha.max(best);
    }

    (best, best_action)
}

fn minimize(
    state: &GameState,
    depth: u32,
    alpha: f64,
    mut beta: f64,
    nodes: &mut u64,
) -> (f64, Option<JointAction>) {
    *nodes += 1;
    if depth == 0 {
        return (state.utility(), None);
    }

    let mut children = successors(state);
    if children.is_empty() {
        return (state.utility(), None);
    }
    order_children(&mut children);

    let mut best = f64::INFINITY;
    let mut best_action = None;

    for (joint, child) in children {
        let (value, _) = maximize(&child, depth - 1, alpha, beta, nodes);
        if best_action.is_none() || value < best {
            best = value;
            best_action = Some(joint);
        }
        if alpha >= best {
            return (best, best_action);
        }
        beta = beta.min(best);
    }

    (best, best_action)
}

/// Ordering class: 0 = all attacks, 1 = contains an attack, 2 = pure moves.
fn order_class(joint: &JointAction) -> u8 {
    if joint.is_all_attacks() {
        0
    } else if joint.attack_count() > 0 {
        1
    } else {
        2
    }
}

/// Reorders children for earlier cutoffs. The sort is stable, so within the
/// attack classes generation order is preserved; the pure-movement class is
/// further sorted by descending static utility of the resulting state.
fn order_children(children: &mut [(JointAction, GameState)]) {
    children.sort_by(|a, b| {
        let class_a = order_class(&a.0);
        let class_b = order_class(&b.0);
        class_a.cmp(&class_b).then_with(|| {
            if class_a == 2 {
                b.1.utility()
                    .partial_cmp(&a.1.utility())
                    .unwrap_or(Ordering::Equal)
            } else {
                Ordering::Equal
            }
        })
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Obstacle, Pos, Unit, UnitAction, UnitId};

    fn unit(id: UnitId, faction: Faction, x: i32, y: i32, hp: i32, damage: i32) -> Unit {
        Unit {
            id,
            faction,
            pos: Pos::new(x, y),
            hp,
            max_hp: hp.max(1),
            damage,
            range: 1,
        }
    }

    fn state_of(units: Vec<Unit>, obstacles: Vec<Obstacle>, turn: Faction) -> GameState {
        GameState::new(Board::new(4, 4, units, obstacles), turn).unwrap()
    }

    /// Unpruned full minimax, used as the reference for pruning correctness.
    fn minimax_plain(state: &GameState, depth: u32) -> f64 {
        if depth == 0 {
            return state.utility();
        }
        let children = successors(state);
        if children.is_empty() {
            return state.utility();
        }
        let folded = children.iter().map(|(_, c)| minimax_plain(c, depth - 1));
        match state.turn() {
            Faction::Good => folded.fold(f64::NEG_INFINITY, f64::max),
            Faction::Bad => folded.fold(f64::INFINITY, f64::min),
        }
    }

    #[test]
    fn zero_depth_is_rejected() {
        let state = state_of(
            vec![
                unit(1, Faction::Good, 0, 0, 10, 2),
                unit(2, Faction::Bad, 2, 0, 10, 1),
            ],
            Vec::new(),
            Faction::Good,
        );
        assert!(matches!(search(&state, 0), Err(SearchError::ZeroDepth)));
    }

    #[test]
    fn pruned_value_matches_plain_minimax() {
        // 4x4, Good at (0,0) range 1 damage 2, Bad at (2,0) range 1
        // damage 1, no obstacles, depth 3.
        let state = state_of(
            vec![
                unit(1, Faction::Good, 0, 0, 10, 2),
                unit(2, Faction::Bad, 2, 0, 10, 1),
            ],
            Vec::new(),
            Faction::Good,
        );
        let result = search(&state, 3).unwrap();
        assert_eq!(result.value, minimax_plain(&state, 3));
        assert!(result.action.is_some());
    }

    #[test]
    fn pruned_value_matches_plain_minimax_with_pairs_and_obstacles() {
        let state = state_of(
            vec![
                unit(1, Faction::Good, 0, 0, 8, 2),
                unit(2, Faction::Good, 0, 3, 8, 2),
                unit(3, Faction::Bad, 3, 1, 6, 1),
                unit(4, Faction::Bad, 3, 2, 6, 1),
            ],
            vec![Obstacle {
                id: 20,
                pos: Pos::new(1, 1),
            }],
            Faction::Bad,
        );
        let result = search(&state, 3).unwrap();
        assert_eq!(result.value, minimax_plain(&state, 3));
    }

    #[test]
    fn pruning_reduces_nodes() {
        let state = state_of(
            vec![
                unit(1, Faction::Good, 0, 0, 8, 2),
                unit(2, Faction::Good, 0, 3, 8, 2),
                unit(3, Faction::Bad, 3, 1, 6, 1),
                unit(4, Faction::Bad, 3, 2, 6, 1),
            ],
            Vec::new(),
            Faction::Good,
        );
        let result = search(&state, 3).unwrap();

        fn count_plain(state: &GameState, depth: u32) -> u64 {
            let mut nodes = 1;
            if depth == 0 {
                return nodes;
            }
            for (_, child) in successors(state) {
                nodes += count_plain(&child, depth - 1);
            }
            nodes
        }
        let full = count_plain(&state, 3);
        assert!(
            result.nodes < full,
            "expected pruning: {} searched vs {} full",
            result.nodes,
            full
        );
    }

    #[test]
    fn killing_blow_is_found_and_preferred() {
        // Good is adjacent and one hit kills; depth 1 must pick the attack.
        let state = state_of(
            vec![
                unit(1, Faction::Good, 1, 1, 10, 5),
                unit(2, Faction::Bad, 2, 1, 4, 1),
            ],
            Vec::new(),
            Faction::Good,
        );
        let result = search(&state, 1).unwrap();
        assert_eq!(result.value, f64::INFINITY);
        let joint = result.action.expect("a joint action must be chosen");
        assert_eq!(joint.entries(), &[(1, UnitAction::Attack(2))]);
    }

    #[test]
    fn minimizer_avoids_standing_in_the_open() {
        // Bad to move, Good can kill next ply if Bad stays adjacent.
        let state = state_of(
            vec![
                unit(1, Faction::Good, 1, 1, 10, 5),
                unit(2, Faction::Bad, 2, 1, 4, 1),
            ],
            Vec::new(),
            Faction::Bad,
        );
        let result = search(&state, 2).unwrap();
        assert_eq!(result.value, minimax_plain(&state, 2));
        assert!(result.action.is_some());
    }

    #[test]
    fn extinct_mover_searches_as_leaf() {
        let state = state_of(
            vec![
                unit(1, Faction::Good, 0, 0, 10, 2),
                unit(2, Faction::Bad, 2, 0, 0, 1),
            ],
            Vec::new(),
            Faction::Bad,
        );
        let result = search(&state, 3).unwrap();
        assert!(result.action.is_none());
        assert_eq!(result.value, f64::INFINITY);
    }

    #[test]
    fn ordering_puts_attacks_before_moves() {
        let state = state_of(
            vec![
                unit(1, Faction::Good, 1, 1, 10, 2),
                unit(2, Faction::Bad, 2, 1, 10, 1),
            ],
            Vec::new(),
            Faction::Good,
        );
        let mut children = successors(&state);
        order_children(&mut children);

        let classes: Vec<u8> = children.iter().map(|(j, _)| order_class(j)).collect();
        assert!(
            classes.windows(2).all(|w| w[0] <= w[1]),
            "classes must be non-decreasing: {classes:?}"
        );
        assert_eq!(classes[0], 0, "the attack must come first");
    }

    #[test]
    fn ordering_sorts_pure_moves_by_static_utility() {
        let state = state_of(
            vec![
                unit(1, Faction::Good, 0, 0, 10, 2),
                unit(2, Faction::Bad, 3, 0, 10, 1),
            ],
            Vec::new(),
            Faction::Good,
        );
        let mut children = successors(&state);
        order_children(&mut children);

        let move_utils: Vec<f64> = children
            .iter()
            .filter(|(j, _)| order_class(j) == 2)
            .map(|(_, c)| c.utility())
            .collect();
        assert!(
            move_utils.windows(2).all(|w| w[0] >= w[1]),
            "pure moves must be in descending utility order: {move_utils:?}"
        );
    }
}
