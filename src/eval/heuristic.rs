//! Heuristic utility function.
//!
//! The utility is an additive combination of six terms, all computed over
//! currently-living units only. The two alive terms go unbounded when a
//! faction is extinct, so terminal states score +-infinity and dominate
//! every other feature without any explicit terminal flag. Evaluation is a
//! pure function of the state: no randomness, so searches are reproducible.

use crate::board::{line_crosses_obstacle, Board, Faction, GameState, Unit};

/// Weight of the blocked-approach penalty, scaled by the fraction of Good
/// units whose straight path to their nearest enemy crosses an obstacle.
/// Steep enough to dominate every non-terminal feature.
pub const BLOCKED_PATH_PENALTY: f64 = 200_000.0;

/// Evaluates a state for the maximizing (Good) side.
///
/// Extinction is checked up front rather than folded into the sum: a state
/// where both factions are somehow empty must score as a loss, not as
/// `inf + -inf` (NaN). Good extinction wins that tie.
pub fn evaluate(state: &GameState) -> f64 {
    let board = state.board();
    let good = board.alive_units_of(Faction::Good);
    let bad = board.alive_units_of(Faction::Bad);

    if good.is_empty() {
        return f64::NEG_INFINITY;
    }
    if bad.is_empty() {
        return f64::INFINITY;
    }

    let alive = good.len() as f64 + bad.len() as f64;

    let health: f64 = good.iter().map(|u| u.hp as f64 / u.max_hp as f64).sum();

    let damage_dealt: f64 = bad.iter().map(|u| (u.max_hp - u.hp) as f64).sum();

    let threat: f64 = good
        .iter()
        .map(|g| {
            bad.iter()
                .filter(|b| g.pos.range_distance(b.pos) <= g.range)
                .count() as f64
        })
        .sum();

    alive + health + damage_dealt + threat + positioning(board, &good, &bad)
}

/// Approach-positioning term.
///
/// When an obstacle sits inside the bounding rectangle of some Good/Bad
/// pair, Good units whose straight line to their nearest enemy crosses an
/// obstacle cell are "cut off"; any nonzero cut-off fraction draws the
/// steep penalty. Otherwise the term rewards closing distance: the negative
/// sum of each Good unit's taxicab approach distance to its nearest enemy.
fn positioning(board: &Board, good: &[&Unit], bad: &[&Unit]) -> f64 {
    if board.has_obstacles() && any_pair_straddles_obstacle(board, good, bad) {
        let blocked = good
            .iter()
            .filter(|g| {
                let enemy = nearest_enemy(g, bad);
                line_crosses_obstacle(board.grid(), g.pos, enemy.pos)
            })
            .count();
        let fraction = blocked as f64 / good.len() as f64;
        if fraction > 0.0 {
            return -BLOCKED_PATH_PENALTY * fraction;
        }
    }

    -good
        .iter()
        .map(|g| g.pos.taxicab_approach(nearest_enemy(g, bad).pos) as f64)
        .sum::<f64>()
}

/// True if any obstacle lies within the axis-aligned bounding rectangle of
/// some Good/Bad pair. Cheap pre-filter before walking Bresenham lines.
fn any_pair_straddles_obstacle(board: &Board, good: &[&Unit], bad: &[&Unit]) -> bool {
    board.obstacles().iter().any(|obstacle| {
        good.iter().any(|g| {
            bad.iter().any(|b| {
                let (lo_x, hi_x) = (g.pos.x.min(b.pos.x), g.pos.x.max(b.pos.x));
                let (lo_y, hi_y) = (g.pos.y.min(b.pos.y), g.pos.y.max(b.pos.y));
                (lo_x..=hi_x).contains(&obstacle.pos.x) && (lo_y..=hi_y).contains(&obstacle.pos.y)
            })
        })
    })
}

/// Nearest living enemy by taxicab approach distance, first in roster order
/// on ties so evaluation stays deterministic.
fn nearest_enemy<'a>(unit: &Unit, enemies: &[&'a Unit]) -> &'a Unit {
    debug_assert!(!enemies.is_empty());
    let mut best = enemies[0];
    let mut best_dist = unit.pos.taxicab_approach(best.pos);
    for &enemy in &enemies[1..] {
        let dist = unit.pos.taxicab_approach(enemy.pos);
        if dist < best_dist {
            best = enemy;
            best_dist = dist;
        }
    }
    best
}
