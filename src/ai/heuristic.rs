//! Local rule-based decision provider
//!
//! No external calls: close with the nearest opposing unit and hit
//! whatever yields the most damage. Used whenever the inference service is
//! unavailable, and as the deterministic baseline in tests.

use serde_json::Value;

use crate::ai::DecisionProvider;
use crate::battle::range::{manhattan, movement_range};
use crate::battle::state::BattleState;
use crate::battle::validator::Action;
use crate::core::error::Result;
use crate::journal::EventSink;

pub struct HeuristicProvider;

impl HeuristicProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HeuristicProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DecisionProvider for HeuristicProvider {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn decide(
        &mut self,
        state: &BattleState,
        unit: usize,
        _journal: &mut dyn EventSink,
    ) -> Result<Vec<Value>> {
        let actions = plan(state, unit);
        actions
            .into_iter()
            .map(|a| serde_json::to_value(a).map_err(Into::into))
            .collect()
    }
}

/// Plan this unit's turn
///
/// 1. If the nearest opposing unit is already in the weapon band, attack it.
/// 2. Otherwise search every reachable tile for the move that sets up the
///    highest-damage attack, and take it.
/// 3. Otherwise step one tile toward the nearest opposing unit, picking the
///    cardinal direction that shrinks the distance most.
fn plan(state: &BattleState, unit: usize) -> Vec<Action> {
    let actor = &state.units[unit];
    let enemies_of = actor.team.opponent();

    let Some((_, nearest)) = state
        .living(enemies_of)
        .min_by_key(|(_, other)| manhattan(actor.position(), other.position()))
    else {
        return Vec::new();
    };

    let min_r = actor.min_range();
    let max_r = actor.max_range();

    // Already in range of the nearest target: attack from where we stand
    let dist = manhattan(actor.position(), nearest.position());
    if dist >= min_r && dist <= max_r {
        return vec![attack(actor.name.clone(), nearest.name.clone())];
    }

    // Evaluate every reachable tile for the best follow-up attack
    let mut candidates: Vec<(i32, i32)> = movement_range(&state.grid, actor)
        .into_iter()
        .filter(|&(x, y)| !state.is_occupied_by_other(x, y, unit))
        .collect();
    candidates.sort_unstable();

    let mut best_damage = 0;
    let mut best: Option<((i32, i32), &str)> = None;
    for &tile in &candidates {
        for (_, target) in state.living(enemies_of) {
            let d = manhattan(tile, target.position());
            if d < min_r || d > max_r {
                continue;
            }
            let damage = (actor.attack - target.defense).max(0);
            if damage > best_damage {
                best_damage = damage;
                best = Some((tile, target.name.as_str()));
            }
        }
    }
    if let Some(((x, y), target_name)) = best {
        return vec![
            move_to(actor.name.clone(), x, y),
            attack(actor.name.clone(), target_name.to_string()),
        ];
    }

    // No attack available anywhere: one greedy step toward the target
    if actor.move_points < 1 {
        return Vec::new();
    }
    let mut best_dist = dist;
    let mut step: Option<(i32, i32)> = None;
    for (dx, dy) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
        let (nx, ny) = (actor.x + dx, actor.y + dy);
        if !state.grid.is_passable(nx, ny) || state.is_occupied(nx, ny) {
            continue;
        }
        let d = manhattan((nx, ny), nearest.position());
        if d < best_dist {
            best_dist = d;
            step = Some((nx, ny));
        }
    }
    match step {
        Some((x, y)) => vec![move_to(actor.name.clone(), x, y)],
        None => Vec::new(),
    }
}

fn move_to(unit_name: String, x: i32, y: i32) -> Action {
    Action::Move {
        unit_name,
        target_x: x,
        target_y: y,
    }
}

fn attack(unit_name: String, target_unit_name: String) -> Action {
    Action::Attack {
        unit_name,
        target_unit_name,
    }
}
