//! Action validation
//!
//! The single authority that decides whether a proposed move or attack is
//! legal. Human input and AI-issued actions both pass through `validate`;
//! neither path gets to bend the rules.

use serde::{Deserialize, Serialize};

use crate::battle::range::{attack_range, movement_range};
use crate::battle::state::BattleState;
use crate::core::error::{Result, SkirmishError};

/// A proposed action in the crate's own wire format
///
/// This is exactly the JSON shape the inference service is instructed to
/// emit: `{"unit_name": ..., "action_type": "MOVE"|"ATTACK", ...}`.
/// Deserialization enforces the required fields, so a value of this type
/// is structurally sound by construction; `validate` then checks it
/// against the rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action_type")]
pub enum Action {
    #[serde(rename = "MOVE")]
    Move {
        unit_name: String,
        target_x: i32,
        target_y: i32,
    },
    #[serde(rename = "ATTACK")]
    Attack {
        unit_name: String,
        target_unit_name: String,
    },
}

impl Action {
    pub fn unit_name(&self) -> &str {
        match self {
            Action::Move { unit_name, .. } => unit_name,
            Action::Attack { unit_name, .. } => unit_name,
        }
    }
}

/// An action that passed validation, expressed in roster indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatedAction {
    Move { unit: usize, x: i32, y: i32 },
    Attack { unit: usize, target: usize },
}

/// Check a proposed action for the unit at roster index `actor`
///
/// Rules:
/// - MOVE: actor alive, not yet moved, target tile inside the actor's
///   movement range, and not occupied by another living unit. Moving onto
///   the actor's own tile is a legal no-op that still spends the move.
/// - ATTACK: actor alive, not yet attacked, named target alive, on the
///   opposing team, and standing inside the actor's attack range computed
///   from the actor's current (possibly just-moved) position.
pub fn validate(state: &BattleState, actor: usize, action: &Action) -> Result<ValidatedAction> {
    let unit = state
        .units
        .get(actor)
        .filter(|u| u.is_alive())
        .ok_or_else(|| SkirmishError::TargetNotFound(format!("acting unit #{}", actor)))?;

    if action.unit_name() != unit.name {
        return Err(SkirmishError::UnitMismatch);
    }

    match action {
        Action::Move {
            target_x, target_y, ..
        } => {
            if unit.has_moved {
                return Err(SkirmishError::AlreadyActed);
            }
            if !movement_range(&state.grid, unit).contains(&(*target_x, *target_y)) {
                return Err(SkirmishError::OutOfRange);
            }
            if state.is_occupied_by_other(*target_x, *target_y, actor) {
                return Err(SkirmishError::TileOccupied);
            }
            Ok(ValidatedAction::Move {
                unit: actor,
                x: *target_x,
                y: *target_y,
            })
        }
        Action::Attack {
            target_unit_name, ..
        } => {
            if unit.has_attacked {
                return Err(SkirmishError::AlreadyActed);
            }
            let target = state
                .unit_index(target_unit_name)
                .filter(|&idx| {
                    state.units[idx].is_alive() && state.units[idx].team == unit.team.opponent()
                })
                .ok_or_else(|| SkirmishError::TargetNotFound(target_unit_name.clone()))?;

            let target_pos = state.units[target].position();
            if !attack_range(&state.grid, unit).contains(&target_pos) {
                return Err(SkirmishError::OutOfRange);
            }
            Ok(ValidatedAction::Attack {
                unit: actor,
                target,
            })
        }
    }
}
