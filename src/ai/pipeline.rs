//! Enemy phase driver
//!
//! Walks the roster in order, asks the provider for each living enemy's
//! actions, and applies them one at a time through the shared
//! validator/executor path. Every failure is recovered locally: a bad
//! action costs that action, a failed decision costs that unit's turn,
//! and nothing ever aborts the phase.

use crate::ai::parser::action_from_value;
use crate::ai::DecisionProvider;
use crate::battle::executor::execute;
use crate::battle::state::BattleState;
use crate::battle::turn::{end_enemy_phase, BattlePhase};
use crate::battle::units::Team;
use crate::battle::validator::validate;
use crate::journal::EventSink;

/// Run the full enemy phase and transition back to the player phase
pub fn run_enemy_phase(
    state: &mut BattleState,
    provider: &mut dyn DecisionProvider,
    journal: &mut dyn EventSink,
) {
    if state.phase != BattlePhase::Enemy {
        return;
    }

    for idx in 0..state.units.len() {
        // Liveness is re-checked at visit time; a counterattack earlier in
        // the phase may have defeated this unit
        if state.units[idx].team != Team::Enemy || !state.units[idx].is_alive() {
            continue;
        }
        let name = state.units[idx].name.clone();

        let values = match provider.decide(state, idx, journal) {
            Ok(values) => values,
            Err(e) => {
                tracing::warn!(unit = %name, provider = provider.name(), error = %e, "decision failed");
                state.log.push(format!("{} receives no command", name));
                continue;
            }
        };

        for value in &values {
            let action = match action_from_value(value, &name) {
                Ok(action) => action,
                Err(e) => {
                    tracing::warn!(unit = %name, error = %e, "action dropped");
                    state.log.push(format!("{}: action rejected ({})", name, e));
                    continue;
                }
            };
            match validate(state, idx, &action) {
                Ok(validated) => execute(state, validated, journal),
                Err(e) => {
                    tracing::warn!(unit = %name, error = %e, "action rejected");
                    state.log.push(format!("{}: action rejected ({})", name, e));
                }
            }
        }
    }

    end_enemy_phase(state, journal);
}
