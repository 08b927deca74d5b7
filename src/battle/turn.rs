//! Turn phases and their transitions
//!
//! Two states, cycling forever: Player -> Enemy on the explicit "end turn"
//! signal, Enemy -> Player once the AI pipeline has processed every living
//! enemy. The machine never halts on its own; the surrounding application
//! decides when a battle is over.

use serde::{Deserialize, Serialize};

use crate::battle::state::BattleState;
use crate::battle::units::Team;
use crate::journal::{EventSink, GameEvent};

/// The team currently permitted to act
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BattlePhase {
    #[default]
    Player,
    Enemy,
}

/// Player -> Enemy transition
///
/// Resets the action budget of every ally so the next player phase starts
/// clean. No-op outside the player phase.
pub fn end_player_phase(state: &mut BattleState, journal: &mut dyn EventSink) {
    if state.phase != BattlePhase::Player {
        return;
    }
    state.reset_flags(Team::Ally);
    state.phase = BattlePhase::Enemy;
    journal.record(GameEvent::PhaseChange {
        phase: BattlePhase::Enemy,
    });
    tracing::info!("player phase ended");
}

/// Enemy -> Player transition
///
/// Resets the action budget of every unit on both teams, matching the
/// original rules, and emits the phase-end log line. No-op outside the
/// enemy phase.
pub fn end_enemy_phase(state: &mut BattleState, journal: &mut dyn EventSink) {
    if state.phase != BattlePhase::Enemy {
        return;
    }
    state.reset_flags(Team::Ally);
    state.reset_flags(Team::Enemy);
    state.phase = BattlePhase::Player;
    state.log.push("Enemy phase ends, player phase begins");
    journal.record(GameEvent::PhaseChange {
        phase: BattlePhase::Player,
    });
    tracing::info!("enemy phase ended");
}
