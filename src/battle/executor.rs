//! Apply validated actions to the battle state
//!
//! The executor is the only place that mutates positions or spends the
//! per-phase action budget. Mutations are permanent: there is no rollback
//! once an attack has resolved.

use crate::battle::combat::resolve_attack;
use crate::battle::state::BattleState;
use crate::battle::validator::ValidatedAction;
use crate::journal::{EventSink, GameEvent};

/// Apply one validated action, setting the matching budget flag and
/// journaling the event
pub fn execute(state: &mut BattleState, action: ValidatedAction, journal: &mut dyn EventSink) {
    match action {
        ValidatedAction::Move { unit, x, y } => {
            let (from_x, from_y) = state.units[unit].position();
            state.units[unit].x = x;
            state.units[unit].y = y;
            state.units[unit].has_moved = true;
            journal.record(GameEvent::Move {
                unit: state.units[unit].name.clone(),
                from_x,
                from_y,
                to_x: x,
                to_y: y,
            });
            tracing::debug!(
                unit = %state.units[unit].name,
                "moved ({}, {}) -> ({}, {})",
                from_x,
                from_y,
                x,
                y
            );
        }
        ValidatedAction::Attack { unit, target } => {
            journal.record(GameEvent::Attack {
                attacker: state.units[unit].name.clone(),
                target: state.units[target].name.clone(),
            });
            resolve_attack(state, unit, target);
            state.units[unit].has_attacked = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::map::Grid;
    use crate::battle::units::{Team, Unit, WeaponType};
    use crate::journal::MemoryJournal;

    fn test_state() -> BattleState {
        let units = vec![
            Unit::new("hero", 5, 5, Team::Ally, 20, 3, 7, 3, WeaponType::Sword),
            Unit::new("raider", 5, 6, Team::Enemy, 20, 3, 7, 3, WeaponType::Sword),
        ];
        BattleState::new(Grid::new(16), units, 10)
    }

    #[test]
    fn test_move_spends_budget_and_journals() {
        let mut state = test_state();
        let mut journal = MemoryJournal::new();

        execute(
            &mut state,
            ValidatedAction::Move { unit: 0, x: 6, y: 5 },
            &mut journal,
        );

        assert_eq!(state.units[0].position(), (6, 5));
        assert!(state.units[0].has_moved);
        assert!(!state.units[0].has_attacked);
        assert!(matches!(
            journal.events[0],
            GameEvent::Move { to_x: 6, to_y: 5, .. }
        ));
    }

    #[test]
    fn test_attack_spends_budget_and_resolves() {
        let mut state = test_state();
        let mut journal = MemoryJournal::new();

        execute(
            &mut state,
            ValidatedAction::Attack { unit: 0, target: 1 },
            &mut journal,
        );

        assert!(state.units[0].has_attacked);
        assert_eq!(state.units[1].hp, 16);
        assert!(matches!(journal.events[0], GameEvent::Attack { .. }));
    }
}
