//! AI decision pipeline integration tests
//!
//! The LLM path is exercised without a network by a provider that replays
//! canned response text through the same sanitize/parse steps the real
//! provider uses.

use serde_json::Value;

use skirmish::ai::parser::{parse_action_values, sanitize};
use skirmish::ai::{run_enemy_phase, DecisionProvider, HeuristicProvider};
use skirmish::battle::{BattlePhase, BattleState, Grid, Team, Unit, WeaponType};
use skirmish::core::config::BattleConfig;
use skirmish::core::error::Result;
use skirmish::journal::{EventSink, GameEvent, MemoryJournal, NullJournal};

/// Provider that feeds fixed response text through the real
/// sanitize/parse path, one response per decide() call
struct CannedResponses {
    responses: Vec<&'static str>,
}

impl CannedResponses {
    fn new(mut responses: Vec<&'static str>) -> Self {
        responses.reverse();
        Self { responses }
    }
}

impl DecisionProvider for CannedResponses {
    fn name(&self) -> &'static str {
        "canned"
    }

    fn decide(
        &mut self,
        state: &BattleState,
        unit: usize,
        journal: &mut dyn EventSink,
    ) -> Result<Vec<Value>> {
        let raw = self.responses.pop().unwrap_or("[]");
        journal.record(GameEvent::RawResponse {
            unit: state.units[unit].name.clone(),
            text: raw.into(),
        });
        let sanitized = sanitize(raw);
        journal.record(GameEvent::SanitizedResponse {
            unit: state.units[unit].name.clone(),
            text: sanitized.clone(),
        });
        parse_action_values(&sanitized)
    }
}

fn two_unit_state() -> BattleState {
    let units = vec![
        Unit::new("ally1", 5, 5, Team::Ally, 20, 3, 7, 3, WeaponType::Sword),
        Unit::new("enemy1", 5, 8, Team::Enemy, 20, 3, 7, 3, WeaponType::Sword),
    ];
    let mut state = BattleState::new(Grid::new(16), units, 10);
    state.phase = BattlePhase::Enemy;
    state
}

#[test]
fn test_concatenated_arrays_are_repaired_and_applied() {
    // The responder emitted two adjacent arrays instead of one
    let mut state = two_unit_state();
    let mut provider = CannedResponses::new(vec![
        r#"[{"unit_name": "enemy1", "action_type": "MOVE", "target_x": 5, "target_y": 6}], [{"unit_name": "enemy1", "action_type": "ATTACK", "target_unit_name": "ally1"}]"#,
    ]);
    let mut journal = MemoryJournal::new();

    run_enemy_phase(&mut state, &mut provider, &mut journal);

    assert_eq!(state.units[1].position(), (5, 6));
    assert_eq!(state.units[0].hp, 16);
    // Raw and sanitized responses were journaled alongside the actions
    assert!(journal
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::RawResponse { .. })));
    assert!(journal
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::SanitizedResponse { .. })));
    assert!(journal
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::Attack { .. })));
}

#[test]
fn test_fenced_response_is_applied() {
    let mut state = two_unit_state();
    let mut provider = CannedResponses::new(vec![
        "```json\n[{\"unit_name\": \"enemy1\", \"action_type\": \"MOVE\", \"target_x\": 5, \"target_y\": 7}]\n```",
    ]);

    run_enemy_phase(&mut state, &mut provider, &mut NullJournal);

    assert_eq!(state.units[1].position(), (5, 7));
}

#[test]
fn test_garbage_response_skips_turn_only() {
    let mut state = two_unit_state();
    let mut provider = CannedResponses::new(vec!["I would rather discuss philosophy."]);

    run_enemy_phase(&mut state, &mut provider, &mut NullJournal);

    // Nothing happened except the phase transition
    assert_eq!(state.units[1].position(), (5, 8));
    assert_eq!(state.units[0].hp, 20);
    assert_eq!(state.phase, BattlePhase::Player);
    assert!(state
        .log
        .entries()
        .any(|e| e == "enemy1 receives no command"));
}

#[test]
fn test_out_of_range_move_logged_but_attack_lands() {
    // A rejected MOVE must not abort the rest of the response
    let mut state = two_unit_state();
    state.units[1].y = 6; // adjacent already
    let mut provider = CannedResponses::new(vec![
        r#"[{"unit_name": "enemy1", "action_type": "MOVE", "target_x": 0, "target_y": 0},
            {"unit_name": "enemy1", "action_type": "ATTACK", "target_unit_name": "ally1"}]"#,
    ]);

    run_enemy_phase(&mut state, &mut provider, &mut NullJournal);

    assert_eq!(state.units[1].position(), (5, 6));
    assert_eq!(state.units[0].hp, 16);
    assert!(state
        .log
        .entries()
        .any(|e| e.contains("out of range")));
}

#[test]
fn test_heuristic_enemy_phase_on_demo_map() {
    let mut state = BattleState::demo(&BattleConfig::default());
    state.phase = BattlePhase::Enemy;
    let before: Vec<(i32, i32)> = state.units.iter().map(|u| u.position()).collect();

    let mut provider = HeuristicProvider::new();
    run_enemy_phase(&mut state, &mut provider, &mut NullJournal);

    // Allies are far away on the demo map, so every enemy closes distance
    // without attacking
    for (idx, unit) in state.units.iter().enumerate() {
        if unit.team == Team::Enemy {
            assert_ne!(unit.position(), before[idx], "{} should advance", unit.name);
        } else {
            assert_eq!(unit.hp, if idx == 0 { 20 } else { 15 });
        }
    }
    assert_eq!(state.phase, BattlePhase::Player);
    assert!(state.units.iter().all(|u| !u.has_moved && !u.has_attacked));
}

#[test]
fn test_heuristic_closes_and_kills_over_turns() {
    // A lone wounded ally against a Sword enemy: the heuristic should
    // reach it and finish the fight within a few phases
    let units = vec![
        Unit::new("ally1", 2, 2, Team::Ally, 5, 0, 1, 0, WeaponType::Sword),
        Unit::new("enemy1", 10, 2, Team::Enemy, 20, 3, 7, 3, WeaponType::Sword),
    ];
    let mut state = BattleState::new(Grid::new(16), units, 10);
    let mut provider = HeuristicProvider::new();

    for _ in 0..10 {
        state.phase = BattlePhase::Enemy;
        run_enemy_phase(&mut state, &mut provider, &mut NullJournal);
        if state.team_defeated(Team::Ally) {
            break;
        }
    }

    assert!(state.team_defeated(Team::Ally));
    assert!(state.units[1].is_alive());
}
