//! Combat resolution
//!
//! Damage is deterministic: max(0, attack - defense). A defender that
//! survives strikes back if, and only if, the attacker's tile lies inside
//! the defender's own attack range. A Bow unit attacking from distance 2
//! is therefore safe from any Sword defender, and a Sword unit standing
//! adjacent is safe from any Bow defender.

use crate::battle::range::attack_range;
use crate::battle::state::BattleState;

/// Apply one attack, including the conditional counterattack
///
/// Both units are addressed by roster index so that no reference into the
/// roster outlives a mutation. Units are never removed; defeat only means
/// hp <= 0.
pub fn resolve_attack(state: &mut BattleState, attacker: usize, target: usize) {
    let damage = (state.units[attacker].attack - state.units[target].defense).max(0);
    state.units[target].hp -= damage;

    let attacker_name = state.units[attacker].name.clone();
    let target_name = state.units[target].name.clone();
    state.log.push(format!(
        "{} attacks {} for {} damage",
        attacker_name, target_name, damage
    ));

    if !state.units[target].is_alive() {
        state.log.push(format!("{} is defeated", target_name));
        return;
    }

    // Counterattack: measured from the defender's own range band
    let counter_range = attack_range(&state.grid, &state.units[target]);
    let attacker_pos = state.units[attacker].position();
    if counter_range.contains(&attacker_pos) {
        let counter = (state.units[target].attack - state.units[attacker].defense).max(0);
        state.units[attacker].hp -= counter;
        state.log.push(format!(
            "{} counters {} for {} damage",
            target_name, attacker_name, counter
        ));
        if !state.units[attacker].is_alive() {
            state.log.push(format!("{} is defeated", attacker_name));
        }
    }
}
