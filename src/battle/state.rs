//! Owned battle state
//!
//! One `BattleState` owns the grid, the roster, the active phase, and the
//! combat log. Components receive it explicitly; nothing holds hidden
//! references, and units are addressed by roster index or name rather than
//! by aliased references.

use crate::battle::log::CombatLog;
use crate::battle::map::Grid;
use crate::battle::turn::BattlePhase;
use crate::battle::units::{default_roster, Team, Unit};
use crate::core::config::BattleConfig;

#[derive(Debug, Clone)]
pub struct BattleState {
    pub grid: Grid,
    /// Flat roster; insertion order is turn-display order. Defeated units
    /// are never removed.
    pub units: Vec<Unit>,
    pub phase: BattlePhase,
    pub log: CombatLog,
}

impl BattleState {
    pub fn new(grid: Grid, units: Vec<Unit>, log_capacity: usize) -> Self {
        Self {
            grid,
            units,
            phase: BattlePhase::Player,
            log: CombatLog::new(log_capacity),
        }
    }

    /// The default scenario: the classic battlefield and four-unit roster
    pub fn demo(config: &BattleConfig) -> Self {
        Self::new(
            Grid::default_battlefield(),
            default_roster(),
            config.log_capacity,
        )
    }

    /// Roster index of the unit with this name
    pub fn unit_index(&self, name: &str) -> Option<usize> {
        self.units.iter().position(|u| u.name == name)
    }

    /// Roster index of the living unit standing on (x, y), if any
    pub fn living_unit_at(&self, x: i32, y: i32) -> Option<usize> {
        self.units
            .iter()
            .position(|u| u.is_alive() && u.x == x && u.y == y)
    }

    /// Is (x, y) occupied by any living unit?
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.living_unit_at(x, y).is_some()
    }

    /// Is (x, y) occupied by a living unit other than `except`?
    pub fn is_occupied_by_other(&self, x: i32, y: i32, except: usize) -> bool {
        self.living_unit_at(x, y)
            .map(|idx| idx != except)
            .unwrap_or(false)
    }

    /// Living units of one team, in roster order
    pub fn living(&self, team: Team) -> impl Iterator<Item = (usize, &Unit)> {
        self.units
            .iter()
            .enumerate()
            .filter(move |(_, u)| u.team == team && u.is_alive())
    }

    /// True once every unit of the team is defeated
    pub fn team_defeated(&self, team: Team) -> bool {
        self.living(team).next().is_none()
    }

    /// Clear the per-phase action flags for one team
    pub fn reset_flags(&mut self, team: Team) {
        for unit in self.units.iter_mut().filter(|u| u.team == team) {
            unit.reset_turn_flags();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::units::WeaponType;

    fn small_state() -> BattleState {
        let units = vec![
            Unit::new("a", 1, 1, Team::Ally, 10, 3, 5, 2, WeaponType::Sword),
            Unit::new("e", 3, 3, Team::Enemy, 10, 3, 5, 2, WeaponType::Sword),
        ];
        BattleState::new(Grid::new(8), units, 10)
    }

    #[test]
    fn test_lookup_by_name_and_tile() {
        let state = small_state();
        assert_eq!(state.unit_index("a"), Some(0));
        assert_eq!(state.unit_index("missing"), None);
        assert_eq!(state.living_unit_at(3, 3), Some(1));
        assert!(state.is_occupied(1, 1));
        assert!(!state.is_occupied(0, 0));
    }

    #[test]
    fn test_dead_units_do_not_occupy() {
        let mut state = small_state();
        state.units[1].hp = 0;
        assert!(!state.is_occupied(3, 3));
        assert!(state.team_defeated(Team::Enemy));
        assert!(!state.team_defeated(Team::Ally));
        // Still present in the roster as history
        assert_eq!(state.units.len(), 2);
    }

    #[test]
    fn test_occupied_by_other_excludes_self() {
        let state = small_state();
        assert!(!state.is_occupied_by_other(1, 1, 0));
        assert!(state.is_occupied_by_other(1, 1, 1));
    }

    #[test]
    fn test_demo_starts_in_player_phase() {
        let state = BattleState::demo(&BattleConfig::default());
        assert_eq!(state.phase, BattlePhase::Player);
        assert_eq!(state.units.len(), 4);
        assert!(state.log.is_empty());
    }
}
