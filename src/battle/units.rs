//! Units and the default roster
//!
//! A unit is identified by its name, which is unique within a battle.
//! Defeated units (hp <= 0) stay in the roster as inert history; they are
//! skipped by occupancy checks, targeting, and the AI.

use serde::{Deserialize, Serialize};

/// Which side a unit fights for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    Ally,
    Enemy,
}

impl Team {
    pub fn opponent(&self) -> Team {
        match self {
            Team::Ally => Team::Enemy,
            Team::Enemy => Team::Ally,
        }
    }
}

/// Equipped weapon, which fixes the attack-range band
///
/// Sword strikes only adjacent tiles. Bow strikes only tiles at Manhattan
/// distance exactly 2 - never point blank. The asymmetry is deliberate and
/// is what makes counterattacks positional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponType {
    Sword,
    Bow,
}

impl WeaponType {
    pub fn min_range(&self) -> i32 {
        match self {
            WeaponType::Sword => 1,
            WeaponType::Bow => 2,
        }
    }

    pub fn max_range(&self) -> i32 {
        match self {
            WeaponType::Sword => 1,
            WeaponType::Bow => 2,
        }
    }
}

/// A single battlefield unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub team: Team,
    pub hp: i32,
    pub move_points: i32,
    pub attack: i32,
    pub defense: i32,
    pub weapon: WeaponType,
    pub has_moved: bool,
    pub has_attacked: bool,
}

impl Unit {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        x: i32,
        y: i32,
        team: Team,
        hp: i32,
        move_points: i32,
        attack: i32,
        defense: i32,
        weapon: WeaponType,
    ) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            team,
            hp,
            move_points,
            attack,
            defense,
            weapon,
            has_moved: false,
            has_attacked: false,
        }
    }

    /// Defeated is strictly hp <= 0
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn min_range(&self) -> i32 {
        self.weapon.min_range()
    }

    pub fn max_range(&self) -> i32 {
        self.weapon.max_range()
    }

    /// Clear the per-phase action budget
    pub fn reset_turn_flags(&mut self) {
        self.has_moved = false;
        self.has_attacked = false;
    }
}

/// The default four-unit roster, in turn-display order
pub fn default_roster() -> Vec<Unit> {
    vec![
        Unit::new("ally1", 9, 12, Team::Ally, 20, 3, 7, 3, WeaponType::Sword),
        Unit::new("ally2", 6, 12, Team::Ally, 15, 2, 5, 2, WeaponType::Bow),
        Unit::new("enemy1", 6, 3, Team::Enemy, 20, 3, 7, 3, WeaponType::Sword),
        Unit::new("enemy2", 9, 3, Team::Enemy, 15, 2, 5, 2, WeaponType::Bow),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weapon_bands() {
        assert_eq!(WeaponType::Sword.min_range(), 1);
        assert_eq!(WeaponType::Sword.max_range(), 1);
        assert_eq!(WeaponType::Bow.min_range(), 2);
        assert_eq!(WeaponType::Bow.max_range(), 2);
    }

    #[test]
    fn test_defeated_threshold() {
        let mut unit = Unit::new("u", 0, 0, Team::Ally, 1, 3, 5, 2, WeaponType::Sword);
        assert!(unit.is_alive());
        unit.hp = 0;
        assert!(!unit.is_alive());
        unit.hp = -4;
        assert!(!unit.is_alive());
    }

    #[test]
    fn test_default_roster_order() {
        let roster = default_roster();
        let names: Vec<_> = roster.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["ally1", "ally2", "enemy1", "enemy2"]);
        assert!(roster.iter().all(|u| !u.has_moved && !u.has_attacked));
    }
}
