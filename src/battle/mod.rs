//! Battle system - grid tactics with strict turn phases
//!
//! One unit per tile, four-directional movement, Manhattan-band weapon
//! ranges. Combat is deterministic: damage is attack minus defense, and a
//! surviving defender strikes back if the attacker stands inside the
//! defender's own range band.

pub mod combat;
pub mod executor;
pub mod log;
pub mod map;
pub mod range;
pub mod state;
pub mod turn;
pub mod units;
pub mod validator;

// Re-exports for convenient access
pub use combat::resolve_attack;
pub use executor::execute;
pub use log::CombatLog;
pub use map::{Grid, TileKind};
pub use range::{attack_range, manhattan, movement_range, RangeSet};
pub use state::BattleState;
pub use turn::{end_enemy_phase, end_player_phase, BattlePhase};
pub use units::{Team, Unit, WeaponType};
pub use validator::{validate, Action, ValidatedAction};
