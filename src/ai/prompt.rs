//! Battlefield description for inference prompts
//!
//! Serializes the full tactical picture - terrain, every living unit with
//! its computed ranges, the current phase - followed by a strict output
//! contract for the acting unit.

use crate::battle::range::{attack_range, movement_range};
use crate::battle::state::BattleState;
use crate::battle::turn::BattlePhase;
use crate::battle::units::Unit;

/// Build the decision prompt for the unit at roster index `actor`
pub fn build_prompt(state: &BattleState, actor: usize) -> String {
    let mut s = String::new();
    let acting = &state.units[actor];

    s.push_str(&format!(
        "You are commanding the unit \"{}\" in a grid tactics battle.\n\n",
        acting.name
    ));

    let size = state.grid.size();
    s.push_str(&format!(
        "MAP ({size}x{size}, '.' = passable plain, '#' = impassable forest, 0-indexed, \
         x grows right, y grows down):\n"
    ));
    for y in 0..size as i32 {
        for x in 0..size as i32 {
            let glyph = state
                .grid
                .tile(x, y)
                .map(|t| t.glyph())
                .unwrap_or('.');
            s.push(glyph);
        }
        s.push('\n');
    }

    s.push_str("\nUNITS:\n");
    for unit in state.units.iter().filter(|u| u.is_alive()) {
        s.push_str(&describe_unit(state, unit));
    }

    let phase = match state.phase {
        BattlePhase::Player => "player phase",
        BattlePhase::Enemy => "enemy phase",
    };
    s.push_str(&format!("\nCURRENT PHASE: {}\n", phase));

    s.push_str(&format!(
        r#"
INSTRUCTIONS:
Decide the actions for "{name}" this turn. Reply with exactly one JSON array
containing 0 to 2 action objects and nothing else - no prose, no code fences.
Each object has this shape:
  {{"unit_name": "{name}", "action_type": "MOVE", "target_x": <int>, "target_y": <int>}}
  {{"unit_name": "{name}", "action_type": "ATTACK", "target_unit_name": "<name>"}}
Rules:
- At most one MOVE and one ATTACK, in the order they should happen.
- MOVE coordinates must be taken from the unit's listed movement range.
- Coordinates are 0-indexed.
- An empty array [] means the unit does nothing.
"#,
        name = acting.name
    ));

    s
}

fn describe_unit(state: &BattleState, unit: &Unit) -> String {
    let move_tiles = sorted_coords(movement_range(&state.grid, unit));
    let reachable = attack_range(&state.grid, unit);
    let mut targets: Vec<&str> = state
        .living(unit.team.opponent())
        .filter(|(_, other)| reachable.contains(&other.position()))
        .map(|(_, other)| other.name.as_str())
        .collect();
    targets.sort_unstable();

    format!(
        "- {} ({:?}, {:?}) at ({}, {}) hp {} atk {} def {} moved {} attacked {}\n  \
         movement range: [{}]\n  can attack now: [{}]\n",
        unit.name,
        unit.team,
        unit.weapon,
        unit.x,
        unit.y,
        unit.hp,
        unit.attack,
        unit.defense,
        unit.has_moved,
        unit.has_attacked,
        move_tiles
            .iter()
            .map(|(x, y)| format!("({}, {})", x, y))
            .collect::<Vec<_>>()
            .join(", "),
        targets.join(", "),
    )
}

fn sorted_coords(set: crate::battle::range::RangeSet) -> Vec<(i32, i32)> {
    let mut coords: Vec<_> = set.into_iter().collect();
    coords.sort_unstable();
    coords
}
