//! Range computation: movement reach and weapon reach
//!
//! Movement is a breadth-first search in the four cardinal directions,
//! cost 1 per step, cut off at the unit's move points. Occupancy is
//! deliberately ignored here - units can path through each other, and the
//! "cannot land on an occupied tile" rule is enforced at commit time by the
//! validator.
//!
//! Attack range is purely geometric: every in-bounds tile whose Manhattan
//! distance falls inside the weapon's [min, max] band.

use std::collections::{HashSet, VecDeque};

use crate::battle::map::Grid;
use crate::battle::units::Unit;

/// A set of unique tile coordinates, recomputed on demand and never cached
/// beyond one selection
pub type RangeSet = HashSet<(i32, i32)>;

/// Manhattan distance between two tiles
pub fn manhattan(a: (i32, i32), b: (i32, i32)) -> i32 {
    (a.0 - b.0).abs() + (a.1 - b.1).abs()
}

/// Tiles the unit can reach this turn
///
/// Includes the unit's own tile (distance 0). The frontier is bounded by
/// (2 * move_points + 1)^2 tiles, so the search always terminates.
pub fn movement_range(grid: &Grid, unit: &Unit) -> RangeSet {
    let mut reached = RangeSet::new();
    let mut frontier = VecDeque::new();
    frontier.push_back((unit.x, unit.y, 0));

    while let Some((x, y, steps)) = frontier.pop_front() {
        if steps > unit.move_points {
            continue;
        }
        if !grid.is_passable(x, y) {
            continue;
        }
        if !reached.insert((x, y)) {
            continue;
        }

        frontier.push_back((x + 1, y, steps + 1));
        frontier.push_back((x - 1, y, steps + 1));
        frontier.push_back((x, y + 1, steps + 1));
        frontier.push_back((x, y - 1, steps + 1));
    }

    reached
}

/// Tiles the unit's weapon can strike from its current position
///
/// A Sword covers the four orthogonal neighbors; a Bow covers the ring at
/// Manhattan distance exactly 2. Terrain does not block attacks, but
/// out-of-bounds tiles are excluded.
pub fn attack_range(grid: &Grid, unit: &Unit) -> RangeSet {
    let mut result = RangeSet::new();
    let max = unit.max_range();
    let min = unit.min_range();

    for dx in -max..=max {
        for dy in -max..=max {
            let dist = dx.abs() + dy.abs();
            if dist < min || dist > max {
                continue;
            }
            let (tx, ty) = (unit.x + dx, unit.y + dy);
            if grid.in_bounds(tx, ty) {
                result.insert((tx, ty));
            }
        }
    }

    result
}
