//! Battlefield grid and terrain passability
//!
//! Terrain is fixed after map load; the only distinction the rules care
//! about is passable (plain) versus impassable (forest).

use serde::{Deserialize, Serialize};

/// Terrain kind for a single tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TileKind {
    #[default]
    Plain,
    Forest,
}

impl TileKind {
    /// Can units path through and stand on this tile?
    pub fn passable(&self) -> bool {
        matches!(self, TileKind::Plain)
    }

    /// Single-character map glyph, used by map parsing and rendering
    pub fn glyph(&self) -> char {
        match self {
            TileKind::Plain => '.',
            TileKind::Forest => '#',
        }
    }
}

/// Square battlefield of fixed size, immutable after load
#[derive(Debug, Clone)]
pub struct Grid {
    size: usize,
    tiles: Vec<TileKind>,
}

impl Grid {
    /// Create an all-plain grid
    pub fn new(size: usize) -> Self {
        Self {
            size,
            tiles: vec![TileKind::Plain; size * size],
        }
    }

    /// Build a grid from glyph rows: '.' plain, '#' forest
    ///
    /// Every row must be exactly as long as the row count.
    pub fn from_rows(rows: &[&str]) -> Self {
        let size = rows.len();
        let mut grid = Grid::new(size);
        for (y, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), size, "map rows must form a square");
            for (x, c) in row.chars().enumerate() {
                if c == '#' {
                    grid.tiles[y * size + x] = TileKind::Forest;
                }
            }
        }
        grid
    }

    /// The classic 16x16 battlefield: open plain with a forest maze
    /// in the middle band
    pub fn default_battlefield() -> Self {
        Self::from_rows(&[
            "................",
            "................",
            "................",
            "................",
            "................",
            "................",
            ".....#....#.....",
            ".....##.#.#.....",
            ".....#.#.##.....",
            ".....#....#.....",
            "................",
            "................",
            "................",
            "................",
            "................",
            "................",
        ])
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.size && (y as usize) < self.size
    }

    /// Terrain at (x, y), or None when out of bounds
    pub fn tile(&self, x: i32, y: i32) -> Option<TileKind> {
        if self.in_bounds(x, y) {
            Some(self.tiles[y as usize * self.size + x as usize])
        } else {
            None
        }
    }

    /// In bounds and standable/traversable
    pub fn is_passable(&self, x: i32, y: i32) -> bool {
        self.tile(x, y).map(|t| t.passable()).unwrap_or(false)
    }

    /// Replace the terrain of one tile (map construction and tests)
    pub fn set_tile(&mut self, x: i32, y: i32, kind: TileKind) {
        if self.in_bounds(x, y) {
            self.tiles[y as usize * self.size + x as usize] = kind;
        }
    }
}
