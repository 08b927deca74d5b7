//! Bounded combat log
//!
//! Most-recent-first; pushing onto a full log evicts the oldest entry.
//! This is the only channel through which rule violations are surfaced to
//! the player.

use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct CombatLog {
    entries: VecDeque<String>,
    capacity: usize,
}

impl CombatLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, entry: impl Into<String>) {
        self.entries.push_front(entry.into());
        while self.entries.len() > self.capacity {
            self.entries.pop_back();
        }
    }

    /// Entries, newest first
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|s| s.as_str())
    }

    pub fn latest(&self) -> Option<&str> {
        self.entries.front().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
