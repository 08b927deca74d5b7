//! Append-only battle journal
//!
//! The journal receives prompt text, raw and sanitized inference responses,
//! and structured game events, each stamped with a unix timestamp. Sinks
//! are best-effort: a failed write is traced and dropped, never surfaced
//! into the battle.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use serde_json::json;

use crate::battle::turn::BattlePhase;
use crate::core::error::Result;

/// A structured record written to the journal
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameEvent {
    Move {
        unit: String,
        from_x: i32,
        from_y: i32,
        to_x: i32,
        to_y: i32,
    },
    Attack {
        attacker: String,
        target: String,
    },
    PhaseChange {
        phase: BattlePhase,
    },
    Prompt {
        unit: String,
        text: String,
    },
    RawResponse {
        unit: String,
        text: String,
    },
    SanitizedResponse {
        unit: String,
        text: String,
    },
}

/// Append-only event sink
pub trait EventSink {
    fn record(&mut self, event: GameEvent);
}

/// Sink that discards everything
pub struct NullJournal;

impl EventSink for NullJournal {
    fn record(&mut self, _event: GameEvent) {}
}

/// Sink that keeps events in memory, for tests and inspection
#[derive(Default)]
pub struct MemoryJournal {
    pub events: Vec<GameEvent>,
}

impl MemoryJournal {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSink for MemoryJournal {
    fn record(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}

/// Sink that appends one JSON object per line to a file
pub struct JsonlJournal {
    writer: BufWriter<File>,
}

impl JsonlJournal {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl EventSink for JsonlJournal {
    fn record(&mut self, event: GameEvent) {
        let line = json!({
            "ts": unix_timestamp(),
            "event": event,
        });
        if let Err(e) = writeln!(self.writer, "{}", line) {
            tracing::warn!("journal write failed: {}", e);
            return;
        }
        if let Err(e) = self.writer.flush() {
            tracing::warn!("journal flush failed: {}", e);
        }
    }
}

fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
