//! Bounded short-term conversation memory for a story.
//!
//! Keeps the last `MAX_TURNS` turns; prompt assembly only feeds the most
//! recent `RECENT_TURNS` to the language model.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::story_time::TimeOfDay;

/// Turns retained before the oldest is evicted.
pub const MAX_TURNS: usize = 20;

/// Turns included when building a generation prompt.
pub const RECENT_TURNS: usize = 8;

/// Who produced a remembered turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnRole {
    User,
    Assistant,
}

/// One remembered chat turn, stamped with the story clock at the time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub role: TurnRole,
    /// Display name of the speaker (persona name, character name, or
    /// "Narrator").
    pub speaker: String,
    pub content: String,
    pub day: u32,
    pub time_of_day: TimeOfDay,
}

/// Sliding window over the most recent turns of one story.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortTermMemory {
    entries: VecDeque<TurnRecord>,
}

impl ShortTermMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember a turn, evicting the oldest once the window is full.
    pub fn push(&mut self, record: TurnRecord) {
        self.entries.push_back(record);
        while self.entries.len() > MAX_TURNS {
            self.entries.pop_front();
        }
    }

    /// The most recent turns, oldest first, capped at [`RECENT_TURNS`].
    pub fn recent(&self) -> impl Iterator<Item = &TurnRecord> {
        let skip = self.entries.len().saturating_sub(RECENT_TURNS);
        self.entries.iter().skip(skip)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
