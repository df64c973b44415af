//! The Story session record.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::memory::ShortTermMemory;
use crate::story_time::StoryClock;

/// Model hint used when a story is created without one.
pub const DEFAULT_MODEL: &str = "dolphin3";

/// One story's persistent state: clock, scene, present characters, and
/// short-term memory.
///
/// `characters_present` holds character *names* - weak references into the
/// registry. A name whose character has since been removed from the registry
/// is simply treated as not present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub id: String,
    /// Language-model hint chosen at creation.
    pub model: String,
    pub clock: StoryClock,
    pub scene: String,
    pub characters_present: BTreeSet<String>,
    pub memory: ShortTermMemory,
    pub created_at: DateTime<Utc>,
}

impl Story {
    /// New story: day 1, morning, empty scene, nobody present.
    ///
    /// The creation timestamp is injected; the domain never reads the wall
    /// clock itself.
    pub fn new(id: impl Into<String>, model: Option<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            clock: StoryClock::new(),
            scene: String::new(),
            characters_present: BTreeSet::new(),
            memory: ShortTermMemory::new(),
            created_at,
        }
    }

    /// Bring a character into the scene. Returns `false` if they were
    /// already present (a no-op, not an error).
    pub fn add_character(&mut self, name: impl Into<String>) -> bool {
        self.characters_present.insert(name.into())
    }

    /// Send a character out of the scene. Returns `false` if they were not
    /// present (a no-op, not an error).
    pub fn remove_character(&mut self, name: &str) -> bool {
        self.characters_present.remove(name)
    }

    pub fn is_present(&self, name: &str) -> bool {
        self.characters_present.contains(name)
    }

    /// Replace scene description and present-set together. The caller is
    /// responsible for having filtered `names` against the registry.
    pub fn set_scene(&mut self, scene: impl Into<String>, names: BTreeSet<String>) {
        self.scene = scene.into();
        self.characters_present = names;
    }

    /// Advance the story clock one phase, returning the new reading.
    pub fn advance_time(&mut self) -> StoryClock {
        self.clock.advance();
        self.clock
    }
}
