//! JSON snapshot persistence for the in-memory stores.
//!
//! The in-memory copy is authoritative; the snapshot file is best-effort
//! durability. It is loaded once at startup and rewritten after successful
//! mutations. A failed write is logged and never fails the request.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use taleweaver_domain::{Character, Persona, Story};

/// Default snapshot filename, relative to the working directory.
pub const DEFAULT_STATE_FILE: &str = "taleweaver_state.json";

/// Everything worth keeping across a restart.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub characters: Vec<Character>,
    pub personas: Vec<Persona>,
    pub stories: Vec<Story>,
    pub active_story: Option<String>,
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reads and writes the state file.
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the snapshot, or `None` when no state file exists yet.
    pub fn load(&self) -> Result<Option<StateSnapshot>, SnapshotError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let bytes = std::fs::read(&self.path)?;
        let snapshot = serde_json::from_slice(&bytes)?;
        Ok(Some(snapshot))
    }

    /// Write the snapshot. Goes through a sibling temp file and a rename so
    /// a crash mid-write never leaves a truncated state file.
    pub fn save(&self, snapshot: &StateSnapshot) -> Result<(), SnapshotError> {
        let json = serde_json::to_vec_pretty(snapshot)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn load_returns_none_for_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SnapshotStore::new(dir.path().join("state.json"));
        assert!(store.load().expect("load").is_none());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SnapshotStore::new(dir.path().join("state.json"));

        let mut story = Story::new("default_story", None, Utc::now());
        story.add_character("Lyra");
        let snapshot = StateSnapshot {
            characters: vec![
                Character::new("Lyra", "*shimmer*", "archivist", "lyra").expect("character"),
            ],
            personas: vec![Persona::new("Alex", "An adventurer.")],
            stories: vec![story],
            active_story: Some("default_story".into()),
        };

        store.save(&snapshot).expect("save");
        let loaded = store.load().expect("load").expect("some snapshot");
        assert_eq!(loaded.characters.len(), 1);
        assert_eq!(loaded.active_story.as_deref(), Some("default_story"));
        assert!(loaded.stories[0].is_present("Lyra"));
    }

    #[test]
    fn corrupt_file_surfaces_a_json_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("state.json");
        std::fs::write(&path, b"not json").expect("write");
        let store = SnapshotStore::new(path);
        assert!(matches!(store.load(), Err(SnapshotError::Json(_))));
    }
}
