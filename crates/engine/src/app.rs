//! Application state and composition.

use std::sync::Arc;

use taleweaver_domain::Character;

use crate::infrastructure::ports::LlmPort;
use crate::infrastructure::snapshot::{SnapshotStore, StateSnapshot};
use crate::stores::{CharacterRegistry, PersonaStore, StoryDirectory};
use crate::use_cases::{NarrationOps, TurnRouter};

/// Main application state.
///
/// Holds the stores and use cases. Passed to HTTP handlers via Axum state.
pub struct App {
    pub characters: Arc<CharacterRegistry>,
    pub personas: Arc<PersonaStore>,
    pub stories: Arc<StoryDirectory>,
    pub turn: TurnRouter,
    pub narration: NarrationOps,
    snapshot: SnapshotStore,
}

impl App {
    pub fn new(llm: Arc<dyn LlmPort>, snapshot: SnapshotStore) -> Self {
        let characters = Arc::new(CharacterRegistry::new());
        let personas = Arc::new(PersonaStore::new());
        let stories = Arc::new(StoryDirectory::new());

        let turn = TurnRouter::new(
            stories.clone(),
            characters.clone(),
            personas.clone(),
            llm.clone(),
        );
        let narration = NarrationOps::new(stories.clone(), characters.clone(), llm);

        Self {
            characters,
            personas,
            stories,
            turn,
            narration,
            snapshot,
        }
    }

    /// Load the snapshot file into the stores, if one exists.
    pub async fn restore_from_snapshot(&self) -> anyhow::Result<()> {
        let Some(state) = self.snapshot.load()? else {
            tracing::info!(path = %self.snapshot.path().display(), "No state file, starting fresh");
            return Ok(());
        };
        tracing::info!(
            characters = state.characters.len(),
            personas = state.personas.len(),
            stories = state.stories.len(),
            "Restoring state from snapshot"
        );
        self.characters.restore(state.characters);
        self.personas.restore(state.personas);
        self.stories.restore(state.stories, state.active_story).await;
        Ok(())
    }

    /// Seed the default character and story on an empty first boot.
    pub async fn seed_defaults(&self) {
        if self.characters.is_empty() {
            let lyra = Character {
                name: "Lyra".into(),
                intro: "*A shimmer in the air coalesces into a glowing figure. \
                        She smiles.*"
                    .into(),
                background: "Once a guardian of ancient celestial archives, now \
                             wandering worlds in search of lost stories."
                    .into(),
                profile: "lyra".into(),
            };
            if self.characters.add(lyra).is_ok() {
                tracing::info!("Seeded default character Lyra");
            }
        }

        if self.stories.is_empty().await {
            if let Err(e) = self.stories.create("default_story", None).await {
                tracing::warn!(error = %e, "Failed to seed default story");
                return;
            }
            if let Ok(handle) = self.stories.get("default_story").await {
                let mut story = handle.lock().await;
                for character in self.characters.list() {
                    story.add_character(character.name);
                }
            }
            if self.stories.set_active("default_story").await.is_ok() {
                tracing::info!("Seeded default story");
            }
        }
    }

    /// Write the current state to the snapshot file. Best-effort: failures
    /// are logged, never propagated to the request that triggered them.
    pub async fn persist(&self) {
        let (stories, active_story) = self.stories.snapshot().await;
        let state = StateSnapshot {
            characters: self.characters.list(),
            personas: self.personas.list(),
            stories,
            active_story,
        };
        if let Err(e) = self.snapshot.save(&state) {
            tracing::warn!(error = %e, path = %self.snapshot.path().display(), "Failed to write state file");
        }
    }
}

// Test-only helpers for composing an App around a mocked LLM.
#[cfg(test)]
impl App {
    pub fn for_tests(llm: Arc<dyn LlmPort>, dir: &std::path::Path) -> Self {
        Self::new(llm, SnapshotStore::new(dir.join("state.json")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockLlmPort;
    use taleweaver_domain::Persona;

    fn quiet_llm() -> Arc<dyn LlmPort> {
        let mut llm = MockLlmPort::new();
        llm.expect_generate().never();
        Arc::new(llm)
    }

    #[tokio::test]
    async fn seeding_creates_lyra_and_an_active_default_story() {
        let dir = tempfile::tempdir().expect("tempdir");
        let app = App::for_tests(quiet_llm(), dir.path());

        app.seed_defaults().await;

        assert!(app.characters.contains("Lyra"));
        let handle = app.stories.get_active().await.expect("active story");
        let story = handle.lock().await;
        assert_eq!(story.id, "default_story");
        assert!(story.is_present("Lyra"));
    }

    #[tokio::test]
    async fn seeding_is_skipped_when_state_exists() {
        let dir = tempfile::tempdir().expect("tempdir");
        let app = App::for_tests(quiet_llm(), dir.path());

        app.characters
            .add(Character::new("Custom", "", "", "custom").expect("character"))
            .expect("add");
        app.stories.create("mine", None).await.expect("create");

        app.seed_defaults().await;

        assert!(!app.characters.contains("Lyra"));
        assert!(app.stories.get("default_story").await.is_err());
    }

    #[tokio::test]
    async fn persist_then_restore_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        {
            let app = App::for_tests(quiet_llm(), dir.path());
            app.seed_defaults().await;
            app.personas.upsert(Persona::new("Alex", "An adventurer."));
            app.persist().await;
        }

        let app = App::for_tests(quiet_llm(), dir.path());
        app.restore_from_snapshot().await.expect("restore");
        assert!(app.characters.contains("Lyra"));
        assert!(app.personas.get("Alex").is_some());
        assert_eq!(
            app.stories.active_id().await.as_deref(),
            Some("default_story")
        );
    }
}
