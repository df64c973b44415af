//! Story directory: the narrator session manager.
//!
//! Cross-entry invariants (unique ids, creation order, the single active
//! pointer) live behind one `RwLock`. Each story carries its own mutex so
//! mutations against the same session serialize while different sessions
//! proceed independently. Callers must never hold a story lock across an
//! LLM call.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{Mutex, RwLock};

use taleweaver_domain::{DomainError, Story, StoryClock};

type SharedStory = Arc<Mutex<Story>>;

#[derive(Default)]
struct DirectoryInner {
    stories: HashMap<String, SharedStory>,
    /// Ids in creation order, for listing.
    order: Vec<String>,
    /// At most one story is active process-wide.
    active: Option<String>,
}

/// One record per story, plus the process-wide active pointer.
#[derive(Default)]
pub struct StoryDirectory {
    inner: RwLock<DirectoryInner>,
}

impl StoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a story. New stories start inactive on day 1, morning.
    pub async fn create(&self, id: &str, model: Option<String>) -> Result<(), DomainError> {
        if id.trim().is_empty() {
            return Err(DomainError::validation("Story id cannot be empty"));
        }
        let mut inner = self.inner.write().await;
        if inner.stories.contains_key(id) {
            return Err(DomainError::duplicate_id("Story", id));
        }
        let story = Story::new(id, model, Utc::now());
        inner
            .stories
            .insert(id.to_string(), Arc::new(Mutex::new(story)));
        inner.order.push(id.to_string());
        tracing::info!(story = %id, "Created story");
        Ok(())
    }

    /// Point the active slot at `id`. Idempotent when already active; the
    /// previously active story keeps its state, only the pointer moves.
    pub async fn set_active(&self, id: &str) -> Result<(), DomainError> {
        let mut inner = self.inner.write().await;
        if !inner.stories.contains_key(id) {
            return Err(DomainError::not_found("Story", id));
        }
        inner.active = Some(id.to_string());
        tracing::info!(story = %id, "Active story set");
        Ok(())
    }

    pub async fn active_id(&self) -> Option<String> {
        self.inner.read().await.active.clone()
    }

    /// The active story's handle.
    pub async fn get_active(&self) -> Result<SharedStory, DomainError> {
        let inner = self.inner.read().await;
        let id = inner.active.as_ref().ok_or(DomainError::NoActiveSession)?;
        inner
            .stories
            .get(id)
            .cloned()
            .ok_or(DomainError::NoActiveSession)
    }

    pub async fn get(&self, id: &str) -> Result<SharedStory, DomainError> {
        self.inner
            .read()
            .await
            .stories
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("Story", id))
    }

    /// Remove a story permanently. Deleting the active story leaves the
    /// system with no active story - an observable state, not a silent
    /// default.
    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let mut inner = self.inner.write().await;
        if inner.stories.remove(id).is_none() {
            return Err(DomainError::not_found("Story", id));
        }
        inner.order.retain(|existing| existing != id);
        if inner.active.as_deref() == Some(id) {
            inner.active = None;
            tracing::info!(story = %id, "Deleted the active story; no story is active now");
        } else {
            tracing::info!(story = %id, "Deleted story");
        }
        Ok(())
    }

    /// Story snapshots in creation order, each flagged active or not.
    pub async fn list(&self) -> Vec<(Story, bool)> {
        let (handles, active) = {
            let inner = self.inner.read().await;
            let handles: Vec<(String, SharedStory)> = inner
                .order
                .iter()
                .filter_map(|id| inner.stories.get(id).map(|s| (id.clone(), s.clone())))
                .collect();
            (handles, inner.active.clone())
        };

        let mut out = Vec::with_capacity(handles.len());
        for (id, handle) in handles {
            let story = handle.lock().await.clone();
            let is_active = active.as_deref() == Some(id.as_str());
            out.push((story, is_active));
        }
        out
    }

    /// Replace scene description and present-set atomically. `names` must
    /// already be filtered against the registry.
    pub async fn update_scene(
        &self,
        id: &str,
        scene: String,
        names: BTreeSet<String>,
    ) -> Result<(), DomainError> {
        let handle = self.get(id).await?;
        let mut story = handle.lock().await;
        story.set_scene(scene, names);
        Ok(())
    }

    /// Advance the story clock one phase, returning the new reading.
    pub async fn advance_time(&self, id: &str) -> Result<StoryClock, DomainError> {
        let handle = self.get(id).await?;
        let mut story = handle.lock().await;
        Ok(story.advance_time())
    }

    /// Stories plus active pointer, for the snapshot file.
    pub async fn snapshot(&self) -> (Vec<Story>, Option<String>) {
        let (handles, active) = {
            let inner = self.inner.read().await;
            let handles: Vec<SharedStory> = inner
                .order
                .iter()
                .filter_map(|id| inner.stories.get(id).cloned())
                .collect();
            (handles, inner.active.clone())
        };
        let mut stories = Vec::with_capacity(handles.len());
        for handle in handles {
            stories.push(handle.lock().await.clone());
        }
        (stories, active)
    }

    /// Replace directory contents (snapshot restore). A dangling active
    /// pointer is discarded.
    pub async fn restore(&self, stories: Vec<Story>, active: Option<String>) {
        let mut inner = self.inner.write().await;
        inner.stories.clear();
        inner.order.clear();
        for story in stories {
            inner.order.push(story.id.clone());
            inner
                .stories
                .insert(story.id.clone(), Arc::new(Mutex::new(story)));
        }
        inner.active = active.filter(|id| inner.stories.contains_key(id));
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.stories.is_empty()
    }
}
