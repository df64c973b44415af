//! Forced narrator turns over the active story.
//!
//! These bypass the turn router's classification: the prompt goes straight
//! to the narrator voice. Scene direction is remembered so subsequent chat
//! turns keep continuity; character suggestions are not part of the story
//! and leave memory untouched.

use std::sync::Arc;

use taleweaver_domain::{Persona, StoryClock, TurnRecord, TurnRole};

use crate::infrastructure::ports::{ChatMessage, LlmPort, LlmRequest};
use crate::infrastructure::prompts;
use crate::stores::{CharacterRegistry, StoryDirectory};
use crate::use_cases::turn::{TurnError, CHAT_MAX_TOKENS, CHAT_TEMPERATURE};

pub struct NarrationOps {
    stories: Arc<StoryDirectory>,
    characters: Arc<CharacterRegistry>,
    llm: Arc<dyn LlmPort>,
}

impl NarrationOps {
    pub fn new(
        stories: Arc<StoryDirectory>,
        characters: Arc<CharacterRegistry>,
        llm: Arc<dyn LlmPort>,
    ) -> Self {
        Self {
            stories,
            characters,
            llm,
        }
    }

    /// Narrative direction for the current scene (POST /narrator/direct).
    pub async fn direct_scene(
        &self,
        prompt: Option<&str>,
    ) -> Result<(String, StoryClock), TurnError> {
        let handle = self.stories.get_active().await?;

        let (scene, clock, model, present_names, history) = {
            let story = handle.lock().await;
            (
                story.scene.clone(),
                story.clock,
                story.model.clone(),
                story.characters_present.clone(),
                story.memory.recent().cloned().collect::<Vec<_>>(),
            )
        };

        let present = self.characters.resolve_present(present_names.iter());
        let system =
            prompts::narrator_system_prompt(&scene, &clock, &present, &Persona::guest());

        let mut messages: Vec<ChatMessage> = history
            .iter()
            .map(|turn| match turn.role {
                TurnRole::User => {
                    ChatMessage::user(format!("{}: {}", turn.speaker, turn.content))
                }
                TurnRole::Assistant => ChatMessage::assistant(turn.content.clone()),
            })
            .collect();
        messages.push(ChatMessage::user(prompts::direct_scene_prompt(prompt)));

        let request = LlmRequest::new(messages)
            .with_system_prompt(system)
            .with_model(model)
            .with_temperature(CHAT_TEMPERATURE)
            .with_max_tokens(CHAT_MAX_TOKENS);

        let reply = self.llm.generate(request).await?;
        let narration = reply.content.trim().to_string();

        // Remember the narration so later turns pick up from it.
        let mut story = handle.lock().await;
        let clock = story.clock;
        story.memory.push(TurnRecord {
            role: TurnRole::Assistant,
            speaker: "Narrator".to_string(),
            content: narration.clone(),
            day: clock.day,
            time_of_day: clock.time_of_day,
        });

        Ok((narration, clock))
    }

    /// Sketch a new character fitting the current story
    /// (POST /narrator/suggest-character).
    pub async fn suggest_character(&self, prompt: Option<&str>) -> Result<String, TurnError> {
        let handle = self.stories.get_active().await?;

        let (scene, clock, model, present_names) = {
            let story = handle.lock().await;
            (
                story.scene.clone(),
                story.clock,
                story.model.clone(),
                story.characters_present.clone(),
            )
        };

        let present = self.characters.resolve_present(present_names.iter());
        let system =
            prompts::narrator_system_prompt(&scene, &clock, &present, &Persona::guest());

        let request = LlmRequest::new(vec![ChatMessage::user(
            prompts::suggest_character_prompt(prompt),
        )])
        .with_system_prompt(system)
        .with_model(model)
        .with_temperature(CHAT_TEMPERATURE)
        .with_max_tokens(CHAT_MAX_TOKENS);

        let reply = self.llm.generate(request).await?;
        Ok(reply.content.trim().to_string())
    }
}
