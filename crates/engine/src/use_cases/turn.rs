//! The turn router.
//!
//! Classifies one inbound chat message against the active story and produces
//! exactly one response plus session side effects. Slash-commands mutate the
//! session locally and never touch the LLM; everything else is dialogue
//! routed to the language-generation collaborator.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;

use taleweaver_domain::{
    Command, DomainError, Story, StoryClock, TurnRecord, TurnRole,
};

use crate::infrastructure::ports::{ChatMessage, LlmError, LlmPort, LlmRequest};
use crate::infrastructure::prompts;
use crate::stores::{CharacterRegistry, PersonaStore, StoryDirectory};

/// Sampling temperature for narrator turns.
pub const CHAT_TEMPERATURE: f32 = 0.8;

/// Token budget for narrator turns.
pub const CHAT_MAX_TOKENS: u32 = 250;

/// Display name used for unattributed replies.
const NARRATOR: &str = "Narrator";

/// Turn routing failure.
///
/// `Generation` surfaces the collaborator's failure without rolling back
/// session mutations already applied in the same turn.
#[derive(Debug, Error)]
pub enum TurnError {
    #[error(transparent)]
    Session(#[from] DomainError),
    #[error("Generation failed: {0}")]
    Generation(#[from] LlmError),
}

/// The single response a turn produces.
///
/// Command errors (`UnknownCommand`, `CharacterNotFound`) are carried
/// in-band: `response` holds a user-visible line and `error` names the
/// fault, so the client keeps rendering chat-shaped bodies. Every outcome
/// carries the current clock so the client can resynchronize.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub response: String,
    pub is_narrator: bool,
    pub character: Option<String>,
    pub clock: StoryClock,
    pub error: Option<String>,
}

/// Routes chat messages: slash-commands to session mutations, dialogue to
/// the LLM.
pub struct TurnRouter {
    stories: Arc<StoryDirectory>,
    characters: Arc<CharacterRegistry>,
    personas: Arc<PersonaStore>,
    llm: Arc<dyn LlmPort>,
}

impl TurnRouter {
    pub fn new(
        stories: Arc<StoryDirectory>,
        characters: Arc<CharacterRegistry>,
        personas: Arc<PersonaStore>,
        llm: Arc<dyn LlmPort>,
    ) -> Self {
        Self {
            stories,
            characters,
            personas,
            llm,
        }
    }

    /// Process one chat message against the active story.
    pub async fn chat(
        &self,
        message: &str,
        persona: Option<&str>,
    ) -> Result<TurnOutcome, TurnError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(DomainError::validation("Missing message parameter").into());
        }

        let handle = self.stories.get_active().await?;

        match Command::parse(message) {
            Some(Ok(command)) => Ok(self.run_command(&handle, command).await),
            Some(Err(err)) => {
                // Malformed slash-command: user-visible error, no mutation.
                let clock = handle.lock().await.clock;
                Ok(error_outcome(err, clock))
            }
            None => self.generate_dialogue(&handle, message, persona).await,
        }
    }

    async fn run_command(&self, handle: &Arc<Mutex<Story>>, command: Command) -> TurnOutcome {
        let mut story = handle.lock().await;
        match command {
            Command::Add(name) => {
                if !self.characters.contains(&name) {
                    return error_outcome(
                        DomainError::CharacterNotFound(name),
                        story.clock,
                    );
                }
                let line = if story.add_character(name.clone()) {
                    format!("{name} joins the scene.")
                } else {
                    format!("{name} is already in the scene.")
                };
                narrator_ack(line, story.clock)
            }
            Command::Remove(name) => {
                let line = if story.remove_character(&name) {
                    format!("{name} leaves the scene.")
                } else {
                    format!("{name} is not in the scene.")
                };
                narrator_ack(line, story.clock)
            }
            Command::TimeNext => {
                let clock = story.advance_time();
                narrator_ack(format!("Time moves on. It is now {}.", clock.display()), clock)
            }
        }
    }

    async fn generate_dialogue(
        &self,
        handle: &Arc<Mutex<Story>>,
        message: &str,
        persona: Option<&str>,
    ) -> Result<TurnOutcome, TurnError> {
        let voice = self.personas.resolve_voice(persona);

        // Record the user's turn and snapshot the context. The story lock is
        // released before the generation call; the recorded turn sticks even
        // if generation fails.
        let (scene, clock, model, present_names, history) = {
            let mut story = handle.lock().await;
            let clock = story.clock;
            story.memory.push(TurnRecord {
                role: TurnRole::User,
                speaker: voice.name.clone(),
                content: message.to_string(),
                day: clock.day,
                time_of_day: clock.time_of_day,
            });
            (
                story.scene.clone(),
                clock,
                story.model.clone(),
                story.characters_present.clone(),
                story.memory.recent().cloned().collect::<Vec<_>>(),
            )
        };

        let present = self.characters.resolve_present(present_names.iter());
        let system = prompts::narrator_system_prompt(&scene, &clock, &present, &voice);

        let messages = history
            .iter()
            .map(|turn| match turn.role {
                TurnRole::User => {
                    ChatMessage::user(format!("{}: {}", turn.speaker, turn.content))
                }
                TurnRole::Assistant => ChatMessage::assistant(turn.content.clone()),
            })
            .collect();

        let request = LlmRequest::new(messages)
            .with_system_prompt(system)
            .with_model(model)
            .with_temperature(CHAT_TEMPERATURE)
            .with_max_tokens(CHAT_MAX_TOKENS);

        let reply = self.llm.generate(request).await?;

        let (content, character) = attribute_reply(&reply.content, &present);

        let mut story = handle.lock().await;
        let clock = story.clock;
        story.memory.push(TurnRecord {
            role: TurnRole::Assistant,
            speaker: character.clone().unwrap_or_else(|| NARRATOR.to_string()),
            content: content.clone(),
            day: clock.day,
            time_of_day: clock.time_of_day,
        });

        Ok(TurnOutcome {
            response: content,
            is_narrator: character.is_none(),
            character,
            clock,
            error: None,
        })
    }
}

/// Split a reply into text and attribution.
///
/// A leading `Name:` naming a *present* character attributes the line to
/// them. Anything else - narration, or an attribution to someone not in the
/// scene - is wrapped as a narrator aside rather than surfacing a broken
/// attribution.
fn attribute_reply(
    content: &str,
    present: &[taleweaver_domain::Character],
) -> (String, Option<String>) {
    let trimmed = content.trim();
    if let Some((speaker, rest)) = trimmed.split_once(':') {
        let speaker = speaker.trim();
        if let Some(found) = present
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(speaker))
        {
            return (rest.trim().to_string(), Some(found.name.clone()));
        }
    }
    (trimmed.to_string(), None)
}

fn narrator_ack(line: String, clock: StoryClock) -> TurnOutcome {
    TurnOutcome {
        response: line,
        is_narrator: true,
        character: None,
        clock,
        error: None,
    }
}

fn error_outcome(err: DomainError, clock: StoryClock) -> TurnOutcome {
    TurnOutcome {
        response: err.to_string(),
        is_narrator: true,
        character: None,
        clock,
        error: Some(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{LlmResponse, MockLlmPort};
    use taleweaver_domain::{Character, Persona, TimeOfDay};

    struct Fixture {
        stories: Arc<StoryDirectory>,
        characters: Arc<CharacterRegistry>,
        personas: Arc<PersonaStore>,
    }

    impl Fixture {
        fn new() -> Self {
            let characters = Arc::new(CharacterRegistry::new());
            characters
                .add(
                    Character::new("Alice", "*a knock*", "A sharp-eyed scholar.", "alice")
                        .expect("character"),
                )
                .expect("add");
            Self {
                stories: Arc::new(StoryDirectory::new()),
                characters,
                personas: Arc::new(PersonaStore::new()),
            }
        }

        async fn with_active_story(self) -> Self {
            self.stories.create("s1", None).await.expect("create");
            self.stories.set_active("s1").await.expect("activate");
            self
        }

        fn router(&self, llm: MockLlmPort) -> TurnRouter {
            TurnRouter::new(
                self.stories.clone(),
                self.characters.clone(),
                self.personas.clone(),
                Arc::new(llm),
            )
        }

        async fn active_story(&self) -> Story {
            self.stories
                .get_active()
                .await
                .expect("active story")
                .lock()
                .await
                .clone()
        }
    }

    fn silent_llm() -> MockLlmPort {
        let mut llm = MockLlmPort::new();
        llm.expect_generate().never();
        llm
    }

    #[tokio::test]
    async fn chat_without_active_story_fails() {
        let fixture = Fixture::new();
        let router = fixture.router(silent_llm());
        let result = router.chat("hello", None).await;
        assert!(matches!(
            result,
            Err(TurnError::Session(DomainError::NoActiveSession))
        ));
    }

    #[tokio::test]
    async fn add_command_brings_character_into_scene() {
        let fixture = Fixture::new().with_active_story().await;
        let router = fixture.router(silent_llm());

        let outcome = router.chat("/add Alice", None).await.expect("chat");
        assert!(outcome.is_narrator);
        assert!(outcome.error.is_none());
        assert!(outcome.response.contains("Alice joins the scene"));
        assert!(fixture.active_story().await.is_present("Alice"));

        // Re-adding is a no-op acknowledgement, not an error.
        let again = router.chat("/add Alice", None).await.expect("chat");
        assert!(again.error.is_none());
        assert!(again.response.contains("already in the scene"));
    }

    #[tokio::test]
    async fn add_unknown_character_reports_without_mutating() {
        let fixture = Fixture::new().with_active_story().await;
        let router = fixture.router(silent_llm());

        let outcome = router.chat("/add Ghost", None).await.expect("chat");
        assert!(outcome.error.is_some());
        assert!(outcome.response.contains("Ghost"));
        assert!(fixture.active_story().await.characters_present.is_empty());
    }

    #[tokio::test]
    async fn add_then_remove_round_trips_presence() {
        let fixture = Fixture::new().with_active_story().await;
        let router = fixture.router(silent_llm());

        let before = fixture.active_story().await.characters_present;
        router.chat("/add Alice", None).await.expect("add");
        router.chat("/remove Alice", None).await.expect("remove");
        assert_eq!(fixture.active_story().await.characters_present, before);
    }

    #[tokio::test]
    async fn remove_absent_character_is_a_no_op() {
        let fixture = Fixture::new().with_active_story().await;
        let router = fixture.router(silent_llm());
        let outcome = router.chat("/remove Alice", None).await.expect("chat");
        assert!(outcome.error.is_none());
        assert!(outcome.response.contains("not in the scene"));
    }

    #[tokio::test]
    async fn time_next_ack_carries_the_new_clock() {
        let fixture = Fixture::new().with_active_story().await;
        let router = fixture.router(silent_llm());

        let outcome = router.chat("/time next", None).await.expect("chat");
        assert_eq!(outcome.clock.time_of_day, TimeOfDay::Afternoon);
        assert!(outcome.response.contains("Day 1, Afternoon"));
    }

    #[tokio::test]
    async fn unknown_command_mutates_nothing() {
        let fixture = Fixture::new().with_active_story().await;
        let router = fixture.router(silent_llm());

        let before = fixture.active_story().await;
        let outcome = router.chat("/dance wildly", None).await.expect("chat");
        assert!(outcome.error.is_some());
        assert!(outcome.is_narrator);
        let after = fixture.active_story().await;
        assert_eq!(before.clock, after.clock);
        assert_eq!(before.characters_present, after.characters_present);
        assert_eq!(before.memory, after.memory);
    }

    #[tokio::test]
    async fn dialogue_reply_from_present_character_is_attributed() {
        let fixture = Fixture::new().with_active_story().await;
        let mut llm = MockLlmPort::new();
        llm.expect_generate().times(1).returning(|_| {
            Ok(LlmResponse {
                content: "Alice: Welcome to the archive.".into(),
            })
        });
        let router = fixture.router(llm);

        router.chat("/add Alice", None).await.expect("add");
        let outcome = router.chat("Hello?", None).await.expect("chat");
        assert_eq!(outcome.character.as_deref(), Some("Alice"));
        assert!(!outcome.is_narrator);
        assert_eq!(outcome.response, "Welcome to the archive.");
    }

    #[tokio::test]
    async fn attribution_to_absent_character_becomes_narrator_aside() {
        let fixture = Fixture::new().with_active_story().await;
        let mut llm = MockLlmPort::new();
        llm.expect_generate().times(1).returning(|_| {
            Ok(LlmResponse {
                content: "Bob: I was never here.".into(),
            })
        });
        let router = fixture.router(llm);

        let outcome = router.chat("Who's there?", None).await.expect("chat");
        assert!(outcome.is_narrator);
        assert!(outcome.character.is_none());
        // The raw line survives as a narrator aside.
        assert_eq!(outcome.response, "Bob: I was never here.");
    }

    #[tokio::test]
    async fn persona_voice_reaches_the_prompt() {
        let fixture = Fixture::new().with_active_story().await;
        fixture
            .personas
            .upsert(Persona::new("Alex", "An adventurer."));

        let mut llm = MockLlmPort::new();
        llm.expect_generate()
            .times(1)
            .withf(|request: &LlmRequest| {
                let system = request.system_prompt.as_deref().unwrap_or_default();
                let last = request.messages.last().map(|m| m.content.as_str());
                system.contains("Alex") && last == Some("Alex: Hello")
            })
            .returning(|_| {
                Ok(LlmResponse {
                    content: "The door creaks open.".into(),
                })
            });
        let router = fixture.router(llm);

        let outcome = router.chat("Hello", Some("Alex")).await.expect("chat");
        assert!(outcome.is_narrator);
        assert_eq!(outcome.response, "The door creaks open.");
    }

    #[tokio::test]
    async fn generation_failure_keeps_the_user_turn() {
        let fixture = Fixture::new().with_active_story().await;
        let mut llm = MockLlmPort::new();
        llm.expect_generate()
            .times(1)
            .returning(|_| Err(LlmError::RequestFailed("timeout".into())));
        let router = fixture.router(llm);

        let result = router.chat("Hello?", None).await;
        assert!(matches!(result, Err(TurnError::Generation(_))));
        // The user's turn was recorded before the call and sticks.
        let story = fixture.active_story().await;
        assert_eq!(story.memory.len(), 1);
    }

    #[tokio::test]
    async fn dialogue_turns_accumulate_in_memory() {
        let fixture = Fixture::new().with_active_story().await;
        let mut llm = MockLlmPort::new();
        llm.expect_generate().times(1).returning(|_| {
            Ok(LlmResponse {
                content: "A hush falls.".into(),
            })
        });
        let router = fixture.router(llm);

        router.chat("Anyone home?", None).await.expect("chat");
        let story = fixture.active_story().await;
        assert_eq!(story.memory.len(), 2);
    }

    #[tokio::test]
    async fn empty_message_is_a_validation_error() {
        let fixture = Fixture::new().with_active_story().await;
        let router = fixture.router(silent_llm());
        assert!(matches!(
            router.chat("   ", None).await,
            Err(TurnError::Session(DomainError::Validation(_)))
        ));
    }

    // End-to-end walk of the session lifecycle through the router.
    #[tokio::test]
    async fn full_story_scenario() {
        let fixture = Fixture::new();
        fixture.stories.create("S1", None).await.expect("create");
        fixture.stories.set_active("S1").await.expect("activate");
        let router = fixture.router(silent_llm());

        let outcome = router.chat("/add Alice", None).await.expect("add");
        assert!(outcome.error.is_none());
        assert!(fixture.active_story().await.is_present("Alice"));

        let cycle_len = TimeOfDay::all().len();
        let mut last = None;
        for _ in 0..cycle_len {
            last = Some(router.chat("/time next", None).await.expect("time"));
        }
        let clock = last.expect("at least one advance").clock;
        assert_eq!(clock.day, 2);
        assert_eq!(clock.time_of_day, TimeOfDay::Morning);

        fixture.stories.delete("S1").await.expect("delete");
        assert!(matches!(
            fixture.stories.get_active().await,
            Err(DomainError::NoActiveSession)
        ));
    }

    #[test]
    fn attribution_requires_exact_presence() {
        let alice =
            Character::new("Alice", "", "scholar", "alice").expect("character");
        let present = vec![alice];

        let (text, who) = attribute_reply("alice: Hello there.", &present);
        assert_eq!(who.as_deref(), Some("Alice"));
        assert_eq!(text, "Hello there.");

        let (text, who) = attribute_reply("The wind howls.", &present);
        assert!(who.is_none());
        assert_eq!(text, "The wind howls.");
    }
}
