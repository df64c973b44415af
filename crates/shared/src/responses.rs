//! Outbound response bodies.

use serde::{Deserialize, Serialize};
use taleweaver_domain::TimeOfDay;

/// Character as the client renders it. `profile` is the resolved image path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterDto {
    pub name: String,
    pub intro: String,
    pub background: String,
    pub profile: String,
}

/// GET /characters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterListResponse {
    pub characters: Vec<CharacterDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaDto {
    pub name: String,
    pub description: String,
}

/// GET /personas
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaListResponse {
    pub personas: Vec<PersonaDto>,
}

/// One row of GET /narrators, in creation order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorySummary {
    pub id: String,
    pub scene: String,
    pub day: u32,
    pub time_of_day: TimeOfDay,
    pub characters: Vec<String>,
    pub is_active: bool,
}

/// GET /narrators
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryListResponse {
    pub narrators: Vec<StorySummary>,
}

/// GET /narrator/active - the serialized session form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub id: String,
    pub day: u32,
    pub time_of_day: TimeOfDay,
    pub scene: String,
    pub characters_present: Vec<CharacterDto>,
    pub is_active: bool,
}

/// POST /narrator/scene - echoes what was applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneResponse {
    pub success: bool,
    pub scene: String,
    /// Present-set after the update; stale names have been dropped.
    pub characters_present: Vec<String>,
}

/// POST /narrator/chat
///
/// Chat responses opportunistically carry the story clock so the client can
/// resynchronize without a separate fetch. Command errors keep the chat
/// shape: `response` holds a user-visible line and `error` names the fault.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub is_narrator: bool,
    /// Set when the reply is attributed to a present character.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character: Option<String>,
    pub day: u32,
    pub time_of_day: TimeOfDay,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// POST /narrator/direct
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectResponse {
    pub response: String,
    pub day: u32,
    pub time_of_day: TimeOfDay,
}

/// POST /narrator/suggest-character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionResponse {
    pub response: String,
}

/// Mutation acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckResponse {
    pub success: bool,
}

impl AckResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Structured error body for non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_response_omits_empty_optionals() {
        let body = ChatResponse {
            response: "The wind picks up.".into(),
            is_narrator: true,
            character: None,
            day: 1,
            time_of_day: TimeOfDay::Morning,
            error: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("character").is_none());
        assert!(json.get("error").is_none());
        assert_eq!(json["time_of_day"], "morning");
    }

    #[test]
    fn session_response_round_trips() {
        let session = SessionResponse {
            id: "default_story".into(),
            day: 2,
            time_of_day: TimeOfDay::Night,
            scene: "A quiet archive".into(),
            characters_present: vec![CharacterDto {
                name: "Lyra".into(),
                intro: "*shimmer*".into(),
                background: "archivist".into(),
                profile: "/page/image/lyra.png".into(),
            }],
            is_active: true,
        };
        let json = serde_json::to_string(&session).unwrap();
        let back: SessionResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(back.characters_present.len(), 1);
        assert_eq!(back.time_of_day, TimeOfDay::Night);
    }
}
