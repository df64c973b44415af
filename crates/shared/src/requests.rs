//! Inbound request bodies.

use serde::{Deserialize, Serialize};

/// POST /character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCharacterRequest {
    pub name: String,
    pub intro: String,
    pub background: String,
    pub profile: String,
}

/// POST /persona
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePersonaRequest {
    pub name: String,
    pub description: String,
}

/// PUT /persona/{name}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePersonaRequest {
    pub description: String,
}

/// POST /narrator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStoryRequest {
    pub id: String,
    /// Optional language-model hint for this story.
    #[serde(default)]
    pub model: Option<String>,
}

/// PUT /narrator/active
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetActiveRequest {
    pub id: String,
}

/// POST /narrator/character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddCharacterRequest {
    pub narrator_id: String,
    pub character_name: String,
}

/// POST /narrator/scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetSceneRequest {
    pub scene: String,
    /// When omitted, the current present-set is kept.
    #[serde(default)]
    pub characters_present: Option<Vec<String>>,
}

/// POST /narrator/chat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Persona the user speaks as; guest identity when omitted.
    #[serde(default)]
    pub persona: Option<String>,
}

/// POST /narrator/direct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

/// POST /narrator/suggest-character
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuggestCharacterRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}
