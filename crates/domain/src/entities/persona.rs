//! Persona entity.

use serde::{Deserialize, Serialize};

/// The identity the human user speaks as, distinct from any character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub name: String,
    pub description: String,
}

impl Persona {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Fallback identity used when a turn names no persona (or an unknown
    /// one).
    pub fn guest() -> Self {
        Self::new("Guest", "A curious visitor to the website.")
    }
}
