//! Character entity.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A defined character: who they are and how they appear.
///
/// `name` is the unique key across the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    /// Scene-setting line shown when the character first appears.
    pub intro: String,
    /// Backstory fed to the language model as the character's voice.
    pub background: String,
    /// Image asset reference; either an absolute path or a bare asset name.
    pub profile: String,
}

impl Character {
    pub fn new(
        name: impl Into<String>,
        intro: impl Into<String>,
        background: impl Into<String>,
        profile: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("Character name cannot be empty"));
        }
        Ok(Self {
            name,
            intro: intro.into(),
            background: background.into(),
            profile: profile.into(),
        })
    }

    /// Resolved image path for the client.
    ///
    /// Bare asset names resolve under `/page/image/`; anything already
    /// rooted is passed through untouched.
    pub fn profile_asset(&self) -> String {
        if self.profile.starts_with('/') {
            self.profile.clone()
        } else {
            format!("/page/image/{}.png", self.profile)
        }
    }
}
