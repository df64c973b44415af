//! Unified error types for the domain layer.
//!
//! Provides a common error type used across all domain operations, enabling
//! consistent error handling without forcing adapters to use String or anyhow.

use thiserror::Error;

/// Unified error type for domain operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An entity with this key already exists.
    #[error("{entity_type} '{id}' already exists")]
    DuplicateId {
        entity_type: &'static str,
        id: String,
    },

    /// Entity not found.
    #[error("{entity_type} '{id}' not found")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// A character name was referenced that is not in the registry.
    #[error("Character '{0}' not found")]
    CharacterNotFound(String),

    /// No story is currently active.
    #[error("No active story set")]
    NoActiveSession,

    /// A slash-command that the turn router does not recognize.
    #[error("Unknown command: /{0}")]
    UnknownCommand(String),

    /// Validation failed (e.g., missing or empty required field).
    #[error("Validation failed: {0}")]
    Validation(String),
}

impl DomainError {
    /// Create a duplicate-key error.
    pub fn duplicate_id(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::DuplicateId {
            entity_type,
            id: id.into(),
        }
    }

    /// Create a not-found error.
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a validation error for business rule violations.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Whether this error is a not-found of any flavor (entity, character,
    /// or active session).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::CharacterNotFound(_) | Self::NoActiveSession
        )
    }
}
