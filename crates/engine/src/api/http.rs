//! HTTP routes.

use axum::{
    routing::{delete, get, post, put},
    Json, Router,
};
use std::sync::Arc;

use taleweaver_domain::DomainError;
use taleweaver_shared::ErrorResponse;

use crate::api::{character_routes, chat_routes, persona_routes, story_routes};
use crate::app::App;
use crate::use_cases::TurnError;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/health", get(health))
        .route("/characters", get(character_routes::list_characters))
        .route("/character", post(character_routes::create_character))
        .route("/personas", get(persona_routes::list_personas))
        .route("/persona", post(persona_routes::create_persona))
        .route(
            "/persona/{name}",
            put(persona_routes::update_persona).delete(persona_routes::delete_persona),
        )
        .route("/narrators", get(story_routes::list_stories))
        .route("/narrator", post(story_routes::create_story))
        .route(
            "/narrator/active",
            get(story_routes::get_active).put(story_routes::set_active),
        )
        .route("/narrator/{id}", delete(story_routes::delete_story))
        .route("/narrator/character", post(story_routes::add_character))
        .route("/narrator/scene", post(story_routes::set_scene))
        .route("/narrator/chat", post(chat_routes::chat))
        .route("/narrator/direct", post(chat_routes::direct_scene))
        .route(
            "/narrator/suggest-character",
            post(chat_routes::suggest_character),
        )
}

async fn health() -> &'static str {
    "OK"
}

/// HTTP-facing error with the status mapping for the domain taxonomy.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    /// The language-generation collaborator failed or timed out.
    BadGateway(String),
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ApiError::BadRequest(msg) => (axum::http::StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (axum::http::StatusCode::NOT_FOUND, msg),
            ApiError::BadGateway(msg) => (axum::http::StatusCode::BAD_GATEWAY, msg),
        };
        (status, Json(ErrorResponse { error })).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        if e.is_not_found() {
            ApiError::NotFound(e.to_string())
        } else {
            ApiError::BadRequest(e.to_string())
        }
    }
}

impl From<TurnError> for ApiError {
    fn from(e: TurnError) -> Self {
        match e {
            TurnError::Session(err) => err.into(),
            TurnError::Generation(err) => ApiError::BadGateway(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::LlmError;

    #[test]
    fn domain_errors_map_to_statuses() {
        assert!(matches!(
            ApiError::from(DomainError::duplicate_id("Story", "s1")),
            ApiError::BadRequest(_)
        ));
        assert!(matches!(
            ApiError::from(DomainError::NoActiveSession),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from(DomainError::CharacterNotFound("Ghost".into())),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from(DomainError::validation("missing field")),
            ApiError::BadRequest(_)
        ));
    }

    #[test]
    fn generation_failure_is_a_bad_gateway() {
        let err = TurnError::Generation(LlmError::RequestFailed("timeout".into()));
        assert!(matches!(ApiError::from(err), ApiError::BadGateway(_)));
    }
}
