//! Conversational endpoints: chat turns and forced narration.

use axum::{extract::State, Json};
use std::sync::Arc;

use taleweaver_shared::{
    ChatRequest, ChatResponse, DirectRequest, DirectResponse, SuggestCharacterRequest,
    SuggestionResponse,
};

use crate::api::http::ApiError;
use crate::app::App;

pub async fn chat(
    State(app): State<Arc<App>>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let outcome = app.turn.chat(&req.message, req.persona.as_deref()).await?;
    app.persist().await;
    Ok(Json(ChatResponse {
        response: outcome.response,
        is_narrator: outcome.is_narrator,
        character: outcome.character,
        day: outcome.clock.day,
        time_of_day: outcome.clock.time_of_day,
        error: outcome.error,
    }))
}

pub async fn direct_scene(
    State(app): State<Arc<App>>,
    Json(req): Json<DirectRequest>,
) -> Result<Json<DirectResponse>, ApiError> {
    let (response, clock) = app.narration.direct_scene(req.prompt.as_deref()).await?;
    app.persist().await;
    Ok(Json(DirectResponse {
        response,
        day: clock.day,
        time_of_day: clock.time_of_day,
    }))
}

pub async fn suggest_character(
    State(app): State<Arc<App>>,
    Json(req): Json<SuggestCharacterRequest>,
) -> Result<Json<SuggestionResponse>, ApiError> {
    let response = app
        .narration
        .suggest_character(req.prompt.as_deref())
        .await?;
    Ok(Json(SuggestionResponse { response }))
}
