//! Story lifecycle and scene endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use taleweaver_shared::{
    AckResponse, AddCharacterRequest, CreateStoryRequest, SceneResponse, SessionResponse,
    SetActiveRequest, SetSceneRequest, StoryListResponse, StorySummary,
};

use crate::api::character_routes::to_dto;
use crate::api::http::ApiError;
use crate::app::App;

pub async fn list_stories(State(app): State<Arc<App>>) -> Json<StoryListResponse> {
    let narrators = app
        .stories
        .list()
        .await
        .into_iter()
        .map(|(story, is_active)| StorySummary {
            id: story.id,
            scene: story.scene,
            day: story.clock.day,
            time_of_day: story.clock.time_of_day,
            characters: story.characters_present.into_iter().collect(),
            is_active,
        })
        .collect();
    Json(StoryListResponse { narrators })
}

pub async fn create_story(
    State(app): State<Arc<App>>,
    Json(req): Json<CreateStoryRequest>,
) -> Result<(StatusCode, Json<AckResponse>), ApiError> {
    app.stories.create(&req.id, req.model).await?;
    app.persist().await;
    Ok((StatusCode::CREATED, Json(AckResponse::ok())))
}

pub async fn get_active(
    State(app): State<Arc<App>>,
) -> Result<Json<SessionResponse>, ApiError> {
    let handle = app.stories.get_active().await?;
    let story = handle.lock().await.clone();

    let characters_present = app
        .characters
        .resolve_present(story.characters_present.iter())
        .iter()
        .map(to_dto)
        .collect();

    Ok(Json(SessionResponse {
        id: story.id,
        day: story.clock.day,
        time_of_day: story.clock.time_of_day,
        scene: story.scene,
        characters_present,
        is_active: true,
    }))
}

pub async fn set_active(
    State(app): State<Arc<App>>,
    Json(req): Json<SetActiveRequest>,
) -> Result<Json<AckResponse>, ApiError> {
    app.stories.set_active(&req.id).await?;
    app.persist().await;
    Ok(Json(AckResponse::ok()))
}

pub async fn delete_story(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
) -> Result<Json<AckResponse>, ApiError> {
    app.stories.delete(&id).await?;
    app.persist().await;
    Ok(Json(AckResponse::ok()))
}

/// Add a registered character to a story's present-set. Unlike the in-chat
/// `/add` command this targets an explicit story id, active or not.
pub async fn add_character(
    State(app): State<Arc<App>>,
    Json(req): Json<AddCharacterRequest>,
) -> Result<Json<AckResponse>, ApiError> {
    if !app.characters.contains(&req.character_name) {
        return Err(taleweaver_domain::DomainError::CharacterNotFound(
            req.character_name,
        )
        .into());
    }
    let handle = app.stories.get(&req.narrator_id).await?;
    {
        let mut story = handle.lock().await;
        story.add_character(req.character_name);
    }
    app.persist().await;
    Ok(Json(AckResponse::ok()))
}

/// Replace the active story's scene and, optionally, its present-set.
pub async fn set_scene(
    State(app): State<Arc<App>>,
    Json(req): Json<SetSceneRequest>,
) -> Result<Json<SceneResponse>, ApiError> {
    let handle = app.stories.get_active().await?;

    let names = {
        let mut story = handle.lock().await;
        let names = match req.characters_present {
            Some(list) => app.characters.filter_known(list),
            None => story.characters_present.clone(),
        };
        story.set_scene(req.scene.clone(), names.clone());
        names
    };
    app.persist().await;

    Ok(Json(SceneResponse {
        success: true,
        scene: req.scene,
        characters_present: names.into_iter().collect(),
    }))
}
