//! Character registry endpoints.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use taleweaver_domain::Character;
use taleweaver_shared::{
    AckResponse, CharacterDto, CharacterListResponse, CreateCharacterRequest,
};

use crate::api::http::ApiError;
use crate::app::App;

pub(crate) fn to_dto(character: &Character) -> CharacterDto {
    CharacterDto {
        name: character.name.clone(),
        intro: character.intro.clone(),
        background: character.background.clone(),
        profile: character.profile_asset(),
    }
}

pub async fn list_characters(State(app): State<Arc<App>>) -> Json<CharacterListResponse> {
    let characters = app.characters.list().iter().map(to_dto).collect();
    Json(CharacterListResponse { characters })
}

pub async fn create_character(
    State(app): State<Arc<App>>,
    Json(req): Json<CreateCharacterRequest>,
) -> Result<(StatusCode, Json<AckResponse>), ApiError> {
    let character = Character::new(req.name, req.intro, req.background, req.profile)?;
    let name = character.name.clone();
    app.characters.add(character)?;
    tracing::info!(character = %name, "Character created");
    app.persist().await;
    Ok((StatusCode::CREATED, Json(AckResponse::ok())))
}
