//! Persona endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use taleweaver_domain::Persona;
use taleweaver_shared::{
    CreatePersonaRequest, PersonaDto, PersonaListResponse, UpdatePersonaRequest,
};

use crate::api::http::ApiError;
use crate::app::App;

fn to_dto(persona: &Persona) -> PersonaDto {
    PersonaDto {
        name: persona.name.clone(),
        description: persona.description.clone(),
    }
}

pub async fn list_personas(State(app): State<Arc<App>>) -> Json<PersonaListResponse> {
    let personas = app.personas.list().iter().map(to_dto).collect();
    Json(PersonaListResponse { personas })
}

pub async fn create_persona(
    State(app): State<Arc<App>>,
    Json(req): Json<CreatePersonaRequest>,
) -> Result<(StatusCode, Json<PersonaDto>), ApiError> {
    if req.name.trim().is_empty() {
        return Err(ApiError::BadRequest("Persona name cannot be empty".into()));
    }
    let persona = app.personas.upsert(Persona::new(req.name, req.description));
    app.persist().await;
    Ok((StatusCode::CREATED, Json(to_dto(&persona))))
}

pub async fn update_persona(
    State(app): State<Arc<App>>,
    Path(name): Path<String>,
    Json(req): Json<UpdatePersonaRequest>,
) -> Result<Json<PersonaDto>, ApiError> {
    let persona = app.personas.update(&name, req.description)?;
    app.persist().await;
    Ok(Json(to_dto(&persona)))
}

pub async fn delete_persona(
    State(app): State<Arc<App>>,
    Path(name): Path<String>,
) -> Result<StatusCode, ApiError> {
    app.personas.delete(&name)?;
    app.persist().await;
    Ok(StatusCode::NO_CONTENT)
}
