use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::app_state::AppState;
use crate::db::{
    NewProfessional, Professional, ProfessionalDetails, ProfessionalRepository, UpdateProfessional,
};
use crate::error::{AppError, AppResult};

pub async fn create_professional(
    State(state): State<AppState>,
    Json(payload): Json<NewProfessional>,
) -> AppResult<(StatusCode, Json<ProfessionalDetails>)> {
    payload.validate()?;

    let mut tx = state.db.begin().await?;
    let professional = ProfessionalRepository::create(&mut tx, &payload).await?;
    tx.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(ProfessionalDetails {
            professional,
            services: payload.services,
        }),
    ))
}

#[derive(Debug, Deserialize)]
pub struct ProfessionalListQuery {
    pub company: Option<Uuid>,
    pub service: Option<Uuid>,
    pub location: Option<Uuid>,
}

pub async fn list_professionals(
    State(state): State<AppState>,
    Query(query): Query<ProfessionalListQuery>,
) -> AppResult<Json<Vec<Professional>>> {
    let professionals =
        ProfessionalRepository::list(&state.db, query.company, query.service, query.location)
            .await?;
    Ok(Json(professionals))
}

pub async fn get_professional(
    State(state): State<AppState>,
    Path(professional_id): Path<Uuid>,
) -> AppResult<Json<ProfessionalDetails>> {
    let professional = ProfessionalRepository::get(&state.db, professional_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Professional {professional_id} not found")))?;
    let services = ProfessionalRepository::services_of(&state.db, professional.id).await?;
    Ok(Json(ProfessionalDetails {
        professional,
        services,
    }))
}

pub async fn update_professional(
    State(state): State<AppState>,
    Path(professional_id): Path<Uuid>,
    Json(payload): Json<UpdateProfessional>,
) -> AppResult<Json<ProfessionalDetails>> {
    payload.validate()?;

    let mut tx = state.db.begin().await?;
    let professional = ProfessionalRepository::update(&mut tx, professional_id, &payload).await?;
    tx.commit().await?;

    let services = ProfessionalRepository::services_of(&state.db, professional.id).await?;
    Ok(Json(ProfessionalDetails {
        professional,
        services,
    }))
}

pub async fn delete_professional(
    State(state): State<AppState>,
    Path(professional_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    ProfessionalRepository::soft_delete(&state.db, professional_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
