use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::app_state::AppState;
use crate::db::{AdditionalQuestion, ServiceDetails, ServicePayload, ServiceRepository};
use crate::error::{AppError, AppResult};

pub async fn create_service(
    State(state): State<AppState>,
    Json(payload): Json<ServicePayload>,
) -> AppResult<(StatusCode, Json<ServiceDetails>)> {
    payload.validate()?;

    let mut tx = state.db.begin().await?;
    let service = ServiceRepository::create(&mut tx, &payload).await?;
    let timeframes =
        ServiceRepository::replace_timeframes(&mut tx, service.id, &payload.timeframes).await?;
    let additional_questions =
        ServiceRepository::replace_questions(&mut tx, service.id, &payload.additional_questions)
            .await?;
    tx.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(ServiceDetails {
            service,
            timeframes,
            additional_questions,
        }),
    ))
}

/// Full update: the service row plus a wholesale replacement of its
/// timeframes and questions.
pub async fn update_service(
    State(state): State<AppState>,
    Path(service_id): Path<Uuid>,
    Json(payload): Json<ServicePayload>,
) -> AppResult<Json<ServiceDetails>> {
    payload.validate()?;

    let mut tx = state.db.begin().await?;
    let service = ServiceRepository::update(&mut tx, service_id, &payload).await?;
    let timeframes =
        ServiceRepository::replace_timeframes(&mut tx, service.id, &payload.timeframes).await?;
    let additional_questions =
        ServiceRepository::replace_questions(&mut tx, service.id, &payload.additional_questions)
            .await?;
    tx.commit().await?;

    Ok(Json(ServiceDetails {
        service,
        timeframes,
        additional_questions,
    }))
}

pub async fn get_service(
    State(state): State<AppState>,
    Path(service_id): Path<Uuid>,
) -> AppResult<Json<ServiceDetails>> {
    let service = ServiceRepository::get(&state.db, service_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Service {service_id} not found")))?;
    let timeframes = ServiceRepository::timeframes(&state.db, service.id).await?;
    let additional_questions = ServiceRepository::questions(&state.db, service.id).await?;
    Ok(Json(ServiceDetails {
        service,
        timeframes,
        additional_questions,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ServiceListQuery {
    pub company: Option<Uuid>,
}

pub async fn list_services(
    State(state): State<AppState>,
    Query(query): Query<ServiceListQuery>,
) -> AppResult<Json<Vec<ServiceDetails>>> {
    let services = ServiceRepository::list(&state.db, query.company).await?;

    let mut details = Vec::with_capacity(services.len());
    for service in services {
        let timeframes = ServiceRepository::timeframes(&state.db, service.id).await?;
        let additional_questions = ServiceRepository::questions(&state.db, service.id).await?;
        details.push(ServiceDetails {
            service,
            timeframes,
            additional_questions,
        });
    }
    Ok(Json(details))
}

pub async fn delete_service(
    State(state): State<AppState>,
    Path(service_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    ServiceRepository::soft_delete(&state.db, service_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct QuestionListQuery {
    pub service: Uuid,
}

/// Questions the booking form must render for a service.
pub async fn list_additional_questions(
    State(state): State<AppState>,
    Query(query): Query<QuestionListQuery>,
) -> AppResult<Json<Vec<AdditionalQuestion>>> {
    let questions = ServiceRepository::questions(&state.db, query.service).await?;
    Ok(Json(questions))
}
