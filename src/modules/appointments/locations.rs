use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::app_state::AppState;
use crate::db::{Location, LocationRepository, NewLocation, UpdateLocation};
use crate::error::{AppError, AppResult};

pub async fn create_location(
    State(state): State<AppState>,
    Json(payload): Json<NewLocation>,
) -> AppResult<(StatusCode, Json<Location>)> {
    payload.validate()?;
    let location = LocationRepository::create(&state.db, &payload).await?;
    Ok((StatusCode::CREATED, Json(location)))
}

#[derive(Debug, Deserialize)]
pub struct LocationListQuery {
    pub company: Option<Uuid>,
    pub service: Option<Uuid>,
}

pub async fn list_locations(
    State(state): State<AppState>,
    Query(query): Query<LocationListQuery>,
) -> AppResult<Json<Vec<Location>>> {
    let locations = LocationRepository::list(&state.db, query.company, query.service).await?;
    Ok(Json(locations))
}

pub async fn get_location(
    State(state): State<AppState>,
    Path(location_id): Path<Uuid>,
) -> AppResult<Json<Location>> {
    let location = LocationRepository::get(&state.db, location_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Location {location_id} not found")))?;
    Ok(Json(location))
}

pub async fn update_location(
    State(state): State<AppState>,
    Path(location_id): Path<Uuid>,
    Json(payload): Json<UpdateLocation>,
) -> AppResult<Json<Location>> {
    payload.validate()?;
    let location = LocationRepository::update(&state.db, location_id, &payload).await?;
    Ok(Json(location))
}

pub async fn delete_location(
    State(state): State<AppState>,
    Path(location_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    LocationRepository::soft_delete(&state.db, location_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
