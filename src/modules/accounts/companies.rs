use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::app_state::AppState;
use crate::db::{
    Company, CompanyProfile, CompanyRepository, RegisterCompanyPayload, UpdateCompany,
    UpdateCompanyProfile,
};
use crate::error::{AppError, AppResult};

#[derive(Debug, Serialize)]
pub struct RegisteredCompany {
    pub company: Company,
    pub profile: CompanyProfile,
}

pub async fn register_company(
    State(state): State<AppState>,
    Json(payload): Json<RegisterCompanyPayload>,
) -> AppResult<(StatusCode, Json<RegisteredCompany>)> {
    payload.validate()?;

    let mut attempt = 1;
    let slug = loop {
        let candidate = slug_candidate(&payload.first_name, &payload.last_name, attempt);
        if !CompanyRepository::slug_taken(&state.db, &candidate).await? {
            break candidate;
        }
        attempt += 1;
    };

    let mut tx = state.db.begin().await?;
    let (company, profile) =
        CompanyRepository::create_with_profile(&mut tx, &payload, &slug).await?;
    tx.commit().await?;

    Ok((StatusCode::CREATED, Json(RegisteredCompany { company, profile })))
}

pub async fn list_companies(State(state): State<AppState>) -> AppResult<Json<Vec<Company>>> {
    let companies = CompanyRepository::list(&state.db).await?;
    Ok(Json(companies))
}

pub async fn get_company(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
) -> AppResult<Json<Company>> {
    let company = CompanyRepository::get(&state.db, company_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Company {company_id} not found")))?;
    Ok(Json(company))
}

pub async fn update_company(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
    Json(payload): Json<UpdateCompany>,
) -> AppResult<Json<Company>> {
    payload.validate()?;
    let company = CompanyRepository::update(&state.db, company_id, &payload).await?;
    Ok(Json(company))
}

/// Public profile lookup for the booking page.
pub async fn company_profile(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
) -> AppResult<Json<CompanyProfile>> {
    let profile = CompanyRepository::profile_by_company(&state.db, company_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile for company {company_id} not found")))?;
    Ok(Json(profile))
}

#[derive(Debug, Deserialize)]
pub struct ProfileQuery {
    pub slug: Option<String>,
    pub company: Option<Uuid>,
}

pub async fn list_company_profiles(
    State(state): State<AppState>,
    Query(query): Query<ProfileQuery>,
) -> AppResult<Json<Vec<CompanyProfile>>> {
    let profiles =
        CompanyRepository::profiles(&state.db, query.slug.as_deref(), query.company).await?;
    Ok(Json(profiles))
}

pub async fn update_company_profile(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
    Json(payload): Json<UpdateCompanyProfile>,
) -> AppResult<Json<CompanyProfile>> {
    payload.validate()?;
    let profile = CompanyRepository::update_profile(&state.db, company_id, &payload).await?;
    Ok(Json(profile))
}

/// Slug candidates follow the `first-last-N` registration convention.
fn slug_candidate(first_name: &str, last_name: &str, attempt: u32) -> String {
    format!("{}-{}-{}", first_name.trim(), last_name.trim(), attempt)
        .to_lowercase()
        .replace(' ', "-")
}

#[cfg(test)]
mod tests {
    use super::slug_candidate;

    #[test]
    fn slugs_are_lowercased_and_hyphenated() {
        assert_eq!(slug_candidate("Ana", "Pérez", 1), "ana-pérez-1");
        assert_eq!(
            slug_candidate(" María José ", "del Valle", 3),
            "maría-josé-del-valle-3"
        );
    }
}
