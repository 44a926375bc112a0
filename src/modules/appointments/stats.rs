use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::db::{CompanyRepository, ProfessionalStat, ServiceStat, StatsRepository};
use crate::error::{AppError, AppResult};

#[derive(Debug, Serialize)]
pub struct CompanyStats {
    pub total_appointments: i64,
    pub total_revenue: i64,
    pub total_customers: i64,
    pub appointments_this_month: i64,
    pub revenue_this_month: i64,
    pub new_customers_this_month: i64,
    pub appointments_per_service: Vec<ServiceStat>,
    pub appointments_per_professional: Vec<ProfessionalStat>,
}

pub async fn company_stats(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
) -> AppResult<Json<CompanyStats>> {
    CompanyRepository::get(&state.db, company_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Company {company_id} not found")))?;

    let offset = state.env.app.utc_offset();
    let today = OffsetDateTime::now_utc().to_offset(offset).date();
    let month_start = today
        .replace_day(1)
        .map_err(|err| AppError::InternalServerError(err.to_string()))?
        .midnight()
        .assume_offset(offset);

    let (total_appointments, total_revenue, total_customers) =
        StatsRepository::totals(&state.db, company_id).await?;
    let (appointments_this_month, revenue_this_month) =
        StatsRepository::totals_since(&state.db, company_id, month_start).await?;
    let new_customers_this_month =
        StatsRepository::new_customers_since(&state.db, company_id, month_start).await?;
    let appointments_per_service = StatsRepository::per_service(&state.db, company_id).await?;
    let appointments_per_professional =
        StatsRepository::per_professional(&state.db, company_id).await?;

    Ok(Json(CompanyStats {
        total_appointments,
        total_revenue,
        total_customers,
        appointments_this_month,
        revenue_this_month,
        new_customers_this_month,
        appointments_per_service,
        appointments_per_professional,
    }))
}
