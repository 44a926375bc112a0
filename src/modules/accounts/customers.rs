use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::app_state::AppState;
use crate::db::{Customer, CustomerRepository};
use crate::error::{AppError, AppResult};
use crate::pagination::{Page, PageParams};

pub async fn list_customers(
    State(state): State<AppState>,
    Query(page): Query<PageParams>,
) -> AppResult<Json<Page<Customer>>> {
    let (results, count) = CustomerRepository::list(&state.db, page.limit_offset()).await?;
    Ok(Json(Page { count, results }))
}

pub async fn get_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
) -> AppResult<Json<Customer>> {
    let customer = CustomerRepository::get(&state.db, customer_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Customer {customer_id} not found")))?;
    Ok(Json(customer))
}
