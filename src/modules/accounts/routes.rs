use axum::{
    routing::{get, patch},
    Router,
};

use crate::app_state::AppState;

use super::companies::{
    company_profile, get_company, list_companies, list_company_profiles, register_company,
    update_company, update_company_profile,
};
use super::customers::{get_customer, list_customers};

pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/companies", get(list_companies).post(register_company))
        .route("/companies/:company_id", get(get_company).patch(update_company))
        .route("/companies/:company_id/profile", get(company_profile))
        .route("/company_profiles", get(list_company_profiles))
        .route("/company_profiles/:company_id", patch(update_company_profile))
        .route("/customers", get(list_customers))
        .route("/customers/:customer_id", get(get_customer))
}
