use axum::{
    routing::{get, post},
    Router,
};

use crate::app_state::AppState;

use super::appointments::{
    delete_appointment, get_appointment, list_appointments, new_appointment, update_appointment,
};
use super::availability::available_times;
use super::locations::{
    create_location, delete_location, get_location, list_locations, update_location,
};
use super::professionals::{
    create_professional, delete_professional, get_professional, list_professionals,
    update_professional,
};
use super::services::{
    create_service, delete_service, get_service, list_additional_questions, list_services,
    update_service,
};
use super::stats::company_stats;

pub fn appointment_routes() -> Router<AppState> {
    Router::new()
        .route("/appointments", get(list_appointments))
        .route(
            "/appointments/:appointment_id",
            get(get_appointment)
                .patch(update_appointment)
                .delete(delete_appointment),
        )
        .route("/new_appointment", post(new_appointment))
        .route(
            "/available_times/:professional_id/:service_id/:date",
            get(available_times),
        )
        .route("/services", get(list_services).post(create_service))
        .route(
            "/services/:service_id",
            get(get_service).put(update_service).delete(delete_service),
        )
        .route("/additional_questions", get(list_additional_questions))
        .route("/locations", get(list_locations).post(create_location))
        .route(
            "/locations/:location_id",
            get(get_location)
                .patch(update_location)
                .delete(delete_location),
        )
        .route(
            "/professionals",
            get(list_professionals).post(create_professional),
        )
        .route(
            "/professionals/:professional_id",
            get(get_professional)
                .put(update_professional)
                .delete(delete_professional),
        )
        .route("/stats/:company_id", get(company_stats))
}
