use axum::{middleware, routing::get, Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;

use crate::{
    app_state::AppState,
    middleware::tracing::observability_middleware,
    modules::{accounts::routes::account_routes, appointments::routes::appointment_routes},
};

pub fn create_router(state: AppState) -> Router {
    let api = appointment_routes().merge(account_routes());

    Router::new()
        .route("/", get(hello))
        .route("/health", get(health_check))
        .nest("/api", api)
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(observability_middleware))
        .with_state(state)
}

async fn hello() -> &'static str {
    "Agenda backend says hello!\n"
}

async fn health_check(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Json<serde_json::Value> {
    let db_result = sqlx::query("SELECT 1").execute(&state.db).await;

    let db_status = match db_result {
        Ok(_) => "healthy",
        Err(e) => {
            tracing::info!("Database health check failed: {}", e);
            "unhealthy"
        }
    };

    let telemetry_health = crate::telemetry::telemetry_health_check();

    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "services": {
            "database": db_status,
            "telemetry": telemetry_health
        }
    }))
}
