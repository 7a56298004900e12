pub mod person_routes;
pub mod refill_routes;
pub mod usage_routes;
pub mod vehicle_routes;

use axum::{response::Json, routing::get, Router};
use serde_json::json;

use crate::state::AppState;

pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/api/usages", usage_routes::create_usage_router())
        .nest("/api/refills", refill_routes::create_refill_router())
        .nest("/api/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/api/people", person_routes::create_person_router())
        .route("/health", get(health))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "service": "fuel-settlement",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
