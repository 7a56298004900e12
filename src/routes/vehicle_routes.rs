use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::dto::activity_dto::LatestFuelInfoResponse;
use crate::dto::common::ApiResponse;
use crate::models::vehicle::Vehicle;
use crate::services::activity_service::ActivityService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles))
        .route("/:vehicle_id/latest-fuel-info", get(latest_fuel_info))
}

async fn list_vehicles(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Vehicle>>>, AppError> {
    let vehicles = state.store.all_vehicles().await?;
    Ok(Json(ApiResponse::success(vehicles)))
}

async fn latest_fuel_info(
    State(state): State<AppState>,
    Path(vehicle_id): Path<Uuid>,
) -> Result<Json<LatestFuelInfoResponse>, AppError> {
    let service = ActivityService::new(state.store.clone());
    let info = service.latest_fuel_info(vehicle_id).await?;
    Ok(Json((&info).into()))
}
