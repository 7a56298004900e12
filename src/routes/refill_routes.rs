use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::{ApiResponse, CreatedResponse, PageQuery};
use crate::dto::refill_dto::{RefillDetailResponse, RefillPageResponse, SaveRefillEventRequest};
use crate::dto::usage_dto::VehicleFilterQuery;
use crate::services::refill_service::RefillService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_refill_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_refill_events))
        .route("/", post(create_refill_event))
        .route("/:id", get(get_refill_event))
        .route("/:id", put(update_refill_event))
        .route("/:id", delete(delete_refill_event))
}

async fn list_refill_events(
    State(state): State<AppState>,
    Query(filter): Query<VehicleFilterQuery>,
    Query(page): Query<PageQuery>,
) -> Result<Json<RefillPageResponse>, AppError> {
    let service = RefillService::new(state.store.clone());
    let result = service.list(filter.vehicle_id, (&page).into()).await?;
    Ok(Json((&result).into()))
}

async fn create_refill_event(
    State(state): State<AppState>,
    Json(request): Json<SaveRefillEventRequest>,
) -> Result<Json<ApiResponse<CreatedResponse>>, AppError> {
    request.validate()?;
    let service = RefillService::new(state.store.clone());
    let id = service.create(request.into()).await?;
    Ok(Json(ApiResponse::success(CreatedResponse { id })))
}

async fn get_refill_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RefillDetailResponse>, AppError> {
    let service = RefillService::new(state.store.clone());
    let refill = service.get(id).await?;
    Ok(Json((&refill).into()))
}

async fn update_refill_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SaveRefillEventRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    request.validate()?;
    let service = RefillService::new(state.store.clone());
    service.update(id, request.into()).await?;
    Ok(Json(ApiResponse::ok("refill event updated".to_string())))
}

async fn delete_refill_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let service = RefillService::new(state.store.clone());
    service.delete(id).await?;
    Ok(Json(ApiResponse::ok("refill event deleted".to_string())))
}
