use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::{ApiResponse, CreatedResponse, PageQuery};
use crate::dto::usage_dto::{
    SaveUsageEventRequest, UsageDetailResponse, UsagePageResponse, VehicleFilterQuery,
};
use crate::services::usage_service::UsageService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_usage_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_usage_events))
        .route("/", post(create_usage_event))
        .route("/:id", get(get_usage_event))
        .route("/:id", put(update_usage_event))
        .route("/:id", delete(delete_usage_event))
}

async fn list_usage_events(
    State(state): State<AppState>,
    Query(filter): Query<VehicleFilterQuery>,
    Query(page): Query<PageQuery>,
) -> Result<Json<UsagePageResponse>, AppError> {
    let service = UsageService::new(state.store.clone());
    let result = service.list(filter.vehicle_id, (&page).into()).await?;
    Ok(Json((&result).into()))
}

async fn create_usage_event(
    State(state): State<AppState>,
    Json(request): Json<SaveUsageEventRequest>,
) -> Result<Json<ApiResponse<CreatedResponse>>, AppError> {
    request.validate()?;
    let service = UsageService::new(state.store.clone());
    let id = service.create(request.into()).await?;
    Ok(Json(ApiResponse::success(CreatedResponse { id })))
}

async fn get_usage_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UsageDetailResponse>, AppError> {
    let service = UsageService::new(state.store.clone());
    let detail = service.get(id).await?;
    Ok(Json((&detail).into()))
}

async fn update_usage_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SaveUsageEventRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    request.validate()?;
    let service = UsageService::new(state.store.clone());
    service.update(id, request.into()).await?;
    Ok(Json(ApiResponse::ok("usage event updated".to_string())))
}

async fn delete_usage_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let service = UsageService::new(state.store.clone());
    service.delete(id).await?;
    Ok(Json(ApiResponse::ok("usage event deleted".to_string())))
}
