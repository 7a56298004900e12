use axum::{
    extract::{Path, Query, State},
    routing::{get, patch, post},
    Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::dto::activity_dto::{
    BulkUpdatePaymentStatusRequest, PaidFilterQuery, PayBatchRequest, PersonUsageHistoryResponse,
    UnpaidActivitiesResponse, VehicleUsagesDatum,
};
use crate::dto::common::ApiResponse;
use crate::models::person::Person;
use crate::services::activity_service::ActivityService;
use crate::services::settlement_service::SettlementService;
use crate::services::store::SharePaidUpdate;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_person_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_people))
        .route("/:person_id/fuel-usages", get(person_usage_history))
        .route(
            "/:person_id/vehicles/:vehicle_id/unpaid-activities",
            get(unpaid_activities),
        )
        .route("/:person_id/pay", post(pay_batch))
        .route("/:person_id/payment-status", patch(update_payment_status))
}

async fn list_people(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Person>>>, AppError> {
    let people = state.store.all_people().await?;
    Ok(Json(ApiResponse::success(people)))
}

async fn person_usage_history(
    State(state): State<AppState>,
    Path(person_id): Path<Uuid>,
    Query(filter): Query<PaidFilterQuery>,
) -> Result<Json<PersonUsageHistoryResponse>, AppError> {
    let service = ActivityService::new(state.store.clone());
    let groups = service
        .person_usage_history(person_id, filter.is_paid)
        .await?;
    Ok(Json(PersonUsageHistoryResponse {
        data: groups.iter().map(VehicleUsagesDatum::from).collect(),
    }))
}

async fn unpaid_activities(
    State(state): State<AppState>,
    Path((person_id, vehicle_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<UnpaidActivitiesResponse>, AppError> {
    let service = ActivityService::new(state.store.clone());
    let activities = service.unpaid_activities(person_id, vehicle_id).await?;
    Ok(Json((&activities).into()))
}

async fn pay_batch(
    State(state): State<AppState>,
    Path(person_id): Path<Uuid>,
    Json(request): Json<PayBatchRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    request.validate()?;
    let service = SettlementService::new(state.store.clone());
    service
        .pay_batch(person_id, &request.usage_share_ids, &request.refill_ids)
        .await?;
    Ok(Json(ApiResponse::ok("activities settled".to_string())))
}

async fn update_payment_status(
    State(state): State<AppState>,
    Path(person_id): Path<Uuid>,
    Json(request): Json<BulkUpdatePaymentStatusRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    request.validate()?;
    let updates: Vec<SharePaidUpdate> = request
        .items
        .iter()
        .map(|item| SharePaidUpdate {
            share_id: item.id,
            paid: item.paid,
        })
        .collect();
    let service = SettlementService::new(state.store.clone());
    service
        .bulk_update_payment_status(person_id, &updates)
        .await?;
    Ok(Json(ApiResponse::ok("payment status updated".to_string())))
}
