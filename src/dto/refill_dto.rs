use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::activity_dto::paid_marker;
use crate::dto::common::format_short_time;
use crate::models::refill::RefillEvent;
use crate::services::refill_service::{RefillEventInput, RefillPage};

/// Create/update payload for a refill event. `acting_person_id` is the
/// person submitting the request and feeds the audit columns.
#[derive(Debug, Deserialize, Validate)]
pub struct SaveRefillEventRequest {
    pub vehicle_id: Uuid,
    pub refill_time: DateTime<Utc>,
    pub total_money: Decimal,
    pub kilometer_before: i64,
    pub kilometer_after: i64,
    #[serde(default)]
    pub paid: bool,
    pub refill_by: Uuid,
    pub acting_person_id: Uuid,
}

impl From<SaveRefillEventRequest> for RefillEventInput {
    fn from(request: SaveRefillEventRequest) -> Self {
        RefillEventInput {
            vehicle_id: request.vehicle_id,
            refill_time: request.refill_time,
            total_money: request.total_money,
            kilometer_before: request.kilometer_before,
            kilometer_after: request.kilometer_after,
            paid: request.paid,
            refill_by: request.refill_by,
            acting_person_id: request.acting_person_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RefillDatum {
    pub id: Uuid,
    pub refill_time: String,
    pub kilometer_before: i64,
    pub kilometer_after: i64,
    pub total_money: Decimal,
    pub unit_price_calculated: Decimal,
    pub paid: String,
    pub refill_by: Uuid,
}

#[derive(Debug, Serialize)]
pub struct RefillPageResponse {
    pub data: Vec<RefillDatum>,
    pub total_records: i64,
    pub total_pages: i64,
}

impl From<&RefillPage> for RefillPageResponse {
    fn from(page: &RefillPage) -> Self {
        Self {
            data: page
                .items
                .iter()
                .map(|refill| RefillDatum {
                    id: refill.id,
                    refill_time: format_short_time(&refill.refill_time),
                    kilometer_before: refill.kilometer_before,
                    kilometer_after: refill.kilometer_after,
                    total_money: refill.total_money,
                    unit_price_calculated: refill.unit_price_calculated,
                    paid: paid_marker(refill.paid).to_string(),
                    refill_by: refill.refill_by,
                })
                .collect(),
            total_records: page.total_records,
            total_pages: page.total_pages,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RefillDetailResponse {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub refill_time: DateTime<Utc>,
    pub total_money: Decimal,
    pub kilometer_before: i64,
    pub kilometer_after: i64,
    pub unit_price_calculated: Decimal,
    pub paid: bool,
    pub refill_by: Uuid,
}

impl From<&RefillEvent> for RefillDetailResponse {
    fn from(refill: &RefillEvent) -> Self {
        Self {
            id: refill.id,
            vehicle_id: refill.vehicle_id,
            refill_time: refill.refill_time,
            total_money: refill.total_money,
            kilometer_before: refill.kilometer_before,
            kilometer_after: refill.kilometer_after,
            unit_price_calculated: refill.unit_price_calculated,
            paid: refill.paid,
            refill_by: refill.refill_by,
        }
    }
}
