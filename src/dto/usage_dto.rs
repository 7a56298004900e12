use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::activity_dto::marker_line;
use crate::dto::common::format_short_time;
use crate::models::usage::ShareSpec;
use crate::services::usage_service::{UsageDetail, UsageEventInput, UsagePage};

#[derive(Debug, Serialize, Deserialize)]
pub struct ShareFlag {
    pub person_id: Uuid,
    #[serde(default)]
    pub paid: bool,
}

/// Create/update payload for a usage event. The participant list is the
/// full membership for the event, supplied wholesale on every edit.
#[derive(Debug, Deserialize, Validate)]
pub struct SaveUsageEventRequest {
    pub vehicle_id: Uuid,
    pub event_time: DateTime<Utc>,
    pub fuel_price: Decimal,
    pub kilometer_before: i64,
    pub kilometer_after: i64,
    #[serde(default)]
    pub description: String,
    #[validate(length(min = 1))]
    pub participants: Vec<ShareFlag>,
}

impl From<SaveUsageEventRequest> for UsageEventInput {
    fn from(request: SaveUsageEventRequest) -> Self {
        UsageEventInput {
            vehicle_id: request.vehicle_id,
            event_time: request.event_time,
            fuel_price: request.fuel_price,
            kilometer_before: request.kilometer_before,
            kilometer_after: request.kilometer_after,
            description: request.description,
            participants: request
                .participants
                .into_iter()
                .map(|p| ShareSpec {
                    person_id: p.person_id,
                    paid: p.paid,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct VehicleFilterQuery {
    pub vehicle_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct UsageDatum {
    pub id: Uuid,
    pub event_time: String,
    pub fuel_price: Decimal,
    pub kilometer_before: i64,
    pub kilometer_after: i64,
    pub description: String,
    pub total_cost: Decimal,
    pub pay_each: Decimal,
    pub participants: String,
}

#[derive(Debug, Serialize)]
pub struct UsagePageResponse {
    pub data: Vec<UsageDatum>,
    pub total_records: i64,
    pub total_pages: i64,
}

impl From<&UsagePage> for UsagePageResponse {
    fn from(page: &UsagePage) -> Self {
        Self {
            data: page
                .items
                .iter()
                .map(|item| UsageDatum {
                    id: item.event.id,
                    event_time: format_short_time(&item.event.event_time),
                    fuel_price: item.event.fuel_price,
                    kilometer_before: item.event.kilometer_before,
                    kilometer_after: item.event.kilometer_after,
                    description: item.event.description.clone(),
                    total_cost: item.event.total_cost,
                    pay_each: item.event.pay_each,
                    participants: marker_line(&item.participants),
                })
                .collect(),
            total_records: page.total_records,
            total_pages: page.total_pages,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UsageParticipantDatum {
    pub share_id: Uuid,
    pub person_id: Uuid,
    pub nickname: String,
    pub paid: bool,
}

#[derive(Debug, Serialize)]
pub struct UsageDetailResponse {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub event_time: DateTime<Utc>,
    pub fuel_price: Decimal,
    pub kilometer_before: i64,
    pub kilometer_after: i64,
    pub description: String,
    pub total_cost: Decimal,
    pub each_should_pay: Decimal,
    pub participants: Vec<UsageParticipantDatum>,
}

impl From<&UsageDetail> for UsageDetailResponse {
    fn from(detail: &UsageDetail) -> Self {
        Self {
            id: detail.event.id,
            vehicle_id: detail.event.vehicle_id,
            event_time: detail.event.event_time,
            fuel_price: detail.event.fuel_price,
            kilometer_before: detail.event.kilometer_before,
            kilometer_after: detail.event.kilometer_after,
            description: detail.event.description.clone(),
            total_cost: detail.event.total_cost,
            each_should_pay: detail.each_should_pay,
            participants: detail
                .participants
                .iter()
                .map(|p| UsageParticipantDatum {
                    share_id: p.share_id,
                    person_id: p.person_id,
                    nickname: p.nickname.clone(),
                    paid: p.paid,
                })
                .collect(),
        }
    }
}
