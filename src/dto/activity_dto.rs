use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::dto::common::format_short_time;
use crate::models::usage::Participant;
use crate::services::activity_service::{
    LatestFuelInfo, RefillActivity, UnpaidActivities, UsageActivity, VehicleUsageGroup,
};

const PAID_MARKER: &str = "✅";
const UNPAID_MARKER: &str = "❌";

pub fn paid_marker(paid: bool) -> &'static str {
    if paid {
        PAID_MARKER
    } else {
        UNPAID_MARKER
    }
}

/// Renders the structured participant pairs as one line, each name
/// prefixed with its payment marker, in the order they were supplied.
pub fn marker_line(participants: &[Participant]) -> String {
    participants
        .iter()
        .map(|p| format!("{}{}", paid_marker(p.paid), p.nickname))
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Serialize)]
pub struct UnpaidUsageDatum {
    pub usage_share_id: Uuid,
    pub usage_event_id: Uuid,
    pub event_time: String,
    pub pay_each: Decimal,
    pub description: String,
    pub participants: String,
}

impl From<&UsageActivity> for UnpaidUsageDatum {
    fn from(activity: &UsageActivity) -> Self {
        Self {
            usage_share_id: activity.usage_share_id,
            usage_event_id: activity.usage_event_id,
            event_time: format_short_time(&activity.event_time),
            pay_each: activity.pay_each,
            description: activity.description.clone(),
            participants: marker_line(&activity.participants),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UnpaidRefillDatum {
    pub refill_event_id: Uuid,
    pub refill_time: String,
    pub paid: String,
    pub total_money: Decimal,
}

impl From<&RefillActivity> for UnpaidRefillDatum {
    fn from(activity: &RefillActivity) -> Self {
        Self {
            refill_event_id: activity.refill_event_id,
            refill_time: format_short_time(&activity.refill_time),
            paid: paid_marker(activity.paid).to_string(),
            total_money: activity.total_money,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UnpaidActivitiesResponse {
    pub fuel_usages: Vec<UnpaidUsageDatum>,
    pub fuel_refills: Vec<UnpaidRefillDatum>,
}

impl From<&UnpaidActivities> for UnpaidActivitiesResponse {
    fn from(activities: &UnpaidActivities) -> Self {
        Self {
            fuel_usages: activities.usages.iter().map(Into::into).collect(),
            fuel_refills: activities.refills.iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VehicleRef {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct VehicleUsagesDatum {
    pub vehicle: VehicleRef,
    pub fuel_usages: Vec<UnpaidUsageDatum>,
}

impl From<&VehicleUsageGroup> for VehicleUsagesDatum {
    fn from(group: &VehicleUsageGroup) -> Self {
        Self {
            vehicle: VehicleRef {
                id: group.vehicle_id,
                name: group.vehicle_name.clone(),
            },
            fuel_usages: group.usages.iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PersonUsageHistoryResponse {
    pub data: Vec<VehicleUsagesDatum>,
}

#[derive(Debug, Serialize)]
pub struct LatestFuelInfoResponse {
    pub latest_fuel_price: Option<Decimal>,
    pub latest_kilometer_after: Option<i64>,
}

impl From<&LatestFuelInfo> for LatestFuelInfoResponse {
    fn from(info: &LatestFuelInfo) -> Self {
        Self {
            latest_fuel_price: info.latest_fuel_price,
            latest_kilometer_after: info.latest_kilometer_after,
        }
    }
}

/// Pay-batch request. The ownership validator treats an empty id list as
/// vacuously owned, so the request itself rejects a batch where both
/// lists are empty.
#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_pay_batch"))]
pub struct PayBatchRequest {
    #[serde(default)]
    pub usage_share_ids: Vec<Uuid>,
    #[serde(default)]
    pub refill_ids: Vec<Uuid>,
}

fn validate_pay_batch(request: &PayBatchRequest) -> Result<(), ValidationError> {
    if request.usage_share_ids.is_empty() && request.refill_ids.is_empty() {
        return Err(ValidationError::new("empty_settlement_batch"));
    }
    Ok(())
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ShareStatusItem {
    pub id: Uuid,
    pub paid: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct BulkUpdatePaymentStatusRequest {
    #[validate(length(min = 1))]
    pub items: Vec<ShareStatusItem>,
}

#[derive(Debug, Deserialize)]
pub struct PaidFilterQuery {
    #[serde(default)]
    pub is_paid: bool,
}
