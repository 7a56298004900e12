use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// One instance of purchasing fuel for a vehicle.
///
/// Refilling reads the odometer "up": `kilometer_after` must exceed
/// `kilometer_before`. `unit_price_calculated` is derived at write time.
/// The person in `refill_by` owns the refill for settlement purposes.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RefillEvent {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub refill_time: DateTime<Utc>,
    pub total_money: Decimal,
    pub kilometer_before: i64,
    pub kilometer_after: i64,
    pub unit_price_calculated: Decimal,
    pub paid: bool,
    pub refill_by: Uuid,
    pub created_by: Uuid,
    pub updated_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field set for inserting a refill event.
#[derive(Debug, Clone)]
pub struct NewRefillEvent {
    pub vehicle_id: Uuid,
    pub refill_time: DateTime<Utc>,
    pub total_money: Decimal,
    pub kilometer_before: i64,
    pub kilometer_after: i64,
    pub unit_price_calculated: Decimal,
    pub paid: bool,
    pub refill_by: Uuid,
    pub created_by: Uuid,
}
