use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// One instance of consuming fuel, shared among participants.
///
/// This domain reads the odometer "down": `kilometer_before` is the higher
/// reading and `kilometer_after` the lower, more depleted one. `total_cost`
/// and `pay_each` are derived at write time and stored canonically on the
/// event row.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UsageEvent {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub event_time: DateTime<Utc>,
    pub fuel_price: Decimal,
    pub kilometer_before: i64,
    pub kilometer_after: i64,
    pub description: String,
    pub total_cost: Decimal,
    pub pay_each: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One participant's stake (and payment status) in a usage event.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UsageShare {
    pub id: Uuid,
    pub usage_event_id: Uuid,
    pub person_id: Uuid,
    pub paid: bool,
}

/// Usage share joined with the participant's display name.
#[derive(Debug, Clone, FromRow)]
pub struct UsageShareWithName {
    pub id: Uuid,
    pub usage_event_id: Uuid,
    pub person_id: Uuid,
    pub paid: bool,
    pub nickname: String,
}

/// A person's share joined with the event it belongs to, used by the
/// unpaid-activity and history views.
#[derive(Debug, Clone, FromRow)]
pub struct PersonUsageShare {
    pub id: Uuid,
    pub usage_event_id: Uuid,
    pub person_id: Uuid,
    pub paid: bool,
    pub event_time: DateTime<Utc>,
    pub pay_each: Decimal,
    pub description: String,
    pub vehicle_id: Uuid,
    pub vehicle_name: String,
}

/// Field set for inserting a usage event; the id and row timestamps are
/// assigned by the repository.
#[derive(Debug, Clone)]
pub struct NewUsageEvent {
    pub vehicle_id: Uuid,
    pub event_time: DateTime<Utc>,
    pub fuel_price: Decimal,
    pub kilometer_before: i64,
    pub kilometer_after: i64,
    pub description: String,
    pub total_cost: Decimal,
    pub pay_each: Decimal,
}

/// Caller-supplied participant entry for creating or replacing the share
/// set of a usage event.
#[derive(Debug, Clone, Copy)]
pub struct ShareSpec {
    pub person_id: Uuid,
    pub paid: bool,
}

/// Structured (name, paid) pair for one participant of a usage event.
/// Rendering of the human-readable marker line lives in the DTO layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub nickname: String,
    pub paid: bool,
}
