use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A member of the group sharing the car expenses.
///
/// `default_vehicle_id` is a UI hint only and is never enforced against
/// the vehicle a request actually targets.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Person {
    pub id: Uuid,
    pub nickname: String,
    pub default_vehicle_id: Option<Uuid>,
    pub profile_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
