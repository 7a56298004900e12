//! Refill-event lifecycle and listing.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::refill::{NewRefillEvent, RefillEvent};
use crate::services::calculator;
use crate::services::store::{FuelStore, PageParams};
use crate::utils::errors::{not_found_error, AppResult};

/// Validated input for creating or replacing a refill event.
/// `acting_person_id` feeds the audit columns, `refill_by` is the owner.
#[derive(Debug, Clone)]
pub struct RefillEventInput {
    pub vehicle_id: Uuid,
    pub refill_time: DateTime<Utc>,
    pub total_money: Decimal,
    pub kilometer_before: i64,
    pub kilometer_after: i64,
    pub paid: bool,
    pub refill_by: Uuid,
    pub acting_person_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct RefillPage {
    pub items: Vec<RefillEvent>,
    pub total_records: i64,
    pub total_pages: i64,
}

pub struct RefillService {
    store: Arc<dyn FuelStore>,
}

impl RefillService {
    pub fn new(store: Arc<dyn FuelStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self, vehicle_id: Uuid, page: PageParams) -> AppResult<RefillPage> {
        let (items, total_records) = self.store.refill_events_page(vehicle_id, page).await?;

        let total_pages = if page.page_size > 0 {
            (total_records + page.page_size - 1) / page.page_size
        } else {
            0
        };

        Ok(RefillPage {
            items,
            total_records,
            total_pages,
        })
    }

    pub async fn get(&self, id: Uuid) -> AppResult<RefillEvent> {
        self.store
            .refill_event_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("refill event", &id))
    }

    pub async fn create(&self, input: RefillEventInput) -> AppResult<Uuid> {
        let unit_price = calculator::compute_refill_unit_price(
            input.total_money,
            input.kilometer_before,
            input.kilometer_after,
        )?;

        let refill = NewRefillEvent {
            vehicle_id: input.vehicle_id,
            refill_time: input.refill_time,
            total_money: input.total_money,
            kilometer_before: input.kilometer_before,
            kilometer_after: input.kilometer_after,
            unit_price_calculated: unit_price,
            paid: input.paid,
            refill_by: input.refill_by,
            created_by: input.acting_person_id,
        };

        let id = self.store.create_refill_event(refill).await?;
        tracing::info!(refill_event_id = %id, "created refill event");
        Ok(id)
    }

    pub async fn update(&self, id: Uuid, input: RefillEventInput) -> AppResult<()> {
        let old = self
            .store
            .refill_event_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("refill event", &id))?;

        let unit_price = calculator::compute_refill_unit_price(
            input.total_money,
            input.kilometer_before,
            input.kilometer_after,
        )?;

        let refill = RefillEvent {
            id: old.id,
            vehicle_id: input.vehicle_id,
            refill_time: input.refill_time,
            total_money: input.total_money,
            kilometer_before: input.kilometer_before,
            kilometer_after: input.kilometer_after,
            unit_price_calculated: unit_price,
            paid: input.paid,
            refill_by: input.refill_by,
            created_by: old.created_by,
            updated_by: input.acting_person_id,
            created_at: old.created_at,
            updated_at: old.updated_at,
        };

        self.store.update_refill_event(refill).await
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.store
            .refill_event_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("refill event", &id))?;

        self.store.delete_refill_event(id).await
    }
}
