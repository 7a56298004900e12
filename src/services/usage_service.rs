//! Usage-event lifecycle and listing.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::usage::{NewUsageEvent, Participant, ShareSpec, UsageEvent};
use crate::services::calculator;
use crate::services::store::{FuelStore, PageParams};
use crate::utils::errors::{not_found_error, AppError, AppResult};

/// Validated input for creating or fully replacing a usage event.
#[derive(Debug, Clone)]
pub struct UsageEventInput {
    pub vehicle_id: Uuid,
    pub event_time: DateTime<Utc>,
    pub fuel_price: Decimal,
    pub kilometer_before: i64,
    pub kilometer_after: i64,
    pub description: String,
    pub participants: Vec<ShareSpec>,
}

/// One row of the paginated usage listing, with the full participant
/// annotation for the event.
#[derive(Debug, Clone)]
pub struct UsageListItem {
    pub event: UsageEvent,
    pub participants: Vec<Participant>,
}

#[derive(Debug, Clone)]
pub struct UsagePage {
    pub items: Vec<UsageListItem>,
    pub total_records: i64,
    pub total_pages: i64,
}

/// Detail view of one usage event.
#[derive(Debug, Clone)]
pub struct UsageDetail {
    pub event: UsageEvent,
    pub participants: Vec<ParticipantDetail>,
    pub each_should_pay: Decimal,
}

#[derive(Debug, Clone)]
pub struct ParticipantDetail {
    pub share_id: Uuid,
    pub person_id: Uuid,
    pub nickname: String,
    pub paid: bool,
}

pub struct UsageService {
    store: Arc<dyn FuelStore>,
}

impl UsageService {
    pub fn new(store: Arc<dyn FuelStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self, vehicle_id: Uuid, page: PageParams) -> AppResult<UsagePage> {
        let (events, total_records) = self.store.usage_events_page(vehicle_id, page).await?;

        let event_ids: Vec<Uuid> = events.iter().map(|e| e.id).collect();
        let participants_by_event = participants_by_event(self.store.as_ref(), &event_ids).await?;

        let mut items = Vec::with_capacity(events.len());
        for event in events {
            let participants = participants_by_event
                .get(&event.id)
                .cloned()
                .ok_or(AppError::DanglingReference {
                    usage_event_id: event.id,
                })?;
            items.push(UsageListItem { event, participants });
        }

        let total_pages = if page.page_size > 0 {
            (total_records + page.page_size - 1) / page.page_size
        } else {
            0
        };

        Ok(UsagePage {
            items,
            total_records,
            total_pages,
        })
    }

    pub async fn get(&self, id: Uuid) -> AppResult<UsageDetail> {
        let event = self
            .store
            .usage_event_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("usage event", &id))?;

        let shares = self.store.shares_with_names(&[event.id]).await?;
        if shares.is_empty() {
            return Err(AppError::DanglingReference {
                usage_event_id: event.id,
            });
        }

        let each_should_pay = calculator::split_evenly(event.total_cost, shares.len())?;
        let participants = shares
            .into_iter()
            .map(|s| ParticipantDetail {
                share_id: s.id,
                person_id: s.person_id,
                nickname: s.nickname,
                paid: s.paid,
            })
            .collect();

        Ok(UsageDetail {
            event,
            participants,
            each_should_pay,
        })
    }

    pub async fn create(&self, input: UsageEventInput) -> AppResult<Uuid> {
        let (total_cost, pay_each) = derive_costs(&input)?;

        let event = NewUsageEvent {
            vehicle_id: input.vehicle_id,
            event_time: input.event_time,
            fuel_price: input.fuel_price,
            kilometer_before: input.kilometer_before,
            kilometer_after: input.kilometer_after,
            description: input.description,
            total_cost,
            pay_each,
        };

        let id = self.store.create_usage_event(event, input.participants).await?;
        tracing::info!(usage_event_id = %id, "created usage event");
        Ok(id)
    }

    /// Full-replacement update: the event row is rewritten and the share
    /// set is replaced wholesale in the same atomic unit.
    pub async fn update(&self, id: Uuid, input: UsageEventInput) -> AppResult<()> {
        let old = self
            .store
            .usage_event_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("usage event", &id))?;

        let (total_cost, pay_each) = derive_costs(&input)?;

        let event = UsageEvent {
            id: old.id,
            vehicle_id: input.vehicle_id,
            event_time: input.event_time,
            fuel_price: input.fuel_price,
            kilometer_before: input.kilometer_before,
            kilometer_after: input.kilometer_after,
            description: input.description,
            total_cost,
            pay_each,
            created_at: old.created_at,
            updated_at: old.updated_at,
        };

        self.store.update_usage_event(event, input.participants).await
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.store
            .usage_event_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("usage event", &id))?;

        self.store.delete_usage_event(id).await
    }

}

/// Groups all shares of the given events into per-event participant lists,
/// preserving query order. Shared with the unpaid-activity aggregation.
pub(crate) async fn participants_by_event(
    store: &dyn FuelStore,
    event_ids: &[Uuid],
) -> AppResult<HashMap<Uuid, Vec<Participant>>> {
    let shares = store.shares_with_names(event_ids).await?;

    let mut by_event: HashMap<Uuid, Vec<Participant>> = HashMap::new();
    for share in shares {
        by_event
            .entry(share.usage_event_id)
            .or_default()
            .push(Participant {
                nickname: share.nickname,
                paid: share.paid,
            });
    }

    Ok(by_event)
}

/// Validation plus cost derivation, applied before any mutation.
fn derive_costs(input: &UsageEventInput) -> AppResult<(Decimal, Decimal)> {
    let total_cost = calculator::compute_usage_cost(
        input.kilometer_before,
        input.kilometer_after,
        input.fuel_price,
    )?;
    let pay_each = calculator::split_evenly(total_cost, input.participants.len())?;
    Ok((total_cost, pay_each))
}
