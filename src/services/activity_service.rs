//! Unpaid-activity aggregation and "current fuel state" views.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::usage::Participant;
use crate::services::store::FuelStore;
use crate::services::usage_service::participants_by_event;
use crate::utils::errors::{AppError, AppResult};

/// One outstanding usage share of a person, annotated with every
/// participant of the underlying event and their payment status.
#[derive(Debug, Clone)]
pub struct UsageActivity {
    pub usage_share_id: Uuid,
    pub usage_event_id: Uuid,
    pub event_time: DateTime<Utc>,
    pub pay_each: Decimal,
    pub description: String,
    pub participants: Vec<Participant>,
}

/// One outstanding refill a person performed and has not been paid back for.
#[derive(Debug, Clone)]
pub struct RefillActivity {
    pub refill_event_id: Uuid,
    pub refill_time: DateTime<Utc>,
    pub total_money: Decimal,
    pub paid: bool,
}

/// Combined unpaid view for one person and one vehicle.
#[derive(Debug, Clone)]
pub struct UnpaidActivities {
    pub usages: Vec<UsageActivity>,
    pub refills: Vec<RefillActivity>,
}

/// A person's usage shares grouped per vehicle (the history view).
#[derive(Debug, Clone)]
pub struct VehicleUsageGroup {
    pub vehicle_id: Uuid,
    pub vehicle_name: String,
    pub usages: Vec<UsageActivity>,
}

/// Current price and odometer for a vehicle.
///
/// The odometer comes from whichever of the latest usage / latest refill
/// is more recent; the price always comes from the latest refill, since a
/// usage event never changes the effective price. A vehicle with no
/// history reports `None` fields.
#[derive(Debug, Clone)]
pub struct LatestFuelInfo {
    pub latest_fuel_price: Option<Decimal>,
    pub latest_kilometer_after: Option<i64>,
}

pub struct ActivityService {
    store: Arc<dyn FuelStore>,
}

impl ActivityService {
    pub fn new(store: Arc<dyn FuelStore>) -> Self {
        Self { store }
    }

    /// Everything a person still owes (usage shares) or is still owed
    /// (refills) for one vehicle. Refills come back oldest first so older
    /// debts surface first.
    pub async fn unpaid_activities(
        &self,
        person_id: Uuid,
        vehicle_id: Uuid,
    ) -> AppResult<UnpaidActivities> {
        let shares = self
            .store
            .person_shares_by_paid(person_id, false, Some(vehicle_id))
            .await?;

        let event_ids: Vec<Uuid> = shares.iter().map(|s| s.usage_event_id).collect();
        let by_event = participants_by_event(self.store.as_ref(), &event_ids).await?;

        let mut usages = Vec::with_capacity(shares.len());
        for share in shares {
            let participants =
                by_event
                    .get(&share.usage_event_id)
                    .cloned()
                    .ok_or(AppError::DanglingReference {
                        usage_event_id: share.usage_event_id,
                    })?;
            usages.push(UsageActivity {
                usage_share_id: share.id,
                usage_event_id: share.usage_event_id,
                event_time: share.event_time,
                pay_each: share.pay_each,
                description: share.description,
                participants,
            });
        }

        let refills = self
            .store
            .person_unpaid_refills(person_id, vehicle_id)
            .await?
            .into_iter()
            .map(|r| RefillActivity {
                refill_event_id: r.id,
                refill_time: r.refill_time,
                total_money: r.total_money,
                paid: r.paid,
            })
            .collect();

        Ok(UnpaidActivities { usages, refills })
    }

    /// A person's shares across all vehicles, filtered by paid status and
    /// grouped per vehicle, ordered by vehicle name.
    pub async fn person_usage_history(
        &self,
        person_id: Uuid,
        paid: bool,
    ) -> AppResult<Vec<VehicleUsageGroup>> {
        let shares = self
            .store
            .person_shares_by_paid(person_id, paid, None)
            .await?;

        let event_ids: Vec<Uuid> = shares.iter().map(|s| s.usage_event_id).collect();
        let by_event = participants_by_event(self.store.as_ref(), &event_ids).await?;

        // BTreeMap keyed by (name, id) keeps the groups name-ordered.
        let mut groups: BTreeMap<(String, Uuid), Vec<UsageActivity>> = BTreeMap::new();
        for share in shares {
            let participants =
                by_event
                    .get(&share.usage_event_id)
                    .cloned()
                    .ok_or(AppError::DanglingReference {
                        usage_event_id: share.usage_event_id,
                    })?;
            groups
                .entry((share.vehicle_name.clone(), share.vehicle_id))
                .or_default()
                .push(UsageActivity {
                    usage_share_id: share.id,
                    usage_event_id: share.usage_event_id,
                    event_time: share.event_time,
                    pay_each: share.pay_each,
                    description: share.description,
                    participants,
                });
        }

        Ok(groups
            .into_iter()
            .map(|((vehicle_name, vehicle_id), usages)| VehicleUsageGroup {
                vehicle_id,
                vehicle_name,
                usages,
            })
            .collect())
    }

    pub async fn latest_fuel_info(&self, vehicle_id: Uuid) -> AppResult<LatestFuelInfo> {
        let latest_usage = self.store.latest_usage_event(vehicle_id).await?;
        let latest_refill = self.store.latest_refill_event(vehicle_id).await?;

        let latest_kilometer_after = match (&latest_usage, &latest_refill) {
            (Some(usage), Some(refill)) => {
                if refill.refill_time > usage.event_time {
                    Some(refill.kilometer_after)
                } else {
                    Some(usage.kilometer_after)
                }
            }
            (Some(usage), None) => Some(usage.kilometer_after),
            (None, Some(refill)) => Some(refill.kilometer_after),
            (None, None) => None,
        };

        Ok(LatestFuelInfo {
            latest_fuel_price: latest_refill.map(|r| r.unit_price_calculated),
            latest_kilometer_after,
        })
    }
}
