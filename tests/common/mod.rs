#![allow(dead_code)]

//! In-memory `FuelStore` used by the integration tests.
//!
//! Mirrors the PostgreSQL store's observable behavior: the orderings of
//! the read queries and the all-or-nothing semantics of the composite
//! mutations.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use fuel_settlement::models::person::Person;
use fuel_settlement::models::refill::{NewRefillEvent, RefillEvent};
use fuel_settlement::models::usage::{
    NewUsageEvent, PersonUsageShare, ShareSpec, UsageEvent, UsageShare, UsageShareWithName,
};
use fuel_settlement::models::vehicle::Vehicle;
use fuel_settlement::services::store::{FuelStore, PageParams, SharePaidUpdate};
use fuel_settlement::utils::errors::AppResult;

#[derive(Default)]
struct Inner {
    vehicles: Vec<Vehicle>,
    people: Vec<Person>,
    usage_events: Vec<UsageEvent>,
    shares: Vec<UsageShare>,
    refills: Vec<RefillEvent>,
}

#[derive(Default)]
pub struct MemStore {
    inner: Mutex<Inner>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vehicle(&self, vehicle: Vehicle) {
        self.inner.lock().unwrap().vehicles.push(vehicle);
    }

    pub fn add_person(&self, person: Person) {
        self.inner.lock().unwrap().people.push(person);
    }

    pub fn add_usage_event(&self, event: UsageEvent) {
        self.inner.lock().unwrap().usage_events.push(event);
    }

    pub fn add_share(&self, share: UsageShare) {
        self.inner.lock().unwrap().shares.push(share);
    }

    pub fn add_refill(&self, refill: RefillEvent) {
        self.inner.lock().unwrap().refills.push(refill);
    }

    pub fn share(&self, id: Uuid) -> Option<UsageShare> {
        self.inner
            .lock()
            .unwrap()
            .shares
            .iter()
            .find(|s| s.id == id)
            .cloned()
    }

    pub fn refill(&self, id: Uuid) -> Option<RefillEvent> {
        self.inner
            .lock()
            .unwrap()
            .refills
            .iter()
            .find(|r| r.id == id)
            .cloned()
    }

    pub fn shares_for_event(&self, usage_event_id: Uuid) -> Vec<UsageShare> {
        self.inner
            .lock()
            .unwrap()
            .shares
            .iter()
            .filter(|s| s.usage_event_id == usage_event_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl FuelStore for MemStore {
    async fn all_vehicles(&self) -> AppResult<Vec<Vehicle>> {
        let mut vehicles = self.inner.lock().unwrap().vehicles.clone();
        vehicles.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(vehicles)
    }

    async fn all_people(&self) -> AppResult<Vec<Person>> {
        let mut people = self.inner.lock().unwrap().people.clone();
        people.sort_by(|a, b| a.nickname.cmp(&b.nickname));
        Ok(people)
    }

    async fn usage_events_page(
        &self,
        vehicle_id: Uuid,
        page: PageParams,
    ) -> AppResult<(Vec<UsageEvent>, i64)> {
        let inner = self.inner.lock().unwrap();
        let mut events: Vec<UsageEvent> = inner
            .usage_events
            .iter()
            .filter(|e| e.vehicle_id == vehicle_id)
            .cloned()
            .collect();
        events.sort_by(|a, b| b.event_time.cmp(&a.event_time).then(b.id.cmp(&a.id)));
        let total = events.len() as i64;
        let page_items = events
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.page_size as usize)
            .collect();
        Ok((page_items, total))
    }

    async fn usage_event_by_id(&self, id: Uuid) -> AppResult<Option<UsageEvent>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .usage_events
            .iter()
            .find(|e| e.id == id)
            .cloned())
    }

    async fn latest_usage_event(&self, vehicle_id: Uuid) -> AppResult<Option<UsageEvent>> {
        let (events, _) = self
            .usage_events_page(vehicle_id, PageParams { page_index: 1, page_size: 1 })
            .await?;
        Ok(events.into_iter().next())
    }

    async fn create_usage_event(
        &self,
        event: NewUsageEvent,
        participants: Vec<ShareSpec>,
    ) -> AppResult<Uuid> {
        let mut inner = self.inner.lock().unwrap();
        let id = Uuid::new_v4();
        let now = Utc::now();
        inner.usage_events.push(UsageEvent {
            id,
            vehicle_id: event.vehicle_id,
            event_time: event.event_time,
            fuel_price: event.fuel_price,
            kilometer_before: event.kilometer_before,
            kilometer_after: event.kilometer_after,
            description: event.description,
            total_cost: event.total_cost,
            pay_each: event.pay_each,
            created_at: now,
            updated_at: now,
        });
        for spec in participants {
            inner.shares.push(UsageShare {
                id: Uuid::new_v4(),
                usage_event_id: id,
                person_id: spec.person_id,
                paid: spec.paid,
            });
        }
        Ok(id)
    }

    async fn update_usage_event(
        &self,
        event: UsageEvent,
        participants: Vec<ShareSpec>,
    ) -> AppResult<()> {
        let mut inner = self.inner.lock().unwrap();
        let id = event.id;
        if let Some(slot) = inner.usage_events.iter_mut().find(|e| e.id == id) {
            *slot = event;
        }
        inner.shares.retain(|s| s.usage_event_id != id);
        for spec in participants {
            inner.shares.push(UsageShare {
                id: Uuid::new_v4(),
                usage_event_id: id,
                person_id: spec.person_id,
                paid: spec.paid,
            });
        }
        Ok(())
    }

    async fn delete_usage_event(&self, id: Uuid) -> AppResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.shares.retain(|s| s.usage_event_id != id);
        inner.usage_events.retain(|e| e.id != id);
        Ok(())
    }

    async fn shares_with_names(
        &self,
        usage_event_ids: &[Uuid],
    ) -> AppResult<Vec<UsageShareWithName>> {
        let inner = self.inner.lock().unwrap();
        let mut rows: Vec<UsageShareWithName> = inner
            .shares
            .iter()
            .filter(|s| usage_event_ids.contains(&s.usage_event_id))
            .map(|s| {
                let nickname = inner
                    .people
                    .iter()
                    .find(|p| p.id == s.person_id)
                    .map(|p| p.nickname.clone())
                    .unwrap_or_default();
                UsageShareWithName {
                    id: s.id,
                    usage_event_id: s.usage_event_id,
                    person_id: s.person_id,
                    paid: s.paid,
                    nickname,
                }
            })
            .collect();
        rows.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(rows)
    }

    async fn person_shares_by_paid(
        &self,
        person_id: Uuid,
        paid: bool,
        vehicle_id: Option<Uuid>,
    ) -> AppResult<Vec<PersonUsageShare>> {
        let inner = self.inner.lock().unwrap();
        let mut rows: Vec<PersonUsageShare> = inner
            .shares
            .iter()
            .filter(|s| s.person_id == person_id && s.paid == paid)
            .filter_map(|s| {
                let event = inner
                    .usage_events
                    .iter()
                    .find(|e| e.id == s.usage_event_id)?;
                if let Some(wanted) = vehicle_id {
                    if event.vehicle_id != wanted {
                        return None;
                    }
                }
                let vehicle_name = inner
                    .vehicles
                    .iter()
                    .find(|v| v.id == event.vehicle_id)
                    .map(|v| v.name.clone())
                    .unwrap_or_default();
                Some(PersonUsageShare {
                    id: s.id,
                    usage_event_id: s.usage_event_id,
                    person_id: s.person_id,
                    paid: s.paid,
                    event_time: event.event_time,
                    pay_each: event.pay_each,
                    description: event.description.clone(),
                    vehicle_id: event.vehicle_id,
                    vehicle_name,
                })
            })
            .collect();
        rows.sort_by(|a, b| {
            b.event_time
                .cmp(&a.event_time)
                .then(b.usage_event_id.cmp(&a.usage_event_id))
        });
        Ok(rows)
    }

    async fn person_share_ids(&self, person_id: Uuid) -> AppResult<Vec<Uuid>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .shares
            .iter()
            .filter(|s| s.person_id == person_id)
            .map(|s| s.id)
            .collect())
    }

    async fn count_owned_shares(&self, person_id: Uuid, share_ids: &[Uuid]) -> AppResult<i64> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .shares
            .iter()
            .filter(|s| s.person_id == person_id && share_ids.contains(&s.id))
            .count() as i64)
    }

    async fn refill_events_page(
        &self,
        vehicle_id: Uuid,
        page: PageParams,
    ) -> AppResult<(Vec<RefillEvent>, i64)> {
        let inner = self.inner.lock().unwrap();
        let mut refills: Vec<RefillEvent> = inner
            .refills
            .iter()
            .filter(|r| r.vehicle_id == vehicle_id)
            .cloned()
            .collect();
        refills.sort_by(|a, b| b.refill_time.cmp(&a.refill_time));
        let total = refills.len() as i64;
        let page_items = refills
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.page_size as usize)
            .collect();
        Ok((page_items, total))
    }

    async fn refill_event_by_id(&self, id: Uuid) -> AppResult<Option<RefillEvent>> {
        Ok(self.refill(id))
    }

    async fn latest_refill_event(&self, vehicle_id: Uuid) -> AppResult<Option<RefillEvent>> {
        let inner = self.inner.lock().unwrap();
        let mut refills: Vec<RefillEvent> = inner
            .refills
            .iter()
            .filter(|r| r.vehicle_id == vehicle_id)
            .cloned()
            .collect();
        refills.sort_by(|a, b| b.refill_time.cmp(&a.refill_time).then(b.id.cmp(&a.id)));
        Ok(refills.into_iter().next())
    }

    async fn create_refill_event(&self, refill: NewRefillEvent) -> AppResult<Uuid> {
        let mut inner = self.inner.lock().unwrap();
        let id = Uuid::new_v4();
        let now = Utc::now();
        inner.refills.push(RefillEvent {
            id,
            vehicle_id: refill.vehicle_id,
            refill_time: refill.refill_time,
            total_money: refill.total_money,
            kilometer_before: refill.kilometer_before,
            kilometer_after: refill.kilometer_after,
            unit_price_calculated: refill.unit_price_calculated,
            paid: refill.paid,
            refill_by: refill.refill_by,
            created_by: refill.created_by,
            updated_by: refill.created_by,
            created_at: now,
            updated_at: now,
        });
        Ok(id)
    }

    async fn update_refill_event(&self, refill: RefillEvent) -> AppResult<()> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(slot) = inner.refills.iter_mut().find(|r| r.id == refill.id) {
            *slot = refill;
        }
        Ok(())
    }

    async fn delete_refill_event(&self, id: Uuid) -> AppResult<()> {
        self.inner.lock().unwrap().refills.retain(|r| r.id != id);
        Ok(())
    }

    async fn person_unpaid_refills(
        &self,
        person_id: Uuid,
        vehicle_id: Uuid,
    ) -> AppResult<Vec<RefillEvent>> {
        let inner = self.inner.lock().unwrap();
        let mut refills: Vec<RefillEvent> = inner
            .refills
            .iter()
            .filter(|r| r.refill_by == person_id && r.vehicle_id == vehicle_id && !r.paid)
            .cloned()
            .collect();
        refills.sort_by(|a, b| a.refill_time.cmp(&b.refill_time).then(a.id.cmp(&b.id)));
        Ok(refills)
    }

    async fn count_owned_refills(&self, person_id: Uuid, refill_ids: &[Uuid]) -> AppResult<i64> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .refills
            .iter()
            .filter(|r| r.refill_by == person_id && refill_ids.contains(&r.id))
            .count() as i64)
    }

    async fn settle_activities(&self, share_ids: &[Uuid], refill_ids: &[Uuid]) -> AppResult<()> {
        let mut inner = self.inner.lock().unwrap();
        for share in inner.shares.iter_mut() {
            if share_ids.contains(&share.id) {
                share.paid = true;
            }
        }
        for refill in inner.refills.iter_mut() {
            if refill_ids.contains(&refill.id) {
                refill.paid = true;
            }
        }
        Ok(())
    }

    async fn update_share_paid_flags(&self, items: &[SharePaidUpdate]) -> AppResult<()> {
        let mut inner = self.inner.lock().unwrap();
        for item in items {
            if let Some(share) = inner.shares.iter_mut().find(|s| s.id == item.share_id) {
                share.paid = item.paid;
            }
        }
        Ok(())
    }
}

// Fixture helpers. Ids come from small integers so tests can reference
// them and so id-ordered reads match insertion order.

pub fn id(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

pub fn time(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, day, hour, 0, 0).unwrap()
}

pub fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

pub fn vehicle(n: u128, name: &str) -> Vehicle {
    Vehicle {
        id: id(n),
        name: name.to_string(),
        created_at: time(1, 0),
    }
}

pub fn person(n: u128, nickname: &str) -> Person {
    Person {
        id: id(n),
        nickname: nickname.to_string(),
        default_vehicle_id: None,
        profile_image_url: None,
        created_at: time(1, 0),
        updated_at: time(1, 0),
    }
}

pub fn usage_event(n: u128, vehicle: u128, event_time: DateTime<Utc>) -> UsageEvent {
    UsageEvent {
        id: id(n),
        vehicle_id: id(vehicle),
        event_time,
        fuel_price: dec("1.41"),
        kilometer_before: 800,
        kilometer_after: 700,
        description: format!("trip {}", n),
        total_cost: dec("141.00"),
        pay_each: dec("70.50"),
        created_at: event_time,
        updated_at: event_time,
    }
}

pub fn share(n: u128, event: u128, person: u128, paid: bool) -> UsageShare {
    UsageShare {
        id: id(n),
        usage_event_id: id(event),
        person_id: id(person),
        paid,
    }
}

pub fn refill(n: u128, vehicle: u128, by: u128, refill_time: DateTime<Utc>, paid: bool) -> RefillEvent {
    RefillEvent {
        id: id(n),
        vehicle_id: id(vehicle),
        refill_time,
        total_money: dec("50.00"),
        kilometer_before: 700,
        kilometer_after: 1100,
        unit_price_calculated: dec("0.13"),
        paid,
        refill_by: id(by),
        created_by: id(by),
        updated_by: id(by),
        created_at: refill_time,
        updated_at: refill_time,
    }
}
