//! Expense record store
//!
//! `FuelStore` is the persistence interface the engine is written against.
//! `PgFuelStore` backs it with PostgreSQL: plain reads borrow a pool
//! connection, while every composite mutation opens one transaction and
//! threads it through the repository functions, so a multi-record change
//! either commits whole or rolls back whole.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::person::Person;
use crate::models::refill::{NewRefillEvent, RefillEvent};
use crate::models::usage::{
    NewUsageEvent, PersonUsageShare, ShareSpec, UsageEvent, UsageShareWithName,
};
use crate::models::vehicle::Vehicle;
use crate::repositories::{person_repository, refill_repository, usage_repository, vehicle_repository};
use crate::utils::errors::AppResult;

/// Page window for the event listings.
#[derive(Debug, Clone, Copy)]
pub struct PageParams {
    pub page_index: i64,
    pub page_size: i64,
}

impl PageParams {
    pub fn offset(&self) -> i64 {
        (self.page_index.max(1) - 1) * self.page_size
    }
}

/// One item of a bulk paid-flag update.
#[derive(Debug, Clone, Copy)]
pub struct SharePaidUpdate {
    pub share_id: Uuid,
    pub paid: bool,
}

#[async_trait]
pub trait FuelStore: Send + Sync {
    async fn all_vehicles(&self) -> AppResult<Vec<Vehicle>>;
    async fn all_people(&self) -> AppResult<Vec<Person>>;

    async fn usage_events_page(
        &self,
        vehicle_id: Uuid,
        page: PageParams,
    ) -> AppResult<(Vec<UsageEvent>, i64)>;
    async fn usage_event_by_id(&self, id: Uuid) -> AppResult<Option<UsageEvent>>;
    async fn latest_usage_event(&self, vehicle_id: Uuid) -> AppResult<Option<UsageEvent>>;

    /// Insert the event row and the full share set in one atomic unit.
    async fn create_usage_event(
        &self,
        event: NewUsageEvent,
        participants: Vec<ShareSpec>,
    ) -> AppResult<Uuid>;

    /// Update the event row and replace the full share set
    /// (delete-all-then-insert-new) in one atomic unit. Participant
    /// membership is caller-supplied wholesale on every edit, so the old
    /// set is never diffed against the new one.
    async fn update_usage_event(
        &self,
        event: UsageEvent,
        participants: Vec<ShareSpec>,
    ) -> AppResult<()>;

    /// Remove the event row and all its share rows in one atomic unit.
    async fn delete_usage_event(&self, id: Uuid) -> AppResult<()>;

    async fn shares_with_names(
        &self,
        usage_event_ids: &[Uuid],
    ) -> AppResult<Vec<UsageShareWithName>>;
    async fn person_shares_by_paid(
        &self,
        person_id: Uuid,
        paid: bool,
        vehicle_id: Option<Uuid>,
    ) -> AppResult<Vec<PersonUsageShare>>;
    async fn person_share_ids(&self, person_id: Uuid) -> AppResult<Vec<Uuid>>;
    async fn count_owned_shares(&self, person_id: Uuid, share_ids: &[Uuid]) -> AppResult<i64>;

    async fn refill_events_page(
        &self,
        vehicle_id: Uuid,
        page: PageParams,
    ) -> AppResult<(Vec<RefillEvent>, i64)>;
    async fn refill_event_by_id(&self, id: Uuid) -> AppResult<Option<RefillEvent>>;
    async fn latest_refill_event(&self, vehicle_id: Uuid) -> AppResult<Option<RefillEvent>>;
    async fn create_refill_event(&self, refill: NewRefillEvent) -> AppResult<Uuid>;
    async fn update_refill_event(&self, refill: RefillEvent) -> AppResult<()>;
    async fn delete_refill_event(&self, id: Uuid) -> AppResult<()>;
    async fn person_unpaid_refills(
        &self,
        person_id: Uuid,
        vehicle_id: Uuid,
    ) -> AppResult<Vec<RefillEvent>>;
    async fn count_owned_refills(&self, person_id: Uuid, refill_ids: &[Uuid]) -> AppResult<i64>;

    /// Flip `paid` to true on the given shares, then on the given refills,
    /// inside one atomic unit. Partial settlement is never observable.
    async fn settle_activities(&self, share_ids: &[Uuid], refill_ids: &[Uuid]) -> AppResult<()>;

    /// Apply each paid-flag update inside one atomic unit. Unlike
    /// settlement this may also set `paid = false`.
    async fn update_share_paid_flags(&self, items: &[SharePaidUpdate]) -> AppResult<()>;
}

/// PostgreSQL-backed store.
pub struct PgFuelStore {
    pool: PgPool,
}

impl PgFuelStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FuelStore for PgFuelStore {
    async fn all_vehicles(&self) -> AppResult<Vec<Vehicle>> {
        let mut conn = self.pool.acquire().await?;
        vehicle_repository::find_all(&mut conn).await
    }

    async fn all_people(&self) -> AppResult<Vec<Person>> {
        let mut conn = self.pool.acquire().await?;
        person_repository::find_all(&mut conn).await
    }

    async fn usage_events_page(
        &self,
        vehicle_id: Uuid,
        page: PageParams,
    ) -> AppResult<(Vec<UsageEvent>, i64)> {
        let mut conn = self.pool.acquire().await?;
        let total = usage_repository::count_events(&mut conn, vehicle_id).await?;
        let events =
            usage_repository::find_events_page(&mut conn, vehicle_id, page.page_size, page.offset())
                .await?;
        Ok((events, total))
    }

    async fn usage_event_by_id(&self, id: Uuid) -> AppResult<Option<UsageEvent>> {
        let mut conn = self.pool.acquire().await?;
        usage_repository::find_event_by_id(&mut conn, id).await
    }

    async fn latest_usage_event(&self, vehicle_id: Uuid) -> AppResult<Option<UsageEvent>> {
        let mut conn = self.pool.acquire().await?;
        usage_repository::find_latest_event(&mut conn, vehicle_id).await
    }

    async fn create_usage_event(
        &self,
        event: NewUsageEvent,
        participants: Vec<ShareSpec>,
    ) -> AppResult<Uuid> {
        let mut tx = self.pool.begin().await?;
        let id = usage_repository::create_event(&mut tx, &event).await?;
        usage_repository::insert_shares(&mut tx, id, &participants).await?;
        tx.commit().await?;
        Ok(id)
    }

    async fn update_usage_event(
        &self,
        event: UsageEvent,
        participants: Vec<ShareSpec>,
    ) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;
        usage_repository::update_event(&mut tx, &event).await?;
        usage_repository::delete_shares_for_event(&mut tx, event.id).await?;
        usage_repository::insert_shares(&mut tx, event.id, &participants).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn delete_usage_event(&self, id: Uuid) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;
        usage_repository::delete_shares_for_event(&mut tx, id).await?;
        usage_repository::delete_event(&mut tx, id).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn shares_with_names(
        &self,
        usage_event_ids: &[Uuid],
    ) -> AppResult<Vec<UsageShareWithName>> {
        let mut conn = self.pool.acquire().await?;
        usage_repository::find_shares_with_names(&mut conn, usage_event_ids).await
    }

    async fn person_shares_by_paid(
        &self,
        person_id: Uuid,
        paid: bool,
        vehicle_id: Option<Uuid>,
    ) -> AppResult<Vec<PersonUsageShare>> {
        let mut conn = self.pool.acquire().await?;
        usage_repository::find_person_shares_by_paid(&mut conn, person_id, paid, vehicle_id).await
    }

    async fn person_share_ids(&self, person_id: Uuid) -> AppResult<Vec<Uuid>> {
        let mut conn = self.pool.acquire().await?;
        usage_repository::find_person_share_ids(&mut conn, person_id).await
    }

    async fn count_owned_shares(&self, person_id: Uuid, share_ids: &[Uuid]) -> AppResult<i64> {
        let mut conn = self.pool.acquire().await?;
        usage_repository::count_owned_shares(&mut conn, person_id, share_ids).await
    }

    async fn refill_events_page(
        &self,
        vehicle_id: Uuid,
        page: PageParams,
    ) -> AppResult<(Vec<RefillEvent>, i64)> {
        let mut conn = self.pool.acquire().await?;
        let total = refill_repository::count(&mut conn, vehicle_id).await?;
        let refills =
            refill_repository::find_page(&mut conn, vehicle_id, page.page_size, page.offset())
                .await?;
        Ok((refills, total))
    }

    async fn refill_event_by_id(&self, id: Uuid) -> AppResult<Option<RefillEvent>> {
        let mut conn = self.pool.acquire().await?;
        refill_repository::find_by_id(&mut conn, id).await
    }

    async fn latest_refill_event(&self, vehicle_id: Uuid) -> AppResult<Option<RefillEvent>> {
        let mut conn = self.pool.acquire().await?;
        refill_repository::find_latest(&mut conn, vehicle_id).await
    }

    async fn create_refill_event(&self, refill: NewRefillEvent) -> AppResult<Uuid> {
        let mut conn = self.pool.acquire().await?;
        refill_repository::create(&mut conn, &refill).await
    }

    async fn update_refill_event(&self, refill: RefillEvent) -> AppResult<()> {
        let mut conn = self.pool.acquire().await?;
        refill_repository::update(&mut conn, &refill).await
    }

    async fn delete_refill_event(&self, id: Uuid) -> AppResult<()> {
        let mut conn = self.pool.acquire().await?;
        refill_repository::delete(&mut conn, id).await
    }

    async fn person_unpaid_refills(
        &self,
        person_id: Uuid,
        vehicle_id: Uuid,
    ) -> AppResult<Vec<RefillEvent>> {
        let mut conn = self.pool.acquire().await?;
        refill_repository::find_person_unpaid(&mut conn, person_id, vehicle_id).await
    }

    async fn count_owned_refills(&self, person_id: Uuid, refill_ids: &[Uuid]) -> AppResult<i64> {
        let mut conn = self.pool.acquire().await?;
        refill_repository::count_owned(&mut conn, person_id, refill_ids).await
    }

    async fn settle_activities(&self, share_ids: &[Uuid], refill_ids: &[Uuid]) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;
        usage_repository::set_shares_paid(&mut tx, share_ids).await?;
        refill_repository::set_paid(&mut tx, refill_ids).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn update_share_paid_flags(&self, items: &[SharePaidUpdate]) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;
        for item in items {
            usage_repository::set_share_paid_flag(&mut tx, item.share_id, item.paid).await?;
        }
        tx.commit().await?;
        Ok(())
    }
}
