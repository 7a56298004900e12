//! Settlement: ownership validation and batch payment transitions.

use std::collections::HashSet;
use std::sync::Arc;

use uuid::Uuid;

use crate::services::store::{FuelStore, SharePaidUpdate};
use crate::utils::errors::{AppError, AppResult};

/// The two record kinds a settlement batch may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    UsageShare,
    RefillEvent,
}

pub struct SettlementService {
    store: Arc<dyn FuelStore>,
}

impl SettlementService {
    pub fn new(store: Arc<dyn FuelStore>) -> Self {
        Self { store }
    }

    /// Whether the person owns every record in the list: the count of
    /// matching owned rows must equal the list length. A missing id and a
    /// foreign id are indistinguishable here, both yield `false`. An empty
    /// list is vacuously owned (count 0 == len 0); callers that consider
    /// an empty batch invalid must reject it before calling this.
    pub async fn owns_all(
        &self,
        person_id: Uuid,
        record_ids: &[Uuid],
        kind: RecordKind,
    ) -> AppResult<bool> {
        let owned = match kind {
            RecordKind::UsageShare => {
                self.store.count_owned_shares(person_id, record_ids).await?
            }
            RecordKind::RefillEvent => {
                self.store.count_owned_refills(person_id, record_ids).await?
            }
        };

        Ok(owned == record_ids.len() as i64)
    }

    /// Marks a batch of the person's unpaid shares and refills as paid.
    ///
    /// Both ownership checks run before the atomic unit is opened; a batch
    /// containing a single foreign or unknown id settles nothing.
    pub async fn pay_batch(
        &self,
        person_id: Uuid,
        usage_share_ids: &[Uuid],
        refill_ids: &[Uuid],
    ) -> AppResult<()> {
        if !self
            .owns_all(person_id, usage_share_ids, RecordKind::UsageShare)
            .await?
        {
            tracing::warn!(%person_id, ?usage_share_ids, "usage share not owned by person");
            return Err(AppError::NotOwned { person_id });
        }

        if !self
            .owns_all(person_id, refill_ids, RecordKind::RefillEvent)
            .await?
        {
            tracing::warn!(%person_id, ?refill_ids, "refill event not owned by person");
            return Err(AppError::NotOwned { person_id });
        }

        self.store.settle_activities(usage_share_ids, refill_ids).await
    }

    /// Sets the paid flag of several of the person's own share rows,
    /// in either direction. Scoped to the person's own rows rather than
    /// an arbitrary id list: every referenced share must be one of theirs.
    pub async fn bulk_update_payment_status(
        &self,
        person_id: Uuid,
        items: &[SharePaidUpdate],
    ) -> AppResult<()> {
        let owned: HashSet<Uuid> = self
            .store
            .person_share_ids(person_id)
            .await?
            .into_iter()
            .collect();

        for item in items {
            if !owned.contains(&item.share_id) {
                tracing::warn!(%person_id, share_id = %item.share_id, "share not owned by person");
                return Err(AppError::NotOwned { person_id });
            }
        }

        self.store.update_share_paid_flags(items).await
    }
}
