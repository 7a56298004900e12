use chrono::Utc;
use sqlx::PgConnection;
use uuid::Uuid;

use crate::models::usage::{
    NewUsageEvent, PersonUsageShare, ShareSpec, UsageEvent, UsageShareWithName,
};
use crate::utils::errors::AppResult;

pub async fn create_event(conn: &mut PgConnection, event: &NewUsageEvent) -> AppResult<Uuid> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO usage_events
            (id, vehicle_id, event_time, fuel_price, kilometer_before, kilometer_after,
             description, total_cost, pay_each, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
        "#,
    )
    .bind(id)
    .bind(event.vehicle_id)
    .bind(event.event_time)
    .bind(event.fuel_price)
    .bind(event.kilometer_before)
    .bind(event.kilometer_after)
    .bind(&event.description)
    .bind(event.total_cost)
    .bind(event.pay_each)
    .bind(now)
    .execute(conn)
    .await?;

    Ok(id)
}

pub async fn update_event(conn: &mut PgConnection, event: &UsageEvent) -> AppResult<()> {
    sqlx::query(
        r#"
        UPDATE usage_events
        SET vehicle_id = $2, event_time = $3, fuel_price = $4, kilometer_before = $5,
            kilometer_after = $6, description = $7, total_cost = $8, pay_each = $9,
            updated_at = $10
        WHERE id = $1
        "#,
    )
    .bind(event.id)
    .bind(event.vehicle_id)
    .bind(event.event_time)
    .bind(event.fuel_price)
    .bind(event.kilometer_before)
    .bind(event.kilometer_after)
    .bind(&event.description)
    .bind(event.total_cost)
    .bind(event.pay_each)
    .bind(Utc::now())
    .execute(conn)
    .await?;

    Ok(())
}

pub async fn delete_event(conn: &mut PgConnection, id: Uuid) -> AppResult<()> {
    sqlx::query("DELETE FROM usage_events WHERE id = $1")
        .bind(id)
        .execute(conn)
        .await?;

    Ok(())
}

pub async fn find_event_by_id(conn: &mut PgConnection, id: Uuid) -> AppResult<Option<UsageEvent>> {
    let event = sqlx::query_as::<_, UsageEvent>("SELECT * FROM usage_events WHERE id = $1")
        .bind(id)
        .fetch_optional(conn)
        .await?;

    Ok(event)
}

/// Newest event first; id breaks ties between identical timestamps.
pub async fn find_latest_event(
    conn: &mut PgConnection,
    vehicle_id: Uuid,
) -> AppResult<Option<UsageEvent>> {
    let event = sqlx::query_as::<_, UsageEvent>(
        r#"
        SELECT * FROM usage_events
        WHERE vehicle_id = $1
        ORDER BY event_time DESC, id DESC
        LIMIT 1
        "#,
    )
    .bind(vehicle_id)
    .fetch_optional(conn)
    .await?;

    Ok(event)
}

pub async fn count_events(conn: &mut PgConnection, vehicle_id: Uuid) -> AppResult<i64> {
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM usage_events WHERE vehicle_id = $1")
            .bind(vehicle_id)
            .fetch_one(conn)
            .await?;

    Ok(count)
}

pub async fn find_events_page(
    conn: &mut PgConnection,
    vehicle_id: Uuid,
    limit: i64,
    offset: i64,
) -> AppResult<Vec<UsageEvent>> {
    let events = sqlx::query_as::<_, UsageEvent>(
        r#"
        SELECT * FROM usage_events
        WHERE vehicle_id = $1
        ORDER BY event_time DESC, id DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(vehicle_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(conn)
    .await?;

    Ok(events)
}

pub async fn insert_shares(
    conn: &mut PgConnection,
    usage_event_id: Uuid,
    participants: &[ShareSpec],
) -> AppResult<()> {
    for participant in participants {
        sqlx::query(
            r#"
            INSERT INTO usage_shares (id, usage_event_id, person_id, paid)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(usage_event_id)
        .bind(participant.person_id)
        .bind(participant.paid)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

pub async fn delete_shares_for_event(
    conn: &mut PgConnection,
    usage_event_id: Uuid,
) -> AppResult<()> {
    sqlx::query("DELETE FROM usage_shares WHERE usage_event_id = $1")
        .bind(usage_event_id)
        .execute(conn)
        .await?;

    Ok(())
}

/// All shares (any paid status) for the given events, joined with the
/// participant nicknames, in stable id order.
pub async fn find_shares_with_names(
    conn: &mut PgConnection,
    usage_event_ids: &[Uuid],
) -> AppResult<Vec<UsageShareWithName>> {
    let shares = sqlx::query_as::<_, UsageShareWithName>(
        r#"
        SELECT usage_shares.*, people.nickname
        FROM usage_shares
        INNER JOIN people ON people.id = usage_shares.person_id
        WHERE usage_shares.usage_event_id = ANY($1)
        ORDER BY usage_shares.id
        "#,
    )
    .bind(usage_event_ids)
    .fetch_all(conn)
    .await?;

    Ok(shares)
}

/// A person's shares filtered by paid status, joined with the owning
/// event and vehicle, optionally restricted to one vehicle.
pub async fn find_person_shares_by_paid(
    conn: &mut PgConnection,
    person_id: Uuid,
    paid: bool,
    vehicle_id: Option<Uuid>,
) -> AppResult<Vec<PersonUsageShare>> {
    let shares = sqlx::query_as::<_, PersonUsageShare>(
        r#"
        SELECT usage_shares.id, usage_shares.usage_event_id, usage_shares.person_id,
               usage_shares.paid, usage_events.event_time, usage_events.pay_each,
               usage_events.description, vehicles.id AS vehicle_id,
               vehicles.name AS vehicle_name
        FROM usage_shares
        INNER JOIN usage_events ON usage_events.id = usage_shares.usage_event_id
        INNER JOIN vehicles ON vehicles.id = usage_events.vehicle_id
        WHERE usage_shares.person_id = $1
          AND usage_shares.paid = $2
          AND ($3::uuid IS NULL OR usage_events.vehicle_id = $3)
        ORDER BY usage_events.event_time DESC, usage_events.id DESC
        "#,
    )
    .bind(person_id)
    .bind(paid)
    .bind(vehicle_id)
    .fetch_all(conn)
    .await?;

    Ok(shares)
}

pub async fn find_person_share_ids(
    conn: &mut PgConnection,
    person_id: Uuid,
) -> AppResult<Vec<Uuid>> {
    let ids: Vec<(Uuid,)> = sqlx::query_as("SELECT id FROM usage_shares WHERE person_id = $1")
        .bind(person_id)
        .fetch_all(conn)
        .await?;

    Ok(ids.into_iter().map(|(id,)| id).collect())
}

/// How many of the given share ids belong to the person. Ownership holds
/// only when the count equals the length of the id list.
pub async fn count_owned_shares(
    conn: &mut PgConnection,
    person_id: Uuid,
    share_ids: &[Uuid],
) -> AppResult<i64> {
    let (count,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM usage_shares WHERE person_id = $1 AND id = ANY($2)",
    )
    .bind(person_id)
    .bind(share_ids)
    .fetch_one(conn)
    .await?;

    Ok(count)
}

pub async fn set_shares_paid(conn: &mut PgConnection, share_ids: &[Uuid]) -> AppResult<()> {
    sqlx::query("UPDATE usage_shares SET paid = TRUE WHERE id = ANY($1)")
        .bind(share_ids)
        .execute(conn)
        .await?;

    Ok(())
}

pub async fn set_share_paid_flag(
    conn: &mut PgConnection,
    share_id: Uuid,
    paid: bool,
) -> AppResult<()> {
    sqlx::query("UPDATE usage_shares SET paid = $2 WHERE id = $1")
        .bind(share_id)
        .bind(paid)
        .execute(conn)
        .await?;

    Ok(())
}
