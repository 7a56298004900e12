use chrono::Utc;
use sqlx::PgConnection;
use uuid::Uuid;

use crate::models::refill::{NewRefillEvent, RefillEvent};
use crate::utils::errors::AppResult;

pub async fn create(conn: &mut PgConnection, refill: &NewRefillEvent) -> AppResult<Uuid> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO refill_events
            (id, vehicle_id, refill_time, total_money, kilometer_before, kilometer_after,
             unit_price_calculated, paid, refill_by, created_by, updated_by,
             created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10, $11, $11)
        "#,
    )
    .bind(id)
    .bind(refill.vehicle_id)
    .bind(refill.refill_time)
    .bind(refill.total_money)
    .bind(refill.kilometer_before)
    .bind(refill.kilometer_after)
    .bind(refill.unit_price_calculated)
    .bind(refill.paid)
    .bind(refill.refill_by)
    .bind(refill.created_by)
    .bind(now)
    .execute(conn)
    .await?;

    Ok(id)
}

pub async fn update(conn: &mut PgConnection, refill: &RefillEvent) -> AppResult<()> {
    sqlx::query(
        r#"
        UPDATE refill_events
        SET vehicle_id = $2, refill_time = $3, total_money = $4, kilometer_before = $5,
            kilometer_after = $6, unit_price_calculated = $7, paid = $8, refill_by = $9,
            updated_by = $10, updated_at = $11
        WHERE id = $1
        "#,
    )
    .bind(refill.id)
    .bind(refill.vehicle_id)
    .bind(refill.refill_time)
    .bind(refill.total_money)
    .bind(refill.kilometer_before)
    .bind(refill.kilometer_after)
    .bind(refill.unit_price_calculated)
    .bind(refill.paid)
    .bind(refill.refill_by)
    .bind(refill.updated_by)
    .bind(Utc::now())
    .execute(conn)
    .await?;

    Ok(())
}

pub async fn delete(conn: &mut PgConnection, id: Uuid) -> AppResult<()> {
    sqlx::query("DELETE FROM refill_events WHERE id = $1")
        .bind(id)
        .execute(conn)
        .await?;

    Ok(())
}

pub async fn find_by_id(conn: &mut PgConnection, id: Uuid) -> AppResult<Option<RefillEvent>> {
    let refill = sqlx::query_as::<_, RefillEvent>("SELECT * FROM refill_events WHERE id = $1")
        .bind(id)
        .fetch_optional(conn)
        .await?;

    Ok(refill)
}

pub async fn find_latest(
    conn: &mut PgConnection,
    vehicle_id: Uuid,
) -> AppResult<Option<RefillEvent>> {
    let refill = sqlx::query_as::<_, RefillEvent>(
        r#"
        SELECT * FROM refill_events
        WHERE vehicle_id = $1
        ORDER BY refill_time DESC, id DESC
        LIMIT 1
        "#,
    )
    .bind(vehicle_id)
    .fetch_optional(conn)
    .await?;

    Ok(refill)
}

pub async fn count(conn: &mut PgConnection, vehicle_id: Uuid) -> AppResult<i64> {
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM refill_events WHERE vehicle_id = $1")
            .bind(vehicle_id)
            .fetch_one(conn)
            .await?;

    Ok(count)
}

pub async fn find_page(
    conn: &mut PgConnection,
    vehicle_id: Uuid,
    limit: i64,
    offset: i64,
) -> AppResult<Vec<RefillEvent>> {
    let refills = sqlx::query_as::<_, RefillEvent>(
        r#"
        SELECT * FROM refill_events
        WHERE vehicle_id = $1
        ORDER BY refill_time DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(vehicle_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(conn)
    .await?;

    Ok(refills)
}

/// Oldest unpaid refill first, so older debts surface first.
pub async fn find_person_unpaid(
    conn: &mut PgConnection,
    person_id: Uuid,
    vehicle_id: Uuid,
) -> AppResult<Vec<RefillEvent>> {
    let refills = sqlx::query_as::<_, RefillEvent>(
        r#"
        SELECT * FROM refill_events
        WHERE refill_by = $1 AND vehicle_id = $2 AND paid = FALSE
        ORDER BY refill_time ASC, id ASC
        "#,
    )
    .bind(person_id)
    .bind(vehicle_id)
    .fetch_all(conn)
    .await?;

    Ok(refills)
}

pub async fn count_owned(
    conn: &mut PgConnection,
    person_id: Uuid,
    refill_ids: &[Uuid],
) -> AppResult<i64> {
    let (count,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM refill_events WHERE refill_by = $1 AND id = ANY($2)",
    )
    .bind(person_id)
    .bind(refill_ids)
    .fetch_one(conn)
    .await?;

    Ok(count)
}

pub async fn set_paid(conn: &mut PgConnection, refill_ids: &[Uuid]) -> AppResult<()> {
    sqlx::query("UPDATE refill_events SET paid = TRUE WHERE id = ANY($1)")
        .bind(refill_ids)
        .execute(conn)
        .await?;

    Ok(())
}
