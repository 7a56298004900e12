use sqlx::PgConnection;
use uuid::Uuid;

use crate::models::vehicle::Vehicle;
use crate::utils::errors::AppResult;

pub async fn find_all(conn: &mut PgConnection) -> AppResult<Vec<Vehicle>> {
    let vehicles = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles ORDER BY name ASC")
        .fetch_all(conn)
        .await?;

    Ok(vehicles)
}

pub async fn find_by_id(conn: &mut PgConnection, id: Uuid) -> AppResult<Option<Vehicle>> {
    let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
        .bind(id)
        .fetch_optional(conn)
        .await?;

    Ok(vehicle)
}
