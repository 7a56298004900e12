use sqlx::PgConnection;
use uuid::Uuid;

use crate::models::person::Person;
use crate::utils::errors::AppResult;

pub async fn find_all(conn: &mut PgConnection) -> AppResult<Vec<Person>> {
    let people = sqlx::query_as::<_, Person>("SELECT * FROM people ORDER BY nickname ASC")
        .fetch_all(conn)
        .await?;

    Ok(people)
}

pub async fn find_by_id(conn: &mut PgConnection, id: Uuid) -> AppResult<Option<Person>> {
    let person = sqlx::query_as::<_, Person>("SELECT * FROM people WHERE id = $1")
        .bind(id)
        .fetch_optional(conn)
        .await?;

    Ok(person)
}
