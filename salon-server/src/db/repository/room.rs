//! Room Repository

use shared::models::{Room, RoomCreate, RoomUpdate};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Room>> {
    let rooms = sqlx::query_as::<_, Room>(
        "SELECT id, name, capacity, base_price, description, created_at FROM room ORDER BY name",
    )
    .fetch_all(pool)
    .await?;
    Ok(rooms)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Room>> {
    let room = sqlx::query_as::<_, Room>(
        "SELECT id, name, capacity, base_price, description, created_at FROM room WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(room)
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM room")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn create(pool: &SqlitePool, data: RoomCreate) -> RepoResult<Room> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO room (id, name, capacity, base_price, description, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(data.capacity)
    .bind(data.base_price)
    .bind(&data.description)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create room".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: RoomUpdate) -> RepoResult<Room> {
    let rows = sqlx::query(
        "UPDATE room SET name = COALESCE(?1, name), capacity = COALESCE(?2, capacity), base_price = COALESCE(?3, base_price), description = COALESCE(?4, description) WHERE id = ?5",
    )
    .bind(&data.name)
    .bind(data.capacity)
    .bind(data.base_price)
    .bind(&data.description)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Room {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Room {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    // Reservations reference rooms without cascade; refuse while any exist
    let reservations: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM reservation WHERE room_id = ?")
            .bind(id)
            .fetch_one(pool)
            .await?;
    if reservations > 0 {
        return Err(RepoError::Validation(
            "No se puede eliminar un salón con reservas asociadas".to_string(),
        ));
    }

    let rows = sqlx::query("DELETE FROM room WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
