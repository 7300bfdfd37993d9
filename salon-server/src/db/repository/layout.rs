//! Layout Repository

use shared::models::{Layout, LayoutCreate, LayoutUpdate};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

pub async fn find_by_room(pool: &SqlitePool, room_id: i64) -> RepoResult<Vec<Layout>> {
    let layouts = sqlx::query_as::<_, Layout>(
        "SELECT id, room_id, name, capacity FROM layout WHERE room_id = ? ORDER BY name",
    )
    .bind(room_id)
    .fetch_all(pool)
    .await?;
    Ok(layouts)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Layout>> {
    let layout = sqlx::query_as::<_, Layout>(
        "SELECT id, room_id, name, capacity FROM layout WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(layout)
}

/// Largest layout capacity defined for a room (None when it has none).
/// Room edits must not drop the room capacity below this value.
pub async fn max_capacity_for_room(pool: &SqlitePool, room_id: i64) -> RepoResult<Option<i64>> {
    let max: Option<i64> = sqlx::query_scalar("SELECT MAX(capacity) FROM layout WHERE room_id = ?")
        .bind(room_id)
        .fetch_one(pool)
        .await?;
    Ok(max)
}

pub async fn create(pool: &SqlitePool, room_id: i64, data: LayoutCreate) -> RepoResult<Layout> {
    let id = shared::util::snowflake_id();
    sqlx::query("INSERT INTO layout (id, room_id, name, capacity) VALUES (?1, ?2, ?3, ?4)")
        .bind(id)
        .bind(room_id)
        .bind(&data.name)
        .bind(data.capacity)
        .execute(pool)
        .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create layout".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: LayoutUpdate) -> RepoResult<Layout> {
    let rows = sqlx::query(
        "UPDATE layout SET name = COALESCE(?1, name), capacity = COALESCE(?2, capacity) WHERE id = ?3",
    )
    .bind(&data.name)
    .bind(data.capacity)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Layout {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Layout {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM layout WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
