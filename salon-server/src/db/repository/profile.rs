//! Profile Repository
//!
//! One role row per account. The admin guard reads this table on every
//! privileged call; role claims inside tokens are display-only.

use shared::models::{Profile, Role};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

pub async fn find_by_user_id(pool: &SqlitePool, user_id: i64) -> RepoResult<Option<Profile>> {
    let profile = sqlx::query_as::<_, Profile>(
        "SELECT user_id, name, role, created_at FROM profile WHERE user_id = ?",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(profile)
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Profile>> {
    let profiles = sqlx::query_as::<_, Profile>(
        "SELECT user_id, name, role, created_at FROM profile ORDER BY created_at ASC",
    )
    .fetch_all(pool)
    .await?;
    Ok(profiles)
}

pub async fn create(
    pool: &SqlitePool,
    user_id: i64,
    name: &str,
    role: Role,
) -> RepoResult<Profile> {
    let now = shared::util::now_millis();
    sqlx::query("INSERT INTO profile (user_id, name, role, created_at) VALUES (?1, ?2, ?3, ?4)")
        .bind(user_id)
        .bind(name)
        .bind(role)
        .bind(now)
        .execute(pool)
        .await?;

    find_by_user_id(pool, user_id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create profile".into()))
}

pub async fn update(
    pool: &SqlitePool,
    user_id: i64,
    name: Option<&str>,
    role: Option<Role>,
) -> RepoResult<Profile> {
    let rows = sqlx::query(
        "UPDATE profile SET name = COALESCE(?1, name), role = COALESCE(?2, role) WHERE user_id = ?3",
    )
    .bind(name)
    .bind(role)
    .bind(user_id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Profile {user_id} not found")));
    }
    find_by_user_id(pool, user_id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Profile {user_id} not found")))
}

pub async fn delete(pool: &SqlitePool, user_id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM profile WHERE user_id = ?")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
