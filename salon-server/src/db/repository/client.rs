//! Client Repository
//!
//! Clients are resolved (exact email or exact name) or inserted while a
//! reservation is being saved; there is no standalone create screen.

use shared::models::Client;
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

const CLIENT_SELECT: &str = "SELECT id, name, company, phone, email, created_at FROM client";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Client>> {
    let sql = format!("{CLIENT_SELECT} ORDER BY name");
    let clients = sqlx::query_as::<_, Client>(&sql).fetch_all(pool).await?;
    Ok(clients)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Client>> {
    let sql = format!("{CLIENT_SELECT} WHERE id = ?");
    let client = sqlx::query_as::<_, Client>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(client)
}

/// Lookup used by the reservation engine's client resolution:
/// exact email match (when an email was supplied) OR exact name match.
pub async fn find_by_email_or_name(
    pool: &SqlitePool,
    email: Option<&str>,
    name: &str,
) -> RepoResult<Option<Client>> {
    let sql = format!("{CLIENT_SELECT} WHERE (?1 IS NOT NULL AND email = ?1) OR name = ?2 LIMIT 1");
    let client = sqlx::query_as::<_, Client>(&sql)
        .bind(email)
        .bind(name)
        .fetch_optional(pool)
        .await?;
    Ok(client)
}

pub async fn create(
    pool: &SqlitePool,
    name: &str,
    email: Option<&str>,
    phone: Option<&str>,
) -> RepoResult<Client> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO client (id, name, company, phone, email, created_at) VALUES (?1, ?2, NULL, ?3, ?4, ?5)",
    )
    .bind(id)
    .bind(name)
    .bind(phone)
    .bind(email)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create client".into()))
}

/// Patch newly supplied contact data onto an existing client (matched
/// during resolution). Absent fields are left untouched.
pub async fn patch_contact(
    pool: &SqlitePool,
    id: i64,
    email: Option<&str>,
    phone: Option<&str>,
) -> RepoResult<()> {
    sqlx::query(
        "UPDATE client SET email = COALESCE(?1, email), phone = COALESCE(?2, phone) WHERE id = ?3",
    )
    .bind(email)
    .bind(phone)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}

/// In-place update of the client already linked to a reservation
/// (edit mode: no re-resolution, supplied values overwrite).
pub async fn update_contact_full(
    pool: &SqlitePool,
    id: i64,
    name: &str,
    email: Option<&str>,
    phone: Option<&str>,
) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE client SET name = ?1, email = ?2, phone = ?3 WHERE id = ?4")
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Client {id} not found")));
    }
    Ok(())
}
