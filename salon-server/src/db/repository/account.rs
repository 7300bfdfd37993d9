//! Account Repository
//!
//! The identity store behind the admin user-management endpoints: login
//! email plus argon2 password hash. Profiles (application roles) live in
//! their own table and are managed separately; see [`super::profile`].

use shared::models::Account;
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Account>> {
    let account = sqlx::query_as::<_, Account>(
        "SELECT id, email, hash_pass, created_at FROM account WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(account)
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> RepoResult<Option<Account>> {
    let account = sqlx::query_as::<_, Account>(
        "SELECT id, email, hash_pass, created_at FROM account WHERE email = ? LIMIT 1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(account)
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM account")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Create an account with a freshly hashed password.
/// The account is usable immediately (no confirmation step).
pub async fn create(pool: &SqlitePool, email: &str, password: &str) -> RepoResult<Account> {
    if find_by_email(pool, email).await?.is_some() {
        return Err(RepoError::Validation(format!(
            "An account with email '{email}' already exists"
        )));
    }

    let hash = hash_password(password)
        .map_err(|e| RepoError::Database(format!("Password hashing failed: {e}")))?;

    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query("INSERT INTO account (id, email, hash_pass, created_at) VALUES (?1, ?2, ?3, ?4)")
        .bind(id)
        .bind(email)
        .bind(&hash)
        .bind(now)
        .execute(pool)
        .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create account".into()))
}

pub async fn update_email(pool: &SqlitePool, id: i64, new_email: &str) -> RepoResult<Account> {
    let rows = sqlx::query("UPDATE account SET email = ?1 WHERE id = ?2")
        .bind(new_email)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Account {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Account {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM account WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Hash a password using argon2
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    use argon2::{
        Argon2,
        password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
    };

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(password_hash.to_string())
}

/// Verify a password against a stored argon2 hash
pub fn verify_password(
    password: &str,
    hash: &str,
) -> Result<bool, argon2::password_hash::Error> {
    use argon2::{
        Argon2,
        password_hash::{PasswordHash, PasswordVerifier},
    };

    let parsed_hash = PasswordHash::new(hash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_round_trip() {
        let hash = hash_password("secreto123").expect("hashing works");
        assert!(verify_password("secreto123", &hash).expect("verification works"));
        assert!(!verify_password("otro", &hash).expect("verification works"));
    }
}
