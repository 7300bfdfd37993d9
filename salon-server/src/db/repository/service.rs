//! Service and ServiceCategory Repository

use shared::models::{
    Service, ServiceCategory, ServiceCategoryCreate, ServiceCategoryUpdate, ServiceCreate,
    ServiceUpdate,
};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

// ── Categories ──────────────────────────────────────────────────────

pub async fn find_all_categories(pool: &SqlitePool) -> RepoResult<Vec<ServiceCategory>> {
    let categories = sqlx::query_as::<_, ServiceCategory>(
        "SELECT id, name, description FROM service_category ORDER BY name",
    )
    .fetch_all(pool)
    .await?;
    Ok(categories)
}

pub async fn find_category_by_id(
    pool: &SqlitePool,
    id: i64,
) -> RepoResult<Option<ServiceCategory>> {
    let category = sqlx::query_as::<_, ServiceCategory>(
        "SELECT id, name, description FROM service_category WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(category)
}

pub async fn create_category(
    pool: &SqlitePool,
    data: ServiceCategoryCreate,
) -> RepoResult<ServiceCategory> {
    let id = shared::util::snowflake_id();
    sqlx::query("INSERT INTO service_category (id, name, description) VALUES (?1, ?2, ?3)")
        .bind(id)
        .bind(&data.name)
        .bind(&data.description)
        .execute(pool)
        .await?;

    find_category_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create service category".into()))
}

pub async fn update_category(
    pool: &SqlitePool,
    id: i64,
    data: ServiceCategoryUpdate,
) -> RepoResult<ServiceCategory> {
    let rows = sqlx::query(
        "UPDATE service_category SET name = COALESCE(?1, name), description = COALESCE(?2, description) WHERE id = ?3",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Category {id} not found")));
    }
    find_category_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Category {id} not found")))
}

/// Deleting a category cascades to its services (schema-level FK rule).
pub async fn delete_category(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM service_category WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

// ── Services ────────────────────────────────────────────────────────

pub async fn find_all_services(pool: &SqlitePool) -> RepoResult<Vec<Service>> {
    let services = sqlx::query_as::<_, Service>(
        "SELECT id, category_id, name, description, price FROM service ORDER BY name",
    )
    .fetch_all(pool)
    .await?;
    Ok(services)
}

pub async fn find_service_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Service>> {
    let service = sqlx::query_as::<_, Service>(
        "SELECT id, category_id, name, description, price FROM service WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(service)
}

pub async fn create_service(pool: &SqlitePool, data: ServiceCreate) -> RepoResult<Service> {
    if find_category_by_id(pool, data.category_id).await?.is_none() {
        return Err(RepoError::Validation(format!(
            "Category {} not found",
            data.category_id
        )));
    }

    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO service (id, category_id, name, description, price) VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(id)
    .bind(data.category_id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price)
    .execute(pool)
    .await?;

    find_service_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create service".into()))
}

pub async fn update_service(pool: &SqlitePool, id: i64, data: ServiceUpdate) -> RepoResult<Service> {
    let rows = sqlx::query(
        "UPDATE service SET category_id = COALESCE(?1, category_id), name = COALESCE(?2, name), description = COALESCE(?3, description), price = COALESCE(?4, price) WHERE id = ?5",
    )
    .bind(data.category_id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Service {id} not found")));
    }
    find_service_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Service {id} not found")))
}

pub async fn delete_service(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM service WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
