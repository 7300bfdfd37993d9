//! Service / Category API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{
    Service, ServiceCategory, ServiceCategoryCreate, ServiceCategoryUpdate, ServiceCreate,
    ServiceUpdate,
};

use crate::core::ServerState;
use crate::db::repository::service;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_price, validate_required_text,
};
use crate::utils::AppResult;

// ── Categories ──────────────────────────────────────────────────────

/// GET /api/categories - 获取所有服务分类
pub async fn list_categories(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<ServiceCategory>>> {
    let categories = service::find_all_categories(&state.pool).await?;
    Ok(Json(categories))
}

/// POST /api/categories - 创建分类
pub async fn create_category(
    State(state): State<ServerState>,
    Json(payload): Json<ServiceCategoryCreate>,
) -> AppResult<Json<ServiceCategory>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;

    let category = service::create_category(&state.pool, payload).await?;
    Ok(Json(category))
}

/// PUT /api/categories/:id - 更新分类
pub async fn update_category(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ServiceCategoryUpdate>,
) -> AppResult<Json<ServiceCategory>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;

    let category = service::update_category(&state.pool, id, payload).await?;
    Ok(Json(category))
}

/// DELETE /api/categories/:id - 删除分类 (级联删除其服务)
pub async fn delete_category(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = service::delete_category(&state.pool, id).await?;
    Ok(Json(result))
}

// ── Services ────────────────────────────────────────────────────────

/// GET /api/services - 获取所有服务
pub async fn list_services(State(state): State<ServerState>) -> AppResult<Json<Vec<Service>>> {
    let services = service::find_all_services(&state.pool).await?;
    Ok(Json(services))
}

/// POST /api/services - 创建服务
pub async fn create_service(
    State(state): State<ServerState>,
    Json(payload): Json<ServiceCreate>,
) -> AppResult<Json<Service>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_price(payload.price, "price")?;

    let service = service::create_service(&state.pool, payload).await?;
    Ok(Json(service))
}

/// PUT /api/services/:id - 更新服务
pub async fn update_service(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ServiceUpdate>,
) -> AppResult<Json<Service>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    if let Some(price) = payload.price {
        validate_price(price, "price")?;
    }

    let service = service::update_service(&state.pool, id, payload).await?;
    Ok(Json(service))
}

/// DELETE /api/services/:id - 删除服务
pub async fn delete_service(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = service::delete_service(&state.pool, id).await?;
    Ok(Json(result))
}
