//! Room API Handlers
//!
//! Capacity invariants are enforced here, at edit time:
//! a room can never shrink below its largest layout, and a layout can
//! never exceed its room.

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{Layout, LayoutCreate, Room, RoomCreate, RoomUpdate};

use crate::core::ServerState;
use crate::db::repository::{layout, room};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_positive, validate_price,
    validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// GET /api/rooms - 获取所有 salón
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Room>>> {
    let rooms = room::find_all(&state.pool).await?;
    Ok(Json(rooms))
}

/// GET /api/rooms/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Room>> {
    let room = room::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Room {} not found", id)))?;
    Ok(Json(room))
}

/// POST /api/rooms - 创建 salón
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<RoomCreate>,
) -> AppResult<Json<Room>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_positive(payload.capacity, "capacity")?;
    validate_price(payload.base_price, "base_price")?;

    let room = room::create(&state.pool, payload).await?;
    Ok(Json(room))
}

/// PUT /api/rooms/:id - 更新 salón
///
/// Rejects a capacity below the largest layout currently defined for the
/// room; the message names that capacity so the operator knows the floor.
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<RoomUpdate>,
) -> AppResult<Json<Room>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    if let Some(price) = payload.base_price {
        validate_price(price, "base_price")?;
    }

    if let Some(capacity) = payload.capacity {
        validate_positive(capacity, "capacity")?;

        if let Some(max_layout) = layout::max_capacity_for_room(&state.pool, id).await? {
            if capacity < max_layout {
                return Err(AppError::validation(format!(
                    "La capacidad del salón no puede ser inferior a la mayor distribución ({max_layout} personas)"
                )));
            }
        }
    }

    let room = room::update(&state.pool, id, payload).await?;
    Ok(Json(room))
}

/// DELETE /api/rooms/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = room::delete(&state.pool, id).await?;
    Ok(Json(result))
}

/// GET /api/rooms/:id/layouts - 某 salón 的所有分布
pub async fn list_layouts(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<Layout>>> {
    room::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Room {} not found", id)))?;

    let layouts = layout::find_by_room(&state.pool, id).await?;
    Ok(Json(layouts))
}

/// POST /api/rooms/:id/layouts - 创建分布
pub async fn create_layout(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<LayoutCreate>,
) -> AppResult<Json<Layout>> {
    let room = room::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Room {} not found", id)))?;

    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_positive(payload.capacity, "capacity")?;
    if payload.capacity > room.capacity {
        return Err(AppError::validation(format!(
            "La distribución no puede superar la capacidad del salón ({} personas)",
            room.capacity
        )));
    }

    let layout = layout::create(&state.pool, id, payload).await?;
    Ok(Json(layout))
}
