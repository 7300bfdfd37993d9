//! Layout API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{Layout, LayoutUpdate};

use crate::core::ServerState;
use crate::db::repository::{layout, room};
use crate::utils::validation::{MAX_NAME_LEN, validate_positive, validate_required_text};
use crate::utils::{AppError, AppResult};

/// PUT /api/layouts/:id - 更新分布
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<LayoutUpdate>,
) -> AppResult<Json<Layout>> {
    let existing = layout::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Layout {} not found", id)))?;

    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }

    if let Some(capacity) = payload.capacity {
        validate_positive(capacity, "capacity")?;

        let room = room::find_by_id(&state.pool, existing.room_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Room {} not found", existing.room_id)))?;
        if capacity > room.capacity {
            return Err(AppError::validation(format!(
                "La distribución no puede superar la capacidad del salón ({} personas)",
                room.capacity
            )));
        }
    }

    let layout = layout::update(&state.pool, id, payload).await?;
    Ok(Json(layout))
}

/// DELETE /api/layouts/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = layout::delete(&state.pool, id).await?;
    Ok(Json(result))
}
