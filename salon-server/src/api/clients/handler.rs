//! Client API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::Client;

use crate::core::ServerState;
use crate::db::repository::client;
use crate::utils::{AppError, AppResult};

/// GET /api/clients - 客户登记列表
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Client>>> {
    let clients = client::find_all(&state.pool).await?;
    Ok(Json(clients))
}

/// GET /api/clients/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Client>> {
    let client = client::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Client {} not found", id)))?;
    Ok(Json(client))
}
