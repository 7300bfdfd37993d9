//! Layout API 模块
//!
//! Creation and listing live under `/api/rooms/{id}/layouts`; this
//! module covers update and delete of a single layout.

mod handler;

use axum::{Router, routing::put};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/layouts/{id}",
        put(handler::update).delete(handler::delete),
    )
}
