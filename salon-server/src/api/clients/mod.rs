//! Client API 模块
//!
//! Read-only: clients are created and patched by the reservation engine.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/clients", get(handler::list))
        .route("/api/clients/{id}", get(handler::get_by_id))
}
