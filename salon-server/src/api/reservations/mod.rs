//! Reservation API 模块
//!
//! 预订引擎的 HTTP 入口，包含报价 (presupuesto) 导出。

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reservations", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        // Budget / quote export
        .route("/{id}/quote", post(handler::generate_quote))
}
