//! Service / Category API 模块

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/categories",
            get(handler::list_categories).post(handler::create_category),
        )
        .route(
            "/api/categories/{id}",
            put(handler::update_category).delete(handler::delete_category),
        )
        .route(
            "/api/services",
            get(handler::list_services).post(handler::create_service),
        )
        .route(
            "/api/services/{id}",
            put(handler::update_service).delete(handler::delete_service),
        )
}
