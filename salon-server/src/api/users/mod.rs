//! User management API 模块
//!
//! The privileged bridge endpoints keep their historical root-level
//! paths (they predate the `/api` prefix) and authorize on their own via
//! [`crate::auth::authorize_admin`] instead of the router middleware.

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        // Admin bridge (POST, per-handler authorization)
        .route("/create-user", post(handler::create_user))
        .route("/update-user-email", post(handler::update_user_email))
        .route("/get-user-email", post(handler::get_user_email))
        .route("/delete-user", post(handler::delete_user))
        // Profile administration (behind the auth middleware)
        .route("/api/users", get(handler::list))
        .route("/api/users/{id}", put(handler::update_profile))
}
