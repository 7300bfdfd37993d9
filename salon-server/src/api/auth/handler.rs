//! Authentication Handlers
//!
//! Handles login, logout and the current-principal endpoint.

use std::time::Duration;

use axum::{Extension, Json, extract::State};
use serde::{Deserialize, Serialize};
use shared::models::Role;

use crate::AppError;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{account, profile};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub created_at: i64,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// Login handler
///
/// Authenticates credentials and returns a JWT token plus the profile.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let email = req.email.trim().to_lowercase();

    let found = account::find_by_email(&state.pool, &email).await?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Unified error message to prevent email enumeration
    let account = match found {
        Some(a) => {
            let password_valid = account::verify_password(&req.password, &a.hash_pass)
                .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;

            if !password_valid {
                tracing::warn!(email = %email, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }

            a
        }
        None => {
            tracing::warn!(email = %email, "Login failed - account not found");
            return Err(AppError::invalid_credentials());
        }
    };

    let profile = profile::find_by_user_id(&state.pool, account.id)
        .await?
        .ok_or_else(|| {
            tracing::error!(user_id = account.id, "Account has no profile row");
            AppError::forbidden("Account has no profile".to_string())
        })?;

    let token = state
        .jwt_service
        .generate_token(account.id, &account.email, &profile.name, profile.role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    tracing::info!(
        user_id = account.id,
        email = %account.email,
        role = %profile.role,
        "User logged in successfully"
    );

    Ok(Json(LoginResponse {
        token,
        user: UserInfo {
            id: account.id,
            email: account.email,
            name: profile.name,
            role: profile.role,
            created_at: profile.created_at,
        },
    }))
}

/// Get current user info (fresh profile data, not token claims)
pub async fn me(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<UserInfo>, AppError> {
    let profile = profile::find_by_user_id(&state.pool, user.id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Profile {} not found", user.id)))?;

    Ok(Json(UserInfo {
        id: user.id,
        email: user.email,
        name: profile.name,
        role: profile.role,
        created_at: profile.created_at,
    }))
}

/// Logout handler
pub async fn logout(Extension(user): Extension<CurrentUser>) -> Json<()> {
    tracing::info!(user_id = user.id, email = %user.email, "User logged out");
    Json(())
}
