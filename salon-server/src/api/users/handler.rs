//! User Management Handlers
//!
//! The bridge endpoints each call [`authorize_admin`] first: bearer token
//! → principal → profile row must be ADMIN (401 / 403). Account and
//! profile are distinct stores; creation compensates, deletion does not
//! roll back; partial failure is surfaced, never hidden.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::HeaderMap,
};
use serde::{Deserialize, Serialize};
use shared::models::{Profile, Role};

use crate::auth::{CurrentUser, authorize_admin, require_admin_profile};
use crate::core::ServerState;
use crate::db::repository::RepoError;
use crate::db::repository::{account, profile};
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_PASSWORD_LEN, validate_required_text,
};
use crate::utils::{AppError, AppResult};

// ── Request / response bodies (bridge endpoints) ────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreatedUser {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct CreateUserResponse {
    pub success: bool,
    pub user: CreatedUser,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmailRequest {
    pub user_id: Option<i64>,
    pub new_email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UpdatedEmailUser {
    pub id: i64,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct UpdateEmailResponse {
    pub success: bool,
    pub user: UpdatedEmailUser,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdRequest {
    pub user_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct GetEmailResponse {
    pub success: bool,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteUserResponse {
    pub success: bool,
}

// ── Bridge endpoints ────────────────────────────────────────────────

/// POST /create-user (caller must be ADMIN)
///
/// Creates the identity account first, then the profile row. When the
/// profile insert fails the account is deleted again so no orphaned
/// login survives - a compensating action, not a transaction.
pub async fn create_user(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Json(req): Json<CreateUserRequest>,
) -> AppResult<Json<CreateUserResponse>> {
    authorize_admin(&state, &headers).await?;

    let (email, password, name, role) = match (&req.email, &req.password, &req.name, &req.role) {
        (Some(e), Some(p), Some(n), Some(r)) => (e.trim(), p.as_str(), n.trim(), r.as_str()),
        _ => {
            return Err(AppError::validation(
                "Missing required fields: email, password, name, role".to_string(),
            ));
        }
    };

    validate_required_text(email, "email", MAX_EMAIL_LEN)?;
    validate_required_text(password, "password", MAX_PASSWORD_LEN)?;
    validate_required_text(name, "name", MAX_NAME_LEN)?;

    let role: Role = role.parse().map_err(|_| {
        AppError::validation("Invalid role. Must be ADMIN or OPERADOR".to_string())
    })?;

    let account = account::create(&state.pool, email, password).await?;

    let profile = match profile::create(&state.pool, account.id, name, role).await {
        Ok(p) => p,
        Err(e) => {
            tracing::error!(user_id = account.id, error = %e, "Profile insert failed");
            // Remove the orphaned login; losing this cleanup is logged,
            // not retried
            if let Err(cleanup) = account::delete(&state.pool, account.id).await {
                tracing::error!(
                    user_id = account.id,
                    error = %cleanup,
                    "Compensating account delete failed - orphaned login remains"
                );
            }
            return Err(AppError::internal("Failed to create user profile"));
        }
    };

    tracing::info!(user_id = account.id, email = %account.email, role = %role, "User created");

    Ok(Json(CreateUserResponse {
        success: true,
        user: CreatedUser {
            id: account.id,
            email: account.email,
            name: profile.name,
            role: profile.role,
        },
    }))
}

/// POST /update-user-email (caller must be ADMIN)
///
/// Touches only the identity account; the profile row is untouched.
pub async fn update_user_email(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Json(req): Json<UpdateEmailRequest>,
) -> AppResult<Json<UpdateEmailResponse>> {
    authorize_admin(&state, &headers).await?;

    let (user_id, new_email) = match (req.user_id, &req.new_email) {
        (Some(id), Some(email)) if !email.trim().is_empty() => (id, email.trim()),
        _ => {
            return Err(AppError::validation(
                "Missing required fields: userId, newEmail".to_string(),
            ));
        }
    };
    validate_required_text(new_email, "newEmail", MAX_EMAIL_LEN)?;

    let account = match account::update_email(&state.pool, user_id, new_email).await {
        Ok(a) => a,
        Err(RepoError::NotFound(_)) => {
            return Err(AppError::validation("User not found".to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    Ok(Json(UpdateEmailResponse {
        success: true,
        user: UpdatedEmailUser {
            id: account.id,
            email: account.email,
        },
    }))
}

/// POST /get-user-email (caller must be ADMIN)
pub async fn get_user_email(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Json(req): Json<UserIdRequest>,
) -> AppResult<Json<GetEmailResponse>> {
    authorize_admin(&state, &headers).await?;

    let user_id = req
        .user_id
        .ok_or_else(|| AppError::validation("Missing required field: userId".to_string()))?;

    let account = account::find_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| AppError::validation("User not found".to_string()))?;

    Ok(Json(GetEmailResponse {
        success: true,
        email: account.email,
    }))
}

/// POST /delete-user (caller must be ADMIN)
///
/// Deletes the profile row first, then the identity account. If the
/// second step fails the first is NOT rolled back; the error goes back
/// to the caller with the profile already gone.
pub async fn delete_user(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Json(req): Json<UserIdRequest>,
) -> AppResult<Json<DeleteUserResponse>> {
    authorize_admin(&state, &headers).await?;

    let user_id = req
        .user_id
        .ok_or_else(|| AppError::validation("Missing required field: userId".to_string()))?;

    profile::delete(&state.pool, user_id).await?;

    let account_deleted = account::delete(&state.pool, user_id).await?;
    if !account_deleted {
        tracing::warn!(
            user_id,
            "Profile deleted but identity account was not found"
        );
        return Err(AppError::validation(
            "Identity account could not be deleted".to_string(),
        ));
    }

    tracing::info!(user_id, "User deleted");
    Ok(Json(DeleteUserResponse { success: true }))
}

// ── Profile administration (/api/users, behind auth middleware) ─────

/// GET /api/users - 资料列表 (仅 ADMIN)
pub async fn list(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<Profile>>> {
    require_admin_profile(&state, &current_user).await?;

    let profiles = profile::find_all(&state.pool).await?;
    Ok(Json(profiles))
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub role: Option<String>,
}

/// PUT /api/users/:id - 更新资料 (仅 ADMIN)
pub async fn update_profile(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateProfileRequest>,
) -> AppResult<Json<Profile>> {
    require_admin_profile(&state, &current_user).await?;

    if let Some(name) = &req.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    let role = match &req.role {
        Some(r) => Some(r.parse::<Role>().map_err(|_| {
            AppError::validation("Invalid role. Must be ADMIN or OPERADOR".to_string())
        })?),
        None => None,
    };

    let profile = profile::update(&state.pool, id, req.name.as_deref(), role).await?;
    Ok(Json(profile))
}
