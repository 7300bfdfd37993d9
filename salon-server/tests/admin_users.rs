//! Admin user-management bridge tests: shared authorization guard,
//! account/profile two-store semantics, compensation on create and
//! no-rollback on delete.

mod common;

use http::StatusCode;
use serde_json::json;

use common::{login, login_default_admin, request, spawn_app};
use salon_server::db::repository::{account, profile};

async fn create_user(
    test_app: &common::TestApp,
    token: &str,
    email: &str,
    role: &str,
) -> (StatusCode, serde_json::Value) {
    request(
        &test_app.app,
        "POST",
        "/create-user",
        Some(token),
        Some(json!({
            "email": email,
            "password": "secreto123",
            "name": "Operador Uno",
            "role": role
        })),
    )
    .await
}

#[tokio::test]
async fn bridge_requires_a_token() {
    let test_app = spawn_app().await;

    let (status, _) = request(
        &test_app.app,
        "POST",
        "/create-user",
        None,
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = request(
        &test_app.app,
        "POST",
        "/delete-user",
        Some("garbage-token"),
        Some(json!({ "userId": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn non_admin_gets_403_and_nothing_is_created() {
    let test_app = spawn_app().await;
    let admin_token = login_default_admin(&test_app).await;

    let (status, _) = create_user(&test_app, &admin_token, "operador@salones.test", "OPERADOR").await;
    assert_eq!(status, StatusCode::OK);

    let operador_token = login(&test_app.app, "operador@salones.test", "secreto123").await;
    let (status, _) = create_user(&test_app, &operador_token, "intruso@salones.test", "OPERADOR").await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Neither account nor profile row exists for the rejected request
    let account = account::find_by_email(&test_app.state.pool, "intruso@salones.test")
        .await
        .expect("query account");
    assert!(account.is_none());
}

#[tokio::test]
async fn create_user_validates_fields() {
    let test_app = spawn_app().await;
    let token = login_default_admin(&test_app).await;

    // Missing fields
    let (status, body) = request(
        &test_app.app,
        "POST",
        "/create-user",
        Some(&token),
        Some(json!({ "email": "x@y.test" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["message"]
            .as_str()
            .unwrap_or_default()
            .contains("Missing required fields")
    );

    // Unknown role
    let (status, body) = create_user(&test_app, &token, "x@y.test", "GERENTE").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["message"]
            .as_str()
            .unwrap_or_default()
            .contains("Invalid role")
    );

    // Duplicate email is a provider rejection, not a server error
    let (status, _) = create_user(&test_app, &token, "dup@salones.test", "OPERADOR").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = create_user(&test_app, &token, "dup@salones.test", "OPERADOR").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn created_users_can_log_in_and_be_inspected() {
    let test_app = spawn_app().await;
    let admin_token = login_default_admin(&test_app).await;

    let (status, created) = create_user(&test_app, &admin_token, "eva@salones.test", "ADMIN").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["success"], json!(true));
    assert_eq!(created["user"]["role"], json!("ADMIN"));
    let user_id = created["user"]["id"].as_i64().expect("user id");

    // get-user-email returns the identity email for the edit form
    let (status, body) = request(
        &test_app.app,
        "POST",
        "/get-user-email",
        Some(&admin_token),
        Some(json!({ "userId": user_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], json!("eva@salones.test"));

    // update-user-email touches only the identity record
    let (status, body) = request(
        &test_app.app,
        "POST",
        "/update-user-email",
        Some(&admin_token),
        Some(json!({ "userId": user_id, "newEmail": "eva.nueva@salones.test" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], json!("eva.nueva@salones.test"));

    let profile_row = profile::find_by_user_id(&test_app.state.pool, user_id)
        .await
        .expect("query profile")
        .expect("profile exists");
    assert_eq!(profile_row.name, "Operador Uno");

    // The new credential pair works
    let token = login(&test_app.app, "eva.nueva@salones.test", "secreto123").await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn delete_user_removes_profile_then_account() {
    let test_app = spawn_app().await;
    let admin_token = login_default_admin(&test_app).await;

    let (_, created) = create_user(&test_app, &admin_token, "borrar@salones.test", "OPERADOR").await;
    let user_id = created["user"]["id"].as_i64().expect("user id");

    let (status, body) = request(
        &test_app.app,
        "POST",
        "/delete-user",
        Some(&admin_token),
        Some(json!({ "userId": user_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));

    assert!(
        profile::find_by_user_id(&test_app.state.pool, user_id)
            .await
            .expect("query profile")
            .is_none()
    );
    assert!(
        account::find_by_id(&test_app.state.pool, user_id)
            .await
            .expect("query account")
            .is_none()
    );
}

#[tokio::test]
async fn delete_user_surfaces_partial_failure_without_rollback() {
    let test_app = spawn_app().await;
    let admin_token = login_default_admin(&test_app).await;

    let (_, created) = create_user(&test_app, &admin_token, "mitad@salones.test", "OPERADOR").await;
    let user_id = created["user"]["id"].as_i64().expect("user id");

    // Make the identity-provider step fail by removing the account out
    // of band; the profile row is still there.
    sqlx::query("DELETE FROM account WHERE id = ?")
        .bind(user_id)
        .execute(&test_app.state.pool)
        .await
        .expect("remove account out of band");

    let (status, _) = request(
        &test_app.app,
        "POST",
        "/delete-user",
        Some(&admin_token),
        Some(json!({ "userId": user_id })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // The profile deletion is NOT rolled back
    assert!(
        profile::find_by_user_id(&test_app.state.pool, user_id)
            .await
            .expect("query profile")
            .is_none()
    );
}

#[tokio::test]
async fn profile_listing_is_admin_only() {
    let test_app = spawn_app().await;
    let admin_token = login_default_admin(&test_app).await;

    let (status, _) = create_user(&test_app, &admin_token, "listado@salones.test", "OPERADOR").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = request(&test_app.app, "GET", "/api/users", Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(|a| a.len()), Some(2));

    let operador_token = login(&test_app.app, "listado@salones.test", "secreto123").await;
    let (status, _) = request(
        &test_app.app,
        "GET",
        "/api/users",
        Some(&operador_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
