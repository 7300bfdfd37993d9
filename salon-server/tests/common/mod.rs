//! Shared fixtures for integration tests: an app wired to an in-memory
//! database with the real migrations and the real router/middleware.

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use salon_server::core::{Config, ServerState, server};
use salon_server::db::{DbService, ensure_default_admin};

pub struct TestApp {
    pub state: ServerState,
    pub app: Router,
    _work_dir: tempfile::TempDir,
}

pub async fn spawn_app() -> TestApp {
    let work_dir = tempfile::tempdir().expect("create temp work dir");
    let config = Config::with_overrides(work_dir.path().to_string_lossy().to_string(), 0);

    let db = DbService::new_in_memory().await.expect("open in-memory db");
    ensure_default_admin(
        &db.pool,
        &config.default_admin_email,
        &config.default_admin_password,
    )
    .await
    .expect("seed default admin");

    let state = ServerState::new(config, db.pool);
    let app = server::app(state.clone());

    TestApp {
        state,
        app,
        _work_dir: work_dir,
    }
}

pub async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }

    let request = match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&value).expect("serialize body")))
            .expect("build request"),
        None => builder.body(Body::empty()).expect("build request"),
    };

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router never fails");

    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, value)
}

/// Log in and return the bearer token.
pub async fn login(app: &Router, email: &str, password: &str) -> String {
    let (status, body) = request(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["token"].as_str().expect("token in response").to_string()
}

pub async fn login_default_admin(test_app: &TestApp) -> String {
    login(
        &test_app.app,
        &test_app.state.config.default_admin_email,
        &test_app.state.config.default_admin_password,
    )
    .await
}

/// Create a room through the API and return its id.
pub async fn create_room(app: &Router, token: &str, name: &str, capacity: i64, price: f64) -> i64 {
    let (status, body) = request(
        app,
        "POST",
        "/api/rooms",
        Some(token),
        Some(json!({
            "name": name,
            "capacity": capacity,
            "base_price": price,
            "description": "Salón de eventos"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "room create failed: {body}");
    body["id"].as_i64().expect("room id")
}

/// Create a category + service pair and return the service id.
pub async fn create_service(app: &Router, token: &str, name: &str, price: f64) -> i64 {
    let (status, body) = request(
        app,
        "POST",
        "/api/categories",
        Some(token),
        Some(json!({ "name": format!("Categoría {name}"), "description": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "category create failed: {body}");
    let category_id = body["id"].as_i64().expect("category id");

    let (status, body) = request(
        app,
        "POST",
        "/api/services",
        Some(token),
        Some(json!({
            "category_id": category_id,
            "name": name,
            "description": null,
            "price": price
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "service create failed: {body}");
    body["id"].as_i64().expect("service id")
}
