//! Reservation engine integration tests: overlap rejection through the
//! database constraint, amount snapshotting, service line lifecycle and
//! client resolution, all through the real router.

mod common;

use chrono::{TimeZone, Utc};
use http::StatusCode;
use serde_json::{Value, json};

use common::{create_room, create_service, login_default_admin, request, spawn_app};
use salon_server::db::repository::{client, reservation};
use salon_server::quotes;

fn at(day: u32, hour: u32) -> String {
    Utc.with_ymd_and_hms(2030, 5, day, hour, 0, 0)
        .unwrap()
        .to_rfc3339()
}

fn reservation_body(room_id: i64, day: u32, from: u32, to: u32, status: &str) -> Value {
    json!({
        "client_name": "Ana Gómez",
        "client_email": "ana@x.com",
        "client_phone": null,
        "room_id": room_id,
        "layout_id": null,
        "start_at": at(day, from),
        "end_at": at(day, to),
        "status": status,
        "attendee_count": 80,
        "event_type": "Boda",
        "observations": null,
        "services": []
    })
}

#[tokio::test]
async fn overlapping_reservation_is_rejected_with_specific_message() {
    let test_app = spawn_app().await;
    let token = login_default_admin(&test_app).await;
    let room = create_room(&test_app.app, &token, "Salón Diamante", 200, 1000.0).await;

    let (status, _) = request(
        &test_app.app,
        "POST",
        "/api/reservations",
        Some(&token),
        Some(reservation_body(room, 10, 10, 12, "Pendiente")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Same room, overlapping window: the database constraint rejects it
    // and the engine rewrites the signal into the specific message.
    let (status, body) = request(
        &test_app.app,
        "POST",
        "/api/reservations",
        Some(&token),
        Some(reservation_body(room, 10, 11, 13, "Confirmado")),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    let message = body["message"].as_str().unwrap_or_default();
    assert!(
        message.contains("Ya existe una reserva"),
        "expected the conflict-specific message, got: {message}"
    );

    // Exactly one reservation survived the race
    let rows = reservation::find_all(&test_app.state.pool, None, Some(room))
        .await
        .expect("list reservations");
    assert_eq!(rows.len(), 1);

    // Intervals are half-open: starting exactly at the previous end is fine
    let (status, _) = request(
        &test_app.app,
        "POST",
        "/api/reservations",
        Some(&token),
        Some(reservation_body(room, 10, 12, 14, "Confirmado")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn cancelled_reservations_do_not_block_the_slot() {
    let test_app = spawn_app().await;
    let token = login_default_admin(&test_app).await;
    let room = create_room(&test_app.app, &token, "Salón Esmeralda", 120, 800.0).await;

    let (status, cancelled) = request(
        &test_app.app,
        "POST",
        "/api/reservations",
        Some(&token),
        Some(reservation_body(room, 12, 10, 12, "Cancelado")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // An active booking may take the window a cancelled one holds
    let (status, _) = request(
        &test_app.app,
        "POST",
        "/api/reservations",
        Some(&token),
        Some(reservation_body(room, 12, 10, 12, "Pendiente")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Re-activating the cancelled booking now collides and must fail
    let cancelled_id = cancelled["id"].as_i64().expect("reservation id");
    let mut body = reservation_body(room, 12, 10, 12, "Confirmado");
    body["attendee_count"] = json!(50);
    let (status, response) = request(
        &test_app.app,
        "PUT",
        &format!("/api/reservations/{cancelled_id}"),
        Some(&token),
        Some(body),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(
        response["message"]
            .as_str()
            .unwrap_or_default()
            .contains("Ya existe una reserva")
    );
}

#[tokio::test]
async fn end_must_be_after_start() {
    let test_app = spawn_app().await;
    let token = login_default_admin(&test_app).await;
    let room = create_room(&test_app.app, &token, "Salón Rubí", 60, 500.0).await;

    let (status, body) = request(
        &test_app.app,
        "POST",
        "/api/reservations",
        Some(&token),
        Some(reservation_body(room, 14, 15, 15, "Pendiente")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["message"]
            .as_str()
            .unwrap_or_default()
            .contains("fecha de fin")
    );

    // Nothing was written
    let rows = reservation::find_all(&test_app.state.pool, None, Some(room))
        .await
        .expect("list reservations");
    assert!(rows.is_empty());
}

#[tokio::test]
async fn amount_snapshots_the_room_price_at_save_time() {
    let test_app = spawn_app().await;
    let token = login_default_admin(&test_app).await;
    let room = create_room(&test_app.app, &token, "Salón Zafiro", 150, 1000.0).await;

    let (status, created) = request(
        &test_app.app,
        "POST",
        "/api/reservations",
        Some(&token),
        Some(reservation_body(room, 16, 10, 12, "Pendiente")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["amount"].as_f64(), Some(1000.0));
    let id = created["id"].as_i64().expect("reservation id");

    // Raising the room price later does not touch the stored amount
    let (status, _) = request(
        &test_app.app,
        "PUT",
        &format!("/api/rooms/{room}"),
        Some(&token),
        Some(json!({ "base_price": 2000.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let stored = reservation::find_by_id(&test_app.state.pool, id)
        .await
        .expect("query reservation")
        .expect("reservation exists");
    assert_eq!(stored.amount, 1000.0);

    // Saving the edit form re-snapshots at the current price
    let (status, updated) = request(
        &test_app.app,
        "PUT",
        &format!("/api/reservations/{id}"),
        Some(&token),
        Some(reservation_body(room, 16, 10, 12, "Pendiente")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["amount"].as_f64(), Some(2000.0));
}

#[tokio::test]
async fn service_lines_follow_the_reservation_lifecycle() {
    let test_app = spawn_app().await;
    let token = login_default_admin(&test_app).await;
    let room = create_room(&test_app.app, &token, "Salón Perla", 90, 1000.0).await;
    let catering = create_service(&test_app.app, &token, "Catering premium", 50.0).await;
    let sound = create_service(&test_app.app, &token, "Sonido", 75.0).await;

    let mut body = reservation_body(room, 18, 10, 14, "Confirmado");
    body["services"] = json!([
        { "service_id": catering, "quantity": 2 },
        { "service_id": sound, "quantity": 0 }
    ]);

    let (status, created) = request(
        &test_app.app,
        "POST",
        "/api/reservations",
        Some(&token),
        Some(body.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = created["id"].as_i64().expect("reservation id");

    // quantity <= 0 dropped the sound line
    let lines = reservation::find_service_lines(&test_app.state.pool, id)
        .await
        .expect("query lines");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].service_id, catering);
    assert_eq!(lines[0].quantity, 2);

    // Room 1000 + catering 50 × 2 = 1100
    let totals = quotes::compute_totals(1000.0, &lines);
    assert_eq!(totals.grand_total, 1100.0);

    // Re-saving the edit form unchanged is a no-op on the line set
    let (status, _) = request(
        &test_app.app,
        "PUT",
        &format!("/api/reservations/{id}"),
        Some(&token),
        Some(body),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let lines_after = reservation::find_service_lines(&test_app.state.pool, id)
        .await
        .expect("query lines");
    assert_eq!(lines_after.len(), 1);
    assert_eq!(lines_after[0].service_id, catering);
    assert_eq!(lines_after[0].quantity, 2);

    // Deleting the reservation removes its lines
    let (status, _) = request(
        &test_app.app,
        "DELETE",
        &format!("/api/reservations/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let orphans = reservation::find_service_lines(&test_app.state.pool, id)
        .await
        .expect("query lines");
    assert!(orphans.is_empty());
}

#[tokio::test]
async fn clients_are_resolved_by_email_or_name_and_patched() {
    let test_app = spawn_app().await;
    let token = login_default_admin(&test_app).await;
    let room = create_room(&test_app.app, &token, "Salón Coral", 100, 900.0).await;

    let (status, _) = request(
        &test_app.app,
        "POST",
        "/api/reservations",
        Some(&token),
        Some(reservation_body(room, 20, 10, 12, "Pendiente")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Same client by name, now supplying a phone: matched and patched,
    // not duplicated.
    let mut second = reservation_body(room, 21, 10, 12, "Pendiente");
    second["client_email"] = json!(null);
    second["client_phone"] = json!("+54 11 1234-5678");
    let (status, _) = request(
        &test_app.app,
        "POST",
        "/api/reservations",
        Some(&token),
        Some(second),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let clients = client::find_all(&test_app.state.pool)
        .await
        .expect("list clients");
    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0].email.as_deref(), Some("ana@x.com"));
    assert_eq!(clients[0].phone.as_deref(), Some("+54 11 1234-5678"));
}

#[tokio::test]
async fn capacity_invariants_are_enforced_at_edit_time() {
    let test_app = spawn_app().await;
    let token = login_default_admin(&test_app).await;
    let room = create_room(&test_app.app, &token, "Salón Imperial", 200, 1500.0).await;

    // Layout within the room capacity
    let (status, _) = request(
        &test_app.app,
        "POST",
        &format!("/api/rooms/{room}/layouts"),
        Some(&token),
        Some(json!({ "name": "Auditorio", "capacity": 180 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // A layout above the room capacity is rejected, naming the ceiling
    let (status, body) = request(
        &test_app.app,
        "POST",
        &format!("/api/rooms/{room}/layouts"),
        Some(&token),
        Some(json!({ "name": "Imposible", "capacity": 250 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap_or_default().contains("200"));

    // Shrinking the room below its largest layout is rejected, naming it
    let (status, body) = request(
        &test_app.app,
        "PUT",
        &format!("/api/rooms/{room}"),
        Some(&token),
        Some(json!({ "capacity": 150 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap_or_default().contains("180"));

    // At the boundary it passes
    let (status, _) = request(
        &test_app.app,
        "PUT",
        &format!("/api/rooms/{room}"),
        Some(&token),
        Some(json!({ "capacity": 180 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn reservation_endpoints_require_authentication() {
    let test_app = spawn_app().await;

    let (status, _) = request(&test_app.app, "GET", "/api/reservations", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = request(
        &test_app.app,
        "GET",
        "/api/reservations",
        Some("not-a-token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
