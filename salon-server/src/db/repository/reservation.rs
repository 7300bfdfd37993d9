//! Reservation Repository
//!
//! Writes to the `reservation` table pass through the schema's overlap
//! triggers; an aborted write surfaces here as [`RepoError::Conflict`]
//! with the `reservation_overlap` marker, which the reservation engine
//! rewrites into its user-facing message. Nothing in this module checks
//! for overlaps itself.

use shared::models::{
    Reservation, ReservationStatus, ReservationWithNames, ServiceLine,
};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

const WITH_NAMES_SELECT: &str = "SELECT r.id, r.client_id, c.name AS client_name, r.room_id, s.name AS room_name, r.layout_id, r.start_at, r.end_at, r.status, r.amount, r.attendee_count, r.event_type, r.observations, r.created_at, r.quote_path FROM reservation r JOIN client c ON r.client_id = c.id JOIN room s ON r.room_id = s.id";

/// Column set written on create and update, minus identity/audit fields.
#[derive(Debug, Clone)]
pub struct ReservationWrite {
    pub client_id: i64,
    pub room_id: i64,
    pub layout_id: Option<i64>,
    pub start_at: i64,
    pub end_at: i64,
    pub status: ReservationStatus,
    pub amount: f64,
    pub attendee_count: i64,
    pub event_type: Option<String>,
    pub observations: Option<String>,
}

pub async fn find_all(
    pool: &SqlitePool,
    status: Option<ReservationStatus>,
    room_id: Option<i64>,
) -> RepoResult<Vec<ReservationWithNames>> {
    let sql = format!(
        "{WITH_NAMES_SELECT} WHERE (?1 IS NULL OR r.status = ?1) AND (?2 IS NULL OR r.room_id = ?2) ORDER BY r.start_at DESC"
    );
    let rows = sqlx::query_as::<_, ReservationWithNames>(&sql)
        .bind(status)
        .bind(room_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Reservation>> {
    let row = sqlx::query_as::<_, Reservation>(
        "SELECT id, client_id, room_id, layout_id, start_at, end_at, status, amount, attendee_count, event_type, observations, created_by, created_at, quote_path FROM reservation WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn find_with_names_by_id(
    pool: &SqlitePool,
    id: i64,
) -> RepoResult<Option<ReservationWithNames>> {
    let sql = format!("{WITH_NAMES_SELECT} WHERE r.id = ?");
    let row = sqlx::query_as::<_, ReservationWithNames>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Reservations whose interval intersects `[window_start, window_end)`,
/// optionally narrowed by room and status. Multi-day reservations appear
/// for every window they touch.
pub async fn find_overlapping_window(
    pool: &SqlitePool,
    window_start: i64,
    window_end: i64,
    room_id: Option<i64>,
    status: Option<ReservationStatus>,
) -> RepoResult<Vec<ReservationWithNames>> {
    let sql = format!(
        "{WITH_NAMES_SELECT} WHERE r.start_at < ?2 AND r.end_at > ?1 AND (?3 IS NULL OR r.room_id = ?3) AND (?4 IS NULL OR r.status = ?4) ORDER BY r.start_at ASC"
    );
    let rows = sqlx::query_as::<_, ReservationWithNames>(&sql)
        .bind(window_start)
        .bind(window_end)
        .bind(room_id)
        .bind(status)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn create(
    pool: &SqlitePool,
    data: ReservationWrite,
    created_by: Option<i64>,
) -> RepoResult<Reservation> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO reservation (id, client_id, room_id, layout_id, start_at, end_at, status, amount, attendee_count, event_type, observations, created_by, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
    )
    .bind(id)
    .bind(data.client_id)
    .bind(data.room_id)
    .bind(data.layout_id)
    .bind(data.start_at)
    .bind(data.end_at)
    .bind(data.status)
    .bind(data.amount)
    .bind(data.attendee_count)
    .bind(&data.event_type)
    .bind(&data.observations)
    .bind(created_by)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create reservation".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: ReservationWrite) -> RepoResult<Reservation> {
    let rows = sqlx::query(
        "UPDATE reservation SET client_id = ?1, room_id = ?2, layout_id = ?3, start_at = ?4, end_at = ?5, status = ?6, amount = ?7, attendee_count = ?8, event_type = ?9, observations = ?10 WHERE id = ?11",
    )
    .bind(data.client_id)
    .bind(data.room_id)
    .bind(data.layout_id)
    .bind(data.start_at)
    .bind(data.end_at)
    .bind(data.status)
    .bind(data.amount)
    .bind(data.attendee_count)
    .bind(&data.event_type)
    .bind(&data.observations)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Reservation {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Reservation {id} not found")))
}

/// Deletion is unconditional; service lines go with it (FK cascade).
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM reservation WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn set_quote_path(pool: &SqlitePool, id: i64, path: &str) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE reservation SET quote_path = ?1 WHERE id = ?2")
        .bind(path)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Reservation {id} not found")));
    }
    Ok(())
}

// ── Service lines ───────────────────────────────────────────────────

pub async fn find_service_lines(
    pool: &SqlitePool,
    reservation_id: i64,
) -> RepoResult<Vec<ServiceLine>> {
    let lines = sqlx::query_as::<_, ServiceLine>(
        "SELECT rs.service_id, s.name, s.description, s.price, rs.quantity FROM reservation_service rs JOIN service s ON rs.service_id = s.id WHERE rs.reservation_id = ? ORDER BY s.name",
    )
    .bind(reservation_id)
    .fetch_all(pool)
    .await?;
    Ok(lines)
}

/// Replace the full service line set of a reservation:
/// delete everything, then bulk-insert the selection.
pub async fn replace_service_lines(
    pool: &SqlitePool,
    reservation_id: i64,
    lines: &[(i64, i64)],
) -> RepoResult<()> {
    sqlx::query("DELETE FROM reservation_service WHERE reservation_id = ?")
        .bind(reservation_id)
        .execute(pool)
        .await?;

    for (service_id, quantity) in lines {
        sqlx::query(
            "INSERT INTO reservation_service (id, reservation_id, service_id, quantity) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(shared::util::snowflake_id())
        .bind(reservation_id)
        .bind(service_id)
        .bind(quantity)
        .execute(pool)
        .await?;
    }
    Ok(())
}

// ── Dashboard aggregates (each KPI has its own query) ───────────────

/// Non-cancelled reservations starting inside `[start, end)`.
pub async fn count_starting_between(
    pool: &SqlitePool,
    start: i64,
    end: i64,
) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM reservation WHERE start_at >= ?1 AND start_at < ?2 AND status <> 'Cancelado'",
    )
    .bind(start)
    .bind(end)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

/// Non-cancelled reservations overlapping `[start, end)`.
pub async fn count_overlapping(pool: &SqlitePool, start: i64, end: i64) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM reservation WHERE start_at < ?2 AND end_at > ?1 AND status <> 'Cancelado'",
    )
    .bind(start)
    .bind(end)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

/// Room with the most non-cancelled reservations starting since `since`.
/// Tie broken by ascending room id so the result is deterministic.
#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct TopRoom {
    pub room_id: i64,
    pub room_name: String,
    pub reservations: i64,
}

pub async fn top_room_since(pool: &SqlitePool, since: i64) -> RepoResult<Option<TopRoom>> {
    let row = sqlx::query_as::<_, TopRoom>(
        "SELECT r.room_id, s.name AS room_name, COUNT(*) AS reservations FROM reservation r JOIN room s ON r.room_id = s.id WHERE r.start_at >= ?1 AND r.status <> 'Cancelado' GROUP BY r.room_id, s.name ORDER BY reservations DESC, r.room_id ASC LIMIT 1",
    )
    .bind(since)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}
