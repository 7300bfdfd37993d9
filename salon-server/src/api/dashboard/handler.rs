//! Dashboard API Handlers
//!
//! One read path: the calendar rows for a displayed month plus four
//! KPIs, each computed by its own query.

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{Months, Utc};
use serde::{Deserialize, Serialize};
use shared::models::{ReservationStatus, ReservationWithNames};

use crate::core::ServerState;
use crate::db::repository::reservation::TopRoom;
use crate::db::repository::{reservation, room};
use crate::utils::time::{day_range, month_label, month_range};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// Displayed month as `YYYY-MM`; defaults to the current month
    pub month: Option<String>,
    pub room_id: Option<i64>,
    pub status: Option<ReservationStatus>,
}

#[derive(Debug, Serialize)]
pub struct DashboardKpis {
    /// Non-cancelled reservations starting in the displayed month
    pub reservations_this_month: i64,
    /// Most reserved room over the trailing 3 months
    pub top_room: Option<TopRoom>,
    /// Total room count
    pub total_rooms: i64,
    /// Non-cancelled reservations overlapping today
    pub events_today: i64,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub month: String,
    /// Reservations intersecting the displayed month; a multi-day
    /// reservation appears for every day it touches
    pub reservations: Vec<ReservationWithNames>,
    pub kpis: DashboardKpis,
}

/// GET /api/dashboard?month=YYYY-MM&room_id=&status=
pub async fn get_dashboard(
    State(state): State<ServerState>,
    Query(query): Query<DashboardQuery>,
) -> AppResult<Json<DashboardResponse>> {
    let now = Utc::now();
    let month = query.month.unwrap_or_else(|| month_label(now));
    let (month_start, month_end) = month_range(&month).map_err(AppError::validation)?;

    // Calendar rows for the displayed month
    let reservations = reservation::find_overlapping_window(
        &state.pool,
        month_start,
        month_end,
        query.room_id,
        query.status,
    )
    .await?;

    // KPI: reservations starting in the displayed month
    let reservations_this_month =
        reservation::count_starting_between(&state.pool, month_start, month_end).await?;

    // KPI: most reserved room over the trailing quarter
    let three_months_ago = now
        .checked_sub_months(Months::new(3))
        .unwrap_or(now)
        .timestamp_millis();
    let top_room = reservation::top_room_since(&state.pool, three_months_ago).await?;

    // KPI: total rooms
    let total_rooms = room::count(&state.pool).await?;

    // KPI: events happening today
    let (today_start, today_end) = day_range(now);
    let events_today = reservation::count_overlapping(&state.pool, today_start, today_end).await?;

    Ok(Json(DashboardResponse {
        month,
        reservations,
        kpis: DashboardKpis {
            reservations_this_month,
            top_room,
            total_rooms,
            events_today,
        },
    }))
}
