//! Reservation API Handlers
//!
//! The create-or-update engine: resolve the client, snapshot the room
//! price into `amount`, write the reservation (the database overlap
//! constraint is the only arbiter against double booking), then replace
//! the service line set. A line-save failure after a successful
//! reservation write is a warning, not an error.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use shared::models::{
    Client, Reservation, ReservationInput, ReservationStatus, ReservationWithNames, Room,
    ServiceLine,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::reservation::ReservationWrite;
use crate::db::repository::{client, layout, reservation, room};
use crate::quotes::{self, QuotePayload};
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// User-facing message for the overlap constraint violation. Everything
/// else the database reports stays a generic failure.
const CONFLICT_MESSAGE: &str = "Ya existe una reserva en ese rango de fechas para el salón seleccionado. Por favor elija otro horario.";

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<ReservationStatus>,
    pub room_id: Option<i64>,
}

/// Reservation plus its service lines (detail view)
#[derive(Debug, Serialize)]
pub struct ReservationDetail {
    #[serde(flatten)]
    pub reservation: ReservationWithNames,
    pub services: Vec<ServiceLine>,
}

/// GET /api/reservations - 预订列表 (可按状态和 salón 过滤)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<ReservationWithNames>>> {
    let rows = reservation::find_all(&state.pool, query.status, query.room_id).await?;
    Ok(Json(rows))
}

/// GET /api/reservations/:id - 预订详情 (含服务行)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ReservationDetail>> {
    let row = reservation::find_with_names_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Reservation {} not found", id)))?;

    let services = reservation::find_service_lines(&state.pool, id).await?;

    Ok(Json(ReservationDetail {
        reservation: row,
        services,
    }))
}

/// POST /api/reservations - 创建预订
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<ReservationInput>,
) -> AppResult<Json<Reservation>> {
    let (room, input) = validate_input(&state, &payload).await?;

    // Client resolution: exact email match OR exact name match; patch
    // newly supplied contact data onto a match, insert otherwise.
    let existing = client::find_by_email_or_name(
        &state.pool,
        input.email.as_deref(),
        &input.name,
    )
    .await?;

    let client_id = match plan_client_resolution(
        existing.as_ref(),
        input.email.as_deref(),
        input.phone.as_deref(),
    ) {
        ClientPlan::Matched { id, patch } => {
            if patch.has_changes() {
                client::patch_contact(&state.pool, id, patch.email.as_deref(), patch.phone.as_deref())
                    .await?;
            }
            id
        }
        ClientPlan::Insert => {
            client::create(
                &state.pool,
                &input.name,
                input.email.as_deref(),
                input.phone.as_deref(),
            )
            .await?
            .id
        }
    };

    let write = build_write(&payload, &room, client_id);
    let created = match reservation::create(&state.pool, write, Some(current_user.id)).await {
        Ok(r) => r,
        Err(e) if e.is_overlap() => return Err(AppError::conflict(CONFLICT_MESSAGE)),
        Err(e) => return Err(e.into()),
    };

    save_service_lines(&state, created.id, &payload).await;

    tracing::info!(
        reservation_id = created.id,
        room_id = created.room_id,
        client_id,
        "Reservation created"
    );
    Ok(Json(created))
}

/// PUT /api/reservations/:id - 更新预订
///
/// The linked client is patched in place; there is no re-resolution on
/// update.
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ReservationInput>,
) -> AppResult<Json<Reservation>> {
    let existing = reservation::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Reservation {} not found", id)))?;

    let (room, input) = validate_input(&state, &payload).await?;

    client::update_contact_full(
        &state.pool,
        existing.client_id,
        &input.name,
        input.email.as_deref(),
        input.phone.as_deref(),
    )
    .await?;

    let write = build_write(&payload, &room, existing.client_id);
    let updated = match reservation::update(&state.pool, id, write).await {
        Ok(r) => r,
        Err(e) if e.is_overlap() => return Err(AppError::conflict(CONFLICT_MESSAGE)),
        Err(e) => return Err(e.into()),
    };

    save_service_lines(&state, id, &payload).await;

    tracing::info!(reservation_id = id, "Reservation updated");
    Ok(Json(updated))
}

/// DELETE /api/reservations/:id - 删除预订 (级联删除服务行)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = reservation::delete(&state.pool, id).await?;

    if result {
        tracing::info!(reservation_id = id, "Reservation deleted");
    }
    Ok(Json(result))
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub path: String,
    pub totals: quotes::QuoteTotals,
}

/// POST /api/reservations/:id/quote - 生成预算 PDF 并存储
pub async fn generate_quote(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<QuoteResponse>> {
    let res = reservation::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Reservation {} not found", id)))?;

    let room = room::find_by_id(&state.pool, res.room_id)
        .await?
        .ok_or_else(|| AppError::internal(format!("Room {} missing for reservation", res.room_id)))?;
    let client = client::find_by_id(&state.pool, res.client_id)
        .await?
        .ok_or_else(|| {
            AppError::internal(format!("Client {} missing for reservation", res.client_id))
        })?;
    let layout = match res.layout_id {
        Some(layout_id) => layout::find_by_id(&state.pool, layout_id).await?,
        None => None,
    };
    let lines = reservation::find_service_lines(&state.pool, id).await?;

    // amount is the snapshot taken at save time; services are priced on top
    let totals = quotes::compute_totals(res.amount, &lines);

    let pdf = quotes::render_quote(
        &state.config.quote_font_dir,
        &QuotePayload {
            reservation: &res,
            room: &room,
            layout: layout.as_ref(),
            client: &client,
            lines: &lines,
            totals: &totals,
        },
    )?;

    let path = state.quotes.store_quote(id, &pdf)?;

    // The document exists in storage either way; a failed pointer update
    // must not fail the request.
    if let Err(e) = reservation::set_quote_path(&state.pool, id, &path).await {
        tracing::warn!(
            reservation_id = id,
            error = %e,
            "Quote stored but reservation pointer update failed"
        );
    }

    Ok(Json(QuoteResponse { path, totals }))
}

// ── Engine helpers ──────────────────────────────────────────────────

/// Normalized client fields from the form input
struct NormalizedClient {
    name: String,
    email: Option<String>,
    phone: Option<String>,
}

/// Validate the payload and load the target room.
async fn validate_input(
    state: &ServerState,
    payload: &ReservationInput,
) -> Result<(Room, NormalizedClient), AppError> {
    validate_required_text(&payload.client_name, "client_name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.client_email, "client_email", MAX_EMAIL_LEN)?;
    validate_optional_text(&payload.client_phone, "client_phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.event_type, "event_type", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.observations, "observations", MAX_NOTE_LEN)?;

    if payload.end_at <= payload.start_at {
        return Err(AppError::validation(
            "La fecha de fin debe ser posterior a la fecha de inicio".to_string(),
        ));
    }

    if let Some(count) = payload.attendee_count {
        if count < 0 {
            return Err(AppError::validation(
                "attendee_count must not be negative".to_string(),
            ));
        }
    }

    let room = room::find_by_id(&state.pool, payload.room_id)
        .await?
        .ok_or_else(|| AppError::validation(format!("Room {} not found", payload.room_id)))?;

    if let Some(layout_id) = payload.layout_id {
        let layout = layout::find_by_id(&state.pool, layout_id)
            .await?
            .ok_or_else(|| AppError::validation(format!("Layout {layout_id} not found")))?;
        if layout.room_id != room.id {
            return Err(AppError::validation(format!(
                "Layout {layout_id} does not belong to room {}",
                room.id
            )));
        }
    }

    Ok((
        room,
        NormalizedClient {
            name: payload.client_name.trim().to_string(),
            email: normalize_optional(&payload.client_email),
            phone: normalize_optional(&payload.client_phone),
        },
    ))
}

fn normalize_optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Assemble the column set for create/update. `amount` snapshots the
/// room's base price at this moment.
fn build_write(payload: &ReservationInput, room: &Room, client_id: i64) -> ReservationWrite {
    ReservationWrite {
        client_id,
        room_id: room.id,
        layout_id: payload.layout_id,
        start_at: payload.start_at.timestamp_millis(),
        end_at: payload.end_at.timestamp_millis(),
        status: payload.status,
        amount: room.base_price,
        attendee_count: payload.attendee_count.unwrap_or(0),
        event_type: normalize_optional(&payload.event_type),
        observations: normalize_optional(&payload.observations),
    }
}

/// Persist the selected service lines. Quantities at or below zero drop
/// the line; a failure here is logged and never rolls back the
/// reservation itself.
async fn save_service_lines(state: &ServerState, reservation_id: i64, payload: &ReservationInput) {
    let lines: Vec<(i64, i64)> = payload
        .services
        .iter()
        .filter(|s| s.quantity >= 1)
        .map(|s| (s.service_id, s.quantity))
        .collect();

    if let Err(e) = reservation::replace_service_lines(&state.pool, reservation_id, &lines).await {
        tracing::warn!(
            reservation_id,
            error = %e,
            "Reservation saved but service lines could not be persisted"
        );
    }
}

// ── Client resolution (pure, unit-tested without I/O) ───────────────

/// Contact fields to patch onto a matched client: only values that were
/// supplied and differ from what is stored.
#[derive(Debug, PartialEq)]
pub(crate) struct ContactPatch {
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl ContactPatch {
    pub fn has_changes(&self) -> bool {
        self.email.is_some() || self.phone.is_some()
    }
}

#[derive(Debug, PartialEq)]
pub(crate) enum ClientPlan {
    /// Reuse the matched client, patching any newly supplied contact data
    Matched { id: i64, patch: ContactPatch },
    /// No match: insert a new client record
    Insert,
}

pub(crate) fn plan_client_resolution(
    existing: Option<&Client>,
    email: Option<&str>,
    phone: Option<&str>,
) -> ClientPlan {
    match existing {
        None => ClientPlan::Insert,
        Some(client) => {
            let email_patch = email
                .filter(|e| client.email.as_deref() != Some(*e))
                .map(str::to_string);
            let phone_patch = phone
                .filter(|p| client.phone.as_deref() != Some(*p))
                .map(str::to_string);
            ClientPlan::Matched {
                id: client.id,
                patch: ContactPatch {
                    email: email_patch,
                    phone: phone_patch,
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(id: i64, email: Option<&str>, phone: Option<&str>) -> Client {
        Client {
            id,
            name: "Ana Gómez".to_string(),
            company: None,
            phone: phone.map(str::to_string),
            email: email.map(str::to_string),
            created_at: 0,
        }
    }

    #[test]
    fn no_match_inserts() {
        assert_eq!(
            plan_client_resolution(None, Some("ana@x.com"), None),
            ClientPlan::Insert
        );
    }

    #[test]
    fn match_with_identical_contact_patches_nothing() {
        let c = client(5, Some("ana@x.com"), Some("123"));
        let plan = plan_client_resolution(Some(&c), Some("ana@x.com"), Some("123"));
        match plan {
            ClientPlan::Matched { id, patch } => {
                assert_eq!(id, 5);
                assert!(!patch.has_changes());
            }
            ClientPlan::Insert => panic!("expected a match"),
        }
    }

    #[test]
    fn match_patches_newly_supplied_fields() {
        // Matched by name, previously without email
        let c = client(9, None, None);
        let plan = plan_client_resolution(Some(&c), Some("ana@x.com"), Some("555"));
        assert_eq!(
            plan,
            ClientPlan::Matched {
                id: 9,
                patch: ContactPatch {
                    email: Some("ana@x.com".to_string()),
                    phone: Some("555".to_string()),
                },
            }
        );
    }

    #[test]
    fn match_without_supplied_contact_leaves_record_alone() {
        let c = client(3, Some("ana@x.com"), Some("123"));
        let plan = plan_client_resolution(Some(&c), None, None);
        match plan {
            ClientPlan::Matched { patch, .. } => assert!(!patch.has_changes()),
            ClientPlan::Insert => panic!("expected a match"),
        }
    }

    #[test]
    fn changed_email_is_patched() {
        let c = client(3, Some("old@x.com"), None);
        let plan = plan_client_resolution(Some(&c), Some("new@x.com"), None);
        assert_eq!(
            plan,
            ClientPlan::Matched {
                id: 3,
                patch: ContactPatch {
                    email: Some("new@x.com".to_string()),
                    phone: None,
                },
            }
        );
    }
}
