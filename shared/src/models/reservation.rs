//! Reservation model
//!
//! A reservation books one room for a client over a half-open interval
//! `[start_at, end_at)`. Two non-cancelled reservations of the same room
//! must never overlap; that rule lives in the database schema (triggers
//! on the `reservation` table), not here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reservation status. Any status may move to any other status via
/// explicit user action; there is no enforced ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "PascalCase"))]
pub enum ReservationStatus {
    Pendiente,
    Confirmado,
    Pagado,
    Cancelado,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pendiente => "Pendiente",
            ReservationStatus::Confirmado => "Confirmado",
            ReservationStatus::Pagado => "Pagado",
            ReservationStatus::Cancelado => "Cancelado",
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReservationStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pendiente" => Ok(ReservationStatus::Pendiente),
            "Confirmado" => Ok(ReservationStatus::Confirmado),
            "Pagado" => Ok(ReservationStatus::Pagado),
            "Cancelado" => Ok(ReservationStatus::Cancelado),
            _ => Err(()),
        }
    }
}

/// Reservation row. `amount` is the room's base price snapshotted at save
/// time; it does not follow later price edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Reservation {
    pub id: i64,
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
    pub created_by: Option<i64>,
    pub created_at: i64,
    pub quote_path: Option<String>,
}

/// Reservation with client and room names (list/calendar views)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ReservationWithNames {
    pub id: i64,
    pub client_id: i64,
    pub client_name: String,
    pub room_id: i64,
    pub room_name: String,
    pub layout_id: Option<i64>,
    pub start_at: i64,
    pub end_at: i64,
    pub status: ReservationStatus,
    pub amount: f64,
    pub attendee_count: i64,
    pub event_type: Option<String>,
    pub observations: Option<String>,
    pub created_at: i64,
    pub quote_path: Option<String>,
}

/// Service line item attached to a reservation (join table row)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ReservationService {
    pub id: i64,
    pub reservation_id: i64,
    pub service_id: i64,
    pub quantity: i64,
}

/// Service line with resolved service name and unit price (detail/quote views)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ServiceLine {
    pub service_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub quantity: i64,
}

/// Selected service with quantity, as submitted by the reservation form.
/// Entries with quantity <= 0 are dropped before persisting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceLineInput {
    pub service_id: i64,
    pub quantity: i64,
}

/// Create-or-update payload for the reservation form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationInput {
    pub client_name: String,
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
    pub room_id: i64,
    pub layout_id: Option<i64>,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub status: ReservationStatus,
    #[serde(default)]
    pub attendee_count: Option<i64>,
    pub event_type: Option<String>,
    pub observations: Option<String>,
    #[serde(default)]
    pub services: Vec<ServiceLineInput>,
}
