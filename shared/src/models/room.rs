//! Room (salón) model

use serde::{Deserialize, Serialize};

/// An event hall with a base price and maximum capacity.
///
/// `capacity` must stay at or above the largest layout defined for the
/// room; the room handlers enforce that at edit time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Room {
    pub id: i64,
    pub name: String,
    pub capacity: i64,
    pub base_price: f64,
    pub description: Option<String>,
    pub created_at: i64,
}

/// Create room payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomCreate {
    pub name: String,
    pub capacity: i64,
    pub base_price: f64,
    pub description: Option<String>,
}

/// Update room payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomUpdate {
    pub name: Option<String>,
    pub capacity: Option<i64>,
    pub base_price: Option<f64>,
    pub description: Option<String>,
}
