//! Client registry model
//!
//! Clients are never created from a dedicated screen; they are resolved
//! (by exact email or exact name) or inserted while saving a reservation.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub created_at: i64,
}
