//! Layout (distribución) model

use serde::{Deserialize, Serialize};

/// A named seating configuration belonging to one room.
/// Its capacity never exceeds the owning room's capacity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Layout {
    pub id: i64,
    pub room_id: i64,
    pub name: String,
    pub capacity: i64,
}

/// Create layout payload (room id comes from the route)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutCreate {
    pub name: String,
    pub capacity: i64,
}

/// Update layout payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutUpdate {
    pub name: Option<String>,
    pub capacity: Option<i64>,
}
