//! Account and Profile models
//!
//! `Account` is the identity store (login email + password hash);
//! `Profile` is the application role row attached to it. The admin
//! user-management endpoints treat them as two distinct stores: an
//! account without a profile is an orphaned login and gets cleaned up.

use serde::{Deserialize, Serialize};

/// Application role. Gates every mutating screen action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "UPPERCASE"))]
pub enum Role {
    Admin,
    Operador,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Operador => "OPERADOR",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "OPERADOR" => Ok(Role::Operador),
            _ => Err(()),
        }
    }
}

/// Identity-provider account (login credentials only)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Account {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub hash_pass: String,
    pub created_at: i64,
}

/// Application profile row, one per account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Profile {
    pub user_id: i64,
    pub name: String,
    pub role: Role,
    pub created_at: i64,
}
