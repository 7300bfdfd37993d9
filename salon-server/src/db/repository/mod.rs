//! Repository Module
//!
//! CRUD operations over the SQLite pool, one module per aggregate.
//! Functions are free functions taking `&SqlitePool`; errors are the
//! typed [`RepoError`], never raw strings in handlers.

pub mod account;
pub mod client;
pub mod layout;
pub mod profile;
pub mod reservation;
pub mod room;
pub mod service;

use thiserror::Error;

/// Marker raised by the reservation overlap triggers in the schema.
/// This is the distinguishable signal the reservation engine reacts to.
const OVERLAP_MARKER: &str = "reservation_overlap";

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl RepoError {
    /// Whether this error is the booking-overlap constraint violation.
    pub fn is_overlap(&self) -> bool {
        matches!(self, RepoError::Conflict(msg) if msg.contains(OVERLAP_MARKER))
    }
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            let message = db.message();
            if message.contains(OVERLAP_MARKER) {
                return RepoError::Conflict(OVERLAP_MARKER.to_string());
            }
            if message.contains("UNIQUE constraint failed") {
                return RepoError::Validation("duplicate value for a unique field".to_string());
            }
            if message.contains("FOREIGN KEY constraint failed") {
                return RepoError::Validation("referenced record does not exist".to_string());
            }
            if message.contains("CHECK constraint failed") {
                return RepoError::Validation(format!("constraint violated: {message}"));
            }
        }
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
