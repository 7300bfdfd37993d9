//! Quote blob storage
//!
//! Path-addressed storage for generated budget documents under the work
//! directory. One document per reservation; re-generating overwrites the
//! previous file at the same path.

use std::fs;
use std::path::PathBuf;

use crate::utils::AppError;

const QUOTES_SUBDIR: &str = "presupuestos";

#[derive(Debug, Clone)]
pub struct QuoteStorage {
    work_dir: PathBuf,
}

impl QuoteStorage {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
        }
    }

    /// Relative storage path for a reservation's quote document.
    pub fn quote_path(reservation_id: i64) -> String {
        format!("{QUOTES_SUBDIR}/reserva-{reservation_id}.pdf")
    }

    /// Write (or overwrite) the document and return its relative path,
    /// which is what gets persisted on the reservation row.
    pub fn store_quote(&self, reservation_id: i64, bytes: &[u8]) -> Result<String, AppError> {
        let dir = self.work_dir.join(QUOTES_SUBDIR);
        fs::create_dir_all(&dir)
            .map_err(|e| AppError::internal(format!("Failed to create quotes directory: {e}")))?;

        let rel_path = Self::quote_path(reservation_id);
        let full_path = self.work_dir.join(&rel_path);
        fs::write(&full_path, bytes)
            .map_err(|e| AppError::internal(format!("Failed to store quote document: {e}")))?;

        tracing::info!(
            reservation_id,
            path = %rel_path,
            size = bytes.len(),
            "Quote document stored"
        );
        Ok(rel_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_and_overwrites_at_stable_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = QuoteStorage::new(dir.path());

        let first = storage.store_quote(7, b"first").expect("store works");
        assert_eq!(first, "presupuestos/reserva-7.pdf");
        let second = storage.store_quote(7, b"second-longer").expect("overwrite works");
        assert_eq!(first, second);

        let content = std::fs::read(dir.path().join(&first)).expect("file exists");
        assert_eq!(content, b"second-longer");
    }
}
