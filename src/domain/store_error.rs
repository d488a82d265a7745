//! Failures reported by a mapping store.

use thiserror::Error;

/// Tagged outcome of a failed store operation.
///
/// Callers match on the variant instead of comparing against a driver's
/// sentinel error, so "not found" is never confused with "database down".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No live mapping matched the lookup key.
    #[error("mapping not found")]
    NotFound,

    /// The storage-level uniqueness constraint on `code` rejected an insert.
    #[error("short code '{code}' already exists")]
    DuplicateCode { code: String },

    /// Connectivity, timeout or any other backend failure.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    pub fn is_duplicate_code(&self) -> bool {
        matches!(self, Self::DuplicateCode { .. })
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => Self::NotFound,
            other => Self::Unavailable(other.to_string()),
        }
    }
}
