//! Mapping entity: a short code pointing at a long URL.

use chrono::{DateTime, Utc};

/// A persisted association between a short code and its destination.
///
/// `code` and `long_url` never change after creation. `clicks` is only ever
/// bumped by the redirect path. Timestamps and the soft-delete marker belong
/// to the store and are carried here for display purposes only.
#[derive(Debug, Clone, PartialEq)]
pub struct Mapping {
    pub id: i64,
    pub code: String,
    pub long_url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Mapping {
    /// Creates a fresh, live mapping with a zeroed click counter.
    pub fn new(id: i64, code: String, long_url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            code,
            long_url,
            clicks: 0,
            created_at,
            updated_at: created_at,
            deleted_at: None,
        }
    }

    /// Returns true if the store has soft-deleted this mapping.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Insert payload for a new mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMapping {
    pub code: String,
    pub long_url: String,
}

impl NewMapping {
    pub fn new(code: impl Into<String>, long_url: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            long_url: long_url.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_creation() {
        let now = Utc::now();
        let mapping = Mapping::new(
            1,
            "promo1".to_string(),
            "https://a.com".to_string(),
            now,
        );

        assert_eq!(mapping.id, 1);
        assert_eq!(mapping.code, "promo1");
        assert_eq!(mapping.long_url, "https://a.com");
        assert_eq!(mapping.clicks, 0);
        assert_eq!(mapping.created_at, now);
        assert_eq!(mapping.updated_at, now);
        assert!(!mapping.is_deleted());
    }

    #[test]
    fn test_mapping_is_deleted() {
        let mut mapping = Mapping::new(
            2,
            "gone".to_string(),
            "https://example.com".to_string(),
            Utc::now(),
        );
        mapping.deleted_at = Some(Utc::now());

        assert!(mapping.is_deleted());
    }

    #[test]
    fn test_new_mapping_accepts_str_and_string() {
        let new_mapping = NewMapping::new("xyz789", "https://rust-lang.org".to_string());

        assert_eq!(new_mapping.code, "xyz789");
        assert_eq!(new_mapping.long_url, "https://rust-lang.org");
    }
}
