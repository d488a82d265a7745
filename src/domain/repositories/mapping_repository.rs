//! Repository trait for mapping persistence.

use crate::domain::entities::{Mapping, NewMapping};
use crate::domain::store_error::StoreError;
use async_trait::async_trait;

/// Durable, unique-keyed storage for [`Mapping`]s.
///
/// The store is the single source of truth for code uniqueness: any
/// application-side existence check made before [`create`](Self::create) is
/// advisory and may be stale by the time the insert runs.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMappingRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::MemoryMappingRepository`] - in-process map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingRepository: Send + Sync {
    /// Finds a live mapping by exact code. No normalization is applied.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] if no live mapping has this code
    /// - [`StoreError::Unavailable`] on backend failures
    async fn find_by_code(&self, code: &str) -> Result<Mapping, StoreError>;

    /// Finds a live mapping by exact long URL.
    ///
    /// Several mappings may share a long URL when they were created with
    /// distinct custom aliases. In that case the earliest created one (lowest
    /// `id`) is returned, independently of the backend's natural ordering.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] if no live mapping has this URL
    /// - [`StoreError::Unavailable`] on backend failures
    async fn find_by_long_url(&self, long_url: &str) -> Result<Mapping, StoreError>;

    /// Inserts a new mapping with a zeroed click counter.
    ///
    /// Uniqueness of `code` is enforced by the storage layer itself, so of two
    /// concurrent inserts with the same code exactly one succeeds.
    ///
    /// # Errors
    ///
    /// - [`StoreError::DuplicateCode`] if the code is already taken
    /// - [`StoreError::Unavailable`] on backend failures
    async fn create(&self, new_mapping: NewMapping) -> Result<Mapping, StoreError>;

    /// Atomically adds one to the click counter of a live mapping.
    ///
    /// The increment happens relative to the stored value; concurrent calls
    /// never lose an update.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] if no live mapping has this code
    /// - [`StoreError::Unavailable`] on backend failures
    async fn increment_clicks(&self, code: &str) -> Result<(), StoreError>;

    /// Checks that the backend is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] when it is not.
    async fn ping(&self) -> Result<(), StoreError>;
}
