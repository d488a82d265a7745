//! Redirect cache trait and error types.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache connection error: {0}")]
    Connection(String),
    #[error("cache operation error: {0}")]
    Operation(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Read-through cache of `code -> long_url`.
///
/// Mappings never change once created, so entries never need invalidating;
/// the TTL only bounds memory use. Implementations must fail open: a broken
/// cache degrades redirects to store lookups and never fails them.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Returns the cached long URL for `code`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` on cache hit
    /// - `Ok(None)` on cache miss
    ///
    /// # Errors
    ///
    /// [`CacheError::Operation`] when the backend could not be queried; callers
    /// fall back to the store.
    async fn get_long_url(&self, code: &str) -> CacheResult<Option<String>>;

    /// Stores `code -> long_url` with the implementation's default TTL.
    ///
    /// # Errors
    ///
    /// [`CacheError::Operation`] when the write failed; callers only log it.
    async fn put_long_url(&self, code: &str, long_url: &str) -> CacheResult<()>;

    /// Checks if the cache backend is reachable.
    async fn health_check(&self) -> bool;

    /// Short name reported by the health endpoint.
    fn backend_name(&self) -> &'static str;
}
