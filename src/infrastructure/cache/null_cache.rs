//! No-op cache used when Redis is not configured.

use super::service::{CacheResult, CacheService};
use async_trait::async_trait;
use tracing::debug;

/// A cache that never stores anything; every lookup is a miss.
pub struct NullCache;

impl NullCache {
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheService for NullCache {
    async fn get_long_url(&self, _code: &str) -> CacheResult<Option<String>> {
        Ok(None)
    }

    async fn put_long_url(&self, _code: &str, _long_url: &str) -> CacheResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str {
        "disabled"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_null_cache_always_misses() {
        let cache = NullCache::new();

        cache.put_long_url("promo1", "https://a.com").await.unwrap();

        assert_eq!(cache.get_long_url("promo1").await.unwrap(), None);
        assert!(cache.health_check().await);
    }
}
