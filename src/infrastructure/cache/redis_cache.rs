//! Redis-backed redirect cache.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info};

const KEY_PREFIX: &str = "snaplink:code:";

/// Redis cache of resolved codes.
///
/// Uses a `ConnectionManager`, which reconnects transparently and is cheap to
/// clone per command.
pub struct RedisCache {
    connection: ConnectionManager,
    ttl_seconds: u64,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Connection`] if the URL is invalid, the connection
    /// cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str, ttl_seconds: u64) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url)
            .map_err(|e| CacheError::Connection(format!("invalid Redis URL: {}", e)))?;

        let connection = ConnectionManager::new(client)
            .await
            .map_err(|e| CacheError::Connection(format!("failed to connect: {}", e)))?;

        let mut probe = connection.clone();
        probe
            .ping::<()>()
            .await
            .map_err(|e| CacheError::Connection(format!("PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self {
            connection,
            ttl_seconds,
        })
    }

    fn key(code: &str) -> String {
        format!("{}{}", KEY_PREFIX, code)
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_long_url(&self, code: &str) -> CacheResult<Option<String>> {
        let mut conn = self.connection.clone();

        let cached = conn
            .get::<_, Option<String>>(Self::key(code))
            .await
            .map_err(|e| CacheError::Operation(format!("GET {}: {}", code, e)))?;

        debug!(code, hit = cached.is_some(), "Cache lookup");
        Ok(cached)
    }

    async fn put_long_url(&self, code: &str, long_url: &str) -> CacheResult<()> {
        let mut conn = self.connection.clone();

        conn.set_ex::<_, _, ()>(Self::key(code), long_url, self.ttl_seconds)
            .await
            .map_err(|e| CacheError::Operation(format!("SET {}: {}", code, e)))
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.connection.clone();
        conn.ping::<()>().await.is_ok()
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
