//! Redis connection management.
//!
//! The client is built once at startup and injected into the repositories;
//! there is no lazily-initialized global. Readiness is observable via
//! [`RedisClient::ping`], which the API health probe reports.

use std::time::Instant;

use redis::aio::ConnectionManager;
use tracing::{debug, info};

use grindlog_core::Result;

/// Default Redis connection URL.
pub const DEFAULT_REDIS_URL: &str = "redis://localhost:6379";

/// Default key prefix for all grindlog data.
pub const DEFAULT_KEY_PREFIX: &str = "grind";

/// Connection configuration for the key-value store.
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// Redis connection URL.
    pub url: String,
    /// Prefix for every key written by this instance.
    pub prefix: String,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_REDIS_URL.to_string(),
            prefix: DEFAULT_KEY_PREFIX.to_string(),
        }
    }
}

impl RedisConfig {
    /// Read configuration from the environment.
    ///
    /// - `REDIS_URL` (default: redis://localhost:6379)
    /// - `REDIS_KEY_PREFIX` (default: "grind")
    pub fn from_env() -> Self {
        let url = std::env::var("REDIS_URL").unwrap_or_else(|_| DEFAULT_REDIS_URL.to_string());
        let prefix =
            std::env::var("REDIS_KEY_PREFIX").unwrap_or_else(|_| DEFAULT_KEY_PREFIX.to_string());
        Self { url, prefix }
    }
}

/// Handle to the key-value store shared by all repositories.
#[derive(Clone)]
pub struct RedisClient {
    manager: ConnectionManager,
    prefix: String,
}

impl RedisClient {
    /// Connect to Redis and return a ready client.
    pub async fn connect(config: RedisConfig) -> Result<Self> {
        let start = Instant::now();
        info!(
            subsystem = "store",
            component = "redis",
            op = "connect",
            prefix = %config.prefix,
            "Connecting to key-value store"
        );

        let client = redis::Client::open(config.url.as_str())?;
        let manager = ConnectionManager::new(client).await?;

        info!(
            subsystem = "store",
            component = "redis",
            op = "connected",
            duration_ms = start.elapsed().as_millis() as u64,
            "Key-value store connection established"
        );

        Ok(Self {
            manager,
            prefix: config.prefix,
        })
    }

    /// Borrow a connection for one command sequence.
    ///
    /// `ConnectionManager` reconnects internally, so a clone per operation
    /// is the intended usage.
    pub(crate) fn connection(&self) -> ConnectionManager {
        self.manager.clone()
    }

    /// Key of the per-user hash holding one logical collection.
    ///
    /// Layout: `{prefix}:{user_id}:{collection}`, field = record id,
    /// value = serialized JSON record.
    pub(crate) fn collection_key(&self, user_id: &str, collection: &str) -> String {
        format!("{}:{}:{}", self.prefix, user_id, collection)
    }

    /// Liveness check against the store.
    pub async fn ping(&self) -> bool {
        let mut conn = self.connection();
        match redis::cmd("PING").query_async::<String>(&mut conn).await {
            Ok(_) => true,
            Err(e) => {
                debug!(
                    subsystem = "store",
                    component = "redis",
                    op = "ping",
                    error = %e,
                    "Store ping failed"
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RedisConfig::default();
        assert_eq!(config.url, DEFAULT_REDIS_URL);
        assert_eq!(config.prefix, DEFAULT_KEY_PREFIX);
    }
}
