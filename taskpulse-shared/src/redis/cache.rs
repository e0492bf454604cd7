/// Read-through cache adapter
///
/// Values are stored as JSON strings under `{namespace}:{key}` with one
/// namespace per entity family (`users`, `tasks`, `notifications`). Any write
/// in a family invalidates the whole namespace (SCAN + DEL), trading
/// precision for simplicity.
///
/// Cache failures never fail the caller: a failed read is a miss and a
/// failed write is logged and dropped, so the services fall back to the
/// database whenever Redis is unavailable.
///
/// # Example
///
/// ```no_run
/// use taskpulse_shared::redis::cache::{Cache, USERS_NAMESPACE};
/// use taskpulse_shared::redis::client::{RedisClient, RedisConfig};
///
/// # async fn example() -> anyhow::Result<()> {
/// let client = RedisClient::new(RedisConfig::from_env()?).await?;
/// let cache = Cache::new(client);
///
/// cache.set(USERS_NAMESPACE, "all", &vec!["alice"]).await;
/// let cached: Option<Vec<String>> = cache.get(USERS_NAMESPACE, "all").await;
/// cache.invalidate_all(USERS_NAMESPACE).await;
/// # Ok(())
/// # }
/// ```

use crate::redis::client::RedisClient;
use redis::AsyncCommands;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Cache namespace for user records
pub const USERS_NAMESPACE: &str = "users";

/// Cache namespace for task records
pub const TASKS_NAMESPACE: &str = "tasks";

/// Cache namespace for notification records
pub const NOTIFICATIONS_NAMESPACE: &str = "notifications";

/// Key-value JSON cache over Redis
#[derive(Clone)]
pub struct Cache {
    client: RedisClient,
}

impl Cache {
    /// Creates a new cache adapter over the given client
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    /// Composes the Redis key for a namespaced entry
    fn cache_key(namespace: &str, key: &str) -> String {
        format!("{}:{}", namespace, key)
    }

    /// Looks up a cached value
    ///
    /// Returns None on miss, on a Redis failure, or if the stored JSON no
    /// longer decodes into `T`.
    pub async fn get<T: DeserializeOwned>(&self, namespace: &str, key: &str) -> Option<T> {
        let full_key = Self::cache_key(namespace, key);
        let mut conn = self.client.get_connection();

        let raw = match conn.get::<_, Option<String>>(&full_key).await {
            Ok(value) => value?,
            Err(e) => {
                tracing::warn!(key = %full_key, error = %e, "Cache read failed, treating as miss");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => {
                tracing::debug!(key = %full_key, "Cache hit");
                Some(value)
            }
            Err(e) => {
                tracing::warn!(key = %full_key, error = %e, "Discarding undecodable cache entry");
                None
            }
        }
    }

    /// Stores a value in the cache
    pub async fn set<T: Serialize>(&self, namespace: &str, key: &str, value: &T) {
        let full_key = Self::cache_key(namespace, key);

        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(key = %full_key, error = %e, "Failed to serialize cache value");
                return;
            }
        };

        let mut conn = self.client.get_connection();
        if let Err(e) = conn.set::<_, _, ()>(&full_key, raw).await {
            tracing::warn!(key = %full_key, error = %e, "Cache write failed");
        }
    }

    /// Drops every entry in a namespace
    ///
    /// Called after any write in the entity family; there is no selective
    /// eviction.
    pub async fn invalidate_all(&self, namespace: &str) {
        let pattern = format!("{}:*", namespace);
        let mut scan_conn = self.client.get_connection();

        let mut keys: Vec<String> = Vec::new();
        match scan_conn.scan_match::<_, String>(&pattern).await {
            Ok(mut iter) => {
                while let Some(key) = iter.next_item().await {
                    keys.push(key);
                }
            }
            Err(e) => {
                tracing::warn!(namespace, error = %e, "Cache invalidation scan failed");
                return;
            }
        }

        if keys.is_empty() {
            return;
        }

        let count = keys.len();
        let mut conn = self.client.get_connection();
        match conn.del::<_, ()>(keys).await {
            Ok(()) => tracing::debug!(namespace, count, "Invalidated cache namespace"),
            Err(e) => tracing::warn!(namespace, error = %e, "Cache invalidation failed"),
        }
    }
}
