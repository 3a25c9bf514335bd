//! Transport interface the cache manager talks to.
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Result type for transport operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Transport-layer errors (connection/command/value).
///
/// Note:
/// - These never reach a caller of the cache manager. The cache is advisory,
/// so a failing store degrades to a miss or a no-op and is only logged.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache connection error: {0}")]
    BackendConnection(String),
    #[error("cache command error: {0}")]
    BackendCommand(String),
    #[error("cache value error: {0}")]
    InvalidValue(String),
}

/// A small, string-valued key-value store with expiry.
///
/// - Point `GET`/`SET EX`/`DEL` plus a batched `MGET`.
/// - Values are UTF-8 text: plain JSON, or base64 of the compressed JSON.
///
/// Implementations must be cheap to clone (typically `Arc<...>` inside)
#[async_trait]
pub trait CacheClient: Clone + Send + Sync + 'static {
    // Returns the cache backend name (for logging).
    fn backend_name(&self) -> &'static str;

    // Get UTF-8 string value.
    async fn get_string(&self, key: &str) -> CacheResult<Option<String>>;

    // Get many values at once. The result lines up with `keys`.
    async fn get_strings(&self, keys: &[String]) -> CacheResult<Vec<Option<String>>>;

    // Set value with TTL, overwriting whatever is stored under `key`.
    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()>;

    // Delete a key. Returns number of deleted keys.
    async fn del(&self, key: &str) -> CacheResult<u64>;
}
