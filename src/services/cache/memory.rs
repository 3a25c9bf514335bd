//! In-process cache client with per-entry expiry.
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::Instant;

use crate::services::cache::client::{CacheClient, CacheError, CacheResult};

/// Stand-in deadline for a TTL too large to add to the clock.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

struct Entry {
    value: String,
    expires_at: Instant,
}

/// Keeps entries in a mutex-guarded map. Deadlines follow tokio's clock, so a
/// paused test runtime can step past a TTL without sleeping.
#[derive(Clone, Default)]
pub struct MemoryClient {
    entries: Arc<Mutex<HashMap<String, Entry>>>,
}

impl std::fmt::Debug for MemoryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryClient").finish_non_exhaustive()
    }
}

impl MemoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> CacheResult<MutexGuard<'_, HashMap<String, Entry>>> {
        self.entries
            .lock()
            .map_err(|e| CacheError::BackendCommand(format!("lock poisoned: {e}")))
    }

    fn read(entries: &mut HashMap<String, Entry>, key: &str, now: Instant) -> Option<String> {
        match entries.get(key) {
            Some(entry) if entry.expires_at > now => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.lock()
            .map(|entries| entries.values().filter(|e| e.expires_at > now).count())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Time left before `key` expires.
    pub fn ttl(&self, key: &str) -> Option<Duration> {
        let now = Instant::now();
        let entries = self.lock().ok()?;
        entries
            .get(key)
            .filter(|e| e.expires_at > now)
            .map(|e| e.expires_at - now)
    }

    /// Stored text under `key`, if still live.
    pub fn raw(&self, key: &str) -> Option<String> {
        let now = Instant::now();
        let mut entries = self.lock().ok()?;
        Self::read(&mut entries, key, now)
    }
}

#[async_trait]
impl CacheClient for MemoryClient {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn get_string(&self, key: &str) -> CacheResult<Option<String>> {
        let now = Instant::now();
        let mut entries = self.lock()?;
        Ok(Self::read(&mut entries, key, now))
    }

    async fn get_strings(&self, keys: &[String]) -> CacheResult<Vec<Option<String>>> {
        let now = Instant::now();
        let mut entries = self.lock()?;
        Ok(keys
            .iter()
            .map(|key| Self::read(&mut entries, key, now))
            .collect())
    }

    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        let now = Instant::now();
        let expires_at = now.checked_add(ttl).unwrap_or(now + FAR_FUTURE);
        let entry = Entry {
            value: value.to_string(),
            expires_at,
        };
        self.lock()?.insert(key.to_string(), entry);
        Ok(())
    }

    async fn del(&self, key: &str) -> CacheResult<u64> {
        Ok(self.lock()?.remove(key).map_or(0, |_| 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn entries_expire_on_the_tokio_clock() {
        let client = MemoryClient::new();
        client
            .set_with_ttl("k", "v", Duration::from_secs(10))
            .await
            .unwrap();
        assert_eq!(client.get_string("k").await.unwrap().as_deref(), Some("v"));

        tokio::time::advance(Duration::from_secs(10)).await;
        assert_eq!(client.get_string("k").await.unwrap(), None);
        assert!(client.is_empty());
    }

    #[tokio::test]
    async fn oversized_ttl_keeps_the_entry() {
        let client = MemoryClient::new();
        client
            .set_with_ttl("k", "v", Duration::from_secs(u64::MAX))
            .await
            .unwrap();
        assert_eq!(client.get_string("k").await.unwrap().as_deref(), Some("v"));
        assert!(client.ttl("k").unwrap() > Duration::from_secs(86_400 * 365));
    }

    #[tokio::test]
    async fn get_strings_keeps_key_order() {
        let client = MemoryClient::new();
        let ttl = Duration::from_secs(60);
        client.set_with_ttl("a", "1", ttl).await.unwrap();
        client.set_with_ttl("c", "3", ttl).await.unwrap();

        let keys = ["c", "b", "a"].map(String::from);
        let values = client.get_strings(&keys).await.unwrap();
        assert_eq!(values, vec![Some("3".into()), None, Some("1".into())]);
    }

    #[tokio::test]
    async fn del_reports_removed_count() {
        let client = MemoryClient::new();
        client
            .set_with_ttl("k", "v", Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(client.del("k").await.unwrap(), 1);
        assert_eq!(client.del("k").await.unwrap(), 0);
    }
}
