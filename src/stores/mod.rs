//! Store adapters: a fixed domain prefix and a TTL policy on top of one
//! [`CacheManager`] each.
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::services::cache::{CacheClient, CacheManager};

mod authorization_code;
mod client;
mod refresh_token;
mod scope;
mod token_handle;

pub use authorization_code::{AUTHORIZATION_CODE_PREFIX, AuthorizationCodeStore};
pub use client::{CLIENT_PREFIX, ClientStore, ClientStoreCache};
pub use refresh_token::{REFRESH_TOKEN_PREFIX, RefreshTokenStore};
pub use scope::{ALL_SCOPES_KEY, SCOPE_PREFIX, ScopeStore, ScopeStoreCache, scope_list_key};
pub use token_handle::{TOKEN_HANDLE_PREFIX, TokenHandleStore};

/// Seconds shaved off an entity's lifetime so the cached copy expires first.
pub const EXPIRY_SKEW_SECONDS: i64 = 5;
/// Shortest TTL ever handed to the cache.
pub const MIN_TTL_SECONDS: i64 = 5;

/// `max(lifetime - 5, 5)` seconds.
pub fn cache_ttl(lifetime_seconds: i32) -> Duration {
    let seconds = (i64::from(lifetime_seconds) - EXPIRY_SKEW_SECONDS).max(MIN_TTL_SECONDS);
    Duration::from_secs(seconds.unsigned_abs())
}

/// Handle-addressed grants kept only in the cache.
///
/// A key-value cache can only answer point lookups, so the subject-wide
/// operations fail with [`Error::Unsupported`] unless a store overrides them.
#[async_trait]
pub trait TransientStore<T: Send + Sync + 'static>: Send + Sync {
    async fn store(&self, key: &str, value: &T) -> Result<()>;

    async fn get(&self, key: &str) -> Result<Option<T>>;

    async fn remove(&self, key: &str) -> Result<()>;

    async fn get_all_by_subject(&self, _subject: &str) -> Result<Vec<T>> {
        Err(Error::Unsupported("get_all_by_subject"))
    }

    async fn revoke(&self, _subject: &str, _client_id: &str) -> Result<()> {
        Err(Error::Unsupported("revoke"))
    }
}

/// A cache manager scoped to one domain prefix.
pub(crate) struct PrefixedCache<T, C> {
    manager: CacheManager<T, C>,
    prefix: &'static str,
}

impl<T, C: Clone> Clone for PrefixedCache<T, C> {
    fn clone(&self) -> Self {
        Self {
            manager: self.manager.clone(),
            prefix: self.prefix,
        }
    }
}

impl<T, C> PrefixedCache<T, C>
where
    T: Send + Sync + 'static,
    C: CacheClient,
{
    pub(crate) fn new(manager: CacheManager<T, C>, prefix: &'static str) -> Self {
        Self { manager, prefix }
    }

    pub(crate) fn manager(&self) -> &CacheManager<T, C> {
        &self.manager
    }

    fn key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    /// The store key `key` ends up under.
    pub(crate) fn full_key(&self, key: &str) -> String {
        self.manager.full_key(&self.key(key))
    }

    pub(crate) async fn get(&self, key: &str) -> Result<Option<T>> {
        self.manager.get(&self.key(key)).await
    }

    pub(crate) async fn set(&self, key: &str, value: &T, ttl: Duration) -> Result<()> {
        self.manager.set(&self.key(key), value, ttl).await
    }

    pub(crate) async fn delete(&self, key: &str) -> Result<()> {
        self.manager.delete(&self.key(key)).await
    }
}
