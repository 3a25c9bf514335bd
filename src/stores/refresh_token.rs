use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::config::CacheConfig;
use crate::error::Result;
use crate::mapping::{Derived, RefreshTokenMapper};
use crate::models::RefreshToken;
use crate::services::cache::{CacheClient, CacheManager};
use crate::services::codec::JsonCodec;
use crate::stores::{PrefixedCache, TransientStore, cache_ttl};

pub const REFRESH_TOKEN_PREFIX: &str = "RTS_";

/// Refresh tokens by handle.
///
/// `refresh_token_cache_duration_seconds`, when configured, replaces the
/// lifetime-derived TTL.
pub struct RefreshTokenStore<C, T = RefreshToken> {
    cache: PrefixedCache<T, C>,
    duration_override: Option<Duration>,
}

impl<C, T> RefreshTokenStore<C, T>
where
    C: CacheClient,
    T: Derived<RefreshToken>,
{
    pub fn new(client: C, config: CacheConfig) -> Self {
        let duration_override = config
            .refresh_token_cache_duration_seconds
            .map(Duration::from_secs);
        let codec = JsonCodec::for_mapper(RefreshTokenMapper::<T>::new());
        Self {
            cache: PrefixedCache::new(
                CacheManager::new(client, codec, config),
                REFRESH_TOKEN_PREFIX,
            ),
            duration_override,
        }
    }

    pub fn full_key(&self, key: &str) -> String {
        self.cache.full_key(key)
    }

    pub fn ttl_for(&self, value: &T) -> Duration {
        self.duration_override
            .unwrap_or_else(|| cache_ttl(value.base().lifetime))
    }
}

#[async_trait]
impl<C, T> TransientStore<T> for RefreshTokenStore<C, T>
where
    C: CacheClient,
    T: Derived<RefreshToken>,
{
    async fn store(&self, key: &str, value: &T) -> Result<()> {
        let ttl = self.ttl_for(value);
        debug!(
            key = %key,
            ttl_secs = ttl.as_secs(),
            overridden = self.duration_override.is_some(),
            "storing refresh token"
        );
        self.cache.set(key, value, ttl).await
    }

    async fn get(&self, key: &str) -> Result<Option<T>> {
        self.cache.get(key).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.cache.delete(key).await
    }
}
