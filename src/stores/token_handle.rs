use async_trait::async_trait;
use tracing::debug;

use crate::config::CacheConfig;
use crate::error::Result;
use crate::mapping::{Derived, TokenMapper};
use crate::models::Token;
use crate::services::cache::{CacheClient, CacheManager};
use crate::services::codec::JsonCodec;
use crate::stores::{PrefixedCache, TransientStore, cache_ttl};

pub const TOKEN_HANDLE_PREFIX: &str = "THS_";

/// Reference tokens by handle. The TTL follows the token's own lifetime.
pub struct TokenHandleStore<C, T = Token> {
    cache: PrefixedCache<T, C>,
}

impl<C, T> TokenHandleStore<C, T>
where
    C: CacheClient,
    T: Derived<Token>,
{
    pub fn new(client: C, config: CacheConfig) -> Self {
        let codec = JsonCodec::for_mapper(TokenMapper::<T>::new());
        Self {
            cache: PrefixedCache::new(
                CacheManager::new(client, codec, config),
                TOKEN_HANDLE_PREFIX,
            ),
        }
    }

    pub fn full_key(&self, key: &str) -> String {
        self.cache.full_key(key)
    }

    pub fn manager(&self) -> &CacheManager<T, C> {
        self.cache.manager()
    }
}

#[async_trait]
impl<C, T> TransientStore<T> for TokenHandleStore<C, T>
where
    C: CacheClient,
    T: Derived<Token>,
{
    async fn store(&self, key: &str, value: &T) -> Result<()> {
        let ttl = cache_ttl(value.base().lifetime);
        debug!(key = %key, ttl_secs = ttl.as_secs(), "storing token handle");
        self.cache.set(key, value, ttl).await
    }

    async fn get(&self, key: &str) -> Result<Option<T>> {
        self.cache.get(key).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.cache.delete(key).await
    }
}
