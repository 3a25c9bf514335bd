use async_trait::async_trait;
use tracing::debug;

use crate::config::CacheConfig;
use crate::error::Result;
use crate::mapping::{AuthorizationCodeMapper, Derived};
use crate::models::AuthorizationCode;
use crate::services::cache::{CacheClient, CacheManager};
use crate::services::codec::JsonCodec;
use crate::stores::{PrefixedCache, TransientStore, cache_ttl};

pub const AUTHORIZATION_CODE_PREFIX: &str = "ACS_";

/// Authorization codes by code value. The TTL is the issuing client's
/// authorization code lifetime.
pub struct AuthorizationCodeStore<C, T = AuthorizationCode> {
    cache: PrefixedCache<T, C>,
}

impl<C, T> AuthorizationCodeStore<C, T>
where
    C: CacheClient,
    T: Derived<AuthorizationCode>,
{
    pub fn new(client: C, config: CacheConfig) -> Self {
        let codec = JsonCodec::for_mapper(AuthorizationCodeMapper::<T>::new());
        Self {
            cache: PrefixedCache::new(
                CacheManager::new(client, codec, config),
                AUTHORIZATION_CODE_PREFIX,
            ),
        }
    }

    pub fn full_key(&self, key: &str) -> String {
        self.cache.full_key(key)
    }
}

#[async_trait]
impl<C, T> TransientStore<T> for AuthorizationCodeStore<C, T>
where
    C: CacheClient,
    T: Derived<AuthorizationCode>,
{
    async fn store(&self, key: &str, value: &T) -> Result<()> {
        let ttl = cache_ttl(value.base().client.authorization_code_lifetime);
        debug!(key = %key, ttl_secs = ttl.as_secs(), "storing authorization code");
        self.cache.set(key, value, ttl).await
    }

    async fn get(&self, key: &str) -> Result<Option<T>> {
        self.cache.get(key).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.cache.delete(key).await
    }
}
