use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::config::CacheConfig;
use crate::error::Result;
use crate::mapping::ClientMapper;
use crate::models::Client;
use crate::services::cache::{CacheClient, CacheManager};
use crate::services::codec::JsonCodec;
use crate::stores::PrefixedCache;

pub const CLIENT_PREFIX: &str = "CS_";

/// Where clients come from: the system of record.
#[async_trait]
pub trait ClientStore: Send + Sync {
    async fn find_client_by_id(&self, client_id: &str) -> Result<Option<Client>>;
}

/// Read-through cache in front of another [`ClientStore`].
pub struct ClientStoreCache<S, C> {
    inner: S,
    cache: PrefixedCache<Client, C>,
    ttl: Duration,
}

impl<S, C> ClientStoreCache<S, C>
where
    S: ClientStore,
    C: CacheClient,
{
    pub fn new(inner: S, client: C, config: CacheConfig) -> Self {
        let ttl = Duration::from_secs(config.cache_duration_seconds);
        let codec = JsonCodec::for_mapper(ClientMapper::<Client>::new());
        Self {
            inner,
            cache: PrefixedCache::new(CacheManager::new(client, codec, config), CLIENT_PREFIX),
            ttl,
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn full_key(&self, client_id: &str) -> String {
        self.cache.full_key(client_id)
    }

    /// Drops the cached copy so the next lookup reloads it.
    pub async fn invalidate(&self, client_id: &str) -> Result<()> {
        self.cache.delete(client_id).await
    }
}

#[async_trait]
impl<S, C> ClientStore for ClientStoreCache<S, C>
where
    S: ClientStore,
    C: CacheClient,
{
    async fn find_client_by_id(&self, client_id: &str) -> Result<Option<Client>> {
        if let Some(client) = self.cache.get(client_id).await? {
            return Ok(Some(client));
        }

        let loaded = self.inner.find_client_by_id(client_id).await?;
        match &loaded {
            Some(client) => {
                debug!(client_id = %client_id, ttl_secs = self.ttl.as_secs(), "caching client");
                self.cache.set(client_id, client, self.ttl).await?;
            }
            None => debug!(client_id = %client_id, "client not found"),
        }
        Ok(loaded)
    }
}
