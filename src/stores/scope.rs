use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::config::CacheConfig;
use crate::error::Result;
use crate::mapping::ScopeMapper;
use crate::models::Scope;
use crate::services::cache::{CacheClient, CacheManager};
use crate::services::codec::JsonCodec;
use crate::stores::PrefixedCache;

pub const SCOPE_PREFIX: &str = "SS_";
pub const ALL_SCOPES_KEY: &str = "*";

#[async_trait]
pub trait ScopeStore: Send + Sync {
    async fn find_scopes_by_name(&self, names: &[String]) -> Result<Vec<Scope>>;

    async fn get_scopes(&self) -> Result<Vec<Scope>>;
}

/// Cache key for a set of scope names: order and duplicates don't matter.
pub fn scope_list_key(names: &[String]) -> String {
    let mut names: Vec<&str> = names.iter().map(String::as_str).collect();
    names.sort_unstable();
    names.dedup();
    names.join(",")
}

/// Read-through cache in front of another [`ScopeStore`]. Whole lists are
/// cached per distinct name set.
pub struct ScopeStoreCache<S, C> {
    inner: S,
    cache: PrefixedCache<Vec<Scope>, C>,
    ttl: Duration,
}

impl<S, C> ScopeStoreCache<S, C>
where
    S: ScopeStore,
    C: CacheClient,
{
    pub fn new(inner: S, client: C, config: CacheConfig) -> Self {
        let ttl = Duration::from_secs(config.cache_duration_seconds);
        let codec = JsonCodec::for_sequence(ScopeMapper::<Scope>::new());
        Self {
            inner,
            cache: PrefixedCache::new(CacheManager::new(client, codec, config), SCOPE_PREFIX),
            ttl,
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn full_key(&self, names: &[String]) -> String {
        self.cache.full_key(&scope_list_key(names))
    }

    async fn cached(&self, key: &str) -> Result<Option<Vec<Scope>>> {
        self.cache.get(key).await
    }

    async fn remember(&self, key: &str, scopes: &Vec<Scope>) -> Result<()> {
        debug!(key = %key, count = scopes.len(), ttl_secs = self.ttl.as_secs(), "caching scopes");
        self.cache.set(key, scopes, self.ttl).await
    }
}

#[async_trait]
impl<S, C> ScopeStore for ScopeStoreCache<S, C>
where
    S: ScopeStore,
    C: CacheClient,
{
    async fn find_scopes_by_name(&self, names: &[String]) -> Result<Vec<Scope>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let key = scope_list_key(names);
        if let Some(scopes) = self.cached(&key).await? {
            return Ok(scopes);
        }

        let scopes = self.inner.find_scopes_by_name(names).await?;
        self.remember(&key, &scopes).await?;
        Ok(scopes)
    }

    async fn get_scopes(&self) -> Result<Vec<Scope>> {
        if let Some(scopes) = self.cached(ALL_SCOPES_KEY).await? {
            return Ok(scopes);
        }

        let scopes = self.inner.get_scopes().await?;
        self.remember(ALL_SCOPES_KEY, &scopes).await?;
        Ok(scopes)
    }
}
