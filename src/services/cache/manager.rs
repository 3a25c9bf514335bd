//! Typed read/write surface over a [`CacheClient`].
//!
//! Write path: codec -> optional compression -> `SET EX`.
//! Read path: `GET` -> optional decompression -> codec.
//!
//! Transport failures are logged and turned into a miss (reads) or a no-op
//! (writes). Codec, mapping and compression failures are returned: a corrupt
//! entry is a bug, not a miss.
use std::fmt;
use std::time::{Duration, Instant};

use tracing::{debug, error, warn};

use crate::config::CacheConfig;
use crate::error::Result;
use crate::services::cache::client::CacheClient;
use crate::services::codec::JsonCodec;
use crate::services::compression::{Compression, compress_string, decompress_string};

pub struct CacheManager<T, C> {
    client: C,
    codec: JsonCodec<T>,
    config: CacheConfig,
}

impl<T, C: Clone> Clone for CacheManager<T, C> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            codec: self.codec.clone(),
            config: self.config.clone(),
        }
    }
}

impl<T, C: CacheClient> fmt::Debug for CacheManager<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheManager")
            .field("backend", &self.client.backend_name())
            .field("codec", &self.codec)
            .field("key_prefix", &self.config.key_prefix)
            .field("compression", &self.compression())
            .finish()
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

impl<T, C> CacheManager<T, C> {
    pub fn new(client: C, codec: JsonCodec<T>, config: CacheConfig) -> Self {
        Self {
            client,
            codec,
            config,
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn compression(&self) -> Compression {
        self.config.effective_compression()
    }

    /// The store key for a logical key.
    pub fn full_key(&self, key: &str) -> String {
        self.config.namespaced(key)
    }
}

impl<T, C> CacheManager<T, C>
where
    T: Send + Sync + 'static,
    C: CacheClient,
{
    fn encode(&self, value: &T) -> Result<String> {
        let text = self.codec.serialize_to_string(value)?;
        Ok(compress_string(&text, self.compression())?)
    }

    fn decode(&self, raw: &str) -> Result<Option<T>> {
        let text = decompress_string(raw, self.compression())?;
        self.codec.deserialize(text.as_bytes())
    }

    pub async fn get(&self, key: &str) -> Result<Option<T>> {
        let started = Instant::now();
        let full_key = self.full_key(key);
        debug!(op = "get", key = %full_key, "cache enter");

        let raw = match self.client.get_string(&full_key).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(
                    backend = self.client.backend_name(),
                    key = %full_key,
                    error = %e,
                    "cache read failed, treating as miss"
                );
                return Ok(None);
            }
        };

        let Some(raw) = raw.filter(|r| !r.is_empty()) else {
            debug!(key = %full_key, elapsed_ms = elapsed_ms(started), "cache miss");
            return Ok(None);
        };

        let value = self.decode(&raw).inspect_err(|e| {
            error!(key = %full_key, error = %e, "corrupt cache entry");
        })?;

        match &value {
            Some(_) => debug!(key = %full_key, elapsed_ms = elapsed_ms(started), "cache hit"),
            None => debug!(key = %full_key, elapsed_ms = elapsed_ms(started), "cache miss"),
        }
        Ok(value)
    }

    /// One batched read. The result keeps the order (and duplicates) of `keys`.
    pub async fn get_all(&self, keys: &[String]) -> Result<Vec<(String, Option<T>)>> {
        let started = Instant::now();
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let full_keys: Vec<String> = keys.iter().map(|k| self.full_key(k)).collect();
        debug!(op = "get_all", count = keys.len(), "cache enter");

        let raws = match self.client.get_strings(&full_keys).await {
            Ok(raws) if raws.len() == keys.len() => raws,
            Ok(raws) => {
                warn!(
                    backend = self.client.backend_name(),
                    count = keys.len(),
                    returned = raws.len(),
                    "cache batch read returned a mismatched reply, treating as miss"
                );
                vec![None; keys.len()]
            }
            Err(e) => {
                warn!(
                    backend = self.client.backend_name(),
                    count = keys.len(),
                    error = %e,
                    "cache batch read failed, treating as miss"
                );
                vec![None; keys.len()]
            }
        };

        let mut hits = 0usize;
        let mut out = Vec::with_capacity(keys.len());
        for ((key, full_key), raw) in keys.iter().zip(&full_keys).zip(raws) {
            let value = match raw.filter(|r| !r.is_empty()) {
                Some(raw) => self.decode(&raw).inspect_err(|e| {
                    error!(key = %full_key, error = %e, "corrupt cache entry");
                })?,
                None => None,
            };
            if value.is_some() {
                hits += 1;
            }
            out.push((key.clone(), value));
        }

        debug!(
            count = keys.len(),
            hits,
            elapsed_ms = elapsed_ms(started),
            "cache get_all done"
        );
        Ok(out)
    }

    /// Stores `value` for `ttl`, replacing any previous entry. A zero TTL
    /// stores nothing.
    pub async fn set(&self, key: &str, value: &T, ttl: Duration) -> Result<()> {
        let started = Instant::now();
        let full_key = self.full_key(key);
        debug!(op = "set", key = %full_key, ttl_secs = ttl.as_secs(), "cache enter");

        if ttl.is_zero() {
            debug!(key = %full_key, "zero ttl, not storing");
            return Ok(());
        }

        let payload = self.encode(value)?;

        if let Err(e) = self.client.set_with_ttl(&full_key, &payload, ttl).await {
            warn!(
                backend = self.client.backend_name(),
                key = %full_key,
                error = %e,
                "cache write failed, skipping"
            );
            return Ok(());
        }

        debug!(
            key = %full_key,
            bytes = payload.len(),
            elapsed_ms = elapsed_ms(started),
            "cache set done"
        );
        Ok(())
    }

    pub async fn delete(&self, key: &str) -> Result<()> {
        let started = Instant::now();
        let full_key = self.full_key(key);
        debug!(op = "delete", key = %full_key, "cache enter");

        match self.client.del(&full_key).await {
            Ok(removed) => debug!(
                key = %full_key,
                removed,
                elapsed_ms = elapsed_ms(started),
                "cache delete done"
            ),
            Err(e) => warn!(
                backend = self.client.backend_name(),
                key = %full_key,
                error = %e,
                "cache delete failed, skipping"
            ),
        }
        Ok(())
    }
}
