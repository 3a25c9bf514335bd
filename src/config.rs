/*
 * Responsibility
 * - Cache settings from the environment (.env supported)
 * - Defaults for everything; invalid values are rejected, not ignored
 */
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::services::compression::Compression;

pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";
pub const DEFAULT_CACHE_DURATION_SECONDS: u64 = 3600;
pub const DEFAULT_KEY_PREFIX: &str = "rsftid3cache";

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub redis_url: String,
    /// TTL for clients and scopes, in seconds.
    pub cache_duration_seconds: u64,
    pub key_prefix: String,
    pub use_compression: bool,
    pub compression: Compression,
    /// Fixed TTL for refresh tokens. Unset means "derive from the token".
    pub refresh_token_cache_duration_seconds: Option<u64>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            redis_url: DEFAULT_REDIS_URL.to_string(),
            cache_duration_seconds: DEFAULT_CACHE_DURATION_SECONDS,
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            use_compression: true,
            compression: Compression::default(),
            refresh_token_cache_duration_seconds: None,
        }
    }
}

impl CacheConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`CacheConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let redis_url = var("CACHE_REDIS_URL").unwrap_or(defaults.redis_url);

        let cache_duration_seconds = match var("CACHE_DURATION_SECONDS") {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid("CACHE_DURATION_SECONDS"))?,
            None => defaults.cache_duration_seconds,
        };

        let key_prefix = lookup("CACHE_KEY_PREFIX")
            .map(|v| v.trim().to_string())
            .unwrap_or(defaults.key_prefix);

        let use_compression = match var("CACHE_USE_COMPRESSION") {
            Some(v) => parse_bool(&v).ok_or(ConfigError::Invalid("CACHE_USE_COMPRESSION"))?,
            None => defaults.use_compression,
        };

        let compression = match var("CACHE_COMPRESSION") {
            Some(v) => v
                .parse::<Compression>()
                .map_err(|_| ConfigError::Invalid("CACHE_COMPRESSION"))?,
            None => defaults.compression,
        };

        let refresh_token_cache_duration_seconds =
            match var("CACHE_REFRESH_TOKEN_DURATION_SECONDS") {
                Some(v) => Some(
                    v.trim()
                        .parse::<u64>()
                        .map_err(|_| ConfigError::Invalid("CACHE_REFRESH_TOKEN_DURATION_SECONDS"))?,
                ),
                None => None,
            };

        Ok(Self {
            redis_url,
            cache_duration_seconds,
            key_prefix,
            use_compression,
            compression,
            refresh_token_cache_duration_seconds,
        })
    }

    pub fn with_redis_url(mut self, url: impl Into<String>) -> Self {
        self.redis_url = url.into();
        self
    }

    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    pub fn with_cache_duration_seconds(mut self, seconds: u64) -> Self {
        self.cache_duration_seconds = seconds;
        self
    }

    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.use_compression = true;
        self.compression = compression;
        self
    }

    pub fn without_compression(mut self) -> Self {
        self.use_compression = false;
        self
    }

    pub fn with_refresh_token_cache_duration_seconds(mut self, seconds: u64) -> Self {
        self.refresh_token_cache_duration_seconds = Some(seconds);
        self
    }

    /// The algorithm applied to stored payloads, `None` when disabled.
    pub fn effective_compression(&self) -> Compression {
        if self.use_compression {
            self.compression
        } else {
            Compression::None
        }
    }

    /// `<prefix>_<key>`, or the bare key when no prefix is configured.
    pub fn namespaced(&self, key: &str) -> String {
        if self.key_prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}_{}", self.key_prefix, key)
        }
    }

    /// The key a store adapter's entry ends up under.
    pub fn full_key(&self, domain_prefix: &str, key: &str) -> String {
        self.namespaced(&format!("{domain_prefix}{key}"))
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
