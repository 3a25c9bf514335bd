//! Identity artifact cache.
//!
//! Tokens, refresh tokens, authorization codes, clients and scopes are mapped
//! to a compact wire form, optionally compressed, and kept in a key-value
//! store with a TTL. Types extending the stock entities carry their extra
//! fields through the same pipeline; see [`mapping`].
pub mod config;
pub mod error;
pub mod mapping;
pub mod models;
pub mod services;
pub mod stores;

pub use config::{CacheConfig, ConfigError};
pub use error::{Error, Result};
pub use services::cache::{CacheClient, CacheError, CacheManager, MemoryClient, ValkeyClient};
pub use services::codec::{JsonCodec, WireConverter};
pub use services::compression::Compression;
pub use stores::{
    AuthorizationCodeStore, ClientStore, ClientStoreCache, RefreshTokenStore, ScopeStore,
    ScopeStoreCache, TokenHandleStore, TransientStore, cache_ttl,
};
