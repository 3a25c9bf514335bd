/*
 * Responsibility
 * - Errors callers of the cache can observe
 * - Transport failures are not part of this type: the cache manager logs
 *   and downgrades them before they reach a caller
 */
use thiserror::Error;

use crate::config::ConfigError;
use crate::mapping::MappingError;
use crate::services::compression::CompressionError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Mapping(#[from] MappingError),
    /// A stored payload that is not a valid simple entity. Never a miss.
    #[error("corrupt cache payload: {0}")]
    Codec(#[from] serde_json::Error),
    #[error(transparent)]
    Compression(#[from] CompressionError),
    #[error("operation not supported by a key-value cache: {0}")]
    Unsupported(&'static str),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported(_))
    }
}
