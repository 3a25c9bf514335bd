use thiserror::Error;

use crate::mapping::value::ValueKind;

pub type MappingResult<T> = Result<T, MappingError>;

/// Failures raised while moving values between complex and simple entities.
///
/// These indicate an entity shape the caller has to fix; they are never
/// downgraded to a cache miss.
#[derive(Debug, Error)]
pub enum MappingError {
    #[error("property `{property}` declared as {expected} cannot hold {found}")]
    Coercion {
        property: String,
        expected: ValueKind,
        found: String,
    },

    #[error("property `{property}` could not be read from the data bag: {source}")]
    Deserialize {
        property: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("property `{property}` could not be written to the data bag: {source}")]
    Serialize {
        property: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("property `{property}` has no variant for code {code}")]
    UnknownCode { property: &'static str, code: i32 },

    #[error("actor chain exceeds {max} levels")]
    ActorDepth { max: usize },
}
