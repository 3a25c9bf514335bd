//! Wire codec: simple entities as JSON text.
//!
//! The codec never walks a value's structure itself. Each payload type gets a
//! [`WireConverter`] which, for aggregates, is a composite mapper wrapped in
//! [`MapperConverter`].
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Result;
use crate::mapping::EntityMapper;

/// Reads and writes one payload type to its untyped wire value.
pub trait WireConverter<T>: Send + Sync {
    fn write(&self, value: &T) -> Result<Value>;
    fn read(&self, value: Value) -> Result<T>;
}

/// Routes a complex entity through its composite mapper's simple form.
#[derive(Debug, Default)]
pub struct MapperConverter<M> {
    mapper: M,
}

impl<M> MapperConverter<M> {
    pub fn new(mapper: M) -> Self {
        Self { mapper }
    }
}

impl<M> WireConverter<M::Complex> for MapperConverter<M>
where
    M: EntityMapper,
    M::Simple: Serialize + DeserializeOwned,
{
    fn write(&self, value: &M::Complex) -> Result<Value> {
        let simple = self.mapper.map_to_simple(value)?;
        Ok(serde_json::to_value(simple)?)
    }

    fn read(&self, value: Value) -> Result<M::Complex> {
        let simple: M::Simple = serde_json::from_value(value)?;
        Ok(self.mapper.map_to_complex(&simple)?)
    }
}

/// A list of complex entities, stored as a JSON array of simple ones.
#[derive(Debug, Default)]
pub struct SequenceConverter<M> {
    mapper: M,
}

impl<M> SequenceConverter<M> {
    pub fn new(mapper: M) -> Self {
        Self { mapper }
    }
}

impl<M> WireConverter<Vec<M::Complex>> for SequenceConverter<M>
where
    M: EntityMapper,
    M::Simple: Serialize + DeserializeOwned,
{
    fn write(&self, value: &Vec<M::Complex>) -> Result<Value> {
        let simple = self.mapper.to_simple_all(Some(value))?;
        Ok(serde_json::to_value(simple)?)
    }

    fn read(&self, value: Value) -> Result<Vec<M::Complex>> {
        let simple: Vec<M::Simple> = serde_json::from_value(value)?;
        Ok(self.mapper.to_complex_all(Some(&simple))?)
    }
}

/// Plain serde round trip for payloads that need no mapping.
pub struct SerdeConverter<T>(PhantomData<fn() -> T>);

impl<T> Default for SerdeConverter<T> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<T> WireConverter<T> for SerdeConverter<T>
where
    T: Serialize + DeserializeOwned,
{
    fn write(&self, value: &T) -> Result<Value> {
        Ok(serde_json::to_value(value)?)
    }

    fn read(&self, value: Value) -> Result<T> {
        Ok(serde_json::from_value(value)?)
    }
}

pub struct JsonCodec<T> {
    converter: Arc<dyn WireConverter<T>>,
}

impl<T> Clone for JsonCodec<T> {
    fn clone(&self) -> Self {
        Self {
            converter: Arc::clone(&self.converter),
        }
    }
}

impl<T> fmt::Debug for JsonCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonCodec")
            .field("payload", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T: 'static> JsonCodec<T> {
    pub fn new(converter: Arc<dyn WireConverter<T>>) -> Self {
        Self { converter }
    }

    pub fn for_mapper<M>(mapper: M) -> Self
    where
        M: EntityMapper<Complex = T> + 'static,
        M::Simple: Serialize + DeserializeOwned,
    {
        Self::new(Arc::new(MapperConverter::new(mapper)))
    }

    pub fn serialize(&self, value: &T) -> Result<Vec<u8>> {
        let wire = self.converter.write(value)?;
        Ok(serde_json::to_vec(&wire)?)
    }

    pub fn serialize_to_string(&self, value: &T) -> Result<String> {
        let wire = self.converter.write(value)?;
        Ok(serde_json::to_string(&wire)?)
    }

    /// Empty input and a bare `null` decode to `None`; anything else that is
    /// not a valid payload is an error.
    pub fn deserialize(&self, bytes: &[u8]) -> Result<Option<T>> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        let wire: Value = serde_json::from_slice(bytes)?;
        if wire.is_null() {
            return Ok(None);
        }
        self.converter.read(wire).map(Some)
    }
}

impl<T: 'static> JsonCodec<Vec<T>> {
    pub fn for_sequence<M>(mapper: M) -> Self
    where
        M: EntityMapper<Complex = T> + 'static,
        M::Simple: Serialize + DeserializeOwned,
    {
        Self::new(Arc::new(SequenceConverter::new(mapper)))
    }
}

impl<T> JsonCodec<T>
where
    T: Serialize + DeserializeOwned + 'static,
{
    pub fn serde() -> Self {
        Self::new(Arc::new(SerdeConverter::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::mapping::{ClaimsPrincipalMapper, TokenMapper};
    use crate::models::{Claim, ClaimsIdentity, ClaimsPrincipal, Token};

    fn principal() -> ClaimsPrincipal {
        ClaimsPrincipal::from_identity(ClaimsIdentity::new(
            "pwd",
            vec![Claim::new("sub", "alice"), Claim::new("name", "Alice")],
        ))
    }

    #[test]
    fn payload_uses_short_names() {
        let codec = JsonCodec::for_mapper(ClaimsPrincipalMapper::<ClaimsPrincipal>::new());
        let text = codec.serialize_to_string(&principal()).unwrap();
        assert!(text.contains(r#""t":"sub""#));
        assert!(!text.contains("claim_type"));

        let back = codec.deserialize(text.as_bytes()).unwrap();
        assert_eq!(back, Some(principal()));
    }

    #[test]
    fn empty_and_null_are_absent() {
        let codec = JsonCodec::for_mapper(TokenMapper::<Token>::new());
        assert!(codec.deserialize(b"").unwrap().is_none());
        assert!(codec.deserialize(b"  \n").unwrap().is_none());
        assert!(codec.deserialize(b"null").unwrap().is_none());
    }

    #[test]
    fn malformed_payload_is_a_codec_error() {
        let codec = JsonCodec::for_mapper(TokenMapper::<Token>::new());
        let err = codec.deserialize(br#"{"lt":"#).unwrap_err();
        assert!(matches!(err, Error::Codec(_)));

        let err = codec.deserialize(br#"{"lt":"soon"}"#).unwrap_err();
        assert!(matches!(err, Error::Codec(_)));
    }

    #[test]
    fn serde_converter_passes_through() {
        let codec = JsonCodec::<Vec<String>>::serde();
        let bytes = codec.serialize(&vec!["openid".to_string()]).unwrap();
        assert_eq!(bytes, br#"["openid"]"#);
        assert_eq!(
            codec.deserialize(&bytes).unwrap(),
            Some(vec!["openid".to_string()])
        );
    }
}
