//! Optional payload compression applied between the codec and the store.
use std::fmt;
use std::io::{Read, Write};
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use flate2::read::{DeflateDecoder, GzDecoder};
use flate2::write::{DeflateEncoder, GzEncoder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("compression io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("compressed payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("decompressed payload is not valid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown compression algorithm: {0}")]
pub struct UnknownCompression(pub String);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    None,
    /// Raw DEFLATE, no zlib header.
    #[default]
    Deflate,
    Gzip,
}

impl Compression {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Deflate => "deflate",
            Self::Gzip => "gzip",
        }
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Compression {
    type Err = UnknownCompression;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "deflate" => Ok(Self::Deflate),
            "gzip" => Ok(Self::Gzip),
            _ => Err(UnknownCompression(s.to_string())),
        }
    }
}

pub fn compress(data: &[u8], algorithm: Compression) -> Result<Vec<u8>, CompressionError> {
    if data.is_empty() {
        return Ok(Vec::new());
    }

    match algorithm {
        Compression::None => Ok(data.to_vec()),
        Compression::Deflate => {
            let mut encoder = DeflateEncoder::new(Vec::new(), flate2::Compression::default());
            encoder.write_all(data)?;
            Ok(encoder.finish()?)
        }
        Compression::Gzip => {
            let mut encoder = GzEncoder::new(Vec::new(), flate2::Compression::default());
            encoder.write_all(data)?;
            Ok(encoder.finish()?)
        }
    }
}

pub fn decompress(data: &[u8], algorithm: Compression) -> Result<Vec<u8>, CompressionError> {
    if data.is_empty() {
        return Ok(Vec::new());
    }

    let mut out = Vec::new();
    match algorithm {
        Compression::None => return Ok(data.to_vec()),
        Compression::Deflate => {
            DeflateDecoder::new(data).read_to_end(&mut out)?;
        }
        Compression::Gzip => {
            GzDecoder::new(data).read_to_end(&mut out)?;
        }
    }
    Ok(out)
}

/// Compresses `text` and renders the result as base64 so it fits a string
/// value. `None` hands the input back untouched.
pub fn compress_string(text: &str, algorithm: Compression) -> Result<String, CompressionError> {
    if text.is_empty() || algorithm == Compression::None {
        return Ok(text.to_string());
    }
    let compressed = compress(text.as_bytes(), algorithm)?;
    Ok(STANDARD.encode(compressed))
}

/// Inverse of [`compress_string`].
pub fn decompress_string(text: &str, algorithm: Compression) -> Result<String, CompressionError> {
    if text.is_empty() || algorithm == Compression::None {
        return Ok(text.to_string());
    }
    let compressed = STANDARD.decode(text.trim())?;
    let bytes = decompress(&compressed, algorithm)?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{"a":"https://idsrv/resources","i":"https://idsrv","lt":120,"c":{"id":"web","n":"Web","ru":["https://web/cb","https://web/cb","https://web/cb"]}}"#;

    #[test]
    fn every_algorithm_round_trips() {
        for algorithm in [Compression::None, Compression::Deflate, Compression::Gzip] {
            let packed = compress(PAYLOAD.as_bytes(), algorithm).unwrap();
            let unpacked = decompress(&packed, algorithm).unwrap();
            assert_eq!(unpacked, PAYLOAD.as_bytes(), "{algorithm}");
        }
    }

    #[test]
    fn none_is_identity() {
        let packed = compress(PAYLOAD.as_bytes(), Compression::None).unwrap();
        assert_eq!(packed, PAYLOAD.as_bytes());
        assert_eq!(
            decompress(PAYLOAD.as_bytes(), Compression::None).unwrap(),
            PAYLOAD.as_bytes()
        );
        assert_eq!(
            compress_string(PAYLOAD, Compression::None).unwrap(),
            PAYLOAD
        );
    }

    #[test]
    fn gzip_output_carries_gzip_magic() {
        let packed = compress(PAYLOAD.as_bytes(), Compression::Gzip).unwrap();
        assert_eq!(&packed[..2], &[0x1f, 0x8b]);
    }

    #[test]
    fn empty_input_is_not_an_error() {
        for algorithm in [Compression::None, Compression::Deflate, Compression::Gzip] {
            assert!(compress(&[], algorithm).unwrap().is_empty());
            assert!(decompress(&[], algorithm).unwrap().is_empty());
            assert_eq!(compress_string("", algorithm).unwrap(), "");
            assert_eq!(decompress_string("", algorithm).unwrap(), "");
        }
    }

    #[test]
    fn string_variant_is_base64() {
        let packed = compress_string(PAYLOAD, Compression::Deflate).unwrap();
        assert!(STANDARD.decode(&packed).is_ok());
        assert_eq!(
            decompress_string(&packed, Compression::Deflate).unwrap(),
            PAYLOAD
        );
    }

    #[test]
    fn garbage_fails_loudly() {
        let err = decompress_string("not base64!!", Compression::Gzip).unwrap_err();
        assert!(matches!(err, CompressionError::Base64(_)));

        let err = decompress(b"definitely not gzip", Compression::Gzip).unwrap_err();
        assert!(matches!(err, CompressionError::Io(_)));
    }

    #[test]
    fn parses_configured_names() {
        assert_eq!("GZIP".parse::<Compression>(), Ok(Compression::Gzip));
        assert_eq!(" none ".parse::<Compression>(), Ok(Compression::None));
        assert_eq!(
            "brotli".parse::<Compression>(),
            Err(UnknownCompression("brotli".into()))
        );
        assert_eq!(Compression::default(), Compression::Deflate);
    }
}
