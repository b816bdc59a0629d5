//! Encode/decode pairs exercised by the harness.

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Errors raised by a codec.
#[derive(Error, Debug)]
pub enum CodecError {
    /// Value could not be encoded.
    #[error("{codec} encoding failed: {message}")]
    Encode {
        codec: &'static str,
        message: String,
    },

    /// Bytes could not be decoded into the requested type.
    #[error("{codec} decoding failed: {message}")]
    Decode {
        codec: &'static str,
        message: String,
    },
}

/// A serialization format under test.
pub trait Codec {
    /// Short name used in reports and errors.
    fn name(&self) -> &'static str;

    /// Encode a value to bytes.
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CodecError>;

    /// Decode bytes into a value.
    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError>;
}

/// JSON via `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn name(&self) -> &'static str {
        "json"
    }

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(value).map_err(|e| CodecError::Encode {
            codec: self.name(),
            message: e.to_string(),
        })
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError> {
        serde_json::from_slice(bytes).map_err(|e| CodecError::Decode {
            codec: self.name(),
            message: e.to_string(),
        })
    }
}

/// YAML via `serde_yaml`.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlCodec;

impl Codec for YamlCodec {
    fn name(&self) -> &'static str {
        "yaml"
    }

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        serde_yaml::to_string(value)
            .map(String::into_bytes)
            .map_err(|e| CodecError::Encode {
                codec: self.name(),
                message: e.to_string(),
            })
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError> {
        serde_yaml::from_slice(bytes).map_err(|e| CodecError::Decode {
            codec: self.name(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn sample() -> Value {
        json!({
            "shock_id": "550e8400-e29b-41d4-a716-446655440000",
            "target_type": "ASSET",
            "magnitude": -0.1234,
            "rates": {"true": 1.5, "42": 2.0},
            "yield_curve": null,
            "tenor_days": 30
        })
    }

    #[test]
    fn test_json_codec() {
        let bytes = JsonCodec.encode(&sample()).unwrap();
        let decoded: Value = JsonCodec.decode(&bytes).unwrap();
        assert_eq!(decoded, sample());
    }

    #[test]
    fn test_yaml_codec() {
        let bytes = YamlCodec.encode(&sample()).unwrap();
        let decoded: Value = YamlCodec.decode(&bytes).unwrap();
        assert_eq!(decoded, sample());
    }

    #[test]
    fn test_decode_error_names_codec() {
        let err = JsonCodec.decode::<Value>(b"{not json").unwrap_err();
        assert!(matches!(err, CodecError::Decode { codec: "json", .. }));
        assert!(err.to_string().starts_with("json decoding failed"));
    }
}
