//! Canonical serialization for signing and transport.
//!
//! *Signing* always uses canonical JSON of the inner [`Payload`],
//! regardless of which [`SerializationFormat`] is chosen for the outer
//! envelope's transport encoding. Canonical JSON here means: compact
//! (no insignificant whitespace) and key order equal to the producer's
//! insertion order, via `serde_json`'s `preserve_order` feature. That
//! insertion order is exactly the struct field declaration order for
//! typed fields and the caller's insertion order for free-form maps
//! (`custom_metadata`, `custom_claims`, `ai_info`), so the same logical
//! object always serializes to the same bytes.

use serde::Serialize;

use crate::error::{VsMarkError, VsMarkResult};
use crate::payload::Payload;

/// JUMBF tag prefix: the literal ASCII bytes `JUMBF` precede the
/// canonical JSON body.
pub const JUMBF_PREFIX: &[u8] = b"JUMBF";

/// Transport encoding for the outer envelope. Signing is always
/// computed over canonical JSON of the inner payload, independent of
/// this choice (see module docs).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SerializationFormat {
    #[default]
    Json,
    Cbor,
    Jumbf,
}

impl SerializationFormat {
    pub fn parse(s: &str) -> VsMarkResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(SerializationFormat::Json),
            "cbor" => Ok(SerializationFormat::Cbor),
            "jumbf" => Ok(SerializationFormat::Jumbf),
            other => Err(VsMarkError::InputValue(format!(
                "invalid serialization_format: {other}. Must be one of json, cbor, jumbf."
            ))),
        }
    }
}

/// Serialize the inner payload to canonical JSON bytes. This is the
/// exact byte sequence that is signed and that a verifier must
/// reproduce from the extracted payload.
pub fn canonical_payload_bytes(payload: &Payload) -> VsMarkResult<Vec<u8>> {
    to_canonical_json_bytes(payload)
}

/// Serialize any serializable value to compact, insertion-ordered JSON
/// bytes.
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> VsMarkResult<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| VsMarkError::Fatal(format!("json encode error: {e}")))
}

/// Serialize a value per the requested transport [`SerializationFormat`].
pub fn serialize_outer<T: Serialize>(
    value: &T,
    format: SerializationFormat,
) -> VsMarkResult<Vec<u8>> {
    match format {
        SerializationFormat::Json => to_canonical_json_bytes(value),
        SerializationFormat::Jumbf => {
            let mut out = JUMBF_PREFIX.to_vec();
            out.extend(to_canonical_json_bytes(value)?);
            Ok(out)
        }
        SerializationFormat::Cbor => {
            let mut out = Vec::new();
            ciborium::into_writer(value, &mut out)
                .map_err(|e| VsMarkError::Fatal(format!("cbor encode error: {e}")))?;
            Ok(out)
        }
    }
}

/// Attempt to deserialize outer envelope bytes, trying JUMBF, then
/// JSON, then CBOR in that order. Returns `None` on total failure;
/// this never raises, matching the "extraction never raises" contract
/// for malformed embedded data.
pub fn deserialize_outer<T: serde::de::DeserializeOwned>(data: &[u8]) -> Option<T> {
    if let Some(rest) = data.strip_prefix(JUMBF_PREFIX) {
        if let Ok(v) = serde_json::from_slice(rest) {
            return Some(v);
        }
        return None;
    }
    if let Ok(v) = serde_json::from_slice(data) {
        return Some(v);
    }
    ciborium::from_reader(data).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::BasicPayload;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn canonical_json_is_compact() {
        let payload = Payload::Basic(BasicPayload::new(
            "demo",
            "2024-01-01T00:00:00Z",
            None,
            None,
            None,
        ));
        let bytes = canonical_payload_bytes(&payload).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(!text.contains(' '), "canonical json must have no insignificant whitespace: {text}");
    }

    #[test]
    fn canonical_json_preserves_insertion_order() {
        let value = json!({"z": 1, "a": 2, "m": 3});
        let bytes = to_canonical_json_bytes(&value).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text, r#"{"z":1,"a":2,"m":3}"#);
    }

    #[test]
    fn jumbf_prefixes_canonical_json() {
        let value = json!({"a": 1});
        let bytes = serialize_outer(&value, SerializationFormat::Jumbf).unwrap();
        assert!(bytes.starts_with(JUMBF_PREFIX));
        let json_part = &bytes[JUMBF_PREFIX.len()..];
        assert_eq!(json_part, br#"{"a":1}"#);
    }

    #[test]
    fn cbor_roundtrips_through_deserialize_outer() {
        let value = json!({"a": 1, "b": "two"});
        let bytes = serialize_outer(&value, SerializationFormat::Cbor).unwrap();
        let back: serde_json::Value = deserialize_outer(&bytes).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn json_roundtrips_through_deserialize_outer() {
        let value = json!({"a": 1});
        let bytes = serialize_outer(&value, SerializationFormat::Json).unwrap();
        let back: serde_json::Value = deserialize_outer(&bytes).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn jumbf_roundtrips_through_deserialize_outer() {
        let value = json!({"a": 1});
        let bytes = serialize_outer(&value, SerializationFormat::Jumbf).unwrap();
        let back: serde_json::Value = deserialize_outer(&bytes).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn deserialize_outer_garbage_is_none() {
        let garbage = vec![0xFFu8, 0x00, 0x11, 0x22];
        let back: Option<serde_json::Value> = deserialize_outer(&garbage);
        assert!(back.is_none());
    }

    #[test]
    fn parse_format_case_insensitive() {
        assert_eq!(
            SerializationFormat::parse("JSON").unwrap(),
            SerializationFormat::Json
        );
        assert!(SerializationFormat::parse("xml").is_err());
    }
}
