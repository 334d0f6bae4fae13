//! Inner payload and outer envelope schemas.
//!
//! The `format` field discriminates [`BasicPayload`] from
//! [`ManifestPayload`]; `#[serde(tag = "format")]` gives the same
//! behavior as the reference's open dictionary with a `"format"` key,
//! while keeping the Rust side strongly typed.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Standard keys reserved by the basic payload shape. `custom_metadata`
/// entries that collide with these are dropped rather than overriding
/// the standard field.
pub const BASIC_STANDARD_KEYS: &[&str] = &[
    "signer_id",
    "timestamp",
    "format",
    "model_id",
    "generationID",
];

/// The inner, signed payload. Tagged on `format` so JSON serializes
/// with a `"format": "basic" | "manifest"` discriminant matching the
/// wire format in the specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum Payload {
    Basic(BasicPayload),
    Manifest(ManifestPayload),
}

impl Payload {
    pub fn signer_id(&self) -> &str {
        match self {
            Payload::Basic(p) => &p.signer_id,
            Payload::Manifest(p) => &p.signer_id,
        }
    }

    pub fn timestamp(&self) -> &str {
        match self {
            Payload::Basic(p) => &p.timestamp,
            Payload::Manifest(p) => &p.timestamp,
        }
    }

    pub fn format_name(&self) -> &'static str {
        match self {
            Payload::Basic(_) => "basic",
            Payload::Manifest(_) => "manifest",
        }
    }
}

/// The `"basic"` payload shape (see specification §3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicPayload {
    pub signer_id: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
    #[serde(rename = "generationID", skip_serializing_if = "Option::is_none")]
    pub generation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_metadata: Option<Map<String, Value>>,
}

impl BasicPayload {
    /// Build a basic payload, dropping any `custom_metadata` keys that
    /// collide with the standard field names.
    pub fn new(
        signer_id: impl Into<String>,
        timestamp: impl Into<String>,
        model_id: Option<String>,
        generation_id: Option<String>,
        custom_metadata: Option<Map<String, Value>>,
    ) -> Self {
        let custom_metadata = custom_metadata.map(|m| {
            let standard: BTreeSet<&str> = BASIC_STANDARD_KEYS.iter().copied().collect();
            let filtered: Map<String, Value> = m
                .into_iter()
                .filter(|(k, _)| !standard.contains(k.as_str()))
                .collect();
            filtered
        });

        Self {
            signer_id: signer_id.into(),
            timestamp: timestamp.into(),
            model_id,
            generation_id,
            custom_metadata,
        }
    }
}

/// The `"manifest"` payload shape (see specification §3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestPayload {
    pub signer_id: String,
    pub timestamp: String,
    pub manifest: ManifestBody,
}

/// The C2PA-inspired inner manifest body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManifestBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claim_generator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<Map<String, Value>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_info: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_claims: Option<Map<String, Value>>,
}

impl ManifestBody {
    /// Merge `model_id` into `ai_info.model_id`, creating `ai_info` if
    /// it was not already supplied.
    pub fn with_merged_model_id(mut self, model_id: Option<String>) -> Self {
        if let Some(model_id) = model_id {
            let ai_info = self.ai_info.get_or_insert_with(Map::new);
            ai_info.insert("model_id".to_string(), Value::String(model_id));
        }
        self
    }
}

/// The outer, embedded envelope: the signed payload plus its signature
/// and the fields needed to look up a key without first parsing the
/// payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub payload: Payload,
    pub signature: String,
    pub signer_id: String,
    pub format: String,
}

impl Envelope {
    pub fn new(payload: Payload, signature: String) -> Self {
        Envelope {
            signer_id: payload.signer_id().to_string(),
            format: payload.format_name().to_string(),
            payload,
            signature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn basic_payload_filters_overlapping_custom_keys() {
        let mut custom = Map::new();
        custom.insert("signer_id".into(), Value::String("sneaky".into()));
        custom.insert("note".into(), Value::String("kept".into()));

        let p = BasicPayload::new("demo", "2024-01-01T00:00:00Z", None, None, Some(custom));
        let cm = p.custom_metadata.unwrap();
        assert!(!cm.contains_key("signer_id"));
        assert_eq!(cm.get("note").unwrap(), "kept");
    }

    #[test]
    fn manifest_merges_model_id_into_ai_info() {
        let body = ManifestBody::default().with_merged_model_id(Some("gpt-4o".into()));
        assert_eq!(
            body.ai_info.unwrap().get("model_id").unwrap(),
            "gpt-4o"
        );
    }

    #[test]
    fn manifest_merge_preserves_existing_ai_info() {
        let mut ai_info = Map::new();
        ai_info.insert("provider".into(), Value::String("openai".into()));
        let body = ManifestBody {
            ai_info: Some(ai_info),
            ..Default::default()
        }
        .with_merged_model_id(Some("gpt-4o".into()));
        let ai_info = body.ai_info.unwrap();
        assert_eq!(ai_info.get("provider").unwrap(), "openai");
        assert_eq!(ai_info.get("model_id").unwrap(), "gpt-4o");
    }

    #[test]
    fn payload_tag_roundtrips() {
        let payload = Payload::Basic(BasicPayload::new(
            "demo",
            "2024-01-01T00:00:00Z",
            Some("m1".into()),
            None,
            None,
        ));
        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains("\"format\":\"basic\""));
        let back: Payload = serde_json::from_str(&json).unwrap();
        assert_eq!(back, payload);
    }

    #[test]
    fn envelope_duplicates_signer_and_format() {
        let payload = Payload::Manifest(ManifestPayload {
            signer_id: "demo".into(),
            timestamp: "2024-01-01T00:00:00Z".into(),
            manifest: ManifestBody::default(),
        });
        let env = Envelope::new(payload, "sig".into());
        assert_eq!(env.signer_id, "demo");
        assert_eq!(env.format, "manifest");
    }
}
