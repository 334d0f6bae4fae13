//! The embedder: builds the signed outer envelope and splices it into
//! host text as variation selectors.

use ed25519_dalek::SigningKey;
use serde_json::{Map, Value};
use tracing::{debug, error, info};

use crate::canonical::{canonical_payload_bytes, serialize_outer, SerializationFormat};
use crate::codec::encode_bytes;
use crate::error::{VsMarkError, VsMarkResult};
use crate::payload::{BasicPayload, Envelope, ManifestBody, ManifestPayload, Payload};
use crate::signature::{encode_signature, sign};
use crate::target::{find_targets, TargetPolicy};
use crate::timestamp::{normalize, TimestampInput};

/// Which payload shape to build (specification §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetadataFormat {
    #[default]
    Basic,
    Manifest,
}

/// Format-specific fields plus shared embedding controls for
/// [`embed_metadata`].
#[derive(Debug, Clone, Default)]
pub struct EmbedOptions {
    pub metadata_format: MetadataFormat,
    pub serialization_format: SerializationFormat,
    pub target: TargetPolicy,
    pub distribute_across_targets: bool,

    // basic fields
    pub model_id: Option<String>,
    pub generation_id: Option<String>,
    pub custom_metadata: Option<Map<String, Value>>,

    // manifest fields
    pub claim_generator: Option<String>,
    pub actions: Option<Vec<Map<String, Value>>>,
    pub ai_info: Option<Map<String, Value>>,
    pub custom_claims: Option<Map<String, Value>>,
}

/// Embed signed provenance metadata into `text`, returning the new text
/// with the outer envelope spliced in as a run of variation selectors.
///
/// See specification §4.5 for the full algorithm.
pub fn embed_metadata(
    text: &str,
    private_key: &SigningKey,
    signer_id: &str,
    timestamp: TimestampInput,
    options: EmbedOptions,
) -> VsMarkResult<String> {
    debug!(
        signer_id,
        target = ?options.target,
        distribute = options.distribute_across_targets,
        "embed_metadata called"
    );

    if signer_id.is_empty() {
        return Err(VsMarkError::InputValue(
            "a non-empty signer_id must be provided".into(),
        ));
    }

    let iso_timestamp = normalize(timestamp).map_err(|e| {
        error!(%e, "timestamp normalization failed");
        e
    })?;

    let payload = build_payload(signer_id, &iso_timestamp, &options);

    let inner_bytes = canonical_payload_bytes(&payload).map_err(|e| {
        error!(%e, "failed to canonically serialize inner payload");
        VsMarkError::Fatal(format!("failed to serialize metadata payload: {e}"))
    })?;

    let signature = sign(private_key, &inner_bytes);
    let signature_b64 = encode_signature(&signature);
    debug!(signature_prefix = &signature_b64[..signature_b64.len().min(10)], "payload signed");

    let envelope = Envelope::new(payload, signature_b64);

    let outer_bytes = serialize_outer(&envelope, options.serialization_format).map_err(|e| {
        error!(%e, "failed to serialize outer envelope");
        VsMarkError::Fatal(format!("failed to serialize outer payload: {e}"))
    })?;
    debug!(size = outer_bytes.len(), "serialized outer payload");

    let selector_chars = encode_bytes(&outer_bytes);
    if selector_chars.is_empty() {
        return Ok(text.to_string());
    }

    let target_indices = find_targets(text, options.target);
    debug!(count = target_indices.len(), "found embedding targets");

    if target_indices.is_empty() {
        let msg = format!(
            "no suitable targets found in text using target {:?}. \
             need at least one target to embed metadata of length {}",
            options.target,
            selector_chars.chars().count()
        );
        error!(%msg);
        return Err(VsMarkError::Capacity(msg));
    }

    let result = if options.distribute_across_targets {
        splice_distributed(text, &target_indices, &selector_chars)?
    } else {
        splice_single_point(text, target_indices[0], &selector_chars)
    };

    info!(signer_id, "metadata embedded successfully");
    Ok(result)
}

fn build_payload(signer_id: &str, timestamp: &str, options: &EmbedOptions) -> Payload {
    match options.metadata_format {
        MetadataFormat::Basic => Payload::Basic(BasicPayload::new(
            signer_id,
            timestamp,
            options.model_id.clone(),
            options.generation_id.clone(),
            options.custom_metadata.clone(),
        )),
        MetadataFormat::Manifest => {
            let body = ManifestBody {
                claim_generator: options.claim_generator.clone(),
                actions: options.actions.clone(),
                ai_info: options.ai_info.clone(),
                custom_claims: options.custom_claims.clone(),
            }
            .with_merged_model_id(options.model_id.clone());

            Payload::Manifest(ManifestPayload {
                signer_id: signer_id.to_string(),
                timestamp: timestamp.to_string(),
                manifest: body,
            })
        }
    }
}

fn splice_single_point(text: &str, target_index: usize, selector_chars: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut result = String::with_capacity(text.len() + selector_chars.len());
    result.extend(&chars[..=target_index]);
    result.push_str(selector_chars);
    result.extend(&chars[target_index + 1..]);
    result
}

fn splice_distributed(
    text: &str,
    target_indices: &[usize],
    selector_chars: &str,
) -> VsMarkResult<String> {
    let selectors: Vec<char> = selector_chars.chars().collect();
    if target_indices.len() < selectors.len() {
        let msg = format!(
            "not enough targets ({}) found in text to embed metadata of length {}. required: {}",
            target_indices.len(),
            selectors.len(),
            selectors.len()
        );
        error!(%msg);
        return Err(VsMarkError::Capacity(msg));
    }

    let chars: Vec<char> = text.chars().collect();
    let mut result = String::with_capacity(text.len() + selector_chars.len());
    let mut last_idx = 0usize;

    for (selector_idx, &target_idx) in target_indices.iter().enumerate() {
        if selector_idx >= selectors.len() {
            break;
        }
        result.extend(&chars[last_idx..=target_idx]);
        result.push(selectors[selector_idx]);
        last_idx = target_idx + 1;
    }
    result.extend(&chars[last_idx..]);

    Ok(result)
}
