//! Extractor / verifier: recovers the outer envelope from host text,
//! resolves the signer's key, and checks the signature.

use tracing::{debug, info, warn};

use crate::canonical::{canonical_payload_bytes, deserialize_outer};
use crate::codec::decode_bytes;
use crate::error::VerificationFailure;
use crate::payload::{Envelope, Payload};
use crate::resolver::KeyResolver;
use crate::signature::{decode_signature, verify as verify_signature};

/// Extract the inner payload without verifying its signature.
///
/// Returns `None` if no embedded data is found or it fails to parse as
/// a valid outer envelope. Never raises.
pub fn extract_metadata(text: &str) -> Option<Payload> {
    extract_envelope(text).map(|env| env.payload)
}

fn extract_envelope(text: &str) -> Option<Envelope> {
    let bytes = decode_bytes(text);
    if bytes.is_empty() {
        debug!("no variation selector bytes found in text");
        return None;
    }
    debug!(size = bytes.len(), "extracted bytes from variation selectors");
    let envelope: Envelope = deserialize_outer(&bytes)?;
    Some(envelope)
}

/// Verify embedded metadata against a [`KeyResolver`].
///
/// Returns `(payload, true, signer_id)` on success. On any failure the
/// second element is `false`; the payload is `None` unless
/// `return_payload_on_failure` is set, and the `signer_id` is present
/// whenever extraction got far enough to read it. Never raises on
/// authentication failure -- see specification §4.6 / §7.
pub fn verify_metadata(
    text: &str,
    resolver: &dyn KeyResolver,
    return_payload_on_failure: bool,
) -> (Option<Payload>, bool, Option<String>) {
    let (payload, valid, signer_id, _reason) =
        verify_metadata_outcome(text, resolver, return_payload_on_failure);
    (payload, valid, signer_id)
}

/// Same as [`verify_metadata`] but also returns the classified
/// [`VerificationFailure`] reason on failure (`None` on success).
pub fn verify_metadata_outcome(
    text: &str,
    resolver: &dyn KeyResolver,
    return_payload_on_failure: bool,
) -> (
    Option<Payload>,
    bool,
    Option<String>,
    Option<VerificationFailure>,
) {
    debug!(len = text.len(), "verify_metadata called");

    let Some(envelope) = extract_envelope(text) else {
        return (None, false, None, Some(VerificationFailure::NoEmbeddedData));
    };

    let signer_id = envelope.signer_id.clone();
    let payload = envelope.payload;

    let fail = |payload: Payload, reason: VerificationFailure| {
        let payload_out = if return_payload_on_failure {
            Some(payload)
        } else {
            None
        };
        (payload_out, false, Some(signer_id.clone()), Some(reason))
    };

    let Some(public_key_kind) = resolver.resolve(&signer_id) else {
        warn!(signer_id, "public key not found for signer");
        return fail(payload, VerificationFailure::UnknownSigner);
    };

    let Some(public_key) = public_key_kind.as_ed25519() else {
        warn!(signer_id, "resolver returned a non-ed25519 key");
        return fail(payload, VerificationFailure::UnsupportedKeyType);
    };

    let canonical_bytes = match canonical_payload_bytes(&payload) {
        Ok(bytes) => bytes,
        Err(_) => {
            warn!(signer_id, "failed to re-serialize inner payload");
            return fail(payload, VerificationFailure::Malformed);
        }
    };

    let signature_bytes = match decode_signature(&envelope.signature) {
        Ok(bytes) => bytes,
        Err(_) => {
            warn!(signer_id, "failed to decode base64 signature");
            return fail(payload, VerificationFailure::BadSignatureEncoding);
        }
    };

    let is_valid = verify_signature(public_key, &canonical_bytes, &signature_bytes).unwrap_or(false);

    if is_valid {
        info!(signer_id, "signature verified successfully");
        (Some(payload), true, Some(signer_id), None)
    } else {
        warn!(signer_id, "signature verification failed");
        let (p, v, s, r) = fail(payload, VerificationFailure::InvalidSignature);
        (p, v, s, r)
    }
}
