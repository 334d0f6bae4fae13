//! Error types for `vsmark-core`.
//!
//! All fallible operations return [`VsMarkError`] through the standard
//! [`Result`] alias [`VsMarkResult`]. Verification failures are *not*
//! modeled as errors -- `verify_metadata` returns a three-tuple verdict
//! instead (see [`crate::verify`]); this enum covers precondition
//! violations and internal failures of the embed/verify pipeline itself.

use std::fmt;

/// Convenience alias used throughout the crate.
pub type VsMarkResult<T> = Result<T, VsMarkError>;

/// Errors raised by the embed/verify/extract pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VsMarkError {
    /// A parameter has the wrong type or shape.
    #[error("input type error: {0}")]
    InputType(String),

    /// A parameter value is invalid: missing required field, invalid
    /// enum, bad timestamp, invalid target policy, unresolvable
    /// custom-key collision, and so on.
    #[error("input value error: {0}")]
    InputValue(String),

    /// There were not enough anchor positions in the host text for the
    /// requested embedding, or none at all.
    #[error("capacity error: {0}")]
    Capacity(String),

    /// A cryptographic primitive or serializer failed unexpectedly.
    #[error("fatal error: {0}")]
    Fatal(String),
}

impl From<serde_json::Error> for VsMarkError {
    fn from(err: serde_json::Error) -> Self {
        VsMarkError::Fatal(format!("json error: {err}"))
    }
}

/// Classifies why a verification attempt did not succeed. Verification
/// never raises a [`VsMarkError`] on authentication failure; this is an
/// auxiliary classification for callers who want a reason beyond the
/// plain boolean verdict returned by [`crate::verify::verify_metadata`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationFailure {
    /// No variation-selector run was found in the text.
    NoEmbeddedData,
    /// The embedded bytes did not deserialize into a valid outer envelope.
    Malformed,
    /// The key resolver returned `None` or raised for this `signer_id`.
    UnknownSigner,
    /// The key resolver returned a key that is not Ed25519.
    UnsupportedKeyType,
    /// The signature field was not valid base64.
    BadSignatureEncoding,
    /// The Ed25519 signature did not verify against the payload.
    InvalidSignature,
}

impl fmt::Display for VerificationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            VerificationFailure::NoEmbeddedData => "no embedded data",
            VerificationFailure::Malformed => "malformed envelope",
            VerificationFailure::UnknownSigner => "unknown signer",
            VerificationFailure::UnsupportedKeyType => "unsupported key type",
            VerificationFailure::BadSignatureEncoding => "bad signature encoding",
            VerificationFailure::InvalidSignature => "invalid signature",
        };
        f.write_str(label)
    }
}
