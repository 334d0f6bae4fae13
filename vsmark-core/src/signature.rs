//! Ed25519 signing and verification, plus a typed classification for
//! the other asymmetric key shapes a [`crate::resolver::KeyResolver`]
//! might hand back.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};

use crate::error::{VsMarkError, VsMarkResult};

/// Classifies a public key returned by a [`crate::resolver::KeyResolver`].
///
/// The verifier only ever accepts [`PublicKeyKind::Ed25519`]; every
/// other variant exists solely so the resolver boundary can report
/// "wrong key type" instead of forcing every caller to depend on every
/// asymmetric-key crate a resolver backend might use.
#[derive(Debug, Clone)]
pub enum PublicKeyKind {
    Ed25519(VerifyingKey),
    /// Some other asymmetric key type, named for diagnostics (e.g. `"rsa"`, `"ecdsa"`).
    Other(&'static str),
}

impl PublicKeyKind {
    pub fn as_ed25519(&self) -> Option<&VerifyingKey> {
        match self {
            PublicKeyKind::Ed25519(k) => Some(k),
            PublicKeyKind::Other(_) => None,
        }
    }
}

/// Sign `message` with an Ed25519 private key.
pub fn sign(private_key: &SigningKey, message: &[u8]) -> Vec<u8> {
    private_key.sign(message).to_bytes().to_vec()
}

/// Verify an Ed25519 signature over `message`.
///
/// Returns `Ok(false)` for an invalid signature; only returns `Err` if
/// `signature_bytes` is not a well-formed 64-byte Ed25519 signature.
pub fn verify(
    public_key: &VerifyingKey,
    message: &[u8],
    signature_bytes: &[u8],
) -> VsMarkResult<bool> {
    let sig_array: [u8; 64] = signature_bytes
        .try_into()
        .map_err(|_| VsMarkError::Fatal("signature must be exactly 64 bytes".into()))?;
    let signature = Signature::from_bytes(&sig_array);
    Ok(public_key.verify(message, &signature).is_ok())
}

/// Encode raw signature bytes as URL-safe base64 with padding stripped,
/// per the wire format.
pub fn encode_signature(signature_bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(signature_bytes)
}

/// Decode a URL-safe base64 signature, restoring the `=` padding the
/// wire format strips before decoding.
pub fn decode_signature(encoded: &str) -> VsMarkResult<Vec<u8>> {
    let padded = restore_padding(encoded);
    base64::engine::general_purpose::URL_SAFE
        .decode(&padded)
        .map_err(|e| VsMarkError::Fatal(format!("invalid base64 signature: {e}")))
}

fn restore_padding(s: &str) -> String {
    let rem = s.len() % 4;
    if rem == 0 {
        s.to_string()
    } else {
        format!("{s}{}", "=".repeat(4 - rem))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn test_keypair(seed: u8) -> (SigningKey, VerifyingKey) {
        let sk = SigningKey::from_bytes(&[seed; 32]);
        let vk = sk.verifying_key();
        (sk, vk)
    }

    #[test]
    fn sign_and_verify_roundtrip() {
        let (sk, vk) = test_keypair(1);
        let sig = sign(&sk, b"hello world");
        assert!(verify(&vk, b"hello world", &sig).unwrap());
    }

    #[test]
    fn verify_rejects_tampered_message() {
        let (sk, vk) = test_keypair(2);
        let sig = sign(&sk, b"original");
        assert!(!verify(&vk, b"tampered", &sig).unwrap());
    }

    #[test]
    fn verify_rejects_wrong_key() {
        let (sk, _) = test_keypair(3);
        let (_, wrong_vk) = test_keypair(4);
        let sig = sign(&sk, b"message");
        assert!(!verify(&wrong_vk, b"message", &sig).unwrap());
    }

    #[test]
    fn verify_malformed_signature_length_errors() {
        let (_, vk) = test_keypair(5);
        let result = verify(&vk, b"message", &[0u8; 10]);
        assert!(result.is_err());
    }

    #[test]
    fn signature_encoding_strips_padding() {
        let (sk, _) = test_keypair(6);
        let sig = sign(&sk, b"x");
        let encoded = encode_signature(&sig);
        assert!(!encoded.contains('='));
    }

    #[test]
    fn decode_signature_without_padding_roundtrips() {
        let (sk, _) = test_keypair(7);
        let sig = sign(&sk, b"padding test message");
        let encoded = encode_signature(&sig);
        let decoded = decode_signature(&encoded).unwrap();
        assert_eq!(decoded, sig);
    }

    #[test]
    fn decode_signature_rejects_garbage() {
        assert!(decode_signature("not valid base64!!").is_err());
    }

    #[test]
    fn public_key_kind_distinguishes_ed25519() {
        let (_, vk) = test_keypair(8);
        let kind = PublicKeyKind::Ed25519(vk);
        assert!(kind.as_ed25519().is_some());
        let other = PublicKeyKind::Other("rsa");
        assert!(other.as_ed25519().is_none());
    }
}
