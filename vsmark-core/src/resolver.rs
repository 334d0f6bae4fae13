//! Key resolver abstraction: maps a `signer_id` to a public key.
//!
//! This is the Rust-trait form of the reference's ad-hoc
//! `public_key_provider` callable.

use std::collections::HashMap;

use ed25519_dalek::VerifyingKey;

use crate::signature::PublicKeyKind;

/// Resolves a `signer_id` to a public key, or `None` if the signer is
/// unknown. A resolver may be backed by a keystore, database, or
/// network lookup; `verify_metadata` invokes it synchronously on the
/// calling thread and treats any panic-free "not found" outcome as
/// verification failure, never as an error from the core itself.
pub trait KeyResolver {
    fn resolve(&self, signer_id: &str) -> Option<PublicKeyKind>;
}

impl<F> KeyResolver for F
where
    F: Fn(&str) -> Option<PublicKeyKind>,
{
    fn resolve(&self, signer_id: &str) -> Option<PublicKeyKind> {
        self(signer_id)
    }
}

/// A simple in-memory resolver backed by a map of `signer_id` to
/// Ed25519 public key, useful for tests and the CLI.
#[derive(Debug, Clone, Default)]
pub struct InMemoryResolver {
    keys: HashMap<String, VerifyingKey>,
}

impl InMemoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(mut self, signer_id: impl Into<String>, key: VerifyingKey) -> Self {
        self.keys.insert(signer_id.into(), key);
        self
    }

    pub fn insert(&mut self, signer_id: impl Into<String>, key: VerifyingKey) {
        self.keys.insert(signer_id.into(), key);
    }
}

impl KeyResolver for InMemoryResolver {
    fn resolve(&self, signer_id: &str) -> Option<PublicKeyKind> {
        self.keys.get(signer_id).copied().map(PublicKeyKind::Ed25519)
    }
}
