//! # vsmark-core
//!
//! Codec and signature envelope for embedding cryptographically signed
//! provenance metadata into plain text using Unicode variation
//! selectors -- code points that attach to a preceding base character
//! and produce no additional visible glyph in conformant renderers.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`codec`] | Byte <-> variation-selector bijection |
//! | [`payload`] | Inner payload (`basic`/`manifest`) and outer envelope schemas |
//! | [`canonical`] | Deterministic serialization for signing and transport |
//! | [`signature`] | Ed25519 sign/verify and base64url signature encoding |
//! | [`target`] | Anchor-position policies over host text |
//! | [`timestamp`] | Timestamp normalization to `YYYY-MM-DDTHH:MM:SSZ` |
//! | [`resolver`] | `KeyResolver` trait and an in-memory implementation |
//! | [`embed`] | Builds, signs, and splices the outer envelope into text |
//! | [`verify`] | Extracts and verifies embedded metadata |
//! | [`carrier`] | Text-carrier adapter contract (PDF transport stand-in) |
//! | [`error`] | Error types |
//!
//! ## Quick Start
//!
//! ```rust
//! use ed25519_dalek::SigningKey;
//! use vsmark_core::embed::{embed_metadata, EmbedOptions};
//! use vsmark_core::resolver::InMemoryResolver;
//! use vsmark_core::verify::verify_metadata;
//!
//! let signing_key = SigningKey::from_bytes(&[1u8; 32]);
//! let verifying_key = signing_key.verifying_key();
//!
//! let embedded = embed_metadata(
//!     "Hello World",
//!     &signing_key,
//!     "demo",
//!     "2024-01-01T00:00:00Z".into(),
//!     EmbedOptions::default(),
//! )
//! .unwrap();
//!
//! let resolver = InMemoryResolver::new().with_key("demo", verifying_key);
//! let (payload, valid, signer_id) = verify_metadata(&embedded, &resolver, false);
//! assert!(valid);
//! assert_eq!(signer_id.as_deref(), Some("demo"));
//! assert!(payload.is_some());
//! ```

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod canonical;
pub mod carrier;
pub mod codec;
pub mod embed;
pub mod error;
pub mod payload;
pub mod resolver;
pub mod signature;
pub mod target;
pub mod timestamp;
pub mod verify;

pub use canonical::SerializationFormat;
pub use embed::{embed_metadata, EmbedOptions, MetadataFormat};
pub use error::{VsMarkError, VsMarkResult};
pub use payload::{BasicPayload, Envelope, ManifestBody, ManifestPayload, Payload};
pub use resolver::KeyResolver;
pub use signature::PublicKeyKind;
pub use target::TargetPolicy;
pub use timestamp::TimestampInput;
pub use verify::{extract_metadata, verify_metadata};
