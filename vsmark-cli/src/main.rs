//! # vsmark-cli
//!
//! Command-line interface for `vsmark-core` operations.
//!
//! ## Usage
//!
//! ```text
//! vsmark keygen
//! vsmark embed --signing-key key.b64 --signer-id demo "Hello World"
//! vsmark verify --public-key key.b64 --signer-id demo "Hello\u{FE01}World"
//! vsmark extract "Hello\u{FE01}World"
//! ```

use std::process;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use clap::{Parser, Subcommand};
use ed25519_dalek::{SigningKey, VerifyingKey};
use rand::rngs::OsRng;

use vsmark_core::canonical::SerializationFormat;
use vsmark_core::embed::{embed_metadata, EmbedOptions, MetadataFormat};
use vsmark_core::resolver::InMemoryResolver;
use vsmark_core::target::TargetPolicy;
use vsmark_core::verify::{extract_metadata, verify_metadata};

#[derive(Parser)]
#[command(name = "vsmark")]
#[command(about = "Variation-selector text provenance marking")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new Ed25519 keypair, printing base64 private/public keys.
    Keygen,

    /// Embed signed metadata into text, printing the marked text to stdout.
    Embed {
        /// Text to embed metadata into.
        text: String,
        /// Base64-encoded 32-byte Ed25519 private key.
        #[arg(long)]
        signing_key: String,
        /// Identifier for the signer, used to look up the verification key later.
        #[arg(long)]
        signer_id: String,
        /// ISO 8601 timestamp; defaults to the current time if omitted.
        #[arg(long)]
        timestamp: Option<String>,
        /// Anchor-position policy: whitespace, punctuation, first_letter, last_letter, all_characters.
        #[arg(long, default_value = "whitespace")]
        target: String,
        /// Transport encoding for the outer envelope: json, cbor, jumbf.
        #[arg(long, default_value = "json")]
        format: String,
        /// Spread the envelope across multiple anchors instead of one run.
        #[arg(long)]
        distribute: bool,
        /// Optional model identifier recorded in the payload.
        #[arg(long)]
        model_id: Option<String>,
    },

    /// Verify metadata embedded in text against a known public key.
    Verify {
        /// Text carrying an embedded envelope.
        text: String,
        /// Base64-encoded 32-byte Ed25519 public key.
        #[arg(long)]
        public_key: String,
        /// Signer identifier the public key is registered under.
        #[arg(long)]
        signer_id: String,
    },

    /// Extract embedded metadata without verifying the signature.
    Extract {
        /// Text carrying an embedded envelope.
        text: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Keygen => cmd_keygen(),
        Commands::Embed {
            text,
            signing_key,
            signer_id,
            timestamp,
            target,
            format,
            distribute,
            model_id,
        } => cmd_embed(
            &text,
            &signing_key,
            &signer_id,
            timestamp.as_deref(),
            &target,
            &format,
            distribute,
            model_id,
        ),
        Commands::Verify {
            text,
            public_key,
            signer_id,
        } => cmd_verify(&text, &public_key, &signer_id),
        Commands::Extract { text } => cmd_extract(&text),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn cmd_keygen() -> Result<(), String> {
    let signing_key = SigningKey::generate(&mut OsRng);
    let verifying_key = signing_key.verifying_key();

    println!("private_key: {}", STANDARD.encode(signing_key.to_bytes()));
    println!("public_key:  {}", STANDARD.encode(verifying_key.to_bytes()));
    Ok(())
}

fn decode_signing_key(b64: &str) -> Result<SigningKey, String> {
    let bytes = STANDARD
        .decode(b64)
        .map_err(|e| format!("invalid base64 private key: {e}"))?;
    let array: [u8; 32] = bytes
        .try_into()
        .map_err(|_| "private key must decode to exactly 32 bytes".to_string())?;
    Ok(SigningKey::from_bytes(&array))
}

fn decode_verifying_key(b64: &str) -> Result<VerifyingKey, String> {
    let bytes = STANDARD
        .decode(b64)
        .map_err(|e| format!("invalid base64 public key: {e}"))?;
    let array: [u8; 32] = bytes
        .try_into()
        .map_err(|_| "public key must decode to exactly 32 bytes".to_string())?;
    VerifyingKey::from_bytes(&array).map_err(|e| format!("invalid public key: {e}"))
}

#[allow(clippy::too_many_arguments)]
fn cmd_embed(
    text: &str,
    signing_key_b64: &str,
    signer_id: &str,
    timestamp: Option<&str>,
    target: &str,
    format: &str,
    distribute: bool,
    model_id: Option<String>,
) -> Result<(), String> {
    let signing_key = decode_signing_key(signing_key_b64)?;
    let target_policy = TargetPolicy::parse(target).map_err(|e| e.to_string())?;
    let serialization_format = SerializationFormat::parse(format).map_err(|e| e.to_string())?;
    let timestamp = timestamp.unwrap_or("1970-01-01T00:00:00Z");

    let options = EmbedOptions {
        metadata_format: MetadataFormat::Basic,
        serialization_format,
        target: target_policy,
        distribute_across_targets: distribute,
        model_id,
        ..Default::default()
    };

    let marked = embed_metadata(text, &signing_key, signer_id, timestamp.into(), options)
        .map_err(|e| e.to_string())?;
    println!("{marked}");
    Ok(())
}

fn cmd_verify(text: &str, public_key_b64: &str, signer_id: &str) -> Result<(), String> {
    let verifying_key = decode_verifying_key(public_key_b64)?;
    let resolver = InMemoryResolver::new().with_key(signer_id, verifying_key);

    let (payload, valid, resolved_signer_id) = verify_metadata(text, &resolver, true);

    if valid {
        println!("VALID");
    } else {
        println!("INVALID");
    }
    if let Some(id) = resolved_signer_id {
        println!("signer_id: {id}");
    }
    if let Some(payload) = payload {
        let json = serde_json::to_string_pretty(&payload).map_err(|e| e.to_string())?;
        println!("{json}");
    }

    if !valid {
        process::exit(2);
    }
    Ok(())
}

fn cmd_extract(text: &str) -> Result<(), String> {
    match extract_metadata(text) {
        Some(payload) => {
            let json = serde_json::to_string_pretty(&payload).map_err(|e| e.to_string())?;
            println!("{json}");
            Ok(())
        }
        None => {
            eprintln!("no embedded metadata found");
            process::exit(2);
        }
    }
}
