//! Text carrier adapter: the in-crate stand-in for the reference's PDF
//! document-info-key transport (specification §4.8).
//!
//! The real PDF byte format is out of scope; this module only commits
//! to the *contract* a carrier must satisfy -- storing and retrieving
//! an embedded-text string verbatim -- so the embedder/verifier pair
//! has a concrete, testable consumer.

use std::collections::HashMap;

/// A channel that round-trips an embedded-text string verbatim.
pub trait TextCarrier {
    type Handle;

    /// Store `embedded_text` and return a handle to retrieve it later.
    fn store(&mut self, embedded_text: &str) -> Self::Handle;

    /// Retrieve previously stored text by handle, or `None` if unknown.
    fn retrieve(&self, handle: &Self::Handle) -> Option<String>;
}

/// An in-memory carrier keyed by document-info-style string handles,
/// modeling the reference's `/EncypherMetadata` document-info key.
#[derive(Debug, Default)]
pub struct InMemoryCarrier {
    documents: HashMap<String, String>,
    next_id: u64,
}

impl InMemoryCarrier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TextCarrier for InMemoryCarrier {
    type Handle = String;

    fn store(&mut self, embedded_text: &str) -> Self::Handle {
        let handle = format!("doc-info:{}", self.next_id);
        self.next_id += 1;
        self.documents.insert(handle.clone(), embedded_text.to_string());
        handle
    }

    fn retrieve(&self, handle: &Self::Handle) -> Option<String> {
        self.documents.get(handle).cloned()
    }
}
