use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Persisted wrapper around an encrypted document.
///
/// Identity and revision stay in the clear for the persistence collaborator
/// (revision carries its optimistic-concurrency token); everything else is
/// ciphertext. Envelopes are immutable values: a new revision means a new
/// envelope, never mutation of a shared one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    id: Uuid,
    /// `None` until the document has been persisted for the first time.
    revision: Option<String>,
    content: String,
}

impl Envelope {
    pub fn new(id: Uuid, revision: Option<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            revision,
            content: content.into(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn revision(&self) -> Option<&str> {
        self.revision.as_deref()
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Input to a batch seal: either a document still to be encrypted, or an
/// envelope that already carries ciphertext and must pass through unchanged
/// (e.g. when migrating a mixed store where some records are already
/// encrypted).
#[derive(Debug, Clone)]
pub enum DocumentSource<T> {
    Sealed(Envelope),
    Plain {
        id: Uuid,
        revision: Option<String>,
        document: T,
    },
}

/// A successfully decoded document together with its envelope identity.
///
/// Built as a fresh value; the envelope itself is never written back into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decrypted<T> {
    pub id: Uuid,
    pub revision: Option<String>,
    pub document: T,
}

/// Outcome of a batch decrypt.
///
/// `recovered` preserves input order and skips undecodable entries, matching
/// what callers of the old silent-filter contract saw; `failed` names the
/// envelopes that were dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchDecrypt<T> {
    pub recovered: Vec<Decrypted<T>>,
    pub failed: Vec<Uuid>,
}

impl<T> BatchDecrypt<T> {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

impl<T> Default for BatchDecrypt<T> {
    fn default() -> Self {
        Self {
            recovered: Vec::new(),
            failed: Vec::new(),
        }
    }
}
