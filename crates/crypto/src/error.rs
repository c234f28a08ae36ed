use std::time::Duration;

use thiserror::Error;

/// Failures on the encrypting side of the crypto boundary.
///
/// Decryption failures are deliberately *not* errors: a document that cannot
/// be decoded comes back as `None` (or as a `failed` entry in a batch
/// report). Encrypting, by contrast, is fatal to the current action and is
/// never retried here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// The crypto service rejected or failed the call.
    #[error("crypto service call failed: {0}")]
    Service(String),

    /// The blocking round-trip exceeded the configured deadline.
    #[error("crypto service call timed out after {0:?}")]
    Timeout(Duration),

    /// The plaintext document could not be JSON-serialized.
    #[error("failed to serialize document for encryption: {0}")]
    Serialize(String),
}

impl CryptoError {
    pub fn service(msg: impl Into<String>) -> Self {
        Self::Service(msg.into())
    }
}
