use thiserror::Error;

/// Configuration store failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A stored section does not match its typed shape.
    #[error("failed to decode settings at '{path}': {reason}")]
    Decode { path: String, reason: String },

    /// A typed section could not be turned back into a stored value.
    #[error("failed to encode settings at '{path}': {reason}")]
    Encode { path: String, reason: String },

    /// The backing store rejected a write.
    #[error("settings backend failure: {0}")]
    Backend(String),
}

impl ConfigError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}
