use serde::{Deserialize, Serialize};

/// Key-derivation parameters held by the crypto service.
///
/// Fetched once per session; the validation token lets the login layer check
/// a candidate passphrase without decrypting real documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptionSettings {
    pub iv: String,
    pub salt: String,
    pub validation_token: String,
}

impl EncryptionSettings {
    pub fn new(
        iv: impl Into<String>,
        salt: impl Into<String>,
        validation_token: impl Into<String>,
    ) -> Self {
        Self {
            iv: iv.into(),
            salt: salt.into(),
            validation_token: validation_token.into(),
        }
    }
}
