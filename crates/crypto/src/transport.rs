use std::sync::RwLock;
use std::time::Duration;

use crate::error::CryptoError;
use crate::key::SecretKey;
use crate::settings::EncryptionSettings;

/// Blocking round-trip to the external crypto service.
///
/// One request per document; the caller suspends for the duration of each
/// call. Volume per transaction is small (one invoice, one optional
/// recipient), so atomicity of envelope construction wins over throughput.
/// Every call carries an explicit deadline; implementations must give up
/// with [`CryptoError::Timeout`] rather than block forever.
pub trait CipherTransport: Send + Sync {
    /// Encrypt a JSON-serialized plaintext document. Fatal on failure.
    fn encrypt(
        &self,
        message: &str,
        key: &SecretKey,
        timeout: Duration,
    ) -> Result<String, CryptoError>;

    /// Decrypt ciphertext back to the JSON plaintext.
    ///
    /// Returns `None` when the content cannot be decoded (wrong key,
    /// corrupt record). Non-exceptional by contract; callers must check.
    fn decrypt(&self, content: &str, key: &SecretKey, timeout: Duration) -> Option<String>;

    /// Fetch the key-derivation parameters.
    fn settings(&self, timeout: Duration) -> Result<EncryptionSettings, CryptoError>;

    /// Replace the key-derivation parameters.
    fn update_settings(
        &self,
        settings: &EncryptionSettings,
        timeout: Duration,
    ) -> Result<(), CryptoError>;
}

/// In-memory reversible transport.
///
/// "Ciphertext" is the key followed by the plaintext, so a wrong key or a
/// corrupt record simply fails to decode. Intended for tests/dev; this is
/// not encryption.
#[derive(Debug)]
pub struct InMemoryTransport {
    stored: RwLock<EncryptionSettings>,
}

impl InMemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for InMemoryTransport {
    fn default() -> Self {
        Self {
            stored: RwLock::new(EncryptionSettings::new("iv", "salt", "token")),
        }
    }
}

impl CipherTransport for InMemoryTransport {
    fn encrypt(
        &self,
        message: &str,
        key: &SecretKey,
        _timeout: Duration,
    ) -> Result<String, CryptoError> {
        if key.is_empty() {
            return Err(CryptoError::service("refusing to encrypt with an empty key"));
        }
        Ok(format!("{}|{}", key.expose(), message))
    }

    fn decrypt(&self, content: &str, key: &SecretKey, _timeout: Duration) -> Option<String> {
        content
            .strip_prefix(&format!("{}|", key.expose()))
            .map(str::to_owned)
    }

    fn settings(&self, _timeout: Duration) -> Result<EncryptionSettings, CryptoError> {
        Ok(self.stored.read().unwrap().clone())
    }

    fn update_settings(
        &self,
        settings: &EncryptionSettings,
        _timeout: Duration,
    ) -> Result<(), CryptoError> {
        *self.stored.write().unwrap() = settings.clone();
        Ok(())
    }
}
