use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::envelope::{BatchDecrypt, Decrypted, DocumentSource, Envelope};
use crate::error::CryptoError;
use crate::key::SecretKey;
use crate::settings::EncryptionSettings;
use crate::transport::CipherTransport;

/// Gateway tuning knobs.
#[derive(Debug, Clone, Copy)]
pub struct GatewayConfig {
    /// Deadline for each blocking round-trip to the crypto service.
    pub call_timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            call_timeout: Duration::from_secs(30),
        }
    }
}

/// Encodes and decodes document content through a [`CipherTransport`].
///
/// The gateway never retries: an encrypt failure is fatal to the current
/// action, a decrypt failure is an absent result.
#[derive(Clone)]
pub struct EncryptionGateway {
    transport: Arc<dyn CipherTransport>,
    config: GatewayConfig,
}

impl EncryptionGateway {
    pub fn new(transport: Arc<dyn CipherTransport>) -> Self {
        Self::with_config(transport, GatewayConfig::default())
    }

    pub fn with_config(transport: Arc<dyn CipherTransport>, config: GatewayConfig) -> Self {
        Self { transport, config }
    }

    /// Seal one plaintext document into an envelope.
    pub fn seal<T: Serialize>(
        &self,
        id: Uuid,
        revision: Option<String>,
        document: &T,
        key: &SecretKey,
    ) -> Result<Envelope, CryptoError> {
        let message = serde_json::to_string(document)
            .map_err(|e| CryptoError::Serialize(e.to_string()))?;
        let content = self
            .transport
            .encrypt(&message, key, self.config.call_timeout)?;
        Ok(Envelope::new(id, revision, content))
    }

    /// Seal a batch, passing already-sealed sources through unchanged.
    pub fn seal_batch<T: Serialize>(
        &self,
        sources: Vec<DocumentSource<T>>,
        key: &SecretKey,
    ) -> Result<Vec<Envelope>, CryptoError> {
        sources
            .into_iter()
            .map(|source| match source {
                DocumentSource::Sealed(envelope) => Ok(envelope),
                DocumentSource::Plain {
                    id,
                    revision,
                    document,
                } => self.seal(id, revision, &document, key),
            })
            .collect()
    }

    /// Decode a single envelope.
    ///
    /// `None` means the content could not be decrypted or parsed; the
    /// envelope identity travels with the document as a fresh value.
    pub fn open<T: DeserializeOwned>(
        &self,
        envelope: &Envelope,
        key: &SecretKey,
    ) -> Option<Decrypted<T>> {
        let plaintext = self
            .transport
            .decrypt(envelope.content(), key, self.config.call_timeout)?;
        match serde_json::from_str(&plaintext) {
            Ok(document) => Some(Decrypted {
                id: envelope.id(),
                revision: envelope.revision().map(str::to_owned),
                document,
            }),
            Err(e) => {
                tracing::warn!(envelope_id = %envelope.id(), "decrypted content is not a valid document: {e}");
                None
            }
        }
    }

    /// Decode a batch, reporting rather than hiding the losses.
    pub fn open_batch<T: DeserializeOwned>(
        &self,
        envelopes: &[Envelope],
        key: &SecretKey,
    ) -> BatchDecrypt<T> {
        let mut report = BatchDecrypt::default();
        for envelope in envelopes {
            match self.open(envelope, key) {
                Some(decrypted) => report.recovered.push(decrypted),
                None => {
                    tracing::warn!(envelope_id = %envelope.id(), "dropping undecryptable document from batch");
                    report.failed.push(envelope.id());
                }
            }
        }
        report
    }

    /// Decode an external blob (import path). No envelope identity exists
    /// here, so the document comes back bare.
    pub fn open_import<T: DeserializeOwned>(&self, blob: &str, key: &SecretKey) -> Option<T> {
        let plaintext = self
            .transport
            .decrypt(blob, key, self.config.call_timeout)?;
        serde_json::from_str(&plaintext).ok()
    }

    /// Key-derivation parameters, fetched once per session by callers.
    pub fn settings(&self) -> Result<EncryptionSettings, CryptoError> {
        self.transport.settings(self.config.call_timeout)
    }

    pub fn update_settings(&self, settings: &EncryptionSettings) -> Result<(), CryptoError> {
        self.transport
            .update_settings(settings, self.config.call_timeout)
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;
    use crate::transport::InMemoryTransport;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Doc {
        label: String,
        amount: i64,
    }

    fn gateway() -> EncryptionGateway {
        EncryptionGateway::new(Arc::new(InMemoryTransport::new()))
    }

    fn doc(label: &str) -> Doc {
        Doc {
            label: label.to_string(),
            amount: 7,
        }
    }

    #[test]
    fn seal_then_open_reproduces_document_fields() {
        let gateway = gateway();
        let key = SecretKey::new("k1");
        let id = Uuid::now_v7();

        let envelope = gateway.seal(id, None, &doc("coffee"), &key).unwrap();
        assert_eq!(envelope.id(), id);
        assert_eq!(envelope.revision(), None);
        assert!(envelope.content().starts_with("k1|"));

        let opened: Decrypted<Doc> = gateway.open(&envelope, &key).unwrap();
        assert_eq!(opened.id, id);
        assert_eq!(opened.revision, None);
        assert_eq!(opened.document, doc("coffee"));
    }

    #[test]
    fn open_with_wrong_key_is_none_not_error() {
        let gateway = gateway();
        let envelope = gateway
            .seal(Uuid::now_v7(), None, &doc("x"), &SecretKey::new("right"))
            .unwrap();

        let opened = gateway.open::<Doc>(&envelope, &SecretKey::new("wrong"));
        assert!(opened.is_none());
    }

    #[test]
    fn seal_batch_passes_presealed_envelopes_through_unchanged() {
        let gateway = gateway();
        let key = SecretKey::new("k1");
        let presealed = Envelope::new(Uuid::now_v7(), Some("3-abc".into()), "opaque-ciphertext");

        let envelopes = gateway
            .seal_batch(
                vec![
                    DocumentSource::Sealed(presealed.clone()),
                    DocumentSource::Plain {
                        id: Uuid::now_v7(),
                        revision: None,
                        document: doc("fresh"),
                    },
                ],
                &key,
            )
            .unwrap();

        assert_eq!(envelopes.len(), 2);
        assert_eq!(envelopes[0], presealed);
        assert!(envelopes[1].content().starts_with("k1|"));
    }

    #[test]
    fn open_batch_reports_the_corrupt_entry_and_keeps_the_rest_in_order() {
        let gateway = gateway();
        let key = SecretKey::new("k1");

        let first = gateway
            .seal(Uuid::now_v7(), None, &doc("one"), &key)
            .unwrap();
        let corrupt = Envelope::new(Uuid::now_v7(), None, "garbage");
        let third = gateway
            .seal(Uuid::now_v7(), None, &doc("three"), &key)
            .unwrap();

        let report: BatchDecrypt<Doc> =
            gateway.open_batch(&[first.clone(), corrupt.clone(), third.clone()], &key);

        assert!(!report.is_complete());
        assert_eq!(report.recovered.len(), 2);
        assert_eq!(report.recovered[0].document.label, "one");
        assert_eq!(report.recovered[1].document.label, "three");
        assert_eq!(report.failed, vec![corrupt.id()]);
    }

    #[test]
    fn open_import_returns_bare_document() {
        let gateway = gateway();
        let key = SecretKey::new("k1");
        let blob = format!("k1|{}", serde_json::to_string(&doc("imported")).unwrap());

        let imported: Doc = gateway.open_import(&blob, &key).unwrap();
        assert_eq!(imported, doc("imported"));

        assert!(gateway.open_import::<Doc>("k1|not json", &key).is_none());
    }

    #[test]
    fn settings_round_trip() {
        let gateway = gateway();
        assert_eq!(gateway.settings().unwrap().iv, "iv");

        let next = EncryptionSettings::new("iv1", "salt1", "tok1");
        gateway.update_settings(&next).unwrap();
        assert_eq!(gateway.settings().unwrap(), next);
    }
}
