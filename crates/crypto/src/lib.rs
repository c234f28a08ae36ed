//! `facture-crypto` — the boundary to the external crypto service.
//!
//! Documents are persisted only as [`Envelope`]s: identity + revision in the
//! clear, content as ciphertext. This crate owns the envelope codec and the
//! blocking [`CipherTransport`] port; cipher internals live on the other side
//! of that port.

pub mod envelope;
pub mod error;
pub mod gateway;
pub mod key;
pub mod settings;
pub mod transport;

pub use envelope::{BatchDecrypt, Decrypted, DocumentSource, Envelope};
pub use error::CryptoError;
pub use gateway::{EncryptionGateway, GatewayConfig};
pub use key::SecretKey;
pub use settings::EncryptionSettings;
pub use transport::{CipherTransport, InMemoryTransport};
