//! Typed configuration over an external key-value store.
//!
//! The raw store is an external collaborator reached through the
//! [`SettingsBackend`] port. [`SettingsStore`] loads the three settings
//! sections once at startup and mutates them only through explicit setters
//! that write through and report success or failure.

pub mod backend;
pub mod error;
pub mod sections;
pub mod store;

pub use backend::{MemoryBackend, SettingsBackend};
pub use error::ConfigError;
pub use sections::{AppSettings, GeneralSettings, InvoiceSettings, ProfileSettings};
pub use store::SettingsStore;
