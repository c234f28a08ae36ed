use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::backend::SettingsBackend;
use crate::error::ConfigError;
use crate::sections::{AppSettings, GeneralSettings, InvoiceSettings, ProfileSettings};

/// Section keys in the backing store.
pub const PROFILE: &str = "profile";
pub const INVOICE: &str = "invoice";
pub const GENERAL: &str = "general";

/// Typed view over the settings backend.
///
/// All sections are read once at construction; afterwards reads are served
/// from the cached copy and every mutation goes through a setter that
/// writes through to the backend first. A failed write leaves the cached
/// copy untouched.
pub struct SettingsStore {
    backend: Arc<dyn SettingsBackend>,
    current: AppSettings,
}

impl std::fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsStore")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

impl SettingsStore {
    /// Load all sections. Sections absent from the backend (first run)
    /// start from their defaults.
    pub fn load(backend: Arc<dyn SettingsBackend>) -> Result<Self, ConfigError> {
        let current = AppSettings {
            profile: read_section(backend.as_ref(), PROFILE)?,
            invoice: read_section(backend.as_ref(), INVOICE)?,
            general: read_section(backend.as_ref(), GENERAL)?,
        };
        Ok(Self { backend, current })
    }

    pub fn profile(&self) -> &ProfileSettings {
        &self.current.profile
    }

    pub fn invoice(&self) -> &InvoiceSettings {
        &self.current.invoice
    }

    pub fn general(&self) -> &GeneralSettings {
        &self.current.general
    }

    /// A full copy of what is currently stored.
    pub fn snapshot(&self) -> AppSettings {
        self.current.clone()
    }

    pub fn set_profile(&mut self, profile: ProfileSettings) -> Result<(), ConfigError> {
        write_section(self.backend.as_ref(), PROFILE, &profile)?;
        self.current.profile = profile;
        Ok(())
    }

    pub fn set_invoice(&mut self, invoice: InvoiceSettings) -> Result<(), ConfigError> {
        write_section(self.backend.as_ref(), INVOICE, &invoice)?;
        self.current.invoice = invoice;
        Ok(())
    }

    pub fn set_general(&mut self, general: GeneralSettings) -> Result<(), ConfigError> {
        write_section(self.backend.as_ref(), GENERAL, &general)?;
        self.current.general = general;
        Ok(())
    }
}

fn read_section<T>(backend: &dyn SettingsBackend, path: &str) -> Result<T, ConfigError>
where
    T: DeserializeOwned + Default,
{
    match backend.get(path) {
        None => Ok(T::default()),
        Some(value) => serde_json::from_value(value).map_err(|e| ConfigError::Decode {
            path: path.to_string(),
            reason: e.to_string(),
        }),
    }
}

fn write_section<T: Serialize>(
    backend: &dyn SettingsBackend,
    path: &str,
    section: &T,
) -> Result<(), ConfigError> {
    let value = serde_json::to_value(section).map_err(|e| ConfigError::Encode {
        path: path.to_string(),
        reason: e.to_string(),
    })?;
    backend.set(path, value)
}
