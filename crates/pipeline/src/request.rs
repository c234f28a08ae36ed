use facture_config::{AppSettings, InvoiceSettings};
use facture_crypto::SecretKey;
use facture_forms::FormSnapshot;

/// One inbound transaction request.
///
/// Requests represent **intent**; the orchestrator either rejects them
/// (validation) or turns them into an exactly-once sequence of outbound
/// [`crate::Command`]s.
#[derive(Debug, Clone)]
pub enum Request {
    /// Save the current invoice form, creating or updating an invoice.
    SaveInvoice {
        snapshot: FormSnapshot,
        secret_key: SecretKey,
    },
    /// Save the full settings form (profile + invoice + general).
    SaveSettings { settings: AppSettings },
    /// Persist only the invoice defaults section (inline form-settings
    /// panel).
    SaveInvoiceDefaults { invoice: InvoiceSettings },
    /// Add an empty row to the invoice form; the orchestrator allocates its
    /// identity.
    AddLineItem,
}
