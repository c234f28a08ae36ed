use std::sync::Arc;

use uuid::Uuid;

use facture_config::ProfileSettings;
use facture_crypto::Envelope;

/// Outbound command emitted by an accepted transaction.
///
/// Persistence commands carry finished envelopes; the UI-side commands tell
/// the external layers what to do next. Each command fires exactly once per
/// accepted request, with no internal retries.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Persist a brand-new invoice envelope.
    CreateInvoice(Envelope),
    /// Persist a new revision of an existing invoice envelope.
    UpdateInvoice(Envelope),
    /// Persist an inline-created contact envelope.
    CreateContact(Envelope),
    /// Reset the invoice form to its defaults.
    ResetForm,
    /// Switch the UI to the invoice list.
    NavigateToInvoices,
    /// The preview window must re-render with a new issuer profile.
    ChangePreviewProfile(ProfileSettings),
    /// The UI locale changed.
    ChangeLocale(String),
    /// A fresh, identified row for the invoice form.
    AddFormRow { id: Uuid },
}

/// Consumer of outbound commands (persistence + UI collaborators).
///
/// Dispatch is fire-and-forget: delivery concerns belong to the
/// implementation, not the orchestrator.
pub trait CommandSink {
    fn dispatch(&self, command: Command);
}

impl<S> CommandSink for Arc<S>
where
    S: CommandSink + ?Sized,
{
    fn dispatch(&self, command: Command) {
        (**self).dispatch(command)
    }
}
