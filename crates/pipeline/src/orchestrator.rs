use thiserror::Error;
use uuid::Uuid;

use facture_config::{AppSettings, ConfigError, InvoiceSettings, SettingsStore};
use facture_crypto::{EncryptionGateway, SecretKey};
use facture_forms::assemble::{AssembleError, InvoiceAssembler};
use facture_forms::{FormSnapshot, FormTax, Notifier, ValidationEngine};

use crate::command::{Command, CommandSink};
use crate::request::Request;
use crate::state::PipelineState;

/// Failure of an accepted request at a boundary.
///
/// Validation rejections are not errors; they come back as
/// [`Outcome::Rejected`] after the violation notification has fired.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The crypto service failed while sealing envelopes. Fatal to the
    /// current action; nothing was persisted.
    #[error(transparent)]
    Assemble(#[from] AssembleError),

    /// The settings backend failed. Already-written sections stay written;
    /// the cached view never runs ahead of the backend.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// How a request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Accepted,
    Rejected,
}

/// Sequences validation, assembly, persistence commands and notifications
/// as one atomic multi-document operation.
///
/// Single logical thread of control: `process` takes `&mut self`, so one
/// request is fully handled (validate → assemble → command emission) before
/// the next can start. Gateway calls are blocking round-trips; once
/// validation passes, the remaining steps run to completion (no
/// cancellation, no retry).
pub struct TransactionOrchestrator<S, N>
where
    S: CommandSink,
    N: Notifier,
{
    gateway: EncryptionGateway,
    settings: SettingsStore,
    sink: S,
    notifier: N,
    state: PipelineState,
}

impl<S, N> TransactionOrchestrator<S, N>
where
    S: CommandSink,
    N: Notifier,
{
    pub fn new(gateway: EncryptionGateway, settings: SettingsStore, sink: S, notifier: N) -> Self {
        Self {
            gateway,
            settings,
            sink,
            notifier,
            state: PipelineState::Idle,
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Read access to the loaded settings (the UI settings tab reads these).
    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    /// Handle one request to completion.
    pub fn process(&mut self, request: Request) -> Result<Outcome, PipelineError> {
        let result = match request {
            Request::SaveInvoice {
                snapshot,
                secret_key,
            } => self.save_invoice(&snapshot, &secret_key),
            Request::SaveSettings { settings } => self.save_settings(settings),
            Request::SaveInvoiceDefaults { invoice } => self.save_invoice_defaults(invoice),
            Request::AddLineItem => {
                self.sink.dispatch(Command::AddFormRow { id: Uuid::now_v7() });
                Ok(Outcome::Accepted)
            }
        };
        // Whatever happened, the pipeline is ready for the next request.
        self.enter(PipelineState::Idle);
        result
    }

    fn enter(&mut self, state: PipelineState) {
        self.state = state;
        tracing::debug!(state = state.as_str(), "pipeline transition");
    }

    fn save_invoice(
        &mut self,
        snapshot: &FormSnapshot,
        secret_key: &SecretKey,
    ) -> Result<Outcome, PipelineError> {
        self.enter(PipelineState::Validating);
        if !ValidationEngine::new(&self.notifier).validate(snapshot) {
            tracing::info!("invoice save rejected by validation");
            return Ok(Outcome::Rejected);
        }

        self.enter(PipelineState::Assembling);
        let assembled =
            InvoiceAssembler::new(&self.gateway, &self.settings).assemble(snapshot, secret_key)?;

        let editing = snapshot.settings.edit.is_some();
        let invoice_id = assembled.invoice.id();

        self.enter(PipelineState::Persisting);
        if editing {
            self.sink.dispatch(Command::UpdateInvoice(assembled.invoice));
        } else {
            self.sink.dispatch(Command::CreateInvoice(assembled.invoice));
        }
        if assembled.recipient_created {
            self.sink
                .dispatch(Command::CreateContact(assembled.recipient));
        }

        self.enter(PipelineState::Notifying);
        self.sink.dispatch(Command::ResetForm);
        if editing {
            self.sink.dispatch(Command::NavigateToInvoices);
        }

        tracing::info!(invoice_id = %invoice_id, editing, "invoice save accepted");
        Ok(Outcome::Accepted)
    }

    fn save_settings(&mut self, incoming: AppSettings) -> Result<Outcome, PipelineError> {
        self.enter(PipelineState::Validating);
        let engine = ValidationEngine::new(&self.notifier);
        let tax = FormTax {
            amount: Some(incoming.invoice.tax.amount),
            method: incoming.invoice.tax.method,
        };
        // Tax and currency constraints always apply on the settings form.
        if !engine.validate_tax(true, &tax)
            || !engine.validate_currency(true, &incoming.invoice.currency)
        {
            tracing::info!("settings save rejected by validation");
            return Ok(Outcome::Rejected);
        }

        self.enter(PipelineState::Persisting);
        if *self.settings.profile() != incoming.profile {
            self.sink
                .dispatch(Command::ChangePreviewProfile(incoming.profile.clone()));
        }
        if self.settings.general().language != incoming.general.language {
            self.sink
                .dispatch(Command::ChangeLocale(incoming.general.language.clone()));
        }
        self.settings.set_profile(incoming.profile)?;
        self.settings.set_invoice(incoming.invoice)?;
        self.settings.set_general(incoming.general)?;

        self.enter(PipelineState::Notifying);
        self.notifier.success("Settings saved");

        tracing::info!("settings save accepted");
        Ok(Outcome::Accepted)
    }

    fn save_invoice_defaults(&mut self, invoice: InvoiceSettings) -> Result<Outcome, PipelineError> {
        self.enter(PipelineState::Persisting);
        self.settings.set_invoice(invoice)?;

        self.enter(PipelineState::Notifying);
        self.notifier.success("Settings saved");
        Ok(Outcome::Accepted)
    }
}
