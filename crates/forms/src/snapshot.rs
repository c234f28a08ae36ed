use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use facture_contacts::{Contact, ContactDraft};
use facture_core::InvoiceId;
use facture_crypto::Envelope;
use facture_invoicing::{
    CurrencyFormat, DiscountKind, DueDate, InvoiceStatus, LineItem, PaymentTerms, RequiredFields,
    TaxMethod,
};

/// Which recipient the form points at.
#[derive(Debug, Clone)]
pub enum RecipientSelection {
    /// A new recipient typed inline into the form.
    New(ContactDraft),
    /// An existing contact chosen from the list, together with its stored
    /// envelope. The envelope is reused verbatim on save, without
    /// re-encryption.
    Existing { contact: Contact, envelope: Envelope },
}

/// Discount widget state. A zero amount means nothing was typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormDiscount {
    pub kind: DiscountKind,
    pub amount: Decimal,
}

impl Default for FormDiscount {
    fn default() -> Self {
        Self {
            kind: DiscountKind::Flat,
            amount: Decimal::ZERO,
        }
    }
}

/// Tax widget state. The amount stays `None` until the user types one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormTax {
    pub amount: Option<Decimal>,
    pub method: TaxMethod,
}

impl Default for FormTax {
    fn default() -> Self {
        Self {
            amount: None,
            method: TaxMethod::Exclusive,
        }
    }
}

/// Free-text note widget state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Note {
    pub content: String,
}

/// Identity and carried-over fields of the invoice being edited.
///
/// Revision is whatever the persistence collaborator last handed out;
/// it is never invented here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditContext {
    pub id: InvoiceId,
    pub revision: Option<String>,
    pub status: InvoiceStatus,
    pub created_at: DateTime<Utc>,
}

/// Form-level settings: which optional fields are mandatory, and whether
/// this save edits an existing invoice.
#[derive(Debug, Clone, Default)]
pub struct FormSettings {
    pub required_fields: RequiredFields,
    pub edit: Option<EditContext>,
}

/// Everything the user has put into the invoice form, frozen for one save
/// attempt.
#[derive(Debug, Clone)]
pub struct FormSnapshot {
    /// User-assigned invoice number; empty while the input is blank.
    pub invoice_number: String,
    pub recipient: RecipientSelection,
    pub rows: Vec<LineItem>,
    pub due_date: DueDate,
    pub currency: CurrencyFormat,
    pub discount: FormDiscount,
    pub tax: FormTax,
    pub note: Note,
    pub payment: PaymentTerms,
    /// Editable creation stamp; on edit it wins over the stored one only
    /// when the user actually changed it.
    pub created_at: Option<DateTime<Utc>>,
    pub settings: FormSettings,
}
