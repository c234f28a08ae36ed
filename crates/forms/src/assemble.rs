//! Turns an accepted form snapshot into encrypted envelopes.

use chrono::Utc;
use rust_decimal::Decimal;
use thiserror::Error;

use facture_config::SettingsStore;
use facture_core::{ContactId, InvoiceId};
use facture_crypto::{CryptoError, EncryptionGateway, Envelope, SecretKey};
use facture_invoicing::{Discount, InvoiceContent, InvoiceStatus, Tax, totals};

use crate::snapshot::{FormSnapshot, RecipientSelection};

/// Assembly can only fail at the crypto boundary; everything else about an
/// accepted snapshot is deterministic.
#[derive(Debug, Error)]
pub enum AssembleError {
    #[error(transparent)]
    Crypto(#[from] CryptoError),
}

/// The two envelopes produced by one save, plus whether the recipient was
/// created inline (and therefore still needs a create-contact command).
#[derive(Debug, Clone)]
pub struct AssembledDocuments {
    pub invoice: Envelope,
    pub recipient: Envelope,
    pub recipient_created: bool,
}

/// Builds invoice and recipient documents, computes the derived financial
/// fields, and delegates content encoding to the [`EncryptionGateway`].
pub struct InvoiceAssembler<'a> {
    gateway: &'a EncryptionGateway,
    settings: &'a SettingsStore,
}

impl<'a> InvoiceAssembler<'a> {
    pub fn new(gateway: &'a EncryptionGateway, settings: &'a SettingsStore) -> Self {
        Self { gateway, settings }
    }

    pub fn assemble(
        &self,
        form: &FormSnapshot,
        key: &SecretKey,
    ) -> Result<AssembledDocuments, AssembleError> {
        let now = Utc::now();
        let required = &form.settings.required_fields;

        // Resolve the recipient first: a fresh inline contact gets its
        // identity here (once, for good); an existing pick reuses its stored
        // envelope verbatim. The standalone contact envelope carries only
        // the details; the id lives on the envelope, not in the ciphertext.
        let (recipient, recipient_envelope, recipient_created) = match &form.recipient {
            RecipientSelection::New(draft) => {
                let contact = draft.clone().into_contact(ContactId::new(), now);
                let envelope =
                    self.gateway
                        .seal(*contact.id.as_uuid(), None, &contact.details, key)?;
                (contact, envelope, true)
            }
            RecipientSelection::Existing { contact, envelope } => {
                (contact.clone(), envelope.clone(), false)
            }
        };

        let discount = required.discount.then(|| Discount {
            kind: form.discount.kind,
            amount: form.discount.amount,
        });
        let tax = required.tax.then(|| Tax {
            amount: form.tax.amount.unwrap_or(Decimal::ZERO),
            method: form.tax.method,
        });

        // Derived totals are never trusted from the caller.
        let subtotal = totals::subtotal(&form.rows);
        let grand_total = totals::grand_total(subtotal, discount.as_ref(), tax.as_ref());

        let currency = if required.currency {
            form.currency.clone()
        } else {
            self.settings.invoice().currency.clone()
        };

        let edit = form.settings.edit.as_ref();
        let (id, revision) = match edit {
            Some(ctx) => (ctx.id, ctx.revision.clone()),
            None => (InvoiceId::new(), None),
        };
        let created_at = match edit {
            // The form's explicit stamp wins only when it differs from the
            // stored one.
            Some(ctx) => form
                .created_at
                .filter(|stamp| *stamp != ctx.created_at)
                .unwrap_or(ctx.created_at),
            None => now,
        };
        let status = edit.map_or(InvoiceStatus::Pending, |ctx| ctx.status);

        let content = InvoiceContent {
            rows: form.rows.clone(),
            recipient,
            invoice_number: required
                .invoice_number
                .then(|| form.invoice_number.clone()),
            due_date: required.due_date.then(|| form.due_date.clone()),
            currency,
            discount,
            tax,
            note: required.note.then(|| form.note.content.clone()),
            payment: required.payment.then(|| form.payment.clone()),
            status,
            subtotal,
            grand_total,
            created_at,
            updated_at: now,
        };

        let invoice = self.gateway.seal(*id.as_uuid(), revision, &content, key)?;

        tracing::debug!(
            invoice_id = %invoice.id(),
            edit = edit.is_some(),
            recipient_created,
            "assembled invoice and recipient envelopes"
        );

        Ok(AssembledDocuments {
            invoice,
            recipient: recipient_envelope,
            recipient_created,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, Utc};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    use facture_config::{MemoryBackend, SettingsStore};
    use facture_contacts::{Contact, ContactDraft};
    use facture_crypto::{Decrypted, InMemoryTransport};
    use facture_invoicing::{
        CurrencyFormat, DiscountKind, DueDate, LineItem, PaymentTerms, RequiredFields, TaxMethod,
    };

    use super::*;
    use crate::snapshot::{EditContext, FormDiscount, FormSettings, FormTax, Note};

    fn gateway() -> EncryptionGateway {
        EncryptionGateway::new(Arc::new(InMemoryTransport::new()))
    }

    fn settings_store() -> SettingsStore {
        SettingsStore::load(Arc::new(MemoryBackend::new())).unwrap()
    }

    fn key() -> SecretKey {
        SecretKey::new("session-key")
    }

    fn draft() -> ContactDraft {
        ContactDraft {
            fullname: "Grace Hopper".into(),
            email: "grace@navy.mil".into(),
            company: Some("US Navy".into()),
            ..ContactDraft::default()
        }
    }

    fn snapshot() -> FormSnapshot {
        FormSnapshot {
            invoice_number: "2026-001".into(),
            recipient: RecipientSelection::New(draft()),
            rows: vec![
                LineItem::new("design", dec!(10), dec!(2)),
                LineItem::new("review", dec!(5), dec!(1)),
            ],
            due_date: DueDate::default(),
            currency: CurrencyFormat {
                code: "EUR".into(),
                ..CurrencyFormat::default()
            },
            discount: FormDiscount::default(),
            tax: FormTax::default(),
            note: Note {
                content: "thanks".into(),
            },
            payment: PaymentTerms {
                details: "wire to IBAN".into(),
            },
            created_at: None,
            settings: FormSettings::default(),
        }
    }

    fn open_invoice(gateway: &EncryptionGateway, envelope: &Envelope) -> InvoiceContent {
        let opened: Decrypted<InvoiceContent> = gateway.open(envelope, &key()).unwrap();
        opened.document
    }

    #[test]
    fn new_invoice_gets_fresh_identity_and_no_revision() {
        let gateway = gateway();
        let store = settings_store();
        let assembler = InvoiceAssembler::new(&gateway, &store);

        let docs = assembler.assemble(&snapshot(), &key()).unwrap();
        assert_ne!(docs.invoice.id(), Uuid::nil());
        assert_eq!(docs.invoice.revision(), None);
        assert!(docs.recipient_created);

        let content = open_invoice(&gateway, &docs.invoice);
        assert_eq!(content.status, InvoiceStatus::Pending);
        assert_eq!(content.subtotal, dec!(25));
        assert_eq!(content.grand_total, dec!(25));
    }

    #[test]
    fn edit_save_carries_identity_revision_status_and_created_at() {
        let gateway = gateway();
        let store = settings_store();
        let assembler = InvoiceAssembler::new(&gateway, &store);

        let original_created = Utc::now() - Duration::days(30);
        let mut form = snapshot();
        let edit_id = InvoiceId::new();
        form.settings.edit = Some(EditContext {
            id: edit_id,
            revision: Some("7-f00".into()),
            status: InvoiceStatus::Paid,
            created_at: original_created,
        });
        form.created_at = Some(original_created);

        let docs = assembler.assemble(&form, &key()).unwrap();
        assert_eq!(docs.invoice.id(), *edit_id.as_uuid());
        assert_eq!(docs.invoice.revision(), Some("7-f00"));

        let content = open_invoice(&gateway, &docs.invoice);
        assert_eq!(content.status, InvoiceStatus::Paid);
        assert_eq!(content.created_at, original_created);
        assert!(content.updated_at > original_created);
    }

    #[test]
    fn explicit_created_at_change_wins_on_edit() {
        let gateway = gateway();
        let store = settings_store();
        let assembler = InvoiceAssembler::new(&gateway, &store);

        let stored = Utc::now() - Duration::days(10);
        let overridden = stored - Duration::days(5);
        let mut form = snapshot();
        form.settings.edit = Some(EditContext {
            id: InvoiceId::new(),
            revision: Some("2-aa".into()),
            status: InvoiceStatus::Pending,
            created_at: stored,
        });
        form.created_at = Some(overridden);

        let content = open_invoice(&gateway, &assembler.assemble(&form, &key()).unwrap().invoice);
        assert_eq!(content.created_at, overridden);
    }

    #[test]
    fn inline_recipient_content_excludes_the_id() {
        let gateway = gateway();
        let store = settings_store();
        let assembler = InvoiceAssembler::new(&gateway, &store);

        let docs = assembler.assemble(&snapshot(), &key()).unwrap();
        let raw: Decrypted<serde_json::Value> = gateway.open(&docs.recipient, &key()).unwrap();
        let object = raw.document.as_object().unwrap();
        assert!(!object.contains_key("id"));
        assert_eq!(object["fullname"], "Grace Hopper");

        // The invoice content embeds the same contact *with* its id.
        let content = open_invoice(&gateway, &docs.invoice);
        assert_eq!(*content.recipient.id.as_uuid(), docs.recipient.id());
    }

    #[test]
    fn existing_recipient_envelope_is_reused_without_reencryption() {
        let gateway = gateway();
        let store = settings_store();
        let assembler = InvoiceAssembler::new(&gateway, &store);

        let contact: Contact = draft().into_contact(facture_core::ContactId::new(), Utc::now());
        let stored = Envelope::new(*contact.id.as_uuid(), Some("4-bb".into()), "opaque");
        let mut form = snapshot();
        form.recipient = RecipientSelection::Existing {
            contact,
            envelope: stored.clone(),
        };

        let docs = assembler.assemble(&form, &key()).unwrap();
        assert_eq!(docs.recipient, stored);
        assert!(!docs.recipient_created);
    }

    #[test]
    fn optional_fields_follow_the_required_toggles() {
        let gateway = gateway();
        let store = settings_store();
        let assembler = InvoiceAssembler::new(&gateway, &store);

        // Everything off: only the always-on fields survive; currency falls
        // back to the configured default.
        let form = snapshot();
        let content = open_invoice(&gateway, &assembler.assemble(&form, &key()).unwrap().invoice);
        assert_eq!(content.invoice_number, None);
        assert_eq!(content.due_date, None);
        assert_eq!(content.discount, None);
        assert_eq!(content.tax, None);
        assert_eq!(content.note, None);
        assert_eq!(content.payment, None);
        assert_eq!(content.currency, store.invoice().currency);

        // Everything on: the form values come through.
        let mut form = snapshot();
        form.settings.required_fields = RequiredFields {
            invoice_number: true,
            due_date: true,
            currency: true,
            discount: true,
            tax: true,
            note: true,
            payment: true,
        };
        form.discount = FormDiscount {
            kind: DiscountKind::Flat,
            amount: dec!(10),
        };
        form.tax = FormTax {
            amount: Some(dec!(10)),
            method: TaxMethod::Exclusive,
        };
        let content = open_invoice(&gateway, &assembler.assemble(&form, &key()).unwrap().invoice);
        assert_eq!(content.invoice_number.as_deref(), Some("2026-001"));
        assert_eq!(content.note.as_deref(), Some("thanks"));
        assert_eq!(content.currency.code, "EUR");
        // 25 - 10 = 15, plus 10% tax.
        assert_eq!(content.subtotal, dec!(25));
        assert_eq!(content.grand_total, dec!(16.5));
    }
}
