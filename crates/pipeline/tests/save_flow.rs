//! Black-box save flow: real gateway + in-memory collaborators, asserting
//! on what the external layers would actually receive.

use std::sync::{Arc, Mutex};

use rust_decimal_macros::dec;

use facture_config::{MemoryBackend, SettingsStore};
use facture_contacts::ContactDraft;
use facture_crypto::{Decrypted, EncryptionGateway, InMemoryTransport, SecretKey};
use facture_forms::snapshot::{FormDiscount, FormSettings, FormSnapshot, FormTax, Note, RecipientSelection};
use facture_forms::Notifier;
use facture_invoicing::{
    CurrencyFormat, DiscountKind, DueDate, InvoiceContent, LineItem, PaymentTerms, TaxMethod,
};
use facture_pipeline::{Command, CommandSink, Outcome, Request, TransactionOrchestrator};

#[derive(Default)]
struct CollectingSink {
    commands: Mutex<Vec<Command>>,
}

impl CommandSink for CollectingSink {
    fn dispatch(&self, command: Command) {
        self.commands.lock().unwrap().push(command);
    }
}

#[derive(Default)]
struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn violation(&self, _title: &str, _message: &str) {}

    fn success(&self, _message: &str) {}
}

fn form() -> FormSnapshot {
    FormSnapshot {
        invoice_number: "INV-0042".into(),
        recipient: RecipientSelection::New(ContactDraft {
            fullname: "Maya Chen".into(),
            email: "maya@chen.studio.com".into(),
            company: Some("Chen Studio".into()),
            ..ContactDraft::default()
        }),
        rows: vec![
            LineItem::new("branding sprint", dec!(50), dec!(2)),
            LineItem::new("site build", dec!(100), dec!(1)),
        ],
        due_date: DueDate::default(),
        currency: CurrencyFormat::default(),
        discount: FormDiscount {
            kind: DiscountKind::Flat,
            amount: dec!(20),
        },
        tax: FormTax {
            amount: Some(dec!(10)),
            method: TaxMethod::Exclusive,
        },
        note: Note::default(),
        payment: PaymentTerms::default(),
        created_at: None,
        settings: FormSettings {
            required_fields: facture_invoicing::RequiredFields {
                invoice_number: true,
                discount: true,
                tax: true,
                ..facture_invoicing::RequiredFields::default()
            },
            edit: None,
        },
    }
}

#[test]
fn accepted_save_produces_envelopes_the_external_layers_can_decode() {
    facture_observability::init_with_filter("warn");

    let transport = Arc::new(InMemoryTransport::new());
    let gateway = EncryptionGateway::new(transport);
    let settings = SettingsStore::load(Arc::new(MemoryBackend::new())).unwrap();
    let sink = Arc::new(CollectingSink::default());
    let key = SecretKey::new("black-box-session");

    let mut orchestrator =
        TransactionOrchestrator::new(gateway.clone(), settings, sink.clone(), SilentNotifier);

    let outcome = orchestrator
        .process(Request::SaveInvoice {
            snapshot: form(),
            secret_key: key.clone(),
        })
        .unwrap();
    assert_eq!(outcome, Outcome::Accepted);

    let commands = sink.commands.lock().unwrap();
    assert_eq!(commands.len(), 3);

    // The persistence collaborator receives a decodable invoice envelope
    // with the derived totals already applied: 200 - 20 = 180, + 10% = 198.
    let Command::CreateInvoice(invoice_envelope) = &commands[0] else {
        panic!("expected create-invoice first, got {:?}", commands[0]);
    };
    assert_eq!(invoice_envelope.revision(), None);
    let invoice: Decrypted<InvoiceContent> = gateway.open(invoice_envelope, &key).unwrap();
    assert_eq!(invoice.document.subtotal, dec!(200));
    assert_eq!(invoice.document.grand_total, dec!(198));
    assert_eq!(invoice.document.invoice_number.as_deref(), Some("INV-0042"));
    assert_eq!(invoice.document.rows.len(), 2);

    // The contact envelope decodes too, and its content has no id field.
    let Command::CreateContact(contact_envelope) = &commands[1] else {
        panic!("expected create-contact second, got {:?}", commands[1]);
    };
    let contact: Decrypted<serde_json::Value> = gateway.open(contact_envelope, &key).unwrap();
    assert_eq!(contact.document["fullname"], "Maya Chen");
    assert!(contact.document.get("id").is_none());
    assert_eq!(
        *invoice.document.recipient.id.as_uuid(),
        contact_envelope.id()
    );

    assert_eq!(commands[2], Command::ResetForm);

    // A wrong session key cannot open what was just persisted.
    assert!(
        gateway
            .open::<InvoiceContent>(invoice_envelope, &SecretKey::new("other"))
            .is_none()
    );
}

#[test]
fn rejected_save_reaches_no_external_layer() {
    facture_observability::init_with_filter("warn");

    let gateway = EncryptionGateway::new(Arc::new(InMemoryTransport::new()));
    let settings = SettingsStore::load(Arc::new(MemoryBackend::new())).unwrap();
    let sink = Arc::new(CollectingSink::default());

    let mut orchestrator =
        TransactionOrchestrator::new(gateway, settings, sink.clone(), SilentNotifier);

    let mut snapshot = form();
    snapshot.recipient = RecipientSelection::New(ContactDraft {
        fullname: "No Mail".into(),
        email: "user@domain".into(),
        ..ContactDraft::default()
    });

    let outcome = orchestrator
        .process(Request::SaveInvoice {
            snapshot,
            secret_key: SecretKey::new("k"),
        })
        .unwrap();
    assert_eq!(outcome, Outcome::Rejected);
    assert!(sink.commands.lock().unwrap().is_empty());
}
