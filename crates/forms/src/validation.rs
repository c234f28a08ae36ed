//! Ordered, fail-fast validation of a form snapshot.
//!
//! Rules run in a fixed order; the first violation raises a notification
//! and stops evaluation. Optional fields whose required-toggle is off are
//! skipped entirely.

use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::Decimal;

use facture_invoicing::{CurrencyFormat, DueDate, LineItem, PaymentTerms};

use crate::notify::Notifier;
use crate::snapshot::{FormDiscount, FormSnapshot, FormTax, Note, RecipientSelection};

/// Local part of word/dot/dash characters, one-or-more dot-separated domain
/// labels, 2–4 letter top-level label.
pub fn is_valid_email(email: &str) -> bool {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^([a-zA-Z0-9_.\-])+@(([a-zA-Z0-9\-])+\.)+[a-zA-Z]{2,4}$").unwrap()
    });
    regex.is_match(email)
}

/// Pure rule set over a form snapshot.
///
/// `validate` returns whether the snapshot may be saved; the outcome of a
/// failed run is a single violation notification, nothing else.
pub struct ValidationEngine<'a> {
    notifier: &'a dyn Notifier,
}

impl<'a> ValidationEngine<'a> {
    pub fn new(notifier: &'a dyn Notifier) -> Self {
        Self { notifier }
    }

    pub fn validate(&self, form: &FormSnapshot) -> bool {
        let required = &form.settings.required_fields;
        if !self.check_invoice_number(required.invoice_number, &form.invoice_number) {
            return false;
        }
        if !self.check_recipient(&form.recipient) {
            return false;
        }
        if !self.check_rows(&form.rows) {
            return false;
        }
        if !self.check_due_date(required.due_date, &form.due_date) {
            return false;
        }
        if !self.validate_currency(required.currency, &form.currency) {
            return false;
        }
        if !self.check_discount(required.discount, &form.discount) {
            return false;
        }
        if !self.validate_tax(required.tax, &form.tax) {
            return false;
        }
        if !self.check_note(required.note, &form.note) {
            return false;
        }
        self.check_payment(required.payment, &form.payment)
    }

    fn reject(&self, title: &str, message: &str) -> bool {
        self.notifier.violation(title, message);
        false
    }

    fn check_invoice_number(&self, is_required: bool, number: &str) -> bool {
        if is_required && number.is_empty() {
            return self.reject(
                "Invoice number required",
                "Please give this invoice a number.",
            );
        }
        true
    }

    fn check_recipient(&self, recipient: &RecipientSelection) -> bool {
        // Existing contacts were validated when they were created.
        let RecipientSelection::New(draft) = recipient else {
            return true;
        };
        if draft.is_blank() {
            return self.reject(
                "Recipient is empty",
                "Please fill in the recipient or pick an existing contact.",
            );
        }
        if draft.fullname.is_empty() || draft.email.is_empty() {
            return self.reject(
                "Recipient fields missing",
                "A recipient needs at least a full name and an email address.",
            );
        }
        if !is_valid_email(&draft.email) {
            return self.reject(
                "Invalid email address",
                "The recipient email address does not look valid.",
            );
        }
        true
    }

    fn check_rows(&self, rows: &[LineItem]) -> bool {
        // The first offending row stops the scan.
        for row in rows {
            if row.description.is_empty() {
                return self.reject(
                    "Row description missing",
                    "Every row needs a description.",
                );
            }
            if row.price <= Decimal::ZERO {
                return self.reject(
                    "Row price invalid",
                    "Every row needs a price greater than zero.",
                );
            }
            if row.quantity <= Decimal::ZERO {
                return self.reject(
                    "Row quantity invalid",
                    "Every row needs a quantity greater than zero.",
                );
            }
        }
        true
    }

    fn check_due_date(&self, is_required: bool, due_date: &DueDate) -> bool {
        if is_required && due_date.use_custom && due_date.selected_date.is_none() {
            return self.reject("Due date missing", "Please choose a due date.");
        }
        true
    }

    /// Also used standalone by the settings save path, where the field is
    /// always treated as required.
    pub fn validate_currency(&self, is_required: bool, currency: &CurrencyFormat) -> bool {
        if is_required && currency.fraction < 0 {
            return self.reject(
                "Currency fraction invalid",
                "Fraction digits cannot be negative.",
            );
        }
        true
    }

    fn check_discount(&self, is_required: bool, discount: &FormDiscount) -> bool {
        if is_required && discount.amount.is_zero() {
            return self.reject("Discount missing", "Please enter a discount amount.");
        }
        true
    }

    /// Also used standalone by the settings save path, where the field is
    /// always treated as required.
    pub fn validate_tax(&self, is_required: bool, tax: &FormTax) -> bool {
        if is_required && !tax.amount.is_some_and(|amount| amount >= Decimal::ZERO) {
            return self.reject("Tax missing", "Please enter a tax amount of zero or more.");
        }
        true
    }

    fn check_note(&self, is_required: bool, note: &Note) -> bool {
        if is_required && note.content.is_empty() {
            return self.reject("Note missing", "Please write the note.");
        }
        true
    }

    fn check_payment(&self, is_required: bool, payment: &PaymentTerms) -> bool {
        if is_required && payment.details.is_empty() {
            return self.reject("Payment details missing", "Please fill in the payment details.");
        }
        true
    }
}
