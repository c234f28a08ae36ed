use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use facture_contacts::Contact;
use facture_core::{Entity, ValueObject};

use crate::currency::CurrencyFormat;

/// Invoice status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
    Refunded,
    Cancelled,
}

/// One billed line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: Uuid,
    pub description: String,
    pub price: Decimal,
    pub quantity: Decimal,
}

impl LineItem {
    pub fn new(description: impl Into<String>, price: Decimal, quantity: Decimal) -> Self {
        Self {
            id: Uuid::now_v7(),
            description: description.into(),
            price,
            quantity,
        }
    }

    pub fn amount(&self) -> Decimal {
        self.price * self.quantity
    }
}

impl Entity for LineItem {
    type Id = Uuid;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Due date selection: either a named payment term or a custom date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DueDate {
    #[serde(default)]
    pub use_custom: bool,
    #[serde(default)]
    pub selected_date: Option<NaiveDate>,
    #[serde(default)]
    pub payment_term: Option<String>,
}

impl ValueObject for DueDate {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    Flat,
    Percentage,
}

/// Price reduction applied to the subtotal, before tax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discount {
    pub kind: DiscountKind,
    pub amount: Decimal,
}

impl Discount {
    /// Amount remaining after this discount.
    pub fn apply(&self, amount: Decimal) -> Decimal {
        match self.kind {
            DiscountKind::Flat => amount - self.amount,
            DiscountKind::Percentage => amount - amount * self.amount / Decimal::ONE_HUNDRED,
        }
    }
}

impl ValueObject for Discount {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxMethod {
    /// Tax is added on top of the discounted amount.
    Exclusive,
    /// Tax is already contained in the prices; the total is unchanged.
    Inclusive,
}

/// Tax rate (percent) applied to the discounted amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tax {
    pub amount: Decimal,
    pub method: TaxMethod,
}

impl Tax {
    pub fn apply(&self, amount: Decimal) -> Decimal {
        match self.method {
            TaxMethod::Exclusive => amount + amount * self.amount / Decimal::ONE_HUNDRED,
            TaxMethod::Inclusive => amount,
        }
    }
}

impl ValueObject for Tax {}

/// How the invoice is to be paid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentTerms {
    #[serde(default)]
    pub details: String,
}

impl ValueObject for PaymentTerms {}

/// The plaintext invoice document: the payload that gets ciphered into an
/// envelope. Identity and revision live on the envelope, not in here.
///
/// Optional fields are present only when their [`crate::RequiredFields`]
/// toggle was on at assembly time; currency is always present (form value or
/// configured default). Subtotal and grand total are recomputed on every
/// assembly, never trusted from a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceContent {
    pub rows: Vec<LineItem>,
    pub recipient: Contact,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DueDate>,
    pub currency: CurrencyFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<Discount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax: Option<Tax>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentTerms>,
    pub status: InvoiceStatus,
    pub subtotal: Decimal,
    pub grand_total: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
