//! Invoicing domain module (invoice content, currency, derived totals).

pub mod currency;
pub mod invoice;
pub mod settings;
pub mod totals;

pub use currency::{CurrencyFormat, DigitSeparator, SymbolPlacement};
pub use invoice::{Discount, DiscountKind, DueDate, InvoiceContent, InvoiceStatus, LineItem, PaymentTerms, Tax, TaxMethod};
pub use settings::RequiredFields;
pub use totals::{grand_total, subtotal};
