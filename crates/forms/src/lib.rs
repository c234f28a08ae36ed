//! The invoice form: snapshot, validation, assembly.
//!
//! A [`FormSnapshot`] is what the user has typed. [`validation`] decides
//! whether it can be saved; [`assemble`] turns an accepted snapshot into
//! encrypted envelopes.

pub mod assemble;
pub mod notify;
pub mod snapshot;
pub mod validation;

pub use assemble::{AssembleError, AssembledDocuments, InvoiceAssembler};
pub use notify::Notifier;
pub use snapshot::{
    EditContext, FormDiscount, FormSettings, FormSnapshot, FormTax, Note, RecipientSelection,
};
pub use validation::{ValidationEngine, is_valid_email};
