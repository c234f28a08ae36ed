//! Contacts domain module (invoice recipients).

pub mod contact;

pub use contact::{Contact, ContactDetails, ContactDraft, EditRecipient, resolve_edit_recipient};
