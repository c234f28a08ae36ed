use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use facture_core::{ContactId, Entity};

/// The encrypted content of a contact record.
///
/// The contact's id lives only on its envelope, never inside the ciphered
/// payload. Envelope identity is the single source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub fullname: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A contact with its identity attached.
///
/// This is the shape embedded inside invoice content, and what callers get
/// after joining an envelope with its decrypted details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    #[serde(flatten)]
    pub details: ContactDetails,
}

impl Entity for Contact {
    type Id = ContactId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// New-recipient form data, before any identity is assigned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDraft {
    #[serde(default)]
    pub fullname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl ContactDraft {
    /// True when the user has not typed anything into the new-recipient form.
    pub fn is_blank(&self) -> bool {
        self.fullname.is_empty()
            && self.email.is_empty()
            && self.company.is_none()
            && self.phone.is_none()
            && self.address.is_none()
    }

    /// Assign identity and a creation time. Identity is assigned exactly
    /// once; it persists across all later edits.
    pub fn into_contact(self, id: ContactId, created_at: DateTime<Utc>) -> Contact {
        Contact {
            id,
            details: ContactDetails {
                fullname: self.fullname,
                email: self.email,
                company: self.company,
                phone: self.phone,
                address: self.address,
                created_at,
            },
        }
    }
}

/// How a saved invoice's embedded recipient maps onto the current contact
/// list when the invoice is loaded for editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditRecipient {
    /// The recipient still exists in the contact list; reference it by id.
    Existing(ContactId),
    /// The recipient was deleted since; prefill a new-recipient draft.
    New(ContactDraft),
}

/// Decide between referencing an existing contact and prefilling a draft.
///
/// Only the user-editable fields are carried into the draft; identity and
/// creation time are assigned again if the draft is eventually saved.
pub fn resolve_edit_recipient(contacts: &[Contact], current: &Contact) -> EditRecipient {
    if contacts.iter().any(|contact| contact.id == current.id) {
        return EditRecipient::Existing(current.id);
    }
    EditRecipient::New(ContactDraft {
        fullname: current.details.fullname.clone(),
        email: current.details.email.clone(),
        company: current.details.company.clone(),
        phone: current.details.phone.clone(),
        address: current.details.address.clone(),
    })
}
