use serde::{Deserialize, Serialize};

/// Per-installation toggles controlling which optional invoice fields are
/// mandatory, and therefore both validated and included during assembly.
///
/// Recipient and rows are always validated; they have no toggle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequiredFields {
    pub invoice_number: bool,
    pub due_date: bool,
    pub currency: bool,
    pub discount: bool,
    pub tax: bool,
    pub note: bool,
    pub payment: bool,
}
