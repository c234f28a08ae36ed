use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use facture_invoicing::{CurrencyFormat, RequiredFields, Tax, TaxMethod};

/// Issuer identity shown on the invoice header (preview layer reads this).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSettings {
    pub company: String,
    pub fullname: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
}

/// Defaults for new invoices plus the required-field toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceSettings {
    pub required_fields: RequiredFields,
    pub currency: CurrencyFormat,
    pub tax: Tax,
}

impl Default for InvoiceSettings {
    fn default() -> Self {
        Self {
            required_fields: RequiredFields::default(),
            currency: CurrencyFormat::default(),
            tax: Tax {
                amount: Decimal::ZERO,
                method: TaxMethod::Exclusive,
            },
        }
    }
}

/// Application-wide preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    pub language: String,
    pub muted: bool,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            muted: false,
        }
    }
}

/// All three settings sections at once, as loaded or as submitted by the
/// settings form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    pub profile: ProfileSettings,
    pub invoice: InvoiceSettings,
    pub general: GeneralSettings,
}
