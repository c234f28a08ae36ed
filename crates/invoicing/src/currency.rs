use serde::{Deserialize, Serialize};

use facture_core::ValueObject;

/// Where the currency symbol sits relative to the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolPlacement {
    Before,
    After,
}

/// Grouping/decimal separator style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DigitSeparator {
    CommaDot,
    DotComma,
    SpaceDot,
}

/// How an amount is rendered: ISO code plus formatting hints.
///
/// `fraction` is the number of digits after the decimal point and must never
/// be negative; totals themselves are kept at full precision, so this only
/// drives validation and the (external) preview layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    pub code: String,
    pub placement: SymbolPlacement,
    pub separator: DigitSeparator,
    pub fraction: i32,
}

impl ValueObject for CurrencyFormat {}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            code: "USD".to_string(),
            placement: SymbolPlacement::Before,
            separator: DigitSeparator::CommaDot,
            fraction: 2,
        }
    }
}
