//! Derived financial fields.
//!
//! Order matters: discount first, then tax on the discounted amount.

use rust_decimal::Decimal;

use crate::invoice::{Discount, LineItem, Tax};

/// `Σ price × quantity` over all rows.
pub fn subtotal(rows: &[LineItem]) -> Decimal {
    rows.iter().map(LineItem::amount).sum()
}

/// Apply discount, then tax, to a subtotal.
pub fn grand_total(subtotal: Decimal, discount: Option<&Discount>, tax: Option<&Tax>) -> Decimal {
    let discounted = discount.map_or(subtotal, |d| d.apply(subtotal));
    tax.map_or(discounted, |t| t.apply(discounted))
}
