//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**: two instances
/// with the same attribute values are the same thing. Monetary adjustments
/// (`Discount`, `Tax`) and formatting descriptors (`CurrencyFormat`) are
/// value objects; `InvoiceContent` and `Contact` are entities.
///
/// To "modify" a value object, construct a new one with the new values.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
