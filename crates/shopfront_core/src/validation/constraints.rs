//! Reusable single-value constraints.
//!
//! These are independent of the product entity and can back any field rule.

use rust_decimal::Decimal;

pub const MULTIPLE_OF_THREE_MESSAGE: &str = "The value must be a multiple of three.";

/// Loosely typed input accepted by generic constraints.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstraintValue {
    Integer(i64),
    Decimal(Decimal),
    Double(f64),
    Text(String),
    Bool(bool),
}

/// Accepts values whose remainder modulo three is exactly zero.
///
/// An absent value is valid; presence is a separate required-value check.
/// Non-numeric inputs are always invalid.
pub fn multiple_of_three(value: Option<&ConstraintValue>) -> bool {
    match value {
        None => true,
        Some(ConstraintValue::Integer(value)) => value % 3 == 0,
        Some(ConstraintValue::Decimal(value)) => (*value % Decimal::from(3)).is_zero(),
        Some(ConstraintValue::Double(value)) => value % 3.0 == 0.0,
        Some(ConstraintValue::Text(_)) | Some(ConstraintValue::Bool(_)) => false,
    }
}
