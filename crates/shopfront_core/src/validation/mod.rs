//! Declarative field validation.
//!
//! # Responsibility
//! - Evaluate tables of `(field, predicate, message)` rules against a value.
//! - Aggregate every violation so callers can reject a candidate as a whole.
//!
//! # Invariants
//! - All rules in a table are evaluated; there is no short-circuit.
//! - Validation never touches storage.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod constraints;
pub mod product_rules;

pub use constraints::{multiple_of_three, ConstraintValue, MULTIPLE_OF_THREE_MESSAGE};
pub use product_rules::{validate_product, PRODUCT_RULES};

/// One declarative rule over a record of type `T`.
pub struct FieldRule<T> {
    /// Wire name of the field the rule reports against.
    pub field: &'static str,
    /// Returns `true` when the record satisfies the rule.
    pub check: fn(&T) -> bool,
    /// Human-readable failure message.
    pub message: &'static str,
}

/// A single failed rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: &'static str,
}

/// Every violation found for one candidate, in rule-table order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    violations: Vec<FieldViolation>,
}

impl ValidationErrors {
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Returns `true` when at least one violation is reported for `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.violations
            .iter()
            .any(|violation| violation.field == field)
    }

    /// Messages reported for `field`, in rule order.
    pub fn messages_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'static str> + 'a {
        self.violations
            .iter()
            .filter(move |violation| violation.field == field)
            .map(|violation| violation.message)
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "validation failed:")?;
        for (index, violation) in self.violations.iter().enumerate() {
            let sep = if index == 0 { " " } else { "; " };
            write!(f, "{sep}{}: {}", violation.field, violation.message)?;
        }
        Ok(())
    }
}

impl Error for ValidationErrors {}

/// Runs every rule in `rules` against `value`.
pub fn run_rules<T>(value: &T, rules: &[FieldRule<T>]) -> Result<(), ValidationErrors> {
    let violations: Vec<FieldViolation> = rules
        .iter()
        .filter(|rule| !(rule.check)(value))
        .map(|rule| FieldViolation {
            field: rule.field,
            message: rule.message,
        })
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors { violations })
    }
}

#[cfg(test)]
mod tests {
    use super::{run_rules, FieldRule};

    const RULES: &[FieldRule<i32>] = &[
        FieldRule {
            field: "value",
            check: |value| *value > 0,
            message: "must be positive",
        },
        FieldRule {
            field: "value",
            check: |value| *value % 2 == 0,
            message: "must be even",
        },
    ];

    #[test]
    fn run_rules_collects_every_violation() {
        let err = run_rules(&-3, RULES).unwrap_err();
        let messages: Vec<_> = err.messages_for("value").collect();
        assert_eq!(messages, vec!["must be positive", "must be even"]);
        assert_eq!(
            err.to_string(),
            "validation failed: value: must be positive; value: must be even"
        );
    }

    #[test]
    fn run_rules_accepts_when_all_pass() {
        run_rules(&4, RULES).unwrap();
    }
}
