//! Field rules for product candidates.
//!
//! # Invariants
//! - Name: required (not blank), 3..=50 characters, letters/whitespace/hyphens only.
//! - Price: within `[24.99, 9999.99]` inclusive.
//! - Optional text fields are bounded only when present.
//! - The `PRD_` name prefix is a storage concern and is not checked here.

use super::{run_rules, FieldRule, ValidationErrors};
use crate::model::product::Product;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

const NAME_MIN_CHARS: usize = 3;
const NAME_MAX_CHARS: usize = 50;
const DESCRIPTION_MAX_CHARS: usize = 500;
const IMAGE_PATH_MAX_CHARS: usize = 200;
const CATEGORY_MAX_CHARS: usize = 50;

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z\s\-]+$").expect("valid product name regex"));

/// Rule table evaluated by [`validate_product`].
pub const PRODUCT_RULES: &[FieldRule<Product>] = &[
    FieldRule {
        field: "name",
        check: |product| !product.name.trim().is_empty(),
        message: "Name is required",
    },
    FieldRule {
        field: "name",
        check: |product| {
            let len = product.name.chars().count();
            (NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&len)
        },
        message: "Name must be between 3 and 50 characters long",
    },
    FieldRule {
        field: "name",
        check: |product| NAME_RE.is_match(&product.name),
        message: "Name may contain only letters, spaces and hyphens",
    },
    FieldRule {
        field: "price",
        check: |product| price_in_range(product.price),
        message: "Price must be between 24.99 and 9999.99",
    },
    FieldRule {
        field: "description",
        check: |product| within_limit(product.description.as_deref(), DESCRIPTION_MAX_CHARS),
        message: "Description cannot be longer than 500 characters",
    },
    FieldRule {
        field: "imagePath",
        check: |product| within_limit(product.image_path.as_deref(), IMAGE_PATH_MAX_CHARS),
        message: "Image path cannot be longer than 200 characters",
    },
    FieldRule {
        field: "category",
        check: |product| within_limit(product.category.as_deref(), CATEGORY_MAX_CHARS),
        message: "Category cannot be longer than 50 characters",
    },
];

/// Checks a candidate against [`PRODUCT_RULES`].
pub fn validate_product(product: &Product) -> Result<(), ValidationErrors> {
    run_rules(product, PRODUCT_RULES)
}

fn price_in_range(price: Decimal) -> bool {
    let min = Decimal::new(2499, 2);
    let max = Decimal::new(999_999, 2);
    price >= min && price <= max
}

fn within_limit(value: Option<&str>, max_chars: usize) -> bool {
    value.map_or(true, |text| text.chars().count() <= max_chars)
}
