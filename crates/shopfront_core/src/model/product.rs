//! Product domain model.
//!
//! # Responsibility
//! - Define the single catalog entity and its wire shape.
//! - Own the product-name prefix rule used by every write path.
//!
//! # Invariants
//! - `id` is generated once and never changes for the lifetime of a product.
//! - Every persisted `name` starts with [`PRODUCT_NAME_PREFIX`].
//! - Prefix normalization is idempotent.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a catalog product.
pub type ProductId = Uuid;

/// Literal prefix carried by every stored product name.
pub const PRODUCT_NAME_PREFIX: &str = "PRD_";

/// Catalog product record.
///
/// The same shape is used for caller-supplied candidates and stored rows.
/// Callers only ever receive owned copies of stored state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Exact decimal price. Range rules live in the validation layer.
    pub price: Decimal,
    pub description: Option<String>,
    pub image_path: Option<String>,
    pub category: Option<String>,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

impl Product {
    /// Creates a product with a fresh id, no optional fields, and `in_stock`.
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self::with_id(Uuid::new_v4(), name, price)
    }

    /// Creates a product with a caller-provided id.
    ///
    /// Used by update candidates, where the id selects the target row.
    pub fn with_id(id: ProductId, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            description: None,
            image_path: None,
            category: None,
            in_stock: true,
        }
    }

    /// Whether the name already carries [`PRODUCT_NAME_PREFIX`].
    pub fn has_name_prefix(&self) -> bool {
        self.name.starts_with(PRODUCT_NAME_PREFIX)
    }

    /// Prepends [`PRODUCT_NAME_PREFIX`] unless already present.
    ///
    /// Returns `true` when the name was changed.
    pub fn apply_name_prefix(&mut self) -> bool {
        if self.has_name_prefix() {
            return false;
        }
        self.name = normalize_product_name(&self.name);
        true
    }
}

/// Returns `name` with [`PRODUCT_NAME_PREFIX`] prepended exactly once.
pub fn normalize_product_name(name: &str) -> String {
    if name.starts_with(PRODUCT_NAME_PREFIX) {
        name.to_string()
    } else {
        format!("{PRODUCT_NAME_PREFIX}{name}")
    }
}

fn default_in_stock() -> bool {
    true
}
