//! Core domain logic for the Shopfront product catalog.
//! This crate is the single source of truth for catalog business rules.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;
pub mod validation;

pub use config::{CatalogConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::product::{normalize_product_name, Product, ProductId, PRODUCT_NAME_PREFIX};
pub use repo::product_repo::{ProductRepository, RepoError, RepoResult, SqliteProductRepository};
pub use seed::seed_catalog;
pub use service::product_service::{ProductService, ServiceError, ServiceResult};
pub use validation::{
    multiple_of_three, validate_product, ConstraintValue, FieldViolation, ValidationErrors,
    MULTIPLE_OF_THREE_MESSAGE,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
