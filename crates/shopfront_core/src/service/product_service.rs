//! Product catalog use-case service.
//!
//! # Responsibility
//! - Provide `list_all/get_by_id/add/update/delete` over an injected store.
//! - Apply the `PRD_` name prefix on every insert and update.
//! - Offer validated create/edit entry points for request handlers.
//!
//! # Invariants
//! - Missing records on get/delete are ordinary return values, not errors.
//! - `update` on a missing id fails with `NotFound` and writes nothing.
//! - Storage faults are logged with operation context and returned unchanged.
//! - `add` copies only `name` and `price` from the candidate; every other
//!   field starts at its default.

use crate::model::product::{Product, ProductId};
use crate::repo::product_repo::{ProductRepository, RepoError};
use crate::validation::{validate_product, ValidationErrors};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for catalog use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Candidate rejected before any storage call.
    Validation(ValidationErrors),
    /// Update target does not exist.
    NotFound(ProductId),
    /// Route id and candidate id disagree on an edit request.
    IdMismatch {
        route: ProductId,
        candidate: ProductId,
    },
    /// Unexpected persistence-layer failure.
    Storage(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "product with id {id} not found"),
            Self::IdMismatch { route, candidate } => write!(
                f,
                "product id mismatch: route `{route}` vs candidate `{candidate}`"
            ),
            Self::Storage(err) => write!(f, "catalog storage failure: {err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::NotFound(_) | Self::IdMismatch { .. } => None,
        }
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value)
    }
}

/// Catalog service over a product repository.
pub struct ProductService<R: ProductRepository> {
    repo: R,
}

impl<R: ProductRepository> ProductService<R> {
    /// Creates a service owning the provided repository handle.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Borrow of the underlying repository, for seeding and diagnostics.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Returns every stored product in insertion order.
    pub fn list_all(&self) -> ServiceResult<Vec<Product>> {
        info!("event=product_list module=service status=start");
        let products = self
            .repo
            .list_products()
            .map_err(|err| storage_fault("list_all", None, err))?;
        info!(
            "event=product_list module=service status=ok count={}",
            products.len()
        );
        Ok(products)
    }

    /// Returns the product with `id`, or `None` when absent.
    pub fn get_by_id(&self, id: ProductId) -> ServiceResult<Option<Product>> {
        info!("event=product_get module=service status=start product_id={id}");
        let product = self
            .repo
            .get_product(id)
            .map_err(|err| storage_fault("get_by_id", Some(id), err))?;
        if product.is_none() {
            info!("event=product_get module=service status=not_found product_id={id}");
        }
        Ok(product)
    }

    /// Stores a new product built from the candidate's name and price.
    ///
    /// Any id on the candidate is ignored; a fresh one is generated. The
    /// candidate is not validated here.
    pub fn add(&self, candidate: &Product) -> ServiceResult<Product> {
        let mut product = Product::new(candidate.name.clone(), candidate.price);
        info!(
            "event=product_add module=service status=start product_id={} price={}",
            product.id, product.price
        );

        decorate_name(&mut product);

        self.repo
            .insert_product(&product)
            .map_err(|err| storage_fault("add", Some(product.id), err))?;

        info!(
            "event=product_add module=service status=ok product_id={}",
            product.id
        );
        Ok(product)
    }

    /// Overwrites every mutable field of the stored product with the
    /// candidate's values, keyed by `candidate.id`.
    pub fn update(&self, candidate: &Product) -> ServiceResult<Product> {
        let id = candidate.id;
        info!("event=product_update module=service status=start product_id={id}");

        let Some(mut existing) = self
            .repo
            .get_product(id)
            .map_err(|err| storage_fault("update", Some(id), err))?
        else {
            warn!("event=product_update module=service status=not_found product_id={id}");
            return Err(ServiceError::NotFound(id));
        };

        existing.name = candidate.name.clone();
        existing.price = candidate.price;
        existing.description = candidate.description.clone();
        existing.image_path = candidate.image_path.clone();
        existing.category = candidate.category.clone();
        existing.in_stock = candidate.in_stock;
        decorate_name(&mut existing);

        match self.repo.overwrite_product(&existing) {
            Ok(()) => {}
            // Row vanished between lookup and write.
            Err(RepoError::NotFound(_)) => {
                warn!("event=product_update module=service status=not_found product_id={id}");
                return Err(ServiceError::NotFound(id));
            }
            Err(err) => return Err(storage_fault("update", Some(id), err)),
        }

        info!("event=product_update module=service status=ok product_id={id}");
        Ok(existing)
    }

    /// Removes the product with `id`. Returns `false` when it did not exist.
    pub fn delete(&self, id: ProductId) -> ServiceResult<bool> {
        info!("event=product_delete module=service status=start product_id={id}");

        let existing = self
            .repo
            .get_product(id)
            .map_err(|err| storage_fault("delete", Some(id), err))?;
        if existing.is_none() {
            warn!("event=product_delete module=service status=not_found product_id={id}");
            return Ok(false);
        }

        match self.repo.delete_product(id) {
            Ok(()) => {
                info!("event=product_delete module=service status=ok product_id={id}");
                Ok(true)
            }
            Err(RepoError::NotFound(_)) => {
                warn!("event=product_delete module=service status=not_found product_id={id}");
                Ok(false)
            }
            Err(err) => Err(storage_fault("delete", Some(id), err)),
        }
    }

    /// Validates the candidate, then adds it.
    pub fn create_validated(&self, candidate: &Product) -> ServiceResult<Product> {
        if let Err(errors) = validate_product(candidate) {
            warn!(
                "event=product_add module=service status=invalid violations={}",
                errors.violations().len()
            );
            return Err(errors.into());
        }
        self.add(candidate)
    }

    /// Checks the edit target id, validates the candidate, then updates it.
    pub fn update_validated(
        &self,
        route_id: ProductId,
        candidate: &Product,
    ) -> ServiceResult<Product> {
        if route_id != candidate.id {
            return Err(ServiceError::IdMismatch {
                route: route_id,
                candidate: candidate.id,
            });
        }
        if let Err(errors) = validate_product(candidate) {
            warn!(
                "event=product_update module=service status=invalid product_id={route_id} violations={}",
                errors.violations().len()
            );
            return Err(errors.into());
        }
        self.update(candidate)
    }
}

fn decorate_name(product: &mut Product) {
    if product.apply_name_prefix() {
        debug!(
            "event=product_name_decorated module=service product_id={} name={}",
            product.id, product.name
        );
    }
}

fn storage_fault(op: &'static str, id: Option<ProductId>, err: RepoError) -> ServiceError {
    match id {
        Some(id) => error!(
            "event=storage_fault module=service status=error op={op} product_id={id} error={err}"
        ),
        None => error!("event=storage_fault module=service status=error op={op} error={err}"),
    }
    ServiceError::Storage(err)
}
