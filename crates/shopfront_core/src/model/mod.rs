//! Catalog domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//!
//! # Invariants
//! - Every product is identified by a stable `ProductId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod product;
