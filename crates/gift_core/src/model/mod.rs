//! Domain model for products, options, users and wishes.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Own field-level validation shared by repositories and services.
//!
//! # Invariants
//! - Every persisted record is identified by a storage-assigned integer id.
//! - Relations are stored as foreign keys only; reverse views (options of a
//!   product, wishes of a user) are derived by repository queries.

pub mod option;
pub mod page;
pub mod product;
pub mod user;
pub mod validation;
pub mod wish;
