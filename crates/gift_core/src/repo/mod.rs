//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes validate model input before SQL mutations.
//! - Repository APIs return semantic errors (`NotFound`, `Conflict`) in
//!   addition to DB transport errors.
//! - Lookups return `Option`; mapping absence to a use-case error is the
//!   service's job.

pub mod error;
pub mod option_repo;
pub mod product_repo;
pub mod user_repo;
pub mod wish_repo;
