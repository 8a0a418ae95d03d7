//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep callers decoupled from storage details.
//!
//! Services do not open transactions themselves; wrap a call in
//! `db::with_transaction` to make it all-or-nothing.

pub mod option_service;
pub mod wish_service;
