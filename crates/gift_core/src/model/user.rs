//! User identity record.
//!
//! # Invariants
//! - `email` is unique across users and stored lowercase.

use super::validation::ModelValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex")
});

/// Storage-assigned user identifier.
pub type UserId = i64;

/// Identity record for an end user, keyed by email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: UserId,
    pub email: String,
}

/// Normalizes an email to its stored form and checks its shape.
///
/// Lookups and inserts both go through this function, so `Alice@Example.com`
/// and `alice@example.com` resolve to the same user.
pub fn normalize_email(value: &str) -> Result<String, ModelValidationError> {
    let normalized = value.trim().to_ascii_lowercase();
    if !EMAIL_RE.is_match(&normalized) {
        return Err(ModelValidationError::InvalidEmail(value.to_string()));
    }
    Ok(normalized)
}
