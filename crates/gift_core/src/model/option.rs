//! Product option domain model.
//!
//! # Invariants
//! - An option belongs to exactly one product for its whole lifetime.
//! - `name` is trimmed, non-blank and at most `OPTION_NAME_MAX_CHARS` chars.
//! - `quantity` is non-negative by construction (`u32`).

use super::product::ProductId;
use super::validation::{ModelValidationError, OPTION_NAME_MAX_CHARS};
use serde::{Deserialize, Serialize};

/// Storage-assigned option identifier.
pub type OptionId = i64;

/// Named quantity-bearing variant of a product (size, color, SKU...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOption {
    pub id: OptionId,
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
}

impl ProductOption {
    /// Overwrites name and quantity in place; identity and owner are kept.
    pub fn apply(&mut self, request: &OptionRequest) {
        self.name = request.name.trim().to_string();
        self.quantity = request.quantity;
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        validate_option_name(&self.name)
    }
}

/// Caller input for option create/change use-cases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionRequest {
    pub name: String,
    pub quantity: u32,
}

impl OptionRequest {
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}

/// Option fields written by `OptionRepository::create_option`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProductOption {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
}

impl NewProductOption {
    /// Builds a draft for `product_id` from request input, trimming the name.
    pub fn from_request(product_id: ProductId, request: &OptionRequest) -> Self {
        Self {
            product_id,
            name: request.name.trim().to_string(),
            quantity: request.quantity,
        }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        validate_option_name(&self.name)
    }
}

/// Response projection returned by option use-cases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionResponse {
    pub id: OptionId,
    pub name: String,
    pub quantity: u32,
}

impl From<ProductOption> for OptionResponse {
    fn from(value: ProductOption) -> Self {
        Self {
            id: value.id,
            name: value.name,
            quantity: value.quantity,
        }
    }
}

fn validate_option_name(name: &str) -> Result<(), ModelValidationError> {
    if name.trim().is_empty() {
        return Err(ModelValidationError::BlankOptionName);
    }
    let len = name.chars().count();
    if len > OPTION_NAME_MAX_CHARS {
        return Err(ModelValidationError::OptionNameTooLong(len));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{NewProductOption, OptionRequest, ProductOption};
    use crate::model::validation::ModelValidationError;

    #[test]
    fn draft_trims_request_name() {
        let draft = NewProductOption::from_request(7, &OptionRequest::new("  Large  ", 3));
        assert_eq!(draft.name, "Large");
        assert_eq!(draft.product_id, 7);
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn blank_and_long_names_are_rejected() {
        let blank = NewProductOption::from_request(1, &OptionRequest::new("   ", 1));
        assert_eq!(blank.validate(), Err(ModelValidationError::BlankOptionName));

        let long = NewProductOption::from_request(1, &OptionRequest::new("x".repeat(51), 1));
        assert_eq!(
            long.validate(),
            Err(ModelValidationError::OptionNameTooLong(51))
        );
    }

    #[test]
    fn apply_keeps_identity() {
        let mut option = ProductOption {
            id: 11,
            product_id: 2,
            name: "Red".to_string(),
            quantity: 4,
        };
        option.apply(&OptionRequest::new("Blue", 9));
        assert_eq!(option.id, 11);
        assert_eq!(option.product_id, 2);
        assert_eq!(option.name, "Blue");
        assert_eq!(option.quantity, 9);
    }
}
