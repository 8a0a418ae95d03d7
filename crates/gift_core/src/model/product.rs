//! Product domain model.

use super::validation::ModelValidationError;
use serde::{Deserialize, Serialize};

/// Storage-assigned product identifier.
pub type ProductId = i64;

/// Persisted catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Price in minor currency units.
    pub price: i64,
    pub image_url: Option<String>,
}

/// Product fields supplied at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: i64,
    pub image_url: Option<String>,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, price: i64) -> Self {
        Self {
            name: name.into(),
            price,
            image_url: None,
        }
    }

    /// Checks name and price before persistence.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if self.name.trim().is_empty() {
            return Err(ModelValidationError::BlankProductName);
        }
        if self.price < 0 {
            return Err(ModelValidationError::NegativePrice(self.price));
        }
        Ok(())
    }
}
