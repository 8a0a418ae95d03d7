//! Wishlist entry model.
//!
//! # Invariants
//! - At most one wish exists per `(user_id, product_id)` pair.
//! - Stored quantity is always > 0; a requested quantity of 0 means "delete".

use super::product::ProductId;
use super::user::UserId;
use super::validation::ModelValidationError;
use serde::{Deserialize, Serialize};

/// Storage-assigned wish identifier.
pub type WishId = i64;

/// A user's saved intent to purchase a quantity of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wish {
    pub id: WishId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: u32,
}

impl Wish {
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        validate_quantity(self.quantity)
    }
}

/// Wish fields written by `WishRepository::create_wish`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWish {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: u32,
}

impl NewWish {
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        validate_quantity(self.quantity)
    }
}

/// Caller input for wishlist add/change use-cases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishRequest {
    pub product_id: ProductId,
    /// `0` on change requests removes the wish.
    pub quantity: u32,
}

impl WishRequest {
    pub fn new(product_id: ProductId, quantity: u32) -> Self {
        Self {
            product_id,
            quantity,
        }
    }

    /// Whether this request signals deletion of the wish.
    pub fn is_removal(&self) -> bool {
        self.quantity == 0
    }
}

fn validate_quantity(quantity: u32) -> Result<(), ModelValidationError> {
    if quantity == 0 {
        return Err(ModelValidationError::ZeroWishQuantity);
    }
    Ok(())
}
