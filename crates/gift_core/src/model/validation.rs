//! Field validation errors for domain records.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Maximum option name length in characters.
pub const OPTION_NAME_MAX_CHARS: usize = 50;

/// Validation failure raised before any SQL mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelValidationError {
    /// Product name is blank after trim.
    BlankProductName,
    /// Product price is below zero.
    NegativePrice(i64),
    /// Option name is blank after trim.
    BlankOptionName,
    /// Option name exceeds [`OPTION_NAME_MAX_CHARS`].
    OptionNameTooLong(usize),
    /// Email does not look like `local@domain.tld`.
    InvalidEmail(String),
    /// Stored wishes must carry a positive quantity.
    ZeroWishQuantity,
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankProductName => write!(f, "product name must not be blank"),
            Self::NegativePrice(price) => write!(f, "product price must be >= 0, got {price}"),
            Self::BlankOptionName => write!(f, "option name must not be blank"),
            Self::OptionNameTooLong(len) => write!(
                f,
                "option name must be at most {OPTION_NAME_MAX_CHARS} chars, got {len}"
            ),
            Self::InvalidEmail(value) => write!(f, "invalid email: `{value}`"),
            Self::ZeroWishQuantity => write!(f, "wish quantity must be > 0"),
        }
    }
}

impl Error for ModelValidationError {}
