//! Core domain logic for the gift wishlist backend.
//! Product options and per-user wishlists over SQLite storage.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::option::{OptionId, OptionRequest, OptionResponse, ProductOption};
pub use model::page::{Page, PageRequest, SortDirection, WishSortKey};
pub use model::product::{NewProduct, Product, ProductId};
pub use model::user::{UserId, UserInfo};
pub use model::validation::ModelValidationError;
pub use model::wish::{Wish, WishId, WishRequest};
pub use repo::error::{EntityKind, RepoError, RepoResult};
pub use repo::option_repo::{OptionRepository, SqliteOptionRepository};
pub use repo::product_repo::{ProductRepository, SqliteProductRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::wish_repo::{SqliteWishRepository, WishRepository};
pub use service::option_service::{OptionService, OptionServiceError};
pub use service::wish_service::{WishService, WishServiceError};

/// Minimal health-check API for wiring checks.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
