//! Wishlist use-case service.
//!
//! # Responsibility
//! - Add, change, remove and page through a user's wishes.
//! - Apply the quantity rule: a change to `0` removes the wish.
//!
//! # Invariants
//! - One wish per `(user, product)`; a second add is rejected.
//! - `change_to_wishlist` requires an existing wish even for quantity `0`.
//! - Each operation issues at most one write.

use crate::db::DbError;
use crate::model::page::{Page, PageRequest};
use crate::model::product::{Product, ProductId};
use crate::model::user::UserInfo;
use crate::model::validation::ModelValidationError;
use crate::model::wish::{NewWish, Wish, WishRequest};
use crate::repo::error::RepoError;
use crate::repo::product_repo::ProductRepository;
use crate::repo::user_repo::UserRepository;
use crate::repo::wish_repo::WishRepository;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from wishlist use-cases.
#[derive(Debug)]
pub enum WishServiceError {
    ProductNotFound(ProductId),
    UserNotFound(String),
    /// No wish exists for the user and this product.
    WishListNotFound(ProductId),
    /// The user already wishes for this product.
    WishAlreadyExists(ProductId),
    /// New wishes need a quantity above zero.
    InvalidQuantity,
    Validation(ModelValidationError),
    Repo(RepoError),
}

impl Display for WishServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProductNotFound(id) => write!(f, "product not found: {id}"),
            Self::UserNotFound(email) => write!(f, "user not found: {email}"),
            Self::WishListNotFound(product_id) => {
                write!(f, "wishlist entry not found for product {product_id}")
            }
            Self::WishAlreadyExists(product_id) => {
                write!(f, "wishlist entry already exists for product {product_id}")
            }
            Self::InvalidQuantity => write!(f, "wish quantity must be > 0"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for WishServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for WishServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

impl From<DbError> for WishServiceError {
    fn from(value: DbError) -> Self {
        Self::Repo(RepoError::Db(value))
    }
}

/// Wishlist service facade over wish, user and product repositories.
pub struct WishService<W, U, P>
where
    W: WishRepository,
    U: UserRepository,
    P: ProductRepository,
{
    wishes: W,
    users: U,
    products: P,
}

impl<W, U, P> WishService<W, U, P>
where
    W: WishRepository,
    U: UserRepository,
    P: ProductRepository,
{
    /// Creates a service from repository implementations.
    pub fn new(wishes: W, users: U, products: P) -> Self {
        Self {
            wishes,
            users,
            products,
        }
    }

    /// Adds a product to the user's wishlist.
    ///
    /// # Errors
    /// - `ProductNotFound` / `UserNotFound` when either side is missing.
    /// - `InvalidQuantity` for quantity `0`.
    /// - `WishAlreadyExists` when the pair is already wished.
    pub fn add_to_wishlist(
        &self,
        email: &str,
        request: &WishRequest,
    ) -> Result<bool, WishServiceError> {
        let product = self.load_product(request.product_id)?;
        let user = self.load_user(email)?;
        if request.quantity == 0 {
            return Err(WishServiceError::InvalidQuantity);
        }
        if self
            .wishes
            .exists_by_user_and_product(user.id, product.id)?
        {
            return Err(WishServiceError::WishAlreadyExists(product.id));
        }

        let draft = NewWish {
            user_id: user.id,
            product_id: product.id,
            quantity: request.quantity,
        };
        let wish = self.wishes.create_wish(&draft).map_err(|err| match err {
            RepoError::Conflict(_) => WishServiceError::WishAlreadyExists(product.id),
            other => other.into(),
        })?;

        info!(
            "event=wish_add module=wish_service status=ok wish_id={} user_id={} product_id={}",
            wish.id, user.id, product.id
        );
        Ok(true)
    }

    /// Removes the user's wish for `product_id`.
    pub fn remove_from_wishlist(
        &self,
        email: &str,
        product_id: ProductId,
    ) -> Result<bool, WishServiceError> {
        let user = self.load_user(email)?;
        let product = self.load_product(product_id)?;
        let wish = self.load_wish(&user, &product)?;
        let removed = self
            .wishes
            .delete_by_product_and_user(wish.product_id, wish.user_id)?;
        if removed == 0 {
            return Err(WishServiceError::WishListNotFound(product.id));
        }

        info!(
            "event=wish_remove module=wish_service status=ok wish_id={} user_id={} product_id={}",
            wish.id, user.id, product.id
        );
        Ok(true)
    }

    /// Returns one page of the user's wishes.
    pub fn get_wishlist_products(
        &self,
        email: &str,
        page_request: &PageRequest,
    ) -> Result<Page<Wish>, WishServiceError> {
        let user = self.load_user(email)?;
        self.wishes
            .find_page_by_user(user.id, page_request)
            .map_err(Into::into)
    }

    /// Sets the wished quantity; `0` removes the wish.
    ///
    /// A missing wish fails with `WishListNotFound` before the quantity is
    /// inspected, so removing an absent wish is an error, not a no-op.
    pub fn change_to_wishlist(
        &self,
        email: &str,
        request: &WishRequest,
    ) -> Result<bool, WishServiceError> {
        let product = self.load_product(request.product_id)?;
        let user = self.load_user(email)?;
        let wish = self.load_wish(&user, &product)?;

        if request.is_removal() {
            self.wishes.delete_wish(&wish)?;
            info!(
                "event=wish_change module=wish_service status=ok action=removed wish_id={}",
                wish.id
            );
            return Ok(true);
        }

        self.wishes.update_quantity(wish.id, request.quantity)?;
        info!(
            "event=wish_change module=wish_service status=ok action=updated wish_id={} quantity={}",
            wish.id, request.quantity
        );
        Ok(true)
    }

    fn load_product(&self, id: ProductId) -> Result<Product, WishServiceError> {
        self.products
            .find_by_id(id)?
            .ok_or(WishServiceError::ProductNotFound(id))
    }

    fn load_user(&self, email: &str) -> Result<UserInfo, WishServiceError> {
        match self.users.find_by_email(email) {
            Ok(Some(user)) => Ok(user),
            Ok(None) | Err(RepoError::Validation(ModelValidationError::InvalidEmail(_))) => {
                Err(WishServiceError::UserNotFound(email.to_string()))
            }
            Err(other) => Err(other.into()),
        }
    }

    fn load_wish(&self, user: &UserInfo, product: &Product) -> Result<Wish, WishServiceError> {
        self.wishes
            .find_by_user_and_product(user.id, product.id)?
            .ok_or(WishServiceError::WishListNotFound(product.id))
    }
}
