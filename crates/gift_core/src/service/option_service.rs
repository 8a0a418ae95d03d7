//! Product option use-case service.
//!
//! # Responsibility
//! - Add, change, delete and list options attached to a product.
//! - Translate repository absence/conflict into typed use-case errors.
//!
//! # Invariants
//! - An option is only created for a product that exists at call time.
//! - `change_option` keeps the option id and owning product unchanged.
//! - Every mutation goes through an explicit repository write.

use crate::db::DbError;
use crate::model::option::{
    NewProductOption, OptionId, OptionRequest, OptionResponse, ProductOption,
};
use crate::model::product::{Product, ProductId};
use crate::model::user::UserInfo;
use crate::model::validation::ModelValidationError;
use crate::repo::error::{EntityKind, RepoError};
use crate::repo::option_repo::OptionRepository;
use crate::repo::product_repo::ProductRepository;
use crate::repo::user_repo::UserRepository;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from option use-cases.
#[derive(Debug)]
pub enum OptionServiceError {
    ProductNotFound(ProductId),
    OptionNotFound(OptionId),
    /// Acting user email does not resolve to a user.
    UserNotFound(String),
    /// Product already has an option with this name.
    DuplicateOption(String),
    Validation(ModelValidationError),
    Repo(RepoError),
}

impl Display for OptionServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProductNotFound(id) => write!(f, "product not found: {id}"),
            Self::OptionNotFound(id) => write!(f, "option not found: {id}"),
            Self::UserNotFound(email) => write!(f, "user not found: {email}"),
            Self::DuplicateOption(name) => write!(f, "duplicate option name: `{name}`"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for OptionServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for OptionServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound {
                entity: EntityKind::Option,
                id,
            } => Self::OptionNotFound(id),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

impl From<DbError> for OptionServiceError {
    fn from(value: DbError) -> Self {
        Self::Repo(RepoError::Db(value))
    }
}

/// Option service facade over product, option and user repositories.
pub struct OptionService<P, O, U>
where
    P: ProductRepository,
    O: OptionRepository,
    U: UserRepository,
{
    products: P,
    options: O,
    users: U,
}

impl<P, O, U> OptionService<P, O, U>
where
    P: ProductRepository,
    O: OptionRepository,
    U: UserRepository,
{
    /// Creates a service from repository implementations.
    pub fn new(products: P, options: O, users: U) -> Self {
        Self {
            products,
            options,
            users,
        }
    }

    /// Adds one option to an existing product.
    ///
    /// # Errors
    /// - `ProductNotFound` when `product_id` does not exist; nothing is written.
    /// - `DuplicateOption` when the product already has an option of this name.
    /// - `Validation` for blank or oversized names.
    pub fn add_option(
        &self,
        request: &OptionRequest,
        product_id: ProductId,
    ) -> Result<OptionResponse, OptionServiceError> {
        let product = self.load_product(product_id)?;
        let draft = NewProductOption::from_request(product.id, request);
        let saved = self
            .options
            .create_option(&draft)
            .map_err(|err| duplicate_or(err, &draft.name))?;

        info!(
            "event=option_add module=option_service status=ok product_id={} option_id={}",
            product.id, saved.id
        );
        Ok(saved.into())
    }

    /// Deletes one option on behalf of the user identified by `email`.
    ///
    /// The option is resolved before the actor, so a missing option always
    /// reports `OptionNotFound`. Returns the deleted option id.
    pub fn delete_option(
        &self,
        id: OptionId,
        email: &str,
    ) -> Result<OptionId, OptionServiceError> {
        let option = self.load_option(id)?;
        let actor = self.load_actor(email)?;
        self.options.delete_by_id(option.id)?;

        info!(
            "event=option_delete module=option_service status=ok option_id={} product_id={} actor_id={}",
            option.id, option.product_id, actor.id
        );
        Ok(option.id)
    }

    /// Overwrites name and quantity of an option.
    ///
    /// `product_id` must exist but does not scope the lookup: the option is
    /// addressed by `option_id` alone.
    pub fn change_option(
        &self,
        request: &OptionRequest,
        product_id: ProductId,
        option_id: OptionId,
    ) -> Result<OptionResponse, OptionServiceError> {
        self.load_product(product_id)?;
        let mut option = self.load_option(option_id)?;
        option.apply(request);
        self.options
            .update_option(&option)
            .map_err(|err| duplicate_or(err, &option.name))?;

        info!(
            "event=option_change module=option_service status=ok option_id={}",
            option.id
        );
        Ok(option.into())
    }

    /// Lists all options of a product ordered by id.
    pub fn list_options(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<OptionResponse>, OptionServiceError> {
        let product = self.load_product(product_id)?;
        let options = self.options.list_by_product(product.id)?;
        Ok(options.into_iter().map(OptionResponse::from).collect())
    }

    fn load_product(&self, id: ProductId) -> Result<Product, OptionServiceError> {
        self.products
            .find_by_id(id)?
            .ok_or(OptionServiceError::ProductNotFound(id))
    }

    fn load_option(&self, id: OptionId) -> Result<ProductOption, OptionServiceError> {
        self.options
            .find_by_id(id)?
            .ok_or(OptionServiceError::OptionNotFound(id))
    }

    fn load_actor(&self, email: &str) -> Result<UserInfo, OptionServiceError> {
        match self.users.find_by_email(email) {
            Ok(Some(user)) => Ok(user),
            Ok(None) | Err(RepoError::Validation(ModelValidationError::InvalidEmail(_))) => {
                Err(OptionServiceError::UserNotFound(email.to_string()))
            }
            Err(other) => Err(other.into()),
        }
    }
}

fn duplicate_or(err: RepoError, name: &str) -> OptionServiceError {
    match err {
        RepoError::Conflict(_) => OptionServiceError::DuplicateOption(name.to_string()),
        other => other.into(),
    }
}
