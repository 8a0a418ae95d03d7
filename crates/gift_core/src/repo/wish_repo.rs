//! Wish repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist wishlist entries keyed by `(user_id, product_id)`.
//! - Serve paged wishlist reads with caller-selected ordering.
//!
//! # Invariants
//! - At most one row per `(user_id, product_id)`; a second insert surfaces
//!   as `RepoError::Conflict`.
//! - Stored quantity is > 0; zero is never written.
//! - Page ordering always ends with `id` as tie-breaker.

use crate::model::page::{Page, PageRequest, WishSortKey};
use crate::model::product::ProductId;
use crate::model::user::UserId;
use crate::model::validation::ModelValidationError;
use crate::model::wish::{NewWish, Wish, WishId};
use crate::repo::error::{
    map_unique_violation, quantity_from_db, EntityKind, RepoError, RepoResult,
};
use rusqlite::{params, Connection, Row};

const WISH_SELECT_SQL: &str = "SELECT id, user_id, product_id, quantity FROM wishes";
const WISH_PAIR_CONFLICT: &str = "wish already exists for user and product";

/// Read/write access to wishlist entries.
pub trait WishRepository {
    fn create_wish(&self, wish: &NewWish) -> RepoResult<Wish>;
    fn find_by_id(&self, id: WishId) -> RepoResult<Option<Wish>>;
    fn find_by_user_and_product(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> RepoResult<Option<Wish>>;
    fn exists_by_user_and_product(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> RepoResult<bool>;
    fn find_page_by_user(&self, user_id: UserId, request: &PageRequest) -> RepoResult<Page<Wish>>;
    /// Persists a new quantity for an existing wish.
    fn update_quantity(&self, id: WishId, quantity: u32) -> RepoResult<()>;
    /// Deletes by composite key and returns the number of removed rows.
    fn delete_by_product_and_user(
        &self,
        product_id: ProductId,
        user_id: UserId,
    ) -> RepoResult<usize>;
    fn delete_wish(&self, wish: &Wish) -> RepoResult<()>;
}

/// SQLite-backed wish repository.
pub struct SqliteWishRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteWishRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl WishRepository for SqliteWishRepository<'_> {
    fn create_wish(&self, wish: &NewWish) -> RepoResult<Wish> {
        wish.validate()?;

        self.conn
            .execute(
                "INSERT INTO wishes (user_id, product_id, quantity) VALUES (?1, ?2, ?3);",
                params![wish.user_id, wish.product_id, wish.quantity],
            )
            .map_err(|err| map_unique_violation(err, WISH_PAIR_CONFLICT))?;

        Ok(Wish {
            id: self.conn.last_insert_rowid(),
            user_id: wish.user_id,
            product_id: wish.product_id,
            quantity: wish.quantity,
        })
    }

    fn find_by_id(&self, id: WishId) -> RepoResult<Option<Wish>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{WISH_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_wish_row(row)?));
        }
        Ok(None)
    }

    fn find_by_user_and_product(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> RepoResult<Option<Wish>> {
        let mut stmt = self.conn.prepare(&format!(
            "{WISH_SELECT_SQL} WHERE user_id = ?1 AND product_id = ?2;"
        ))?;
        let mut rows = stmt.query(params![user_id, product_id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_wish_row(row)?));
        }
        Ok(None)
    }

    fn exists_by_user_and_product(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM wishes WHERE user_id = ?1 AND product_id = ?2
            );",
            params![user_id, product_id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn find_page_by_user(&self, user_id: UserId, request: &PageRequest) -> RepoResult<Page<Wish>> {
        let total: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM wishes WHERE user_id = ?1;",
            [user_id],
            |row| row.get(0),
        )?;
        let total_elements = u64::try_from(total)
            .map_err(|_| RepoError::InvalidData(format!("negative wish count `{total}`")))?;

        let size = request.applied_size();
        let direction = request.direction.as_sql();
        let order_by = match request.sort {
            WishSortKey::Id => format!("id {direction}"),
            WishSortKey::Quantity => format!("quantity {direction}, id ASC"),
        };

        let mut stmt = self.conn.prepare(&format!(
            "{WISH_SELECT_SQL}
             WHERE user_id = ?1
             ORDER BY {order_by}
             LIMIT ?2 OFFSET ?3;"
        ))?;
        let mut rows = stmt.query(params![user_id, i64::from(size), request.offset()])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_wish_row(row)?);
        }

        Ok(Page {
            items,
            page: request.page,
            size,
            total_elements,
        })
    }

    fn update_quantity(&self, id: WishId, quantity: u32) -> RepoResult<()> {
        if quantity == 0 {
            return Err(ModelValidationError::ZeroWishQuantity.into());
        }

        let changed = self.conn.execute(
            "UPDATE wishes
             SET
                quantity = ?1,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?2;",
            params![quantity, id],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::Wish,
                id,
            });
        }
        Ok(())
    }

    fn delete_by_product_and_user(
        &self,
        product_id: ProductId,
        user_id: UserId,
    ) -> RepoResult<usize> {
        let removed = self.conn.execute(
            "DELETE FROM wishes WHERE product_id = ?1 AND user_id = ?2;",
            params![product_id, user_id],
        )?;
        Ok(removed)
    }

    fn delete_wish(&self, wish: &Wish) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM wishes WHERE id = ?1;", [wish.id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::Wish,
                id: wish.id,
            });
        }
        Ok(())
    }
}

fn parse_wish_row(row: &Row<'_>) -> RepoResult<Wish> {
    let wish = Wish {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        product_id: row.get("product_id")?,
        quantity: quantity_from_db(row.get("quantity")?, "wishes.quantity")?,
    };
    wish.validate()?;
    Ok(wish)
}
