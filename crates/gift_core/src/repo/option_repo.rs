//! Option repository contract and SQLite implementation.
//!
//! # Invariants
//! - Write paths validate the option before SQL mutations.
//! - `(product_id, name)` is unique; clashes surface as `RepoError::Conflict`.
//! - `list_by_product` is the only reverse view of Product -> Option.

use crate::model::option::{NewProductOption, OptionId, ProductOption};
use crate::model::product::ProductId;
use crate::repo::error::{
    map_unique_violation, quantity_from_db, EntityKind, RepoError, RepoResult,
};
use rusqlite::{params, Connection, Row};

const OPTION_SELECT_SQL: &str = "SELECT id, product_id, name, quantity FROM options";
const OPTION_NAME_CONFLICT: &str = "option name already used by product";

/// Read/write access to product options.
pub trait OptionRepository {
    fn create_option(&self, option: &NewProductOption) -> RepoResult<ProductOption>;
    /// Persists name and quantity of an existing option.
    fn update_option(&self, option: &ProductOption) -> RepoResult<()>;
    fn find_by_id(&self, id: OptionId) -> RepoResult<Option<ProductOption>>;
    fn list_by_product(&self, product_id: ProductId) -> RepoResult<Vec<ProductOption>>;
    fn delete_by_id(&self, id: OptionId) -> RepoResult<()>;
}

/// SQLite-backed option repository.
pub struct SqliteOptionRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteOptionRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl OptionRepository for SqliteOptionRepository<'_> {
    fn create_option(&self, option: &NewProductOption) -> RepoResult<ProductOption> {
        option.validate()?;

        self.conn
            .execute(
                "INSERT INTO options (product_id, name, quantity) VALUES (?1, ?2, ?3);",
                params![option.product_id, option.name.as_str(), option.quantity],
            )
            .map_err(|err| map_unique_violation(err, OPTION_NAME_CONFLICT))?;

        Ok(ProductOption {
            id: self.conn.last_insert_rowid(),
            product_id: option.product_id,
            name: option.name.clone(),
            quantity: option.quantity,
        })
    }

    fn update_option(&self, option: &ProductOption) -> RepoResult<()> {
        option.validate()?;

        let changed = self
            .conn
            .execute(
                "UPDATE options
                 SET
                    name = ?1,
                    quantity = ?2,
                    updated_at = (strftime('%s', 'now') * 1000)
                 WHERE id = ?3;",
                params![option.name.as_str(), option.quantity, option.id],
            )
            .map_err(|err| map_unique_violation(err, OPTION_NAME_CONFLICT))?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::Option,
                id: option.id,
            });
        }
        Ok(())
    }

    fn find_by_id(&self, id: OptionId) -> RepoResult<Option<ProductOption>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{OPTION_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_option_row(row)?));
        }
        Ok(None)
    }

    fn list_by_product(&self, product_id: ProductId) -> RepoResult<Vec<ProductOption>> {
        let mut stmt = self.conn.prepare(&format!(
            "{OPTION_SELECT_SQL} WHERE product_id = ?1 ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query([product_id])?;
        let mut options = Vec::new();
        while let Some(row) = rows.next()? {
            options.push(parse_option_row(row)?);
        }
        Ok(options)
    }

    fn delete_by_id(&self, id: OptionId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM options WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::Option,
                id,
            });
        }
        Ok(())
    }
}

fn parse_option_row(row: &Row<'_>) -> RepoResult<ProductOption> {
    Ok(ProductOption {
        id: row.get("id")?,
        product_id: row.get("product_id")?,
        name: row.get("name")?,
        quantity: quantity_from_db(row.get("quantity")?, "options.quantity")?,
    })
}
