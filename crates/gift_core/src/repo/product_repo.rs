//! Product repository contract and SQLite implementation.

use crate::model::product::{NewProduct, Product, ProductId};
use crate::repo::error::RepoResult;
use rusqlite::{params, Connection, Row};

const PRODUCT_SELECT_SQL: &str = "SELECT id, name, price, image_url FROM products";

/// Read/write access to catalog products.
pub trait ProductRepository {
    fn create_product(&self, product: &NewProduct) -> RepoResult<Product>;
    fn find_by_id(&self, id: ProductId) -> RepoResult<Option<Product>>;
}

/// SQLite-backed product repository.
pub struct SqliteProductRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProductRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ProductRepository for SqliteProductRepository<'_> {
    fn create_product(&self, product: &NewProduct) -> RepoResult<Product> {
        product.validate()?;

        let name = product.name.trim();
        self.conn.execute(
            "INSERT INTO products (name, price, image_url) VALUES (?1, ?2, ?3);",
            params![name, product.price, product.image_url.as_deref()],
        )?;

        Ok(Product {
            id: self.conn.last_insert_rowid(),
            name: name.to_string(),
            price: product.price,
            image_url: product.image_url.clone(),
        })
    }

    fn find_by_id(&self, id: ProductId) -> RepoResult<Option<Product>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PRODUCT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_product_row(row)?));
        }
        Ok(None)
    }
}

fn parse_product_row(row: &Row<'_>) -> RepoResult<Product> {
    Ok(Product {
        id: row.get("id")?,
        name: row.get("name")?,
        price: row.get("price")?,
        image_url: row.get("image_url")?,
    })
}
