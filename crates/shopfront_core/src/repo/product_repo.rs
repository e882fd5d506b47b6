//! Product repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide keyed CRUD and enumeration over the canonical `products` table.
//! - Keep SQL and column encoding details inside the persistence boundary.
//!
//! # Invariants
//! - Reads return owned copies; callers never alias stored state.
//! - Listing follows insertion order (`rowid`).
//! - Prices round-trip exactly through canonical decimal text.
//! - Undecodable rows are reported as `InvalidData`, never masked.

use crate::db::DbError;
use crate::model::product::{Product, ProductId};
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

const PRODUCT_SELECT_SQL: &str = "SELECT
    uuid,
    name,
    price,
    description,
    image_path,
    category,
    in_stock
FROM products";

const PRODUCT_COLUMNS: &[&str] = &[
    "uuid",
    "name",
    "price",
    "description",
    "image_path",
    "category",
    "in_stock",
];

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage-layer error for product persistence.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(ProductId),
    InvalidData(String),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "product not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted product data: {message}"),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Persistent keyed collection of products.
pub trait ProductRepository {
    /// Returns every product in insertion order.
    fn list_products(&self) -> RepoResult<Vec<Product>>;
    /// Returns one product, or `None` when the id is unknown.
    fn get_product(&self, id: ProductId) -> RepoResult<Option<Product>>;
    /// Inserts a new row using `product.id` as its key.
    fn insert_product(&self, product: &Product) -> RepoResult<()>;
    /// Replaces every mutable column of an existing row.
    fn overwrite_product(&self, product: &Product) -> RepoResult<()>;
    /// Removes one row by id.
    fn delete_product(&self, id: ProductId) -> RepoResult<()>;
}

/// SQLite-backed product repository borrowing a migrated connection.
pub struct SqliteProductRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProductRepository<'conn> {
    /// Constructs a repository after checking the `products` schema.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_product_schema(conn)?;
        Ok(Self { conn })
    }
}

impl ProductRepository for SqliteProductRepository<'_> {
    fn list_products(&self) -> RepoResult<Vec<Product>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PRODUCT_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut products = Vec::new();

        while let Some(row) = rows.next()? {
            products.push(parse_product_row(row)?);
        }

        Ok(products)
    }

    fn get_product(&self, id: ProductId) -> RepoResult<Option<Product>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PRODUCT_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;

        match rows.next()? {
            Some(row) => Ok(Some(parse_product_row(row)?)),
            None => Ok(None),
        }
    }

    fn insert_product(&self, product: &Product) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO products (
                uuid,
                name,
                price,
                description,
                image_path,
                category,
                in_stock
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                product.id.to_string(),
                product.name.as_str(),
                product.price.to_string(),
                product.description.as_deref(),
                product.image_path.as_deref(),
                product.category.as_deref(),
                bool_to_int(product.in_stock),
            ],
        )?;

        Ok(())
    }

    fn overwrite_product(&self, product: &Product) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE products
             SET
                name = ?1,
                price = ?2,
                description = ?3,
                image_path = ?4,
                category = ?5,
                in_stock = ?6,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?7;",
            params![
                product.name.as_str(),
                product.price.to_string(),
                product.description.as_deref(),
                product.image_path.as_deref(),
                product.category.as_deref(),
                bool_to_int(product.in_stock),
                product.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(product.id));
        }

        Ok(())
    }

    fn delete_product(&self, id: ProductId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM products WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_product_row(row: &Row<'_>) -> RepoResult<Product> {
    let uuid_text: String = row.get("uuid")?;
    let id = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in products.uuid"))
    })?;

    let price_text: String = row.get("price")?;
    let price = Decimal::from_str(&price_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid price value `{price_text}` in products.price"))
    })?;

    let in_stock = match row.get::<_, i64>("in_stock")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid in_stock value `{other}` in products.in_stock"
            )));
        }
    };

    Ok(Product {
        id,
        name: row.get("name")?,
        price,
        description: row.get("description")?,
        image_path: row.get("image_path")?,
        category: row.get("category")?,
        in_stock,
    })
}

fn ensure_product_schema(conn: &Connection) -> RepoResult<()> {
    let exists = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'products';",
            [],
            |row| row.get::<_, i64>(0),
        )
        .optional()?;
    if exists.is_none() {
        return Err(RepoError::MissingRequiredTable("products"));
    }

    let mut stmt = conn.prepare("PRAGMA table_info(products);")?;
    let present = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<Result<Vec<_>, _>>()?;

    for &column in PRODUCT_COLUMNS {
        if !present.iter().any(|name| name == column) {
            return Err(RepoError::MissingRequiredColumn {
                table: "products",
                column,
            });
        }
    }

    Ok(())
}

fn bool_to_int(value: bool) -> i64 {
    i64::from(value)
}
