use crate::db::models::{Category, Product};
use crate::db::schema::SQLITE_INIT;
use crate::error::CatalogError;
use crate::types::catalog::ProductPayload;
use rust_decimal::Decimal;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite, SqliteConnection};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

pub type SqlitePool = Pool<Sqlite>;

/// Writers take the database lock up front; a deferred transaction that reads
/// first cannot wait on another writer and fails with `SQLITE_BUSY` instead.
const BEGIN_WRITE: &str = "BEGIN IMMEDIATE";

const PRODUCT_COLUMNS: &str = r#"SELECT p.id, p.name, p.description, p.price, p.category_id,
       c.name AS category_name
       FROM products p LEFT JOIN categories c ON c.id = p.category_id"#;

/// Open a pool for `database_url`, creating the database file when missing.
pub async fn connect(database_url: &str) -> Result<SqlitePool, CatalogError> {
    let connect_opts = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));
    let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
    Ok(pool)
}

#[derive(Clone)]
pub struct CatalogStorage {
    pool: SqlitePool,
}

impl CatalogStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), CatalogError> {
        // sqlx::query runs one statement at a time
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    pub async fn count_categories(&self) -> Result<i64, CatalogError> {
        let rec: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;
        Ok(rec.0)
    }

    pub async fn count_products(&self) -> Result<i64, CatalogError> {
        let rec: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(rec.0)
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        let rows = sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn find_category(&self, id: i64) -> Result<Option<Category>, CatalogError> {
        let mut conn = self.pool.acquire().await?;
        Ok(Self::category_on(&mut *conn, id).await?)
    }

    pub async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>, CatalogError> {
        let row = sqlx::query_as::<_, Category>(
            "SELECT id, name FROM categories WHERE name = ? ORDER BY id LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn insert_category(&self, name: &str) -> Result<Category, CatalogError> {
        let res = sqlx::query("INSERT INTO categories (name) VALUES (?)")
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(Category {
            id: res.last_insert_rowid(),
            name: name.to_string(),
        })
    }

    /// Every product with its category resolved, in insertion order.
    pub async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        let rows = sqlx::query(&format!("{PRODUCT_COLUMNS} ORDER BY p.id"))
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter()
            .map(|row| Self::row_to_product(row).map_err(CatalogError::from))
            .collect()
    }

    pub async fn find_product(&self, id: i64) -> Result<Option<Product>, CatalogError> {
        let row = sqlx::query(&format!("{PRODUCT_COLUMNS} WHERE p.id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Self::row_to_product).transpose()?)
    }

    /// Insert a product after checking its category exists; both happen in one
    /// transaction. Returns the stored product with identity and category.
    pub async fn insert_product(&self, payload: &ProductPayload) -> Result<Product, CatalogError> {
        let mut tx = self.pool.begin_with(BEGIN_WRITE).await?;
        let category = Self::category_on(&mut *tx, payload.category_id)
            .await?
            .ok_or(CatalogError::UnknownCategory(payload.category_id))?;

        let res = sqlx::query(
            "INSERT INTO products (name, description, price, category_id) VALUES (?, ?, ?, ?)",
        )
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(payload.price.to_string())
        .bind(payload.category_id)
        .execute(&mut *tx)
        .await?;
        let id = res.last_insert_rowid();

        tx.commit().await?;
        debug!(id, "product insert committed");

        Ok(Product {
            id,
            name: payload.name.clone(),
            description: payload.description.clone(),
            price: payload.price,
            category_id: payload.category_id,
            category: Some(category),
        })
    }

    /// Overwrite every mutable field of product `id`.
    ///
    /// A missing product or category aborts before anything is written; the
    /// transaction is dropped without commit.
    pub async fn update_product(
        &self,
        id: i64,
        payload: &ProductPayload,
    ) -> Result<(), CatalogError> {
        let mut tx = self.pool.begin_with(BEGIN_WRITE).await?;
        if !Self::product_exists_on(&mut *tx, id).await? {
            return Err(CatalogError::NotFound);
        }
        if Self::category_on(&mut *tx, payload.category_id).await?.is_none() {
            return Err(CatalogError::UnknownCategory(payload.category_id));
        }

        sqlx::query(
            r#"UPDATE products SET
                name = ?,
                description = ?,
                price = ?,
                category_id = ?
              WHERE id = ?"#,
        )
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(payload.price.to_string())
        .bind(payload.category_id)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        debug!(id, "product update committed");
        Ok(())
    }

    /// Remove product `id`. A missing product yields `NotFound` without commit.
    pub async fn delete_product(&self, id: i64) -> Result<(), CatalogError> {
        let mut tx = self.pool.begin_with(BEGIN_WRITE).await?;
        if !Self::product_exists_on(&mut *tx, id).await? {
            return Err(CatalogError::NotFound);
        }

        sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        debug!(id, "product delete committed");
        Ok(())
    }

    async fn category_on(
        conn: &mut SqliteConnection,
        id: i64,
    ) -> Result<Option<Category>, sqlx::Error> {
        sqlx::query_as::<_, Category>("SELECT id, name FROM categories WHERE id = ?")
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    async fn product_exists_on(conn: &mut SqliteConnection, id: i64) -> Result<bool, sqlx::Error> {
        let rec: Option<(i64,)> = sqlx::query_as("SELECT id FROM products WHERE id = ?")
            .bind(id)
            .fetch_optional(conn)
            .await?;
        Ok(rec.is_some())
    }

    fn row_to_product(row: SqliteRow) -> Result<Product, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let description: String = row.try_get("description")?;
        let price_str: String = row.try_get("price")?;
        let category_id: i64 = row.try_get("category_id")?;
        let category_name: Option<String> = row.try_get("category_name")?;

        let price = Decimal::from_str(&price_str).map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        let category = category_name.map(|name| Category {
            id: category_id,
            name,
        });

        Ok(Product {
            id,
            name,
            description,
            price,
            category_id,
            category,
        })
    }
}
