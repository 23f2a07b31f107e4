//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - CRUD operations
//! - Partial id resolution for order creation
//! - Low-stock restocking in a single transaction
//!
//! ## Low-Stock Restock
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                How restock_low_stock Works                              │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    SELECT products WHERE stock < threshold                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │ Laptop   stock  3 │ ← selected          │                           │
//! │  │ Phone    stock 20 │                     │                           │
//! │  │ Headset  stock  9 │ ← selected          │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │    UPDATE each selected row: stock = stock + amount                    │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  One transaction: a crash mid-pass never leaves half the               │
//! │  products restocked.                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use std::collections::HashSet;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::ordering::build_order_by;
use crm_core::Product;

/// Columns list queries may sort by.
pub const SORTABLE_FIELDS: &[&str] = &[
    "id",
    "name",
    "price_cents",
    "stock",
    "created_at",
    "updated_at",
];

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// // Resolve the subset of ids that exist, in input order
/// let products = repo.resolve_many(&ids).await?;
///
/// // Top up everything under the threshold
/// let restocked = repo.restock_low_stock(10, 10).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a new product.
    ///
    /// ## Arguments
    /// * `product` - Product to insert (id generated beforehand)
    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, name = %product.name, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (id, name, price_cents, stock, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(product.price_cents)
        .bind(product.stock)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price_cents, stock, created_at, updated_at
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Resolves a list of product ids to the products that exist.
    ///
    /// ## Partial Resolution
    /// - Unknown ids are skipped silently (logged at debug level)
    /// - Result preserves input order
    /// - Repeated ids resolve once
    ///
    /// The caller decides what an empty result means; for order creation
    /// it is the `NoValidProducts` failure.
    pub async fn resolve_many(&self, ids: &[String]) -> DbResult<Vec<Product>> {
        let mut seen = HashSet::new();
        let mut products = Vec::new();

        for id in ids {
            if !seen.insert(id.as_str()) {
                continue;
            }

            match self.get_by_id(id).await? {
                Some(product) => products.push(product),
                None => debug!(id = %id, "Skipping unknown product id"),
            }
        }

        Ok(products)
    }

    /// Lists all products, optionally ordered by caller-supplied fields.
    pub async fn list(&self, order_by: &[String]) -> DbResult<Vec<Product>> {
        let clause = build_order_by(order_by, SORTABLE_FIELDS)?;

        let sql = format!(
            "SELECT id, name, price_cents, stock, created_at, updated_at FROM products{}",
            clause
        );

        let products = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    /// Restocks every product whose stock is below `threshold` by `amount`.
    ///
    /// ## Atomicity
    /// Selection and all updates run in one transaction; either the whole
    /// pass lands or none of it does.
    ///
    /// ## Returns
    /// The restocked products with their NEW stock levels, ordered by name
    /// so job output is deterministic.
    pub async fn restock_low_stock(&self, threshold: i64, amount: i64) -> DbResult<Vec<Product>> {
        debug!(threshold, amount, "Restocking low-stock products");

        let mut tx = self.pool.begin().await?;

        let mut low: Vec<Product> = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price_cents, stock, created_at, updated_at
            FROM products
            WHERE stock < ?1
            ORDER BY name
            "#,
        )
        .bind(threshold)
        .fetch_all(&mut *tx)
        .await?;

        let now = Utc::now();
        for product in &mut low {
            sqlx::query("UPDATE products SET stock = stock + ?2, updated_at = ?3 WHERE id = ?1")
                .bind(&product.id)
                .bind(amount)
                .bind(now)
                .execute(&mut *tx)
                .await?;

            // Mirror the write so callers see the new levels
            product.stock += amount;
            product.updated_at = now;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        debug!(count = low.len(), "Restock pass complete");
        Ok(low)
    }

    /// Counts all products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Helper to generate a new product ID.
pub fn generate_product_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
