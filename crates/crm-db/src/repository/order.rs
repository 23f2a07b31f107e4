//! # Order Repository
//!
//! Database operations for orders and their line items.
//!
//! ## Key Operations
//! - Transactional insert of an order together with its items
//! - Revenue and count aggregates for reporting
//! - Recent-order lookup joined to customer contact info for reminders

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::ordering::build_order_by;
use crm_core::{Order, OrderItem};

/// Columns list queries may sort by.
pub const SORTABLE_FIELDS: &[&str] = &["id", "customer_id", "total_amount_cents", "order_date"];

/// An order paired with the email of the customer who placed it.
///
/// Shape used by the reminder job; carrying the email out of the join
/// saves a per-order customer lookup.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct OrderContact {
    pub order_id: String,
    pub customer_email: String,
    pub order_date: DateTime<Utc>,
}

/// Repository for order database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = OrderRepository::new(pool);
///
/// // Order + items land together or not at all
/// repo.insert_with_items(&order, &items).await?;
///
/// let revenue = repo.total_revenue_cents().await?;
/// ```
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Inserts an order and all of its line items in one transaction.
    ///
    /// ## Atomicity
    /// A failure on any item rolls back the order row too; no order is
    /// ever visible without its items.
    pub async fn insert_with_items(&self, order: &Order, items: &[OrderItem]) -> DbResult<()> {
        debug!(
            id = %order.id,
            customer_id = %order.customer_id,
            items = items.len(),
            "Inserting order"
        );

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO orders (id, customer_id, total_amount_cents, order_date)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&order.id)
        .bind(&order.customer_id)
        .bind(order.total_amount_cents)
        .bind(order.order_date)
        .execute(&mut *tx)
        .await?;

        for item in items {
            sqlx::query(
                r#"
                INSERT INTO order_items (id, order_id, product_id, price_cents)
                VALUES (?1, ?2, ?3, ?4)
                "#,
            )
            .bind(&item.id)
            .bind(&item.order_id)
            .bind(&item.product_id)
            .bind(item.price_cents)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(())
    }

    /// Gets an order by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, customer_id, total_amount_cents, order_date
            FROM orders
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// Gets all line items for an order.
    pub async fn items(&self, order_id: &str) -> DbResult<Vec<OrderItem>> {
        let items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT id, order_id, product_id, price_cents
            FROM order_items
            WHERE order_id = ?1
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Lists all orders, optionally ordered by caller-supplied fields.
    pub async fn list(&self, order_by: &[String]) -> DbResult<Vec<Order>> {
        let clause = build_order_by(order_by, SORTABLE_FIELDS)?;

        let sql = format!(
            "SELECT id, customer_id, total_amount_cents, order_date FROM orders{}",
            clause
        );

        let orders = sqlx::query_as::<_, Order>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(orders)
    }

    /// Counts all orders.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Sums total_amount_cents across all orders.
    ///
    /// An empty store sums to 0, not NULL.
    pub async fn total_revenue_cents(&self) -> DbResult<i64> {
        let revenue: i64 =
            sqlx::query_scalar("SELECT COALESCE(SUM(total_amount_cents), 0) FROM orders")
                .fetch_one(&self.pool)
                .await?;

        Ok(revenue)
    }

    /// Finds orders placed at or after `cutoff`, with customer emails.
    ///
    /// Results come back oldest-first so reminder logs read chronologically.
    pub async fn created_since(&self, cutoff: DateTime<Utc>) -> DbResult<Vec<OrderContact>> {
        let contacts = sqlx::query_as::<_, OrderContact>(
            r#"
            SELECT o.id AS order_id, c.email AS customer_email, o.order_date
            FROM orders o
            JOIN customers c ON c.id = o.customer_id
            WHERE o.order_date >= ?1
            ORDER BY o.order_date
            "#,
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;

        Ok(contacts)
    }
}

/// Helper to generate a new order ID.
pub fn generate_order_id() -> String {
    Uuid::new_v4().to_string()
}

/// Helper to generate a new order item ID.
pub fn generate_order_item_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::customer::generate_customer_id;
    use crate::repository::product::generate_product_id;
    use chrono::Duration;
    use crm_core::{Customer, Product};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn seed_customer(db: &Database, email: &str) -> Customer {
        let customer = Customer {
            id: generate_customer_id(),
            name: "Test Customer".to_string(),
            email: email.to_string(),
            phone: None,
            created_at: Utc::now(),
        };
        db.customers().insert(&customer).await.unwrap();
        customer
    }

    async fn seed_product(db: &Database, name: &str, price_cents: i64) -> Product {
        let now = Utc::now();
        let product = Product {
            id: generate_product_id(),
            name: name.to_string(),
            price_cents,
            stock: 10,
            created_at: now,
            updated_at: now,
        };
        db.products().insert(&product).await.unwrap();
        product
    }

    fn order_for(customer: &Customer, total_cents: i64, order_date: DateTime<Utc>) -> Order {
        Order {
            id: generate_order_id(),
            customer_id: customer.id.clone(),
            total_amount_cents: total_cents,
            order_date,
        }
    }

    #[tokio::test]
    async fn test_insert_with_items_and_fetch() {
        let db = test_db().await;
        let customer = seed_customer(&db, "alice@example.com").await;
        let laptop = seed_product(&db, "Laptop", 99_999).await;
        let phone = seed_product(&db, "Phone", 49_999).await;

        let order = order_for(&customer, 149_998, Utc::now());
        let items = vec![
            OrderItem {
                id: generate_order_item_id(),
                order_id: order.id.clone(),
                product_id: laptop.id.clone(),
                price_cents: laptop.price_cents,
            },
            OrderItem {
                id: generate_order_item_id(),
                order_id: order.id.clone(),
                product_id: phone.id.clone(),
                price_cents: phone.price_cents,
            },
        ];

        db.orders().insert_with_items(&order, &items).await.unwrap();

        let fetched = db.orders().get_by_id(&order.id).await.unwrap().unwrap();
        assert_eq!(fetched.total_amount_cents, 149_998);

        let fetched_items = db.orders().items(&order.id).await.unwrap();
        assert_eq!(fetched_items.len(), 2);
    }

    #[tokio::test]
    async fn test_insert_rolls_back_on_bad_item() {
        let db = test_db().await;
        let customer = seed_customer(&db, "alice@example.com").await;
        let laptop = seed_product(&db, "Laptop", 99_999).await;

        let order = order_for(&customer, 99_999, Utc::now());
        let items = vec![
            OrderItem {
                id: generate_order_item_id(),
                order_id: order.id.clone(),
                product_id: laptop.id.clone(),
                price_cents: laptop.price_cents,
            },
            // FK violation: product does not exist
            OrderItem {
                id: generate_order_item_id(),
                order_id: order.id.clone(),
                product_id: "no-such-product".to_string(),
                price_cents: 1,
            },
        ];

        let result = db.orders().insert_with_items(&order, &items).await;
        assert!(result.is_err());

        // The order row rolled back with the failed item
        assert!(db.orders().get_by_id(&order.id).await.unwrap().is_none());
        assert_eq!(db.orders().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_insert_rejects_unknown_customer() {
        let db = test_db().await;

        let order = Order {
            id: generate_order_id(),
            customer_id: "no-such-customer".to_string(),
            total_amount_cents: 100,
            order_date: Utc::now(),
        };

        let result = db.orders().insert_with_items(&order, &[]).await;
        assert!(matches!(result, Err(DbError::ForeignKeyViolation { .. })));
    }

    #[tokio::test]
    async fn test_revenue_sums_exactly() {
        let db = test_db().await;
        let customer = seed_customer(&db, "alice@example.com").await;

        db.orders()
            .insert_with_items(&order_for(&customer, 99_999, Utc::now()), &[])
            .await
            .unwrap();
        db.orders()
            .insert_with_items(&order_for(&customer, 49_999, Utc::now()), &[])
            .await
            .unwrap();

        assert_eq!(db.orders().total_revenue_cents().await.unwrap(), 149_998);
    }

    #[tokio::test]
    async fn test_revenue_of_empty_store_is_zero() {
        let db = test_db().await;
        assert_eq!(db.orders().total_revenue_cents().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_created_since_cutoff() {
        let db = test_db().await;
        let customer = seed_customer(&db, "alice@example.com").await;

        let now = Utc::now();
        let recent = order_for(&customer, 100, now - Duration::days(2));
        let old = order_for(&customer, 200, now - Duration::days(30));
        db.orders().insert_with_items(&recent, &[]).await.unwrap();
        db.orders().insert_with_items(&old, &[]).await.unwrap();

        let contacts = db
            .orders()
            .created_since(now - Duration::days(7))
            .await
            .unwrap();

        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].order_id, recent.id);
        assert_eq!(contacts[0].customer_email, "alice@example.com");
    }

    #[tokio::test]
    async fn test_list_ordering_by_date() {
        let db = test_db().await;
        let customer = seed_customer(&db, "alice@example.com").await;

        let now = Utc::now();
        let first = order_for(&customer, 100, now - Duration::days(3));
        let second = order_for(&customer, 200, now - Duration::days(1));
        db.orders().insert_with_items(&second, &[]).await.unwrap();
        db.orders().insert_with_items(&first, &[]).await.unwrap();

        let newest_first = db.orders().list(&["-order_date".to_string()]).await.unwrap();
        assert_eq!(newest_first[0].id, second.id);
        assert_eq!(newest_first[1].id, first.id);
    }
}
