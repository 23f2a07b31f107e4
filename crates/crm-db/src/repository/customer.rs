//! # Customer Repository
//!
//! Database operations for customers.
//!
//! ## Key Operations
//! - Single and batched inserts (the batch runs in ONE transaction)
//! - Email existence probe for the uniqueness check
//! - Ordered listing and counting
//!
//! ## Batch Insert Transaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  insert_batch: All-or-Nothing                           │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    INSERT customer 1 ─┐                                                 │
//! │    INSERT customer 2  ├── any storage failure rolls ALL of them back   │
//! │    INSERT customer 3 ─┘                                                 │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  Validation happens BEFORE this call (crm-api). By the time a batch    │
//! │  reaches the repository, every record in it is expected to commit.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::ordering::build_order_by;
use crm_core::Customer;

/// Columns list queries may sort by.
pub const SORTABLE_FIELDS: &[&str] = &["id", "name", "email", "created_at"];

/// Repository for customer database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = CustomerRepository::new(pool);
///
/// // Check uniqueness before creating
/// if repo.email_exists("a@x.com").await? { ... }
///
/// // Ordered listing
/// let customers = repo.list(&["-created_at".to_string()]).await?;
/// ```
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Inserts a single customer.
    ///
    /// ## Arguments
    /// * `customer` - Customer to insert (id generated beforehand)
    ///
    /// ## Returns
    /// * `Ok(())` - Inserted
    /// * `Err(DbError::UniqueViolation)` - Email already exists
    pub async fn insert(&self, customer: &Customer) -> DbResult<()> {
        debug!(id = %customer.id, email = %customer.email, "Inserting customer");

        sqlx::query(
            r#"
            INSERT INTO customers (id, name, email, phone, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&customer.id)
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(customer.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Inserts a batch of customers inside one transaction.
    ///
    /// ## Atomicity
    /// Either every customer in the slice is committed or none are. The
    /// bulk coordinator filters validation failures out before calling
    /// this, so a failure here is a storage problem, not bad input.
    pub async fn insert_batch(&self, customers: &[Customer]) -> DbResult<()> {
        if customers.is_empty() {
            return Ok(());
        }

        debug!(count = customers.len(), "Inserting customer batch");

        let mut tx = self.pool.begin().await?;

        for customer in customers {
            sqlx::query(
                r#"
                INSERT INTO customers (id, name, email, phone, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(&customer.id)
            .bind(&customer.name)
            .bind(&customer.email)
            .bind(&customer.phone)
            .bind(customer.created_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(())
    }

    /// Checks whether any customer already holds this email.
    ///
    /// ## Case Sensitivity
    /// The email column carries SQLite's default BINARY collation, so the
    /// comparison is a case-sensitive exact match.
    pub async fn email_exists(&self, email: &str) -> DbResult<bool> {
        let exists: i64 =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM customers WHERE email = ?1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists != 0)
    }

    /// Gets a customer by ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Customer))` - Customer found
    /// * `Ok(None)` - Customer not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, name, email, phone, created_at
            FROM customers
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Lists all customers, optionally ordered by caller-supplied fields.
    ///
    /// ## Arguments
    /// * `order_by` - Sort specs like `["name", "-created_at"]`; empty
    ///   leaves natural storage order
    pub async fn list(&self, order_by: &[String]) -> DbResult<Vec<Customer>> {
        let clause = build_order_by(order_by, SORTABLE_FIELDS)?;

        let sql = format!(
            "SELECT id, name, email, phone, created_at FROM customers{}",
            clause
        );

        let customers = sqlx::query_as::<_, Customer>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(customers)
    }

    /// Counts all customers.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Helper to generate a new customer ID.
///
/// ## Usage
/// ```rust,ignore
/// let id = generate_customer_id();
/// let customer = Customer { id, ... };
/// ```
pub fn generate_customer_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::Utc;

    fn customer(name: &str, email: &str, phone: Option<&str>) -> Customer {
        Customer {
            id: generate_customer_id(),
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.map(|p| p.to_string()),
            created_at: Utc::now(),
        }
    }

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = test_db().await;
        let repo = db.customers();

        let alice = customer("Alice", "alice@example.com", Some("+1234567890"));
        repo.insert(&alice).await.unwrap();

        let fetched = repo.get_by_id(&alice.id).await.unwrap().unwrap();
        assert_eq!(fetched.email, "alice@example.com");
        assert_eq!(fetched.phone.as_deref(), Some("+1234567890"));

        assert!(repo.get_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_unique_violation() {
        let db = test_db().await;
        let repo = db.customers();

        repo.insert(&customer("Alice", "a@x.com", None))
            .await
            .unwrap();

        let err = repo
            .insert(&customer("Bob", "a@x.com", None))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_email_exists_is_case_sensitive() {
        let db = test_db().await;
        let repo = db.customers();

        repo.insert(&customer("Alice", "a@x.com", None))
            .await
            .unwrap();

        assert!(repo.email_exists("a@x.com").await.unwrap());
        assert!(!repo.email_exists("A@X.COM").await.unwrap());
        assert!(!repo.email_exists("other@x.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_insert_batch_commits_together() {
        let db = test_db().await;
        let repo = db.customers();

        let batch = vec![
            customer("Alice", "alice@example.com", None),
            customer("Bob", "bob@example.com", Some("123-456-7890")),
        ];
        repo.insert_batch(&batch).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_insert_batch_rolls_back_on_failure() {
        let db = test_db().await;
        let repo = db.customers();

        // Second record violates UNIQUE(email) mid-transaction; the first
        // must not survive on its own.
        let batch = vec![
            customer("Alice", "same@x.com", None),
            customer("Bob", "same@x.com", None),
        ];
        assert!(repo.insert_batch(&batch).await.is_err());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_empty_batch_is_noop() {
        let db = test_db().await;
        let repo = db.customers();

        repo.insert_batch(&[]).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_ordering() {
        let db = test_db().await;
        let repo = db.customers();

        repo.insert(&customer("Bob", "bob@example.com", None))
            .await
            .unwrap();
        repo.insert(&customer("Alice", "alice@example.com", None))
            .await
            .unwrap();

        let by_name = repo.list(&["name".to_string()]).await.unwrap();
        assert_eq!(by_name[0].name, "Alice");
        assert_eq!(by_name[1].name, "Bob");

        let by_name_desc = repo.list(&["-name".to_string()]).await.unwrap();
        assert_eq!(by_name_desc[0].name, "Bob");

        let err = repo.list(&["nope".to_string()]).await.unwrap_err();
        assert!(matches!(err, DbError::InvalidSortField { .. }));
    }
}
