//! # CRM Service
//!
//! The service object callers and scheduled jobs talk to. Owns a database
//! handle and exposes every operation of the surface as one async method.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          CrmService                                     │
//! │                                                                         │
//! │  Mutations                          Queries                             │
//! │  ─────────                          ───────                             │
//! │  create_customer                    total_customers                     │
//! │  bulk_create_customers              total_orders                        │
//! │  create_product                     total_revenue                       │
//! │  create_order                       all_customers / all_products /      │
//! │  update_low_stock_products            all_orders (order_by)             │
//! │                                     orders_since (reminder window)      │
//! │                                     health_check                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Validation Split
//! Field rules live in `crm-core::validation` (pure); the email-uniqueness
//! rule needs the store and is enforced here. Single-record mutations fail
//! hard on the first violation; the bulk path isolates failures per row.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::bulk;
use crate::error::{ApiError, ApiResult};
use crate::requests::{
    BulkCreateReport, CustomerInput, OrderInput, OrderReceipt, ProductInput, RestockReport,
};
use crm_core::validation::{validate_phone, validate_price_cents, validate_stock};
use crm_core::{
    CoreError, Customer, Money, Order, OrderItem, Product, ValidationError, LOW_STOCK_THRESHOLD,
    RESTOCK_AMOUNT,
};
use crm_db::repository::customer::generate_customer_id;
use crm_db::repository::order::{generate_order_id, generate_order_item_id, OrderContact};
use crm_db::repository::product::generate_product_id;
use crm_db::Database;

/// The CRM service surface.
///
/// Cheap to clone; the database handle shares one pool underneath.
///
/// ## Usage
/// ```rust,ignore
/// let service = CrmService::new(db);
/// let customer = service
///     .create_customer(CustomerInput::new("Alice", "alice@example.com"))
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct CrmService {
    db: Database,
}

impl CrmService {
    /// Creates a service over an already-connected database.
    pub fn new(db: Database) -> Self {
        CrmService { db }
    }

    /// The underlying database handle.
    pub fn database(&self) -> &Database {
        &self.db
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Creates a single customer.
    ///
    /// Unlike the bulk path there is no batch to isolate failures into, so
    /// a duplicate email or bad phone is a hard error.
    pub async fn create_customer(&self, input: CustomerInput) -> ApiResult<Customer> {
        if self.db.customers().email_exists(&input.email).await? {
            return Err(ValidationError::DuplicateEmail { email: input.email }.into());
        }

        if let Some(phone) = &input.phone {
            validate_phone(phone)?;
        }

        let customer = Customer {
            id: generate_customer_id(),
            name: input.name,
            email: input.email,
            phone: input.phone,
            created_at: Utc::now(),
        };

        self.db.customers().insert(&customer).await?;

        info!(id = %customer.id, email = %customer.email, "Created customer");
        Ok(customer)
    }

    /// Creates many customers with per-row error isolation.
    ///
    /// See [`bulk`] for the pipeline; failures land in the report, not in
    /// the `Err` channel.
    pub async fn bulk_create_customers(
        &self,
        inputs: Vec<CustomerInput>,
    ) -> ApiResult<BulkCreateReport> {
        bulk::bulk_create(&self.db, &inputs).await
    }

    /// Creates a product.
    pub async fn create_product(&self, input: ProductInput) -> ApiResult<Product> {
        validate_price_cents(input.price_cents)?;
        validate_stock(input.stock)?;

        let now = Utc::now();
        let product = Product {
            id: generate_product_id(),
            name: input.name,
            price_cents: input.price_cents,
            stock: input.stock,
            created_at: now,
            updated_at: now,
        };

        self.db.products().insert(&product).await?;

        info!(id = %product.id, name = %product.name, "Created product");
        Ok(product)
    }

    /// Creates an order for a customer over a list of product ids.
    ///
    /// ## Resolution Rules
    /// - Unknown customer id: `CustomerNotFound`
    /// - Empty product list: `NoProductsSpecified`
    /// - No id resolves: `NoValidProducts`
    /// - Some ids resolve: the order is created over the resolvable subset
    ///
    /// The total is the sum of the resolved products' current prices; each
    /// line item snapshots the price it was sold at, so later price changes
    /// never disturb history.
    pub async fn create_order(&self, input: OrderInput) -> ApiResult<OrderReceipt> {
        let customer = self
            .db
            .customers()
            .get_by_id(&input.customer_id)
            .await?
            .ok_or_else(|| ApiError::Core(CoreError::CustomerNotFound(input.customer_id.clone())))?;

        if input.product_ids.is_empty() {
            return Err(CoreError::NoProductsSpecified.into());
        }

        let products = self.db.products().resolve_many(&input.product_ids).await?;
        if products.is_empty() {
            return Err(CoreError::NoValidProducts.into());
        }
        if products.len() < input.product_ids.len() {
            debug!(
                requested = input.product_ids.len(),
                resolved = products.len(),
                "Order references unknown product ids; using resolvable subset"
            );
        }

        let total: Money = products.iter().map(Product::price).sum();
        let order = Order {
            id: generate_order_id(),
            customer_id: customer.id.clone(),
            total_amount_cents: total.cents(),
            order_date: input.order_date.unwrap_or_else(Utc::now),
        };

        let items: Vec<OrderItem> = products
            .iter()
            .map(|product| OrderItem {
                id: generate_order_item_id(),
                order_id: order.id.clone(),
                product_id: product.id.clone(),
                price_cents: product.price_cents,
            })
            .collect();

        self.db.orders().insert_with_items(&order, &items).await?;

        info!(
            id = %order.id,
            customer = %customer.email,
            items = items.len(),
            total = %total,
            "Created order"
        );
        Ok(OrderReceipt { order, items })
    }

    /// Restocks every product under the low-stock threshold.
    ///
    /// Selection and updates run in one transaction; the report carries the
    /// products with their new stock levels and a summary line for job logs.
    pub async fn update_low_stock_products(&self) -> ApiResult<RestockReport> {
        let products = self
            .db
            .products()
            .restock_low_stock(LOW_STOCK_THRESHOLD, RESTOCK_AMOUNT)
            .await?;

        let message = format!("Restocked {} low-stock products", products.len());
        info!(count = products.len(), "Low-stock restock pass complete");

        Ok(RestockReport { products, message })
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Total number of customers.
    pub async fn total_customers(&self) -> ApiResult<i64> {
        Ok(self.db.customers().count().await?)
    }

    /// Total number of orders.
    pub async fn total_orders(&self) -> ApiResult<i64> {
        Ok(self.db.orders().count().await?)
    }

    /// Sum of all order totals. Zero for an empty store.
    pub async fn total_revenue(&self) -> ApiResult<Money> {
        let cents = self.db.orders().total_revenue_cents().await?;
        Ok(Money::from_cents(cents))
    }

    /// All customers, ordered by the given fields (`"-name"` descends).
    ///
    /// An empty list leaves natural storage order; an unknown field is a
    /// hard error rather than a silently ignored one.
    pub async fn all_customers(&self, order_by: &[String]) -> ApiResult<Vec<Customer>> {
        Ok(self.db.customers().list(order_by).await?)
    }

    /// All products, ordered by the given fields.
    pub async fn all_products(&self, order_by: &[String]) -> ApiResult<Vec<Product>> {
        Ok(self.db.products().list(order_by).await?)
    }

    /// All orders, ordered by the given fields.
    pub async fn all_orders(&self, order_by: &[String]) -> ApiResult<Vec<Order>> {
        Ok(self.db.orders().list(order_by).await?)
    }

    /// Orders placed at or after `cutoff`, with customer emails attached.
    ///
    /// Backs the reminder job's recent-order scan.
    pub async fn orders_since(&self, cutoff: DateTime<Utc>) -> ApiResult<Vec<OrderContact>> {
        Ok(self.db.orders().created_since(cutoff).await?)
    }

    /// Probes store liveness with a trivial query.
    pub async fn health_check(&self) -> bool {
        self.db.health_check().await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use crm_db::{DbConfig, DbError};

    async fn test_service() -> CrmService {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        CrmService::new(db)
    }

    async fn seed_customer(service: &CrmService, email: &str) -> Customer {
        service
            .create_customer(CustomerInput::new("Test Customer", email))
            .await
            .unwrap()
    }

    async fn seed_product(service: &CrmService, name: &str, price_cents: i64) -> Product {
        service
            .create_product(ProductInput {
                name: name.to_string(),
                price_cents,
                stock: 10,
            })
            .await
            .unwrap()
    }

    // -------------------------------------------------------------------------
    // Customers
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_create_customer_with_valid_phone() {
        let service = test_service().await;

        let customer = service
            .create_customer(
                CustomerInput::new("Alice", "alice@example.com").with_phone("+1234567890"),
            )
            .await
            .unwrap();

        assert_eq!(customer.email, "alice@example.com");
        assert_eq!(service.total_customers().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_create_customer_duplicate_email_is_hard_error() {
        let service = test_service().await;
        seed_customer(&service, "alice@example.com").await;

        let err = service
            .create_customer(CustomerInput::new("Copy", "alice@example.com"))
            .await
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Email already exists: alice@example.com");
    }

    #[tokio::test]
    async fn test_create_customer_bad_phone_is_hard_error() {
        let service = test_service().await;

        let err = service
            .create_customer(CustomerInput::new("Alice", "alice@example.com").with_phone("12345"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Invalid phone format: 12345");
        assert_eq!(service.total_customers().await.unwrap(), 0);
    }

    // -------------------------------------------------------------------------
    // Products
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_create_product_rejects_zero_price() {
        let service = test_service().await;

        let err = service
            .create_product(ProductInput {
                name: "Free".to_string(),
                price_cents: 0,
                stock: 5,
            })
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Invalid price: 0 (price must be positive)");
    }

    #[tokio::test]
    async fn test_create_product_accepts_one_cent() {
        let service = test_service().await;

        let product = service
            .create_product(ProductInput {
                name: "Penny".to_string(),
                price_cents: 1,
                stock: 0,
            })
            .await
            .unwrap();

        assert_eq!(product.price().to_string(), "0.01");
    }

    #[tokio::test]
    async fn test_create_product_rejects_negative_stock() {
        let service = test_service().await;

        let err = service
            .create_product(ProductInput {
                name: "Anti".to_string(),
                price_cents: 100,
                stock: -1,
            })
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Invalid stock: -1 (stock cannot be negative)");
    }

    // -------------------------------------------------------------------------
    // Orders
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_create_order_sums_prices_exactly() {
        let service = test_service().await;
        let customer = seed_customer(&service, "alice@example.com").await;
        let laptop = seed_product(&service, "Laptop", 99_999).await;
        let phone = seed_product(&service, "Phone", 49_999).await;

        let receipt = service
            .create_order(OrderInput {
                customer_id: customer.id.clone(),
                product_ids: vec![laptop.id.clone(), phone.id.clone()],
                order_date: None,
            })
            .await
            .unwrap();

        // 999.99 + 499.99 = 1499.98, no float drift
        assert_eq!(receipt.order.total_amount_cents, 149_998);
        assert_eq!(receipt.total().to_string(), "1499.98");
        assert_eq!(receipt.items.len(), 2);
    }

    #[tokio::test]
    async fn test_create_order_unknown_customer() {
        let service = test_service().await;

        let err = service
            .create_order(OrderInput {
                customer_id: "c-404".to_string(),
                product_ids: vec!["p1".to_string()],
                order_date: None,
            })
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Customer not found: c-404");
    }

    #[tokio::test]
    async fn test_create_order_empty_product_list() {
        let service = test_service().await;
        let customer = seed_customer(&service, "alice@example.com").await;

        let err = service
            .create_order(OrderInput {
                customer_id: customer.id,
                product_ids: vec![],
                order_date: None,
            })
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "No products specified for order");
    }

    #[tokio::test]
    async fn test_create_order_no_resolvable_products() {
        let service = test_service().await;
        let customer = seed_customer(&service, "alice@example.com").await;

        let err = service
            .create_order(OrderInput {
                customer_id: customer.id,
                product_ids: vec!["p-404".to_string(), "p-405".to_string()],
                order_date: None,
            })
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "No valid products found for order");
        assert_eq!(service.total_orders().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_order_partial_resolution() {
        let service = test_service().await;
        let customer = seed_customer(&service, "alice@example.com").await;
        let laptop = seed_product(&service, "Laptop", 99_999).await;

        let receipt = service
            .create_order(OrderInput {
                customer_id: customer.id,
                product_ids: vec![laptop.id.clone(), "p-404".to_string()],
                order_date: None,
            })
            .await
            .unwrap();

        // Only the resolvable product is attached and priced in
        assert_eq!(receipt.items.len(), 1);
        assert_eq!(receipt.items[0].product_id, laptop.id);
        assert_eq!(receipt.order.total_amount_cents, 99_999);
    }

    #[tokio::test]
    async fn test_create_order_explicit_date_is_kept() {
        let service = test_service().await;
        let customer = seed_customer(&service, "alice@example.com").await;
        let laptop = seed_product(&service, "Laptop", 99_999).await;

        let backdated = Utc::now() - Duration::days(30);
        let receipt = service
            .create_order(OrderInput {
                customer_id: customer.id,
                product_ids: vec![laptop.id],
                order_date: Some(backdated),
            })
            .await
            .unwrap();

        assert_eq!(receipt.order.order_date, backdated);
    }

    #[tokio::test]
    async fn test_order_items_snapshot_prices() {
        let service = test_service().await;
        let customer = seed_customer(&service, "alice@example.com").await;
        let laptop = seed_product(&service, "Laptop", 99_999).await;

        let receipt = service
            .create_order(OrderInput {
                customer_id: customer.id,
                product_ids: vec![laptop.id],
                order_date: None,
            })
            .await
            .unwrap();

        let item_sum: i64 = receipt.items.iter().map(|i| i.price_cents).sum();
        assert_eq!(item_sum, receipt.order.total_amount_cents);
    }

    // -------------------------------------------------------------------------
    // Restocking
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_update_low_stock_products() {
        let service = test_service().await;

        service
            .create_product(ProductInput {
                name: "Scarce".to_string(),
                price_cents: 1_000,
                stock: 3,
            })
            .await
            .unwrap();
        service
            .create_product(ProductInput {
                name: "Plenty".to_string(),
                price_cents: 1_000,
                stock: 10,
            })
            .await
            .unwrap();

        let report = service.update_low_stock_products().await.unwrap();

        assert_eq!(report.products.len(), 1);
        assert_eq!(report.products[0].name, "Scarce");
        assert_eq!(report.products[0].stock, 13);
        assert_eq!(report.message, "Restocked 1 low-stock products");
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_totals_on_empty_store() {
        let service = test_service().await;

        assert_eq!(service.total_customers().await.unwrap(), 0);
        assert_eq!(service.total_orders().await.unwrap(), 0);
        assert!(service.total_revenue().await.unwrap().is_zero());
    }

    #[tokio::test]
    async fn test_total_revenue_sums_orders() {
        let service = test_service().await;
        let customer = seed_customer(&service, "alice@example.com").await;
        let laptop = seed_product(&service, "Laptop", 99_999).await;
        let phone = seed_product(&service, "Phone", 49_999).await;

        for product in [&laptop, &phone] {
            service
                .create_order(OrderInput {
                    customer_id: customer.id.clone(),
                    product_ids: vec![product.id.clone()],
                    order_date: None,
                })
                .await
                .unwrap();
        }

        let revenue = service.total_revenue().await.unwrap();
        assert_eq!(revenue.cents(), 149_998);
        assert_eq!(revenue.to_string(), "1499.98");
    }

    #[tokio::test]
    async fn test_all_customers_ordering() {
        let service = test_service().await;
        seed_customer(&service, "bob@example.com").await;
        seed_customer(&service, "alice@example.com").await;

        let ascending = service
            .all_customers(&["email".to_string()])
            .await
            .unwrap();
        assert_eq!(ascending[0].email, "alice@example.com");

        let descending = service
            .all_customers(&["-email".to_string()])
            .await
            .unwrap();
        assert_eq!(descending[0].email, "bob@example.com");
    }

    #[tokio::test]
    async fn test_unknown_sort_field_is_rejected() {
        let service = test_service().await;

        let err = service
            .all_customers(&["password".to_string()])
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ApiError::Db(DbError::InvalidSortField { .. })
        ));
    }

    #[tokio::test]
    async fn test_orders_since_window() {
        let service = test_service().await;
        let customer = seed_customer(&service, "alice@example.com").await;
        let laptop = seed_product(&service, "Laptop", 99_999).await;

        let now = Utc::now();
        service
            .create_order(OrderInput {
                customer_id: customer.id.clone(),
                product_ids: vec![laptop.id.clone()],
                order_date: Some(now - Duration::days(2)),
            })
            .await
            .unwrap();
        service
            .create_order(OrderInput {
                customer_id: customer.id.clone(),
                product_ids: vec![laptop.id.clone()],
                order_date: Some(now - Duration::days(10)),
            })
            .await
            .unwrap();

        let recent = service.orders_since(now - Duration::days(7)).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].customer_email, "alice@example.com");
    }

    #[tokio::test]
    async fn test_health_check() {
        let service = test_service().await;
        assert!(service.health_check().await);
    }
}
