//! # Request and Report Types
//!
//! Typed inputs and outputs for every service operation.
//!
//! ## Design Notes
//! - Inputs carry caller data only; ids and timestamps are generated by
//!   the service at creation time.
//! - Prices arrive as integer cents. There is no float anywhere in the
//!   money path.
//! - Reports are what an outer surface would serialize back to a caller,
//!   so they derive `Serialize`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crm_core::{Customer, Money, Order, OrderItem, Product};

/// A candidate customer, used by both single and bulk creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerInput {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

impl CustomerInput {
    /// Creates an input with no phone.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        CustomerInput {
            name: name.into(),
            email: email.into(),
            phone: None,
        }
    }

    /// Sets the phone number.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}

/// A candidate product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductInput {
    pub name: String,
    /// Price in integer cents; must be positive.
    pub price_cents: i64,
    /// Initial stock; must be non-negative.
    pub stock: i64,
}

/// A candidate order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderInput {
    pub customer_id: String,
    /// Products to attach. Unknown ids are dropped; at least one must
    /// resolve or creation fails.
    pub product_ids: Vec<String>,
    /// Explicit order date; defaults to now when absent.
    #[serde(default)]
    pub order_date: Option<DateTime<Utc>>,
}

/// Outcome of a bulk customer import.
///
/// Every input row lands in exactly one of the two lists:
/// `created.len() + errors.len()` always equals the input length.
#[derive(Debug, Clone, Serialize)]
pub struct BulkCreateReport {
    /// Customers created, in processing order.
    pub created: Vec<Customer>,
    /// One human-readable message per rejected row, in failure order.
    pub errors: Vec<String>,
}

impl BulkCreateReport {
    /// Returns true if every row was created.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A created order together with its line items.
#[derive(Debug, Clone, Serialize)]
pub struct OrderReceipt {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

impl OrderReceipt {
    /// Order total as money.
    pub fn total(&self) -> Money {
        self.order.total_amount()
    }
}

/// Outcome of a low-stock restock pass.
#[derive(Debug, Clone, Serialize)]
pub struct RestockReport {
    /// Restocked products with their new stock levels.
    pub products: Vec<Product>,
    /// Human-readable summary for job logs.
    pub message: String,
}
