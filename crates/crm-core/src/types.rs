//! # Domain Types
//!
//! Core domain types used throughout the CRM backend.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Customer     │   │     Product     │   │      Order      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  email (unique) │   │  price_cents    │   │  customer_id    │       │
//! │  │  phone (opt)    │   │  stock          │   │  total_amount   │       │
//! │  │  created_at     │   │  updated_at     │   │  order_date     │       │
//! │  └─────────────────┘   └─────────────────┘   └────────┬────────┘       │
//! │                                                       │                 │
//! │                                              ┌────────┴────────┐       │
//! │                                              │    OrderItem    │       │
//! │                                              │  ─────────────  │       │
//! │                                              │  product_id     │       │
//! │                                              │  price snapshot │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! Order items freeze the product price at order time. A later price change
//! never rewrites history: `Order.total_amount_cents` stays equal to the sum
//! of its item snapshots forever.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::LOW_STOCK_THRESHOLD;

// =============================================================================
// Customer
// =============================================================================

/// A customer on record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Contact email. Globally unique, compared case-sensitively.
    pub email: String,

    /// Optional phone number in one of the accepted canonical forms
    /// (`+<10-15 digits>` or `NNN-NNN-NNNN`).
    pub phone: Option<String>,

    /// When the customer was created.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Product
// =============================================================================

/// A product available for ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Price in cents (smallest currency unit). Always positive.
    pub price_cents: i64,

    /// Current stock level. Never negative.
    pub stock: i64,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated (restocks bump this).
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Checks whether the product qualifies for the low-stock top-up.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.stock < LOW_STOCK_THRESHOLD
    }
}

// =============================================================================
// Order
// =============================================================================

/// A placed order.
///
/// The total is derived from the constituent products' prices at creation
/// time and never recomputed afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Order {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// The customer who placed the order.
    pub customer_id: String,

    /// Sum of the attached products' prices at order time, in cents.
    pub total_amount_cents: i64,

    /// When the order was placed. Defaults to creation time.
    pub order_date: DateTime<Utc>,
}

impl Order {
    /// Returns the order total as Money.
    #[inline]
    pub fn total_amount(&self) -> Money {
        Money::from_cents(self.total_amount_cents)
    }
}

// =============================================================================
// Order Item
// =============================================================================

/// A product attached to an order.
/// Uses snapshot pattern to freeze the price at order time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct OrderItem {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// The order this item belongs to.
    pub order_id: String,

    /// The product this item refers to.
    pub product_id: String,

    /// Unit price in cents at time of order (frozen).
    pub price_cents: i64,
}

impl OrderItem {
    /// Returns the snapshotted price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price_cents: i64, stock: i64) -> Product {
        Product {
            id: "p-1".to_string(),
            name: "Laptop".to_string(),
            price_cents,
            stock,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_product_price_as_money() {
        let p = product(99_999, 10);
        assert_eq!(p.price(), Money::from_cents(99_999));
        assert_eq!(p.price().to_string(), "999.99");
    }

    #[test]
    fn test_low_stock_boundary() {
        assert!(product(100, 9).is_low_stock());
        assert!(product(100, 0).is_low_stock());
        assert!(!product(100, 10).is_low_stock());
        assert!(!product(100, 20).is_low_stock());
    }

    #[test]
    fn test_order_total_as_money() {
        let order = Order {
            id: "o-1".to_string(),
            customer_id: "c-1".to_string(),
            total_amount_cents: 149_998,
            order_date: Utc::now(),
        };
        assert_eq!(order.total_amount().to_string(), "1499.98");
    }
}
