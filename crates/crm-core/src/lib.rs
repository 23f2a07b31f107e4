//! # crm-core: Pure Business Logic for the CRM Backend
//!
//! This crate is the **heart** of the CRM backend. It contains all business
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       CRM Backend Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Scheduled Jobs (apps/cron)                     │   │
//! │  │   heartbeat ──► low-stock ──► order-reminders ──► weekly-report │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 crm-api (Query/Mutation Surface)                │   │
//! │  │   create_customer, bulk_create_customers, create_order, ...    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                ★ crm-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ validation│  │   error   │  │   │
//! │  │   │  Customer │  │   Money   │  │   phone   │  │ CoreError │  │   │
//! │  │   │  Product  │  │  (cents)  │  │   price   │  │ Validation│  │   │
//! │  │   │   Order   │  │           │  │   stock   │  │   Error   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    crm-db (Database Layer)                      │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Customer, Product, Order, OrderItem)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use crm_core::money::Money;
//! use crm_core::validation::validate_phone;
//!
//! // Create money from cents (never from floats!)
//! let laptop = Money::from_cents(99_999); // 999.99
//! let phone = Money::from_cents(49_999);  // 499.99
//!
//! // Order totals are exact integer sums
//! assert_eq!((laptop + phone).cents(), 149_998);
//!
//! // Phone numbers accept two canonical forms
//! assert!(validate_phone("+1234567890").is_ok());
//! assert!(validate_phone("123-456-7890").is_ok());
//! assert!(validate_phone("12345").is_err());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use crm_core::Money` instead of
// `use crm_core::money::Money`

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Stock level below which a product is considered low on stock.
///
/// ## Business Reason
/// The low-stock job restocks every product whose stock has fallen under
/// this threshold. Can be made configurable per deployment in future
/// versions.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// Units added to a product's stock by one restock pass.
///
/// ## Business Reason
/// A fixed top-up keeps the job rerunnable: a product restocked past the
/// threshold is not selected again on the next pass.
pub const RESTOCK_AMOUNT: i64 = 10;
