//! # crm-api: Query/Mutation Surface for the CRM Backend
//!
//! This crate exposes the operations callers and scheduled jobs use:
//! customer/product/order creation, bulk customer import, low-stock
//! restocking, and the aggregate queries behind reporting.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         CRM Service Surface                             │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                   CrmService (Main Entry Point)                  │  │
//! │  │                                                                  │  │
//! │  │  Owns a Database handle; every operation is one async call       │  │
//! │  └────────────────────────────┬─────────────────────────────────────┘  │
//! │                               │                                         │
//! │         ┌─────────────────────┼─────────────────────┐                  │
//! │         ▼                     ▼                     ▼                   │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────┐    │
//! │  │ Mutations      │  │ Bulk Import    │  │ Queries                │    │
//! │  │                │  │                │  │                        │    │
//! │  │ create_customer│  │ Validate rows  │  │ total_customers        │    │
//! │  │ create_product │  │ one by one,    │  │ total_orders           │    │
//! │  │ create_order   │  │ commit the     │  │ total_revenue          │    │
//! │  │ restock pass   │  │ survivors once │  │ all_* with order_by    │    │
//! │  └────────────────┘  └────────────────┘  └────────────────────────┘    │
//! │                                                                         │
//! │  ERROR SHAPE:                                                          │
//! │  • Single-record mutations: hard Err(ApiError)                         │
//! │  • Bulk import: per-row failures are DATA (error strings in the        │
//! │    report), only storage faults become Err                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`bulk`] - Bulk customer import coordinator
//! - [`error`] - Service error type wrapping core and storage errors
//! - [`requests`] - Input and report types for every operation
//! - [`service`] - The `CrmService` entry point
//!
//! ## Usage
//! ```rust,ignore
//! use crm_api::{CrmService, CustomerInput};
//! use crm_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./crm.db")).await?;
//! let service = CrmService::new(db);
//!
//! let report = service
//!     .bulk_create_customers(vec![
//!         CustomerInput::new("Alice", "alice@example.com").with_phone("+1234567890"),
//!         CustomerInput::new("Bob", "not-an-email-clash"),
//!     ])
//!     .await?;
//!
//! println!("created {}, rejected {}", report.created.len(), report.errors.len());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod bulk;
pub mod error;
pub mod requests;
pub mod service;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{ApiError, ApiResult};
pub use requests::{
    BulkCreateReport, CustomerInput, OrderInput, OrderReceipt, ProductInput, RestockReport,
};
pub use service::CrmService;
