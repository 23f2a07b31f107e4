//! # Repository Module
//!
//! Database repository implementations for the CRM backend.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Service call                                                          │
//! │       │                                                                 │
//! │       │  db.customers().email_exists("a@x.com")                        │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  CustomerRepository                                                    │
//! │  ├── insert(&self, customer)                                           │
//! │  ├── insert_batch(&self, customers)   ← one transaction                │
//! │  ├── email_exists(&self, email)                                        │
//! │  ├── list(&self, order_by)                                             │
//! │  └── count(&self)                                                      │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                        │
//! │  • SQL is isolated in one place per entity                             │
//! │  • Repositories are cheap clones over the shared pool                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`customer::CustomerRepository`] - Customer inserts (single and batched) and reads
//! - [`product::ProductRepository`] - Product CRUD and low-stock restocking
//! - [`order::OrderRepository`] - Orders, item snapshots, revenue aggregates

pub mod customer;
pub mod order;
pub mod product;
