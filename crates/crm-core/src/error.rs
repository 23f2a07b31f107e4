//! # Error Types
//!
//! Domain-specific error types for crm-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  crm-core errors (this file)                                           │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  crm-db errors (separate crate)                                        │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  crm-api errors (surface crate)                                        │
//! │  └── ApiError         - What callers see                               │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → Caller       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (email, phone, id)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message
//!
//! Bulk creation is the one place validation errors travel as data instead:
//! the coordinator renders each failure with `to_string()` and keeps going,
//! so the message text here IS the bulk error surface.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They are hard failures in the single-record creation paths; only the bulk
/// coordinator recovers them locally.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Customer cannot be found.
    ///
    /// ## When This Occurs
    /// - Order creation names a customer id that does not exist
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// Order creation was given an empty product list.
    ///
    /// ## When This Occurs
    /// - Caller passes `product_ids: []`
    /// - Distinct from the all-ids-invalid case below: an empty request is
    ///   a caller bug, an unresolvable list is a data problem
    #[error("No products specified for order")]
    NoProductsSpecified,

    /// None of the supplied product ids resolve to existing products.
    ///
    /// ## When This Occurs
    /// - Every id in a non-empty product list is unknown
    /// - Partial resolution does NOT hit this: if at least one id resolves,
    ///   the order is created with the resolvable subset
    #[error("No valid products found for order")]
    NoValidProducts,

    /// Validation failure, forwarded with its own message so the text
    /// reads the same whether it surfaces here or in a bulk report.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when a candidate record doesn't meet requirements.
/// Used for early validation before a write is attempted.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Another customer already holds this email.
    ///
    /// Emails are compared case-sensitively, exact match.
    #[error("Email already exists: {email}")]
    DuplicateEmail { email: String },

    /// Phone is present but matches neither canonical form
    /// (`+<10-15 digits>` or `NNN-NNN-NNNN`).
    #[error("Invalid phone format: {phone}")]
    InvalidPhoneFormat { phone: String },

    /// Product price must be strictly positive.
    #[error("Invalid price: {price_cents} (price must be positive)")]
    InvalidPrice { price_cents: i64 },

    /// Product stock must not be negative.
    #[error("Invalid stock: {stock} (stock cannot be negative)")]
    InvalidStock { stock: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::CustomerNotFound("c-404".to_string());
        assert_eq!(err.to_string(), "Customer not found: c-404");

        let err = CoreError::NoProductsSpecified;
        assert_eq!(err.to_string(), "No products specified for order");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::DuplicateEmail {
            email: "a@x.com".to_string(),
        };
        assert_eq!(err.to_string(), "Email already exists: a@x.com");

        let err = ValidationError::InvalidPhoneFormat {
            phone: "12345".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid phone format: 12345");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::InvalidPrice { price_cents: 0 };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
