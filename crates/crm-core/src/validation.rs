//! # Validation Module
//!
//! Input validation utilities for the CRM backend.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Surface (crm-api)                                            │
//! │  ├── Type validation (deserialization)                                 │
//! │  ├── Store-dependent checks (email uniqueness)                         │
//! │  └── THIS MODULE: pure field validation                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── UNIQUE constraints                                                │
//! │  └── CHECK constraints (price > 0, stock >= 0)                         │
//! │                                                                         │
//! │  Defense in depth: Multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Email uniqueness is deliberately NOT here: it needs store state, and this
//! crate does no I/O. The surface checks existence and raises
//! [`ValidationError::DuplicateEmail`](crate::error::ValidationError) itself.
//!
//! ## Usage
//! ```rust
//! use crm_core::validation::{validate_phone, validate_price_cents};
//!
//! // Validate phone before database insert
//! validate_phone("+1234567890").unwrap();
//!
//! // Validate price before product creation
//! validate_price_cents(99_999).unwrap();
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Phone Validation
// =============================================================================

/// Validates a phone number.
///
/// ## Rules
/// Exactly two canonical forms are accepted:
/// - `+` followed by 10 to 15 digits (e.g. `+1234567890`)
/// - `NNN-NNN-NNNN` (e.g. `123-456-7890`)
///
/// ## Example
/// ```rust
/// use crm_core::validation::validate_phone;
///
/// assert!(validate_phone("+1234567890").is_ok());
/// assert!(validate_phone("123-456-7890").is_ok());
/// assert!(validate_phone("555 1234").is_err());
/// ```
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Bulk Create: one candidate record                                      │
/// │                                                                         │
/// │  phone = "123-456-7890"                                                │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_phone(phone) ← THIS FUNCTION                                 │
/// │       │                                                                 │
/// │       ├── matches +<10-15 digits>? → OK                                │
/// │       │                                                                 │
/// │       ├── matches NNN-NNN-NNNN?    → OK                                │
/// │       │                                                                 │
/// │       └── neither → "Invalid phone format: ..." recorded for this row  │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    if is_international_form(phone) || is_dashed_form(phone) {
        Ok(())
    } else {
        Err(ValidationError::InvalidPhoneFormat {
            phone: phone.to_string(),
        })
    }
}

/// `+` followed by 10-15 digits.
fn is_international_form(phone: &str) -> bool {
    let Some(digits) = phone.strip_prefix('+') else {
        return false;
    };

    digits.chars().all(|c| c.is_ascii_digit()) && (10..=15).contains(&digits.len())
}

/// Three digit groups of 3-3-4 joined by hyphens.
fn is_dashed_form(phone: &str) -> bool {
    let mut parts = phone.split('-');

    let (Some(a), Some(b), Some(c), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };

    is_digits(a, 3) && is_digits(b, 3) && is_digits(c, 4)
}

fn is_digits(part: &str, expected_len: usize) -> bool {
    part.chars().all(|c| c.is_ascii_digit()) && part.len() == expected_len
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a product price in cents.
///
/// ## Rules
/// - Must be strictly positive (> 0)
/// - Zero is rejected: free products are not a thing in this domain
///
/// ## Example
/// ```rust
/// use crm_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(99_999).is_ok()); // 999.99
/// assert!(validate_price_cents(1).is_ok());      // 0.01
/// assert!(validate_price_cents(0).is_err());
/// assert!(validate_price_cents(-100).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents <= 0 {
        return Err(ValidationError::InvalidPrice { price_cents: cents });
    }

    Ok(())
}

/// Validates a product stock level.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (sold out)
///
/// ## Example
/// ```rust
/// use crm_core::validation::validate_stock;
///
/// assert!(validate_stock(20).is_ok());
/// assert!(validate_stock(0).is_ok());
/// assert!(validate_stock(-1).is_err());
/// ```
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::InvalidStock { stock });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
