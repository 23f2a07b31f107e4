//! # Service Error Types
//!
//! Error type for the service surface.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       ApiError Categories                               │
//! │                                                                         │
//! │  ┌─────────────────────────┐  ┌─────────────────────────────────────┐  │
//! │  │  Core (domain rules)    │  │  Db (storage)                       │  │
//! │  │                         │  │                                     │  │
//! │  │  Validation failures    │  │  Constraint violations              │  │
//! │  │  CustomerNotFound       │  │  Transaction/commit failures        │  │
//! │  │  NoProductsSpecified    │  │  Unknown sort fields                │  │
//! │  │  NoValidProducts        │  │  Connection problems                │  │
//! │  └─────────────────────────┘  └─────────────────────────────────────┘  │
//! │                                                                         │
//! │  Both sides keep their own Display text; this enum only routes.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crm_core::{CoreError, ValidationError};
use crm_db::DbError;

/// Result type alias for service operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Service error: either a domain rule was violated or storage failed.
///
/// Bulk import is the exception to hard errors: there, per-row validation
/// failures are carried as strings in the report and only storage faults
/// surface as `ApiError`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A domain rule rejected the operation.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The storage layer failed.
    #[error(transparent)]
    Db(#[from] DbError),
}

// Lets `validate_phone(..)?` work directly in service code
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Core(CoreError::Validation(err))
    }
}

impl ApiError {
    /// Returns true if the failure is a field-level validation rejection.
    ///
    /// Callers use this to separate "fix your input" from "the store broke".
    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::Core(CoreError::Validation(_)))
    }
}
