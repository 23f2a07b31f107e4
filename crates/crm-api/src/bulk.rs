//! # Bulk Customer Import
//!
//! Coordinator for creating many customers in one call with per-row error
//! isolation and a single commit.
//!
//! ## How It Works
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Bulk Import Pipeline                               │
//! │                                                                         │
//! │  Input rows (in order)                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌──────────────────────────────────────────────┐                      │
//! │  │ Phase 1: validate each row                   │                      │
//! │  │                                              │                      │
//! │  │  email already in store?  ──► error string   │                      │
//! │  │  email earlier in batch?  ──► error string   │                      │
//! │  │  phone format bad?        ──► error string   │                      │
//! │  │  otherwise                ──► staged row     │                      │
//! │  └──────────────────┬───────────────────────────┘                      │
//! │                     │                                                   │
//! │                     ▼                                                   │
//! │  ┌──────────────────────────────────────────────┐                      │
//! │  │ Phase 2: insert staged rows                  │                      │
//! │  │                                              │                      │
//! │  │  BEGIN ── insert each ── COMMIT              │                      │
//! │  │  (storage fault rolls back the whole batch   │                      │
//! │  │   and propagates as Err)                     │                      │
//! │  └──────────────────────────────────────────────┘                      │
//! │                                                                         │
//! │  Accounting: every input row ends up in exactly one of                  │
//! │  created / errors.                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Duplicate Emails Within One Batch
//! A seen-set tracks emails staged earlier in the same batch: the first
//! occurrence is created, later occurrences are rejected as duplicates.
//! Without it, two staged rows with the same new email would abort the
//! whole commit on the UNIQUE constraint. An email only enters the set
//! when its row passes all checks, so a rejected row does not block a
//! later valid row from using the same address.

use chrono::Utc;
use std::collections::HashSet;
use tracing::{debug, info};

use crate::error::ApiResult;
use crate::requests::{BulkCreateReport, CustomerInput};
use crm_core::validation::validate_phone;
use crm_core::{Customer, ValidationError};
use crm_db::repository::customer::generate_customer_id;
use crm_db::Database;

/// Creates customers from `inputs` with per-row error isolation.
///
/// Rows are processed in input order. A row that fails validation becomes
/// an error string in the report; the rest of the batch continues. All
/// rows that pass are committed in one transaction.
///
/// ## Returns
/// * `Ok(report)` - normal outcome, including "all rows rejected"
/// * `Err(_)` - the storage layer failed; nothing was committed
pub async fn bulk_create(db: &Database, inputs: &[CustomerInput]) -> ApiResult<BulkCreateReport> {
    let mut staged: Vec<Customer> = Vec::new();
    let mut errors: Vec<String> = Vec::new();
    let mut seen_emails: HashSet<String> = HashSet::new();

    for input in inputs {
        match validate_row(db, input, &seen_emails).await? {
            Ok(()) => {
                seen_emails.insert(input.email.clone());
                staged.push(Customer {
                    id: generate_customer_id(),
                    name: input.name.clone(),
                    email: input.email.clone(),
                    phone: input.phone.clone(),
                    created_at: Utc::now(),
                });
            }
            Err(rejection) => {
                debug!(email = %input.email, error = %rejection, "Rejecting bulk row");
                errors.push(rejection.to_string());
            }
        }
    }

    db.customers().insert_batch(&staged).await?;

    info!(
        input = inputs.len(),
        created = staged.len(),
        rejected = errors.len(),
        "Bulk customer import complete"
    );

    Ok(BulkCreateReport {
        created: staged,
        errors,
    })
}

/// Validates one candidate row against the store and the batch so far.
///
/// The outer `Result` is a storage failure; the inner one is the row's
/// validation verdict.
async fn validate_row(
    db: &Database,
    input: &CustomerInput,
    seen_emails: &HashSet<String>,
) -> ApiResult<Result<(), ValidationError>> {
    if db.customers().email_exists(&input.email).await? || seen_emails.contains(&input.email) {
        return Ok(Err(ValidationError::DuplicateEmail {
            email: input.email.clone(),
        }));
    }

    if let Some(phone) = &input.phone {
        if let Err(err) = validate_phone(phone) {
            return Ok(Err(err));
        }
    }

    Ok(Ok(()))
}

// =============================================================================
// Unit Tests
// =============================================================================
