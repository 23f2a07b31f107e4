//! # List Ordering
//!
//! Sort-spec parsing for list queries.
//!
//! ## How Sort Specs Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Caller-Supplied Ordering                            │
//! │                                                                         │
//! │  Caller: all_customers(order_by: ["name", "-created_at"])              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  build_order_by(specs, allow-list) ← THIS MODULE                       │
//! │       │                                                                 │
//! │       ├── "name"         → name ASC                                    │
//! │       ├── "-created_at"  → created_at DESC                             │
//! │       ├── "no_such_col"  → Err(InvalidSortField)                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  " ORDER BY name ASC, created_at DESC"                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Appended to the repository's SELECT                                   │
//! │                                                                         │
//! │  Empty spec list → "" → natural storage order                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why an Allow-List?
//! Column names cannot be bound as SQL parameters, so they are interpolated
//! into the query text. Only identifiers from the per-entity allow-list ever
//! reach the SQL string; arbitrary caller input is rejected first.

use crate::error::{DbError, DbResult};

/// Direction of one sort field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// The SQL keyword for this direction.
    fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }
}

/// One parsed sort field: an allow-listed column plus direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

/// Parses one raw spec (`"name"` or `"-name"`) against an allow-list.
///
/// ## Rules
/// - A leading `-` means descending; otherwise ascending
/// - The remaining field name must appear in `allowed` exactly
///
/// ## Example
/// ```rust
/// use crm_db::ordering::{parse_sort_spec, SortDirection};
///
/// let spec = parse_sort_spec("-created_at", &["name", "created_at"]).unwrap();
/// assert_eq!(spec.field, "created_at");
/// assert_eq!(spec.direction, SortDirection::Descending);
///
/// assert!(parse_sort_spec("password", &["name"]).is_err());
/// ```
pub fn parse_sort_spec(raw: &str, allowed: &[&str]) -> DbResult<SortSpec> {
    let (field, direction) = match raw.strip_prefix('-') {
        Some(rest) => (rest, SortDirection::Descending),
        None => (raw, SortDirection::Ascending),
    };

    if !allowed.contains(&field) {
        return Err(DbError::InvalidSortField {
            field: field.to_string(),
        });
    }

    Ok(SortSpec {
        field: field.to_string(),
        direction,
    })
}

/// Builds an `ORDER BY` clause (with leading space) from raw sort specs.
///
/// Returns an empty string for an empty spec list, leaving natural storage
/// order untouched.
///
/// ## Example
/// ```rust
/// use crm_db::ordering::build_order_by;
///
/// let clause = build_order_by(
///     &["name".to_string(), "-created_at".to_string()],
///     &["name", "created_at"],
/// )
/// .unwrap();
/// assert_eq!(clause, " ORDER BY name ASC, created_at DESC");
///
/// assert_eq!(build_order_by(&[], &["name"]).unwrap(), "");
/// ```
pub fn build_order_by(specs: &[String], allowed: &[&str]) -> DbResult<String> {
    if specs.is_empty() {
        return Ok(String::new());
    }

    let mut parts = Vec::with_capacity(specs.len());
    for raw in specs {
        let spec = parse_sort_spec(raw, allowed)?;
        parts.push(format!("{} {}", spec.field, spec.direction.as_sql()));
    }

    Ok(format!(" ORDER BY {}", parts.join(", ")))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const ALLOWED: &[&str] = &["name", "email", "created_at"];

    #[test]
    fn test_parse_ascending() {
        let spec = parse_sort_spec("name", ALLOWED).unwrap();
        assert_eq!(spec.field, "name");
        assert_eq!(spec.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_parse_descending() {
        let spec = parse_sort_spec("-created_at", ALLOWED).unwrap();
        assert_eq!(spec.field, "created_at");
        assert_eq!(spec.direction, SortDirection::Descending);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = parse_sort_spec("password", ALLOWED).unwrap_err();
        assert!(matches!(err, DbError::InvalidSortField { ref field } if field == "password"));

        // The minus prefix is stripped before the allow-list check
        let err = parse_sort_spec("-password", ALLOWED).unwrap_err();
        assert!(matches!(err, DbError::InvalidSortField { ref field } if field == "password"));
    }

    #[test]
    fn test_injection_shaped_input_rejected() {
        assert!(parse_sort_spec("name; DROP TABLE customers", ALLOWED).is_err());
        assert!(parse_sort_spec("name--", ALLOWED).is_err());
        assert!(parse_sort_spec("", ALLOWED).is_err());
    }

    #[test]
    fn test_build_order_by_clause() {
        let clause =
            build_order_by(&["name".to_string(), "-created_at".to_string()], ALLOWED).unwrap();
        assert_eq!(clause, " ORDER BY name ASC, created_at DESC");
    }

    #[test]
    fn test_empty_specs_leave_natural_order() {
        assert_eq!(build_order_by(&[], ALLOWED).unwrap(), "");
    }

    #[test]
    fn test_one_bad_spec_fails_the_whole_clause() {
        let specs = vec!["name".to_string(), "bogus".to_string()];
        assert!(build_order_by(&specs, ALLOWED).is_err());
    }
}
