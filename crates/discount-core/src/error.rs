//! # Error Types
//!
//! Domain-specific error types for discount-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  discount-core errors (this file)                                       │
//! │  ├── CoreError        - General domain errors                           │
//! │  └── ValidationError  - Rejected rule submissions / cart input          │
//! │                                                                         │
//! │  discount-db errors (separate crate)                                    │
//! │  └── DbError          - Catalog operation failures                      │
//! │                                                                         │
//! │  discount-api errors (in app)                                           │
//! │  └── ApiError         - What HTTP clients see (status + JSON body)      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → 400 / 404              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The evaluator has no error type: empty carts, empty catalogs and
//! zero-amount rules are ordinary results.

use thiserror::Error;

use crate::types::RuleKind;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No rule is stored under this code.
    ///
    /// ## When This Occurs
    /// - Code was never created
    /// - Rule was deleted
    #[error("Discount not found: {0}")]
    DiscountNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Rejection reasons for rule submissions and cart input.
///
/// Each message names the offending field, and for kind-specific checks the
/// kind it conflicts with, so it can be returned to the client verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be greater than zero")]
    MustBePositive { field: String },

    /// `kind` is not one of the supported discount kinds.
    #[error("Invalid discount kind: {kind}")]
    UnknownKind { kind: String },

    /// A field the kind depends on was not supplied.
    ///
    /// ## Example
    /// ```text
    /// { "kind": "BY_ITEM_TYPE" }   (no itemType)
    ///      │
    ///      ▼
    /// "itemType must be supplied with BY_ITEM_TYPE discount"
    /// ```
    #[error("{field} must be supplied with {kind} discount")]
    MissingForKind { field: String, kind: RuleKind },

    /// A field belonging to another kind was supplied.
    #[error("{field} must not be supplied with {kind} discount")]
    NotAllowedForKind { field: String, kind: RuleKind },
}

impl ValidationError {
    pub(crate) fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }

    pub(crate) fn must_be_positive(field: &str) -> Self {
        ValidationError::MustBePositive {
            field: field.to_string(),
        }
    }

    pub(crate) fn missing_for(field: &str, kind: RuleKind) -> Self {
        ValidationError::MissingForKind {
            field: field.to_string(),
            kind,
        }
    }

    pub(crate) fn not_allowed_for(field: &str, kind: RuleKind) -> Self {
        ValidationError::NotAllowedForKind {
            field: field.to_string(),
            kind,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
