//! # discount-core: Pure Business Logic for the Discount Engine
//!
//! This crate is the **heart** of the discount engine. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Discount Engine Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 discount-api (HTTP, axum)                        │   │
//! │  │   GET/POST/DELETE /discounts    POST /discounts/calculate        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ discount-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ evaluator │  │ validation│  │   │
//! │  │   │  Rule     │  │   Money   │  │ best rule │  │ rule kind │  │   │
//! │  │   │  LineItem │  │ Percentage│  │ for cart  │  │ checks    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 discount-db (Rule Catalog)                       │   │
//! │  │              SQLite queries, migrations, repository              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (DiscountRule, LineItem, EvaluationResult, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`evaluator`] - Best-discount selection
//! - [`validation`] - Rule and cart validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64)
//! 4. **Typed Rules**: A rule's kind carries exactly the fields it uses
//!
//! ## Example Usage
//!
//! ```rust
//! use discount_core::{evaluate, validate_rule, LineItem, Money, NewDiscountRule};
//!
//! let rule = validate_rule(NewDiscountRule {
//!     code: "FGH".into(),
//!     description: "20% off 2+ of item 123".into(),
//!     percentage: 20.0,
//!     kind: "BY_ITEM_COUNT".into(),
//!     item_id: Some("123".into()),
//!     quantity_threshold: Some(2),
//!     ..Default::default()
//! })
//! .unwrap();
//!
//! let cart = vec![LineItem::new("123", Money::from_cents(5000), "CLOTHING", 5)];
//! let result = evaluate(&cart, &[rule]);
//!
//! assert_eq!(result.best_discount_code.as_deref(), Some("FGH"));
//! assert_eq!(result.total_cost_after_discount.cents(), 20000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod evaluator;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use evaluator::{candidate_amount, evaluate};
pub use money::Money;
pub use types::*;
pub use validation::{validate_cart, validate_line_item, validate_quantity, validate_rule};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum line items accepted in a single evaluation request.
pub const MAX_CART_ITEMS: usize = 500;

/// Maximum quantity of a single line item.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Maximum unit cost of a line item, in cents ($10,000,000.00).
///
/// ## Overflow Bound
/// ```text
/// MAX_CART_ITEMS × MAX_ITEM_QUANTITY × MAX_UNIT_COST_CENTS
///   = 500 × 999 × 10^9 ≈ 5.0 × 10^14   (i64::MAX ≈ 9.2 × 10^18)
/// ```
/// so line totals and cart totals of a validated cart never overflow.
pub const MAX_UNIT_COST_CENTS: i64 = 1_000_000_000;

/// Maximum length of a discount code.
pub const MAX_CODE_LENGTH: usize = 50;

/// Maximum length of a discount description.
pub const MAX_DESCRIPTION_LENGTH: usize = 500;
