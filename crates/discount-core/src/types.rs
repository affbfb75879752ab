//! # Domain Types
//!
//! Core domain types used throughout the discount engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Submission (unvalidated)        Catalog (validated)                    │
//! │  ┌─────────────────────┐         ┌─────────────────────┐                │
//! │  │  NewDiscountRule    │ ──────► │   DiscountRule      │                │
//! │  │  kind: String       │validate │   kind: DiscountKind│                │
//! │  │  item_type: Option  │         │   ├ ByItemType      │                │
//! │  │  item_id: Option    │         │   ├ ByItemCount     │                │
//! │  │  threshold: Option  │         │   └ ByMinimumCost   │                │
//! │  │  minimum_cost: Opt  │         └──────────┬──────────┘                │
//! │  └─────────────────────┘                    │ + timestamps              │
//! │                                             ▼                           │
//! │                                  ┌─────────────────────┐                │
//! │                                  │  DiscountRecord     │                │
//! │                                  └─────────────────────┘                │
//! │                                                                         │
//! │  Evaluation (ephemeral)                                                 │
//! │  ┌─────────────────────┐         ┌─────────────────────┐                │
//! │  │     LineItem        │ ──────► │  EvaluationResult   │                │
//! │  └─────────────────────┘evaluate └─────────────────────┘                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Shape
//! All structs serialize with camelCase field names. A rule is flattened so the
//! kind tag and its fields sit next to the common fields:
//! ```json
//! { "code": "FGH", "description": "Bulk tees", "percentage": 20.0,
//!   "kind": "BY_ITEM_COUNT", "itemId": "123", "quantityThreshold": 2 }
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Percentage
// =============================================================================

/// Discount percentage represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1250 bps = 12.5%
///
/// On the wire this travels as a plain percent number (`12.5`), the
/// conversion happens once at the serde boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Percentage(u32);

impl Percentage {
    /// Creates a percentage from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Percentage(bps)
    }

    /// Creates a percentage from a percent value, rounded to the nearest basis point.
    ///
    /// ## Example
    /// ```rust
    /// use discount_core::types::Percentage;
    ///
    /// assert_eq!(Percentage::from_percent(12.5).unwrap().bps(), 1250);
    /// assert!(Percentage::from_percent(100.5).is_err());
    /// assert!(Percentage::from_percent(f64::NAN).is_err());
    /// ```
    pub fn from_percent(pct: f64) -> Result<Self, ValidationError> {
        if !pct.is_finite() || !(0.0..=100.0).contains(&pct) {
            return Err(ValidationError::OutOfRange {
                field: "percentage".to_string(),
                min: 0,
                max: 100,
            });
        }

        Ok(Percentage((pct * 100.0).round() as u32))
    }

    /// Returns the value in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the value as a percent number (for display and the wire).
    #[inline]
    pub fn percent(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl TryFrom<f64> for Percentage {
    type Error = ValidationError;

    fn try_from(pct: f64) -> Result<Self, Self::Error> {
        Percentage::from_percent(pct)
    }
}

impl From<Percentage> for f64 {
    fn from(pct: Percentage) -> Self {
        pct.percent()
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

// =============================================================================
// Item Type
// =============================================================================

/// Category label of a cart item (`CLOTHING`, `ELECTRONICS`, ...).
///
/// Labels are opaque and compared exactly; no case folding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
pub struct ItemType(String);

impl ItemType {
    pub fn new(label: impl Into<String>) -> Self {
        ItemType(label.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Blank labels count as "not supplied" during validation.
    #[inline]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for ItemType {
    fn from(label: &str) -> Self {
        ItemType::new(label)
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Rule Kind
// =============================================================================

/// The closed set of discount kinds, without their payload.
///
/// Used where only the tag matters: parsing submissions, the database
/// `kind` column, and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleKind {
    /// Percentage off every line of a given item type.
    ByItemType,
    /// Percentage off one item id once its quantity reaches a threshold.
    ByItemCount,
    /// Percentage off every line whose unit cost exceeds a minimum.
    ByMinimumCost,
}

impl RuleKind {
    pub const ALL: [RuleKind; 3] = [
        RuleKind::ByItemType,
        RuleKind::ByItemCount,
        RuleKind::ByMinimumCost,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            RuleKind::ByItemType => "BY_ITEM_TYPE",
            RuleKind::ByItemCount => "BY_ITEM_COUNT",
            RuleKind::ByMinimumCost => "BY_MINIMUM_COST",
        }
    }
}

impl FromStr for RuleKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownKind {
                kind: s.to_string(),
            })
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Discount Kind
// =============================================================================

/// What a discount rule matches on, carrying only the fields that kind uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountKind {
    /// Applies to every line whose item type equals `item_type`.
    #[serde(rename_all = "camelCase")]
    ByItemType { item_type: ItemType },

    /// Applies to the first line whose id equals `item_id`, if that line's
    /// quantity is at least `quantity_threshold`.
    #[serde(rename_all = "camelCase")]
    ByItemCount {
        item_id: String,
        quantity_threshold: i64,
    },

    /// Applies to every line whose unit cost is strictly above `minimum_cost`.
    #[serde(rename_all = "camelCase")]
    ByMinimumCost { minimum_cost: Money },
}

impl DiscountKind {
    /// Returns the payload-free tag for this kind.
    pub const fn rule_kind(&self) -> RuleKind {
        match self {
            DiscountKind::ByItemType { .. } => RuleKind::ByItemType,
            DiscountKind::ByItemCount { .. } => RuleKind::ByItemCount,
            DiscountKind::ByMinimumCost { .. } => RuleKind::ByMinimumCost,
        }
    }
}

// =============================================================================
// Discount Rule
// =============================================================================

/// A validated discount rule, as stored in the catalog.
///
/// Obtain one through [`crate::validation::validate_rule`]; the constructors
/// below are for seeding and tests and do not check thresholds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountRule {
    /// Unique code, primary key in the catalog.
    pub code: String,

    /// Free-text description shown to staff.
    pub description: String,

    /// Percentage taken off each matching line.
    pub percentage: Percentage,

    /// Matching strategy and its parameters.
    #[serde(flatten)]
    pub kind: DiscountKind,
}

impl DiscountRule {
    pub fn by_item_type(
        code: impl Into<String>,
        description: impl Into<String>,
        percentage: Percentage,
        item_type: impl Into<ItemType>,
    ) -> Self {
        DiscountRule {
            code: code.into(),
            description: description.into(),
            percentage,
            kind: DiscountKind::ByItemType {
                item_type: item_type.into(),
            },
        }
    }

    pub fn by_item_count(
        code: impl Into<String>,
        description: impl Into<String>,
        percentage: Percentage,
        item_id: impl Into<String>,
        quantity_threshold: i64,
    ) -> Self {
        DiscountRule {
            code: code.into(),
            description: description.into(),
            percentage,
            kind: DiscountKind::ByItemCount {
                item_id: item_id.into(),
                quantity_threshold,
            },
        }
    }

    pub fn by_minimum_cost(
        code: impl Into<String>,
        description: impl Into<String>,
        percentage: Percentage,
        minimum_cost: Money,
    ) -> Self {
        DiscountRule {
            code: code.into(),
            description: description.into(),
            percentage,
            kind: DiscountKind::ByMinimumCost { minimum_cost },
        }
    }

    #[inline]
    pub fn rule_kind(&self) -> RuleKind {
        self.kind.rule_kind()
    }
}

/// A catalog entry: the rule plus bookkeeping timestamps.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountRecord {
    #[serde(flatten)]
    pub rule: DiscountRule,

    /// When the code was first stored.
    pub created_at: DateTime<Utc>,

    /// When the rule was last overwritten.
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// New Discount Rule (submission)
// =============================================================================

/// A rule as submitted for creation, before validation.
///
/// Mirrors the flat record clients send: every kind-specific field is
/// optional and `kind` is a raw string. Zero thresholds and blank strings are
/// treated as "not supplied" by the validator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewDiscountRule {
    pub code: String,
    pub description: String,
    pub percentage: f64,
    pub kind: String,
    pub item_type: Option<ItemType>,
    pub item_id: Option<String>,
    pub quantity_threshold: Option<i64>,
    pub minimum_cost: Option<Money>,
}

impl From<&DiscountRule> for NewDiscountRule {
    fn from(rule: &DiscountRule) -> Self {
        let mut draft = NewDiscountRule {
            code: rule.code.clone(),
            description: rule.description.clone(),
            percentage: rule.percentage.percent(),
            kind: rule.rule_kind().as_str().to_string(),
            ..Default::default()
        };

        match &rule.kind {
            DiscountKind::ByItemType { item_type } => {
                draft.item_type = Some(item_type.clone());
            }
            DiscountKind::ByItemCount {
                item_id,
                quantity_threshold,
            } => {
                draft.item_id = Some(item_id.clone());
                draft.quantity_threshold = Some(*quantity_threshold);
            }
            DiscountKind::ByMinimumCost { minimum_cost } => {
                draft.minimum_cost = Some(*minimum_cost);
            }
        }

        draft
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One entry of the cart being evaluated. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Item identifier; not unique within a cart.
    pub id: String,

    /// Cost of one unit.
    pub unit_cost: Money,

    /// Category label matched by `BY_ITEM_TYPE` rules.
    pub item_type: ItemType,

    /// Number of units.
    pub quantity: i64,
}

impl LineItem {
    pub fn new(
        id: impl Into<String>,
        unit_cost: Money,
        item_type: impl Into<ItemType>,
        quantity: i64,
    ) -> Self {
        LineItem {
            id: id.into(),
            unit_cost,
            item_type: item_type.into(),
            quantity,
        }
    }

    /// Unit cost × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_cost.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Evaluation Result
// =============================================================================

/// Outcome of evaluating a cart against the catalog.
///
/// `best_discount_code` serializes as `null` when no rule produced a
/// positive discount.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    pub best_discount_code: Option<String>,
    pub total_cost: Money,
    pub total_discount: Money,
    pub total_cost_after_discount: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================
