//! # Validation Module
//!
//! Rule and cart validation for the discount engine.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP extractor (axum Json)                                    │
//! │  └── Shape: JSON syntax, field types                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── validate_rule: NewDiscountRule ──► DiscountRule (typed kind)       │
//! │  └── validate_cart: line items are positive and bounded                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                             │
//! │  ├── PRIMARY KEY on code                                                │
//! │  └── CHECK on kind / percentage                                         │
//! │                                                                         │
//! │  The evaluator trusts its input: nothing here runs at evaluation time. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Absent Values
//! A submitted `quantityThreshold` or `minimumCost` of zero, and a blank
//! `itemId` or `itemType`, count as "not supplied". A field that is not
//! supplied is never a conflict, and never satisfies a requirement.
//!
//! ## Usage
//! ```rust
//! use discount_core::types::NewDiscountRule;
//! use discount_core::validation::validate_rule;
//!
//! let draft = NewDiscountRule {
//!     code: "ABC".into(),
//!     description: "10% off clothing".into(),
//!     percentage: 10.0,
//!     kind: "BY_ITEM_TYPE".into(),
//!     item_type: Some("CLOTHING".into()),
//!     ..Default::default()
//! };
//!
//! let rule = validate_rule(draft).unwrap();
//! assert_eq!(rule.percentage.bps(), 1000);
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{DiscountKind, DiscountRule, ItemType, LineItem, NewDiscountRule, Percentage, RuleKind};
use crate::{
    MAX_CART_ITEMS, MAX_CODE_LENGTH, MAX_DESCRIPTION_LENGTH, MAX_ITEM_QUANTITY,
    MAX_UNIT_COST_CENTS,
};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Rule Validators
// =============================================================================

/// Validates a discount code.
///
/// ## Rules
/// - Must not be blank
/// - At most `MAX_CODE_LENGTH` characters
pub fn validate_code(code: &str) -> ValidationResult<()> {
    if code.trim().is_empty() {
        return Err(ValidationError::required("code"));
    }

    if code.chars().count() > MAX_CODE_LENGTH {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: MAX_CODE_LENGTH,
        });
    }

    Ok(())
}

/// Validates a rule description (must not be blank, bounded length).
pub fn validate_description(description: &str) -> ValidationResult<()> {
    if description.trim().is_empty() {
        return Err(ValidationError::required("description"));
    }

    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_DESCRIPTION_LENGTH,
        });
    }

    Ok(())
}

/// Validates a percent value in [0, 100] and converts it to basis points.
///
/// ## Example
/// ```rust
/// use discount_core::validation::validate_percentage;
///
/// assert_eq!(validate_percentage(15.0).unwrap().bps(), 1500);
/// assert!(validate_percentage(-1.0).is_err());
/// ```
pub fn validate_percentage(pct: f64) -> ValidationResult<Percentage> {
    Percentage::from_percent(pct)
}

/// Validates a submitted rule and converts it to its typed form.
///
/// ## Kind Rules
/// ```text
/// ┌──────────────────┬──────────────┬────────────────────────────────────┐
/// │ kind             │ requires     │ rejects when supplied              │
/// ├──────────────────┼──────────────┼────────────────────────────────────┤
/// │ BY_ITEM_TYPE     │ itemType     │ itemId, quantityThreshold,         │
/// │                  │              │ minimumCost                        │
/// │ BY_ITEM_COUNT    │ itemId,      │ minimumCost, itemType              │
/// │                  │ threshold>0  │                                    │
/// │ BY_MINIMUM_COST  │ minimumCost>0│ itemId, quantityThreshold,         │
/// │                  │              │ itemType                           │
/// │ anything else    │      -       │ always (UnknownKind)               │
/// └──────────────────┴──────────────┴────────────────────────────────────┘
/// ```
///
/// Checks run in a fixed order and the first failure is returned.
pub fn validate_rule(draft: NewDiscountRule) -> ValidationResult<DiscountRule> {
    validate_code(&draft.code)?;
    validate_description(&draft.description)?;
    let percentage = validate_percentage(draft.percentage)?;

    let rule_kind: RuleKind = draft.kind.trim().parse()?;

    let item_type = supplied_item_type(draft.item_type);
    let item_id = supplied_str(draft.item_id);
    let quantity_threshold = draft.quantity_threshold.filter(|n| *n != 0);
    let minimum_cost = draft.minimum_cost.filter(|m| !m.is_zero());

    let kind = match rule_kind {
        RuleKind::ByItemType => {
            let item_type =
                item_type.ok_or_else(|| ValidationError::missing_for("itemType", rule_kind))?;
            reject_supplied(item_id.is_some(), "itemId", rule_kind)?;
            reject_supplied(quantity_threshold.is_some(), "quantityThreshold", rule_kind)?;
            reject_supplied(minimum_cost.is_some(), "minimumCost", rule_kind)?;

            DiscountKind::ByItemType { item_type }
        }

        RuleKind::ByItemCount => {
            let item_id =
                item_id.ok_or_else(|| ValidationError::missing_for("itemId", rule_kind))?;
            let quantity_threshold = quantity_threshold
                .ok_or_else(|| ValidationError::missing_for("quantityThreshold", rule_kind))?;
            if quantity_threshold < 0 {
                return Err(ValidationError::must_be_positive("quantityThreshold"));
            }
            reject_supplied(minimum_cost.is_some(), "minimumCost", rule_kind)?;
            reject_supplied(item_type.is_some(), "itemType", rule_kind)?;

            DiscountKind::ByItemCount {
                item_id,
                quantity_threshold,
            }
        }

        RuleKind::ByMinimumCost => {
            reject_supplied(item_id.is_some(), "itemId", rule_kind)?;
            reject_supplied(quantity_threshold.is_some(), "quantityThreshold", rule_kind)?;
            reject_supplied(item_type.is_some(), "itemType", rule_kind)?;
            let minimum_cost = minimum_cost
                .ok_or_else(|| ValidationError::missing_for("minimumCost", rule_kind))?;
            if !minimum_cost.is_positive() {
                return Err(ValidationError::must_be_positive("minimumCost"));
            }

            DiscountKind::ByMinimumCost { minimum_cost }
        }
    };

    Ok(DiscountRule {
        code: draft.code,
        description: draft.description,
        percentage,
        kind,
    })
}

fn supplied_str(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn supplied_item_type(value: Option<ItemType>) -> Option<ItemType> {
    value.filter(|t| !t.is_blank())
}

fn reject_supplied(supplied: bool, field: &str, kind: RuleKind) -> ValidationResult<()> {
    if supplied {
        return Err(ValidationError::not_allowed_for(field, kind));
    }
    Ok(())
}

// =============================================================================
// Cart Validators
// =============================================================================

/// Validates a single line item.
///
/// ## Rules
/// - `id` and `itemType` must not be blank
/// - `unitCost` must be positive and at most `MAX_UNIT_COST_CENTS`
/// - `quantity` must be positive and at most `MAX_ITEM_QUANTITY`
pub fn validate_line_item(item: &LineItem) -> ValidationResult<()> {
    if item.id.trim().is_empty() {
        return Err(ValidationError::required("id"));
    }

    if item.item_type.is_blank() {
        return Err(ValidationError::required("itemType"));
    }

    if item.unit_cost <= Money::zero() {
        return Err(ValidationError::must_be_positive("unitCost"));
    }

    if item.unit_cost.cents() > MAX_UNIT_COST_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "unitCost".to_string(),
            min: 1,
            max: MAX_UNIT_COST_CENTS,
        });
    }

    validate_quantity(item.quantity)
}

/// Validates a line item quantity.
///
/// ## Rules
/// - Must be positive
/// - Must not exceed `MAX_ITEM_QUANTITY`
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::must_be_positive("quantity"));
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a whole cart before evaluation.
///
/// An empty cart is valid and evaluates to zero totals.
pub fn validate_cart(items: &[LineItem]) -> ValidationResult<()> {
    if items.len() > MAX_CART_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "items".to_string(),
            min: 0,
            max: MAX_CART_ITEMS as i64,
        });
    }

    items.iter().try_for_each(validate_line_item)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item_type_draft() -> NewDiscountRule {
        NewDiscountRule {
            code: "ABC".to_string(),
            description: "10% off clothing".to_string(),
            percentage: 10.0,
            kind: "BY_ITEM_TYPE".to_string(),
            item_type: Some(ItemType::from("CLOTHING")),
            ..Default::default()
        }
    }

    fn item_count_draft() -> NewDiscountRule {
        NewDiscountRule {
            code: "FGH".to_string(),
            description: "20% off two or more".to_string(),
            percentage: 20.0,
            kind: "BY_ITEM_COUNT".to_string(),
            item_id: Some("123".to_string()),
            quantity_threshold: Some(2),
            ..Default::default()
        }
    }

    fn minimum_cost_draft() -> NewDiscountRule {
        NewDiscountRule {
            code: "CDE".to_string(),
            description: "15% off big tickets".to_string(),
            percentage: 15.0,
            kind: "BY_MINIMUM_COST".to_string(),
            minimum_cost: Some(Money::from_cents(10000)),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_item_type_rule() {
        let rule = validate_rule(item_type_draft()).unwrap();
        assert_eq!(rule.code, "ABC");
        assert_eq!(rule.percentage.bps(), 1000);
        assert_eq!(
            rule.kind,
            DiscountKind::ByItemType {
                item_type: ItemType::from("CLOTHING")
            }
        );
    }

    #[test]
    fn test_item_type_rule_requires_item_type() {
        let mut draft = item_type_draft();
        draft.item_type = None;
        assert_eq!(
            validate_rule(draft).unwrap_err(),
            ValidationError::missing_for("itemType", RuleKind::ByItemType)
        );

        let mut draft = item_type_draft();
        draft.item_type = Some(ItemType::from("  "));
        assert!(validate_rule(draft).is_err());
    }

    #[test]
    fn test_item_type_rule_rejects_every_foreign_field() {
        let mut draft = item_type_draft();
        draft.item_id = Some("123".to_string());
        assert_eq!(
            validate_rule(draft).unwrap_err(),
            ValidationError::not_allowed_for("itemId", RuleKind::ByItemType)
        );

        let mut draft = item_type_draft();
        draft.quantity_threshold = Some(3);
        assert_eq!(
            validate_rule(draft).unwrap_err(),
            ValidationError::not_allowed_for("quantityThreshold", RuleKind::ByItemType)
        );

        let mut draft = item_type_draft();
        draft.quantity_threshold = Some(-1);
        assert!(validate_rule(draft).is_err());

        let mut draft = item_type_draft();
        draft.minimum_cost = Some(Money::from_cents(1));
        assert_eq!(
            validate_rule(draft).unwrap_err(),
            ValidationError::not_allowed_for("minimumCost", RuleKind::ByItemType)
        );
    }

    #[test]
    fn test_zero_values_count_as_absent() {
        let mut draft = item_type_draft();
        draft.quantity_threshold = Some(0);
        draft.minimum_cost = Some(Money::zero());
        draft.item_id = Some(String::new());
        assert!(validate_rule(draft).is_ok());

        let mut draft = item_count_draft();
        draft.quantity_threshold = Some(0);
        assert_eq!(
            validate_rule(draft).unwrap_err(),
            ValidationError::missing_for("quantityThreshold", RuleKind::ByItemCount)
        );
    }

    #[test]
    fn test_valid_item_count_rule() {
        let rule = validate_rule(item_count_draft()).unwrap();
        assert_eq!(
            rule.kind,
            DiscountKind::ByItemCount {
                item_id: "123".to_string(),
                quantity_threshold: 2
            }
        );
    }

    #[test]
    fn test_item_count_rule_checks() {
        let mut draft = item_count_draft();
        draft.item_id = None;
        assert_eq!(
            validate_rule(draft).unwrap_err(),
            ValidationError::missing_for("itemId", RuleKind::ByItemCount)
        );

        let mut draft = item_count_draft();
        draft.quantity_threshold = Some(-2);
        assert_eq!(
            validate_rule(draft).unwrap_err(),
            ValidationError::must_be_positive("quantityThreshold")
        );

        let mut draft = item_count_draft();
        draft.minimum_cost = Some(Money::from_cents(500));
        assert_eq!(
            validate_rule(draft).unwrap_err(),
            ValidationError::not_allowed_for("minimumCost", RuleKind::ByItemCount)
        );

        let mut draft = item_count_draft();
        draft.item_type = Some(ItemType::from("CLOTHING"));
        assert_eq!(
            validate_rule(draft).unwrap_err(),
            ValidationError::not_allowed_for("itemType", RuleKind::ByItemCount)
        );
    }

    #[test]
    fn test_valid_minimum_cost_rule() {
        let rule = validate_rule(minimum_cost_draft()).unwrap();
        assert_eq!(
            rule.kind,
            DiscountKind::ByMinimumCost {
                minimum_cost: Money::from_cents(10000)
            }
        );
    }

    #[test]
    fn test_minimum_cost_rule_checks() {
        let mut draft = minimum_cost_draft();
        draft.minimum_cost = None;
        assert_eq!(
            validate_rule(draft).unwrap_err(),
            ValidationError::missing_for("minimumCost", RuleKind::ByMinimumCost)
        );

        let mut draft = minimum_cost_draft();
        draft.minimum_cost = Some(Money::from_cents(-100));
        assert_eq!(
            validate_rule(draft).unwrap_err(),
            ValidationError::must_be_positive("minimumCost")
        );

        let mut draft = minimum_cost_draft();
        draft.item_id = Some("123".to_string());
        assert_eq!(
            validate_rule(draft).unwrap_err(),
            ValidationError::not_allowed_for("itemId", RuleKind::ByMinimumCost)
        );

        let mut draft = minimum_cost_draft();
        draft.quantity_threshold = Some(5);
        assert_eq!(
            validate_rule(draft).unwrap_err(),
            ValidationError::not_allowed_for("quantityThreshold", RuleKind::ByMinimumCost)
        );
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let mut draft = item_type_draft();
        draft.kind = "ITEM_COST".to_string();
        assert_eq!(
            validate_rule(draft).unwrap_err(),
            ValidationError::UnknownKind {
                kind: "ITEM_COST".to_string()
            }
        );

        let mut draft = item_type_draft();
        draft.kind = String::new();
        assert!(matches!(
            validate_rule(draft),
            Err(ValidationError::UnknownKind { .. })
        ));
    }

    #[test]
    fn test_common_fields() {
        let mut draft = item_type_draft();
        draft.code = "   ".to_string();
        assert_eq!(validate_rule(draft).unwrap_err(), ValidationError::required("code"));

        let mut draft = item_type_draft();
        draft.code = "X".repeat(MAX_CODE_LENGTH + 1);
        assert!(matches!(
            validate_rule(draft),
            Err(ValidationError::TooLong { .. })
        ));

        let mut draft = item_type_draft();
        draft.description = String::new();
        assert_eq!(
            validate_rule(draft).unwrap_err(),
            ValidationError::required("description")
        );

        let mut draft = item_type_draft();
        draft.percentage = 100.5;
        assert!(matches!(
            validate_rule(draft),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_round_trip_through_draft() {
        let rule = validate_rule(item_count_draft()).unwrap();
        let again = validate_rule(NewDiscountRule::from(&rule)).unwrap();
        assert_eq!(again, rule);
    }

    #[test]
    fn test_validate_line_item() {
        let ok = LineItem::new("123", Money::from_cents(5000), "CLOTHING", 1);
        assert!(validate_line_item(&ok).is_ok());

        let mut bad = ok.clone();
        bad.id = String::new();
        assert_eq!(validate_line_item(&bad), Err(ValidationError::required("id")));

        let mut bad = ok.clone();
        bad.unit_cost = Money::zero();
        assert_eq!(
            validate_line_item(&bad),
            Err(ValidationError::must_be_positive("unitCost"))
        );

        let mut bad = ok.clone();
        bad.quantity = 0;
        assert_eq!(
            validate_line_item(&bad),
            Err(ValidationError::must_be_positive("quantity"))
        );

        let mut bad = ok;
        bad.item_type = ItemType::from("");
        assert_eq!(
            validate_line_item(&bad),
            Err(ValidationError::required("itemType"))
        );
    }

    #[test]
    fn test_validate_cart() {
        assert!(validate_cart(&[]).is_ok());

        let item = LineItem::new("1", Money::from_cents(100), "TOYS", 1);
        let too_many = vec![item; MAX_CART_ITEMS + 1];
        assert!(matches!(
            validate_cart(&too_many),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_quantity_bounds() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_ITEM_QUANTITY).is_ok());

        assert_eq!(
            validate_quantity(MAX_ITEM_QUANTITY + 1),
            Err(ValidationError::OutOfRange {
                field: "quantity".to_string(),
                min: 1,
                max: MAX_ITEM_QUANTITY,
            })
        );
        assert_eq!(
            validate_quantity(-3),
            Err(ValidationError::must_be_positive("quantity"))
        );
    }

    #[test]
    fn test_unit_cost_upper_bound() {
        let ok = LineItem::new("1", Money::from_cents(MAX_UNIT_COST_CENTS), "TOYS", 1);
        assert!(validate_line_item(&ok).is_ok());

        let too_costly = LineItem::new("1", Money::from_cents(MAX_UNIT_COST_CENTS + 1), "TOYS", 1);
        assert!(matches!(
            validate_line_item(&too_costly),
            Err(ValidationError::OutOfRange { ref field, .. }) if field == "unitCost"
        ));
    }

    #[test]
    fn test_huge_carts_rejected_before_evaluation() {
        // Each of these would overflow i64 in line_total or the cart sum
        let half_max = LineItem::new("1", Money::from_cents(i64::MAX / 2 + 1), "TOYS", 2);
        assert!(validate_cart(&[half_max]).is_err());

        let near_max = LineItem::new("1", Money::from_cents(i64::MAX / 2), "TOYS", 1);
        assert!(validate_cart(&vec![near_max; 3]).is_err());

        let huge_qty = LineItem::new("1", Money::from_cents(100), "TOYS", i64::MAX);
        assert!(validate_cart(&[huge_qty]).is_err());
    }

    #[test]
    fn test_largest_valid_cart_evaluates() {
        let item = LineItem::new("1", Money::from_cents(MAX_UNIT_COST_CENTS), "TOYS", MAX_ITEM_QUANTITY);
        let cart = vec![item; MAX_CART_ITEMS];
        assert!(validate_cart(&cart).is_ok());

        let rule = DiscountRule::by_item_type("ALL", "Everything", Percentage::from_bps(10000), "TOYS");
        let result = crate::evaluator::evaluate(&cart, &[rule]);

        let expected = MAX_UNIT_COST_CENTS * MAX_ITEM_QUANTITY * MAX_CART_ITEMS as i64;
        assert_eq!(result.total_cost.cents(), expected);
        assert_eq!(result.total_discount.cents(), expected);
        assert_eq!(result.total_cost_after_discount, Money::zero());
    }
}
