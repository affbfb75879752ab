//! # Discount Evaluator
//!
//! Picks the single best discount rule for a cart.
//!
//! ## Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      evaluate(items, rules)                             │
//! │                                                                         │
//! │  total_cost = Σ unit_cost × quantity            (once, rule-independent)│
//! │                                                                         │
//! │  best = (None, $0.00)                                                   │
//! │  for rule in rules (catalog order):                                     │
//! │      amount = candidate_amount(rule, items)     (one scan of the cart)  │
//! │      if amount > best.amount:                   (strictly greater)      │
//! │          best = (rule.code, amount)                                     │
//! │                                                                         │
//! │  → { best.code, total_cost, best.amount, total_cost - best.amount }     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Tie and Zero Semantics
//! - Equal amounts keep the rule seen first.
//! - The running best starts at zero, so a rule worth exactly $0.00 is never
//!   reported even when every rule is worth $0.00.
//!
//! Everything here is pure: no I/O, no logging, no validation. Input is
//! assumed to have passed [`crate::validation::validate_cart`].

use crate::money::Money;
use crate::types::{DiscountKind, DiscountRule, EvaluationResult, LineItem};

/// Evaluates a cart against every rule and reports the best single discount.
///
/// ## Example
/// ```rust
/// use discount_core::evaluator::evaluate;
/// use discount_core::money::Money;
/// use discount_core::types::{DiscountRule, LineItem, Percentage};
///
/// let items = vec![LineItem::new("123", Money::from_cents(5000), "CLOTHING", 1)];
/// let rules = vec![
///     DiscountRule::by_item_type("ABC", "Clothing", Percentage::from_bps(1000), "CLOTHING"),
///     DiscountRule::by_minimum_cost("CDE", "Big ticket", Percentage::from_bps(1500), Money::from_cents(10000)),
/// ];
///
/// let result = evaluate(&items, &rules);
/// assert_eq!(result.best_discount_code.as_deref(), Some("ABC"));
/// assert_eq!(result.total_discount.cents(), 500);
/// assert_eq!(result.total_cost_after_discount.cents(), 4500);
/// ```
pub fn evaluate(items: &[LineItem], rules: &[DiscountRule]) -> EvaluationResult {
    let total_cost: Money = items.iter().map(LineItem::line_total).sum();

    let mut best: Option<&DiscountRule> = None;
    let mut best_amount = Money::zero();

    for rule in rules {
        let amount = candidate_amount(rule, items);
        if amount > best_amount {
            best_amount = amount;
            best = Some(rule);
        }
    }

    EvaluationResult {
        best_discount_code: best.map(|rule| rule.code.clone()),
        total_cost,
        total_discount: best_amount,
        total_cost_after_discount: total_cost - best_amount,
    }
}

/// The discount one rule would give this cart on its own.
///
/// Each matching line contributes `line_total × percentage`, rounded to a
/// whole cent per line.
pub fn candidate_amount(rule: &DiscountRule, items: &[LineItem]) -> Money {
    let share = |item: &LineItem| item.line_total().percentage_of(rule.percentage);

    match &rule.kind {
        DiscountKind::ByItemType { item_type } => items
            .iter()
            .filter(|item| &item.item_type == item_type)
            .map(share)
            .sum(),

        // Only the first line carrying the id counts; duplicates are not merged.
        DiscountKind::ByItemCount {
            item_id,
            quantity_threshold,
        } => match items.iter().find(|item| &item.id == item_id) {
            Some(item) if item.quantity >= *quantity_threshold => share(item),
            _ => Money::zero(),
        },

        // Threshold applies to the unit cost, not the line total.
        DiscountKind::ByMinimumCost { minimum_cost } => items
            .iter()
            .filter(|item| item.unit_cost > *minimum_cost)
            .map(share)
            .sum(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Percentage;

    fn dollars(amount: i64) -> Money {
        Money::from_major_minor(amount, 0)
    }

    fn pct(percent: u32) -> Percentage {
        Percentage::from_bps(percent * 100)
    }

    fn abc() -> DiscountRule {
        DiscountRule::by_item_type("ABC", "Clothing", pct(10), "CLOTHING")
    }

    fn cde() -> DiscountRule {
        DiscountRule::by_minimum_cost("CDE", "Big ticket", pct(15), dollars(100))
    }

    fn fgh() -> DiscountRule {
        DiscountRule::by_item_count("FGH", "Bulk 123", pct(20), "123", 2)
    }

    fn assert_totals_balance(result: &EvaluationResult) {
        assert_eq!(
            result.total_cost_after_discount + result.total_discount,
            result.total_cost
        );
    }

    #[test]
    fn test_scenario_single_clothing_item() {
        let items = vec![LineItem::new("123", dollars(50), "CLOTHING", 1)];

        let result = evaluate(&items, &[abc(), cde()]);

        assert_eq!(result.best_discount_code.as_deref(), Some("ABC"));
        assert_eq!(result.total_discount, dollars(5));
        assert_eq!(result.total_cost, dollars(50));
        assert_eq!(result.total_cost_after_discount, dollars(45));
    }

    #[test]
    fn test_scenario_item_count_wins() {
        let items = vec![LineItem::new("123", dollars(50), "CLOTHING", 5)];

        let result = evaluate(&items, &[abc(), cde(), fgh()]);

        assert_eq!(result.best_discount_code.as_deref(), Some("FGH"));
        assert_eq!(result.total_discount, dollars(50));
        assert_eq!(result.total_cost, dollars(250));
        assert_eq!(result.total_cost_after_discount, dollars(200));
    }

    #[test]
    fn test_scenario_minimum_cost_wins() {
        let items = vec![
            LineItem::new("123", dollars(50), "CLOTHING", 1),
            LineItem::new("456", dollars(300), "ELECTRONICS", 1),
        ];

        let result = evaluate(&items, &[abc(), cde()]);

        assert_eq!(result.best_discount_code.as_deref(), Some("CDE"));
        assert_eq!(result.total_discount, dollars(45));
        assert_eq!(result.total_cost, dollars(350));
        assert_eq!(result.total_cost_after_discount, dollars(305));
    }

    #[test]
    fn test_empty_cart() {
        let result = evaluate(&[], &[abc(), cde(), fgh()]);
        assert_eq!(result, EvaluationResult::default());
    }

    #[test]
    fn test_empty_catalog() {
        let items = vec![LineItem::new("123", dollars(50), "CLOTHING", 2)];

        let result = evaluate(&items, &[]);

        assert_eq!(result.best_discount_code, None);
        assert_eq!(result.total_cost, dollars(100));
        assert!(result.total_discount.is_zero());
        assert_eq!(result.total_cost_after_discount, dollars(100));
    }

    #[test]
    fn test_zero_amount_rule_never_wins() {
        let items = vec![LineItem::new("123", dollars(50), "CLOTHING", 1)];
        let rules = vec![
            DiscountRule::by_item_type("ZERO", "Nothing off", pct(0), "CLOTHING"),
            DiscountRule::by_item_type("MISS", "Toys", pct(50), "TOYS"),
        ];

        let result = evaluate(&items, &rules);

        assert_eq!(result.best_discount_code, None);
        assert!(result.total_discount.is_zero());
        assert_eq!(result.total_cost_after_discount, dollars(50));
    }

    #[test]
    fn test_tie_keeps_earlier_rule() {
        let items = vec![LineItem::new("123", dollars(50), "CLOTHING", 1)];
        let first = DiscountRule::by_item_type("FIRST", "Clothing", pct(10), "CLOTHING");
        let second = DiscountRule::by_item_count("SECOND", "Item 123", pct(10), "123", 1);

        let result = evaluate(&items, &[first.clone(), second.clone()]);
        assert_eq!(result.best_discount_code.as_deref(), Some("FIRST"));

        let result = evaluate(&items, &[second, first]);
        assert_eq!(result.best_discount_code.as_deref(), Some("SECOND"));
    }

    #[test]
    fn test_item_type_sums_all_matching_lines() {
        let items = vec![
            LineItem::new("1", dollars(100), "ELECTRONICS", 2),
            LineItem::new("2", dollars(50), "CLOTHING", 1),
            LineItem::new("3", dollars(20), "ELECTRONICS", 1),
        ];
        let rule = DiscountRule::by_item_type("EL", "Electronics", pct(10), "ELECTRONICS");

        assert_eq!(candidate_amount(&rule, &items), dollars(22));
    }

    #[test]
    fn test_item_type_match_is_exact() {
        let items = vec![LineItem::new("1", dollars(100), "clothing", 1)];
        assert!(candidate_amount(&abc(), &items).is_zero());
    }

    #[test]
    fn test_item_count_only_first_matching_line_counts() {
        // First "123" line is below the threshold; the second would qualify
        // but is never looked at.
        let items = vec![
            LineItem::new("123", dollars(50), "CLOTHING", 1),
            LineItem::new("123", dollars(50), "CLOTHING", 5),
        ];
        assert!(candidate_amount(&fgh(), &items).is_zero());

        // Reversed order: the qualifying line is first and only it counts.
        let items = vec![
            LineItem::new("123", dollars(50), "CLOTHING", 5),
            LineItem::new("123", dollars(50), "CLOTHING", 5),
        ];
        assert_eq!(candidate_amount(&fgh(), &items), dollars(50));
    }

    #[test]
    fn test_item_count_threshold_is_inclusive() {
        let at = vec![LineItem::new("123", dollars(10), "CLOTHING", 2)];
        assert_eq!(candidate_amount(&fgh(), &at), dollars(4));

        let below = vec![LineItem::new("123", dollars(10), "CLOTHING", 1)];
        assert!(candidate_amount(&fgh(), &below).is_zero());

        let absent = vec![LineItem::new("999", dollars(10), "CLOTHING", 9)];
        assert!(candidate_amount(&fgh(), &absent).is_zero());
    }

    #[test]
    fn test_minimum_cost_compares_unit_cost_strictly() {
        // Line total 3 × $40 = $120 exceeds $100 but the unit cost does not.
        let items = vec![LineItem::new("1", dollars(40), "TOYS", 3)];
        assert!(candidate_amount(&cde(), &items).is_zero());

        // Exactly at the threshold does not qualify.
        let items = vec![LineItem::new("1", dollars(100), "TOYS", 1)];
        assert!(candidate_amount(&cde(), &items).is_zero());

        // One cent above does, for the whole line.
        let items = vec![LineItem::new("1", Money::from_cents(10001), "TOYS", 2)];
        assert_eq!(candidate_amount(&cde(), &items), Money::from_cents(3000));
    }

    #[test]
    fn test_rounding_per_line() {
        // Two lines of $0.05 at 10%: each rounds 0.5¢ → 1¢, total 2¢.
        let items = vec![
            LineItem::new("1", Money::from_cents(5), "TOYS", 1),
            LineItem::new("2", Money::from_cents(5), "TOYS", 1),
        ];
        let rule = DiscountRule::by_item_type("T", "Toys", pct(10), "TOYS");

        let result = evaluate(&items, &[rule]);
        assert_eq!(result.total_discount, Money::from_cents(2));
        assert_totals_balance(&result);
    }

    #[test]
    fn test_totals_always_balance() {
        let carts = vec![
            vec![],
            vec![LineItem::new("123", dollars(50), "CLOTHING", 5)],
            vec![
                LineItem::new("123", Money::from_cents(1999), "CLOTHING", 3),
                LineItem::new("456", Money::from_cents(30099), "ELECTRONICS", 1),
                LineItem::new("789", Money::from_cents(12), "GROCERY", 7),
            ],
        ];
        let rules = vec![abc(), cde(), fgh()];

        for items in &carts {
            let result = evaluate(items, &rules);
            assert_totals_balance(&result);
            assert!(result.total_discount <= result.total_cost);
        }
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let items = vec![
            LineItem::new("123", dollars(50), "CLOTHING", 1),
            LineItem::new("456", dollars(300), "ELECTRONICS", 1),
        ];
        let rules = vec![abc(), cde(), fgh()];

        let first = evaluate(&items, &rules);
        let second = evaluate(&items, &rules);
        assert_eq!(first, second);
    }
}
