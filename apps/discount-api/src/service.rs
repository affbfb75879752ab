//! # Discount Service
//!
//! Orchestrates the pure core (validation, evaluation) and the catalog.
//!
//! ```text
//! add(draft)        ─► validate_rule ─► repo.save      ─► DiscountRecord
//! calculate(items)  ─► validate_cart ─► repo.list_all  ─► evaluate ─► EvaluationResult
//! ```
//!
//! Handlers stay thin: they extract JSON, call one method here, and render
//! the result or the `ApiError`.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use discount_core::{
    evaluate, validate_cart, validate_rule, CoreError, DiscountRecord, DiscountRule,
    EvaluationResult, LineItem, NewDiscountRule,
};
use discount_db::Database;

use crate::error::ApiResult;

/// Body of `POST /discounts/calculate`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalculateRequest {
    #[serde(default)]
    pub items: Vec<LineItem>,
}

/// Catalog and evaluation operations.
#[derive(Debug, Clone)]
pub struct DiscountService {
    db: Database,
}

impl DiscountService {
    pub fn new(db: Database) -> Self {
        DiscountService { db }
    }

    /// Every stored rule, in catalog order.
    pub async fn list(&self) -> ApiResult<Vec<DiscountRecord>> {
        Ok(self.db.discounts().list_all().await?)
    }

    pub async fn get(&self, code: &str) -> ApiResult<DiscountRecord> {
        self.db
            .discounts()
            .get_by_code(code)
            .await?
            .ok_or_else(|| CoreError::DiscountNotFound(code.to_string()).into())
    }

    /// Validates and stores a rule. An existing rule with the same code is
    /// replaced.
    pub async fn add(&self, draft: NewDiscountRule) -> ApiResult<DiscountRecord> {
        let code = draft.code.clone();

        let rule = validate_rule(draft).map_err(|err| {
            warn!(code = %code, reason = %err, "Rejected discount rule");
            err
        })?;

        let record = self.db.discounts().save(&rule).await?;

        info!(
            code = %record.rule.code,
            kind = %record.rule.rule_kind(),
            percentage = %record.rule.percentage,
            "Discount rule saved"
        );

        Ok(record)
    }

    /// Removes a rule. Unknown codes are not an error.
    pub async fn delete(&self, code: &str) -> ApiResult<()> {
        let removed = self.db.discounts().delete_by_code(code).await?;

        if removed {
            info!(code = %code, "Discount rule deleted");
        }

        Ok(())
    }

    /// Finds the single best discount for a cart.
    pub async fn calculate(&self, items: &[LineItem]) -> ApiResult<EvaluationResult> {
        validate_cart(items).map_err(|err| {
            warn!(reason = %err, "Rejected cart");
            err
        })?;

        let rules: Vec<DiscountRule> = self
            .db
            .discounts()
            .list_all()
            .await?
            .into_iter()
            .map(|record| record.rule)
            .collect();

        let result = evaluate(items, &rules);

        info!(
            best_discount_code = result.best_discount_code.as_deref().unwrap_or("none"),
            total_cost = result.total_cost.cents(),
            total_discount = result.total_discount.cents(),
            rules_considered = rules.len(),
            line_items = items.len(),
            "Cart evaluated"
        );

        Ok(result)
    }

    /// True when the catalog answers queries.
    pub async fn is_healthy(&self) -> bool {
        self.db.health_check().await
    }
}
