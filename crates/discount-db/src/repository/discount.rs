//! # Discount Repository
//!
//! Database operations for the discount rule catalog.
//!
//! ## Storage Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One row per rule, flat columns                       │
//! │                                                                         │
//! │  DiscountRule { kind: ByItemCount { item_id, quantity_threshold } }     │
//! │       │                                                                 │
//! │       ▼  save()                                                         │
//! │  ┌──────┬─────────┬──────────────┬───────────┬─────────┬─────┬─────┐    │
//! │  │ code │ pct_bps │ kind         │ item_type │ item_id │ qty │ min │    │
//! │  ├──────┼─────────┼──────────────┼───────────┼─────────┼─────┼─────┤    │
//! │  │ FGH  │ 2000    │ BY_ITEM_COUNT│ NULL      │ 123     │ 2   │ 0   │    │
//! │  └──────┴─────────┴──────────────┴───────────┴─────────┴─────┴─────┘    │
//! │       │                                                                 │
//! │       ▼  list_all() / get_by_code()                                     │
//! │  DiscountRuleRow ──into_record()──► DiscountRecord (or CorruptRecord)   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Catalog Order
//! `list_all` returns rules in the order their codes were first stored
//! (SQLite `rowid`). Overwriting a code updates the row in place, so the rule
//! keeps its position and its `created_at`.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use discount_core::{
    DiscountKind, DiscountRecord, DiscountRule, ItemType, Money, Percentage, RuleKind,
};

use crate::error::{DbError, DbResult};

const SELECT_COLUMNS: &str = "code, description, percentage_bps, kind, item_type, item_id, \
                              quantity_threshold, minimum_cost_cents, created_at, updated_at";

// =============================================================================
// Row Mapping
// =============================================================================

/// Raw `discount_rules` row.
#[derive(Debug, sqlx::FromRow)]
struct DiscountRuleRow {
    code: String,
    description: String,
    percentage_bps: i64,
    kind: String,
    item_type: Option<ItemType>,
    item_id: Option<String>,
    quantity_threshold: i64,
    minimum_cost_cents: Money,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl DiscountRuleRow {
    /// Rebuilds the typed rule, refusing rows that no longer satisfy the
    /// per-kind field requirements.
    fn into_record(self) -> DbResult<DiscountRecord> {
        let percentage = u32::try_from(self.percentage_bps)
            .ok()
            .filter(|bps| *bps <= 10_000)
            .map(Percentage::from_bps)
            .ok_or_else(|| {
                DbError::corrupt(
                    &self.code,
                    format!("percentage_bps out of range: {}", self.percentage_bps),
                )
            })?;

        let rule_kind: RuleKind = self
            .kind
            .parse()
            .map_err(|e| DbError::corrupt(&self.code, e))?;

        let kind = match rule_kind {
            RuleKind::ByItemType => match self.item_type {
                Some(item_type) if !item_type.is_blank() => DiscountKind::ByItemType { item_type },
                _ => return Err(DbError::corrupt(&self.code, "item_type is missing")),
            },
            RuleKind::ByItemCount => match self.item_id {
                Some(_) if self.quantity_threshold <= 0 => {
                    return Err(DbError::corrupt(
                        &self.code,
                        format!("quantity_threshold must be positive: {}", self.quantity_threshold),
                    ));
                }
                Some(item_id) if !item_id.trim().is_empty() => DiscountKind::ByItemCount {
                    item_id,
                    quantity_threshold: self.quantity_threshold,
                },
                _ => return Err(DbError::corrupt(&self.code, "item_id is missing")),
            },
            RuleKind::ByMinimumCost if !self.minimum_cost_cents.is_positive() => {
                return Err(DbError::corrupt(
                    &self.code,
                    format!("minimum_cost_cents must be positive: {}", self.minimum_cost_cents.cents()),
                ));
            }
            RuleKind::ByMinimumCost => DiscountKind::ByMinimumCost {
                minimum_cost: self.minimum_cost_cents,
            },
        };

        Ok(DiscountRecord {
            rule: DiscountRule {
                code: self.code,
                description: self.description,
                percentage,
                kind,
            },
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Splits a rule into the nullable kind columns.
fn kind_columns(kind: &DiscountKind) -> (Option<&ItemType>, Option<&str>, i64, Money) {
    match kind {
        DiscountKind::ByItemType { item_type } => (Some(item_type), None, 0, Money::zero()),
        DiscountKind::ByItemCount {
            item_id,
            quantity_threshold,
        } => (None, Some(item_id.as_str()), *quantity_threshold, Money::zero()),
        DiscountKind::ByMinimumCost { minimum_cost } => (None, None, 0, *minimum_cost),
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for discount rule database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.discounts();
///
/// let stored = repo.save(&rule).await?;
/// let all = repo.list_all().await?;
/// let removed = repo.delete_by_code("ABC").await?;
/// ```
#[derive(Debug, Clone)]
pub struct DiscountRepository {
    pool: SqlitePool,
}

impl DiscountRepository {
    /// Creates a new DiscountRepository.
    pub fn new(pool: SqlitePool) -> Self {
        DiscountRepository { pool }
    }

    /// Lists every stored rule in catalog order.
    ///
    /// ## Returns
    /// * `Ok(Vec<DiscountRecord>)` - Possibly empty
    /// * `Err(DbError::CorruptRecord)` - A stored row no longer decodes
    pub async fn list_all(&self) -> DbResult<Vec<DiscountRecord>> {
        let sql = format!("SELECT {SELECT_COLUMNS} FROM discount_rules ORDER BY rowid");

        let rows: Vec<DiscountRuleRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;

        debug!(count = rows.len(), "Loaded discount catalog");

        rows.into_iter().map(DiscountRuleRow::into_record).collect()
    }

    /// Gets a rule by its code.
    ///
    /// ## Returns
    /// * `Ok(Some(DiscountRecord))` - Rule found
    /// * `Ok(None)` - No rule under this code
    pub async fn get_by_code(&self, code: &str) -> DbResult<Option<DiscountRecord>> {
        let sql = format!("SELECT {SELECT_COLUMNS} FROM discount_rules WHERE code = ?1");

        let row: Option<DiscountRuleRow> = sqlx::query_as(&sql)
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;

        row.map(DiscountRuleRow::into_record).transpose()
    }

    /// Stores a rule, replacing any existing rule with the same code.
    ///
    /// ## Overwrite Semantics
    /// ```text
    /// code absent  → INSERT, created_at = updated_at = now, appended to catalog
    /// code present → UPDATE in place, created_at and catalog position kept
    /// ```
    ///
    /// The caller is expected to pass a rule produced by validation.
    pub async fn save(&self, rule: &DiscountRule) -> DbResult<DiscountRecord> {
        debug!(code = %rule.code, kind = %rule.rule_kind(), "Saving discount rule");

        let now = Utc::now();
        let (item_type, item_id, quantity_threshold, minimum_cost) = kind_columns(&rule.kind);

        let sql = format!(
            r#"
            INSERT INTO discount_rules (
                code, description, percentage_bps, kind,
                item_type, item_id, quantity_threshold, minimum_cost_cents,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            ON CONFLICT(code) DO UPDATE SET
                description = excluded.description,
                percentage_bps = excluded.percentage_bps,
                kind = excluded.kind,
                item_type = excluded.item_type,
                item_id = excluded.item_id,
                quantity_threshold = excluded.quantity_threshold,
                minimum_cost_cents = excluded.minimum_cost_cents,
                updated_at = excluded.updated_at
            RETURNING {SELECT_COLUMNS}
            "#
        );

        let row: DiscountRuleRow = sqlx::query_as(&sql)
            .bind(&rule.code)
            .bind(&rule.description)
            .bind(i64::from(rule.percentage.bps()))
            .bind(rule.rule_kind().as_str())
            .bind(item_type)
            .bind(item_id)
            .bind(quantity_threshold)
            .bind(minimum_cost)
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;

        row.into_record()
    }

    /// Deletes the rule stored under `code`.
    ///
    /// ## Returns
    /// * `Ok(true)` - A rule was removed
    /// * `Ok(false)` - Nothing was stored under this code
    pub async fn delete_by_code(&self, code: &str) -> DbResult<bool> {
        debug!(code = %code, "Deleting discount rule");

        let result = sqlx::query("DELETE FROM discount_rules WHERE code = ?1")
            .bind(code)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts stored rules.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM discount_rules")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
