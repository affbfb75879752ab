//! # Seed Data Generator
//!
//! Populates the catalog with the sample rules used in demos and manual
//! testing.
//!
//! ## Usage
//! ```bash
//! # Seed ./discounts.db (default)
//! cargo run -p discount-db --bin seed
//!
//! # Specify database path
//! cargo run -p discount-db --bin seed -- --db ./data/discounts.db
//! ```
//!
//! ## Seeded Rules
//! | Code | Kind            | Parameters               | Off  |
//! |------|-----------------|--------------------------|------|
//! | ABC  | BY_ITEM_TYPE    | itemType = CLOTHING      | 10%  |
//! | CDE  | BY_MINIMUM_COST | unit cost > $100.00      | 15%  |
//! | FGH  | BY_ITEM_COUNT   | itemId = 123, qty >= 2   | 20%  |
//!
//! Saving is an upsert, so running the seeder twice leaves the same catalog.

use std::env;

use anyhow::Context;
use discount_core::{validate_rule, ItemType, Money, NewDiscountRule};
use discount_db::{Database, DbConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn sample_rules() -> Vec<NewDiscountRule> {
    vec![
        NewDiscountRule {
            code: "ABC".into(),
            description: "10% off all clothing".into(),
            percentage: 10.0,
            kind: "BY_ITEM_TYPE".into(),
            item_type: Some(ItemType::from("CLOTHING")),
            ..Default::default()
        },
        NewDiscountRule {
            code: "CDE".into(),
            description: "15% off items over $100".into(),
            percentage: 15.0,
            kind: "BY_MINIMUM_COST".into(),
            minimum_cost: Some(Money::from_cents(10000)),
            ..Default::default()
        },
        NewDiscountRule {
            code: "FGH".into(),
            description: "20% off when buying 2 or more of item 123".into(),
            percentage: 20.0,
            kind: "BY_ITEM_COUNT".into(),
            item_id: Some("123".into()),
            quantity_threshold: Some(2),
            ..Default::default()
        },
    ]
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./discounts.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Discount Engine Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./discounts.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => {
                anyhow::bail!("Unknown argument: {other} (try --help)");
            }
        }
        i += 1;
    }

    let db = Database::new(DbConfig::new(&db_path))
        .await
        .with_context(|| format!("Failed to open database at {db_path}"))?;

    info!(path = %db_path, "Connected, migrations applied");

    for draft in sample_rules() {
        let code = draft.code.clone();
        let rule = validate_rule(draft).with_context(|| format!("Sample rule {code} is invalid"))?;
        let stored = db
            .discounts()
            .save(&rule)
            .await
            .with_context(|| format!("Failed to save {code}"))?;

        info!(
            code = %stored.rule.code,
            kind = %stored.rule.rule_kind(),
            percentage = %stored.rule.percentage,
            "Seeded discount rule"
        );
    }

    let total = db.discounts().count().await?;
    info!(total, "Seed complete");

    db.close().await;
    Ok(())
}
