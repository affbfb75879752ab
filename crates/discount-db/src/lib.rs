//! # discount-db: Rule Catalog for the Discount Engine
//!
//! This crate persists discount rules in SQLite using sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Discount Engine Data Flow                         │
//! │                                                                         │
//! │  POST /discounts  ─► validate_rule (core) ─► DiscountRepository::save   │
//! │  POST /discounts/calculate ─► DiscountRepository::list_all ─► evaluate  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   discount-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────────┐  ┌─────────────┐  │   │
//! │  │   │   Database    │    │    Repository      │  │ Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│ DiscountRepository │  │ (embedded)  │  │   │
//! │  │   │  SqlitePool   │    │                    │  │ 001_rules   │  │   │
//! │  │   └───────────────┘    └────────────────────┘  └─────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (discounts.db) or :memory: in tests                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Catalog repository
//!
//! ## Usage
//!
//! ```rust,ignore
//! use discount_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("discounts.db")).await?;
//! let rules = db.discounts().list_all().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::DiscountRepository;
