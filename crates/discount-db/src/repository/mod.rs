//! # Repository Module
//!
//! Database repository implementations for the discount engine.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  DiscountService (discount-api)                                         │
//! │       │                                                                 │
//! │       │  db.discounts().list_all()                                      │
//! │       ▼                                                                 │
//! │  DiscountRepository                                                     │
//! │  ├── list_all(&self)          catalog order                             │
//! │  ├── get_by_code(&self, code)                                           │
//! │  ├── save(&self, rule)        upsert by code                            │
//! │  ├── delete_by_code(&self, code)                                        │
//! │  └── count(&self)                                                       │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite `discount_rules` table                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Repositories take validated domain types in and hand domain types back.
//! Row structs never leave this module.

pub mod discount;

pub use discount::DiscountRepository;
