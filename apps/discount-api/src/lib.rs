//! # Discount API
//!
//! HTTP/JSON front end for the discount engine.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Discount API Server                              │
//! │                                                                         │
//! │  Client ───► axum Router ───► routes ───► DiscountService ───► SQLite   │
//! │                  │                             │                        │
//! │           TraceLayer, CORS              discount-core                   │
//! │                                    (validate_rule, evaluate)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`build_router`] is public so integration tests can drive the full stack
//! in-process without binding a socket.

pub mod config;
pub mod error;
pub mod routes;
pub mod service;

use std::sync::Arc;

use axum::http::Method;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use discount_db::Database;

use crate::config::ApiConfig;
use crate::routes::{
    handle_calculate, handle_create, handle_delete, handle_get, handle_health, handle_list,
    handle_not_found,
};
use crate::service::DiscountService;

pub use crate::config::ConfigError;
pub use crate::error::{ApiError, ApiResult, ErrorBody, ErrorCode};

/// Shared application state.
pub struct AppState {
    pub service: DiscountService,
    pub config: ApiConfig,
}

impl AppState {
    pub fn new(db: Database, config: ApiConfig) -> Self {
        AppState {
            service: DiscountService::new(db),
            config,
        }
    }
}

/// Builds the application router with all routes and layers.
pub fn build_router(state: Arc<AppState>) -> Router {
    let mut app = Router::new()
        .route("/health", get(handle_health))
        .route("/discounts", get(handle_list).post(handle_create))
        .route("/discounts/calculate", post(handle_calculate))
        .route("/discounts/{code}", get(handle_get).delete(handle_delete))
        .fallback(handle_not_found)
        .layer(TraceLayer::new_for_http());

    if state.config.cors_permissive {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::DELETE])
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app.with_state(state)
}
