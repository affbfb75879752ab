//! HTTP route handlers.
//!
//! Endpoints:
//! - GET    /health                 - Service and catalog status
//! - GET    /discounts              - List rules in catalog order
//! - GET    /discounts/{code}       - One rule
//! - POST   /discounts              - Create or replace a rule
//! - DELETE /discounts/{code}       - Remove a rule
//! - POST   /discounts/calculate    - Best discount for a cart

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use discount_core::{DiscountRecord, EvaluationResult, NewDiscountRule};

use crate::error::{ApiError, ApiResult};
use crate::service::CalculateRequest;
use crate::AppState;

/// Fallback handler for unmatched routes.
pub(crate) async fn handle_not_found() -> ApiError {
    ApiError::NotFound("not found".to_string())
}

/// GET /health
pub(crate) async fn handle_health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let database_ok = state.service.is_healthy().await;

    let status = if database_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let body = json!({
        "status": if database_ok { "ok" } else { "degraded" },
        "database": database_ok,
        "version": env!("CARGO_PKG_VERSION"),
    });

    (status, Json(body))
}

/// GET /discounts
pub(crate) async fn handle_list(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<DiscountRecord>>> {
    Ok(Json(state.service.list().await?))
}

/// GET /discounts/{code}
pub(crate) async fn handle_get(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> ApiResult<Json<DiscountRecord>> {
    Ok(Json(state.service.get(&code).await?))
}

/// POST /discounts
pub(crate) async fn handle_create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewDiscountRule>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<DiscountRecord>)> {
    let Json(draft) = payload?;
    let record = state.service.add(draft).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// DELETE /discounts/{code}
pub(crate) async fn handle_delete(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> ApiResult<StatusCode> {
    state.service.delete(&code).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /discounts/calculate
pub(crate) async fn handle_calculate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CalculateRequest>, JsonRejection>,
) -> ApiResult<Json<EvaluationResult>> {
    let Json(request) = payload?;
    Ok(Json(state.service.calculate(&request.items).await?))
}
