//! Error types for the Discount API.
//!
//! ## Status Mapping
//! ```text
//! ┌──────────────────────────────┬────────┬──────────────────────┐
//! │ Source                       │ Status │ code                 │
//! ├──────────────────────────────┼────────┼──────────────────────┤
//! │ ValidationError              │ 400    │ VALIDATION_ERROR     │
//! │ JSON extractor rejection     │ 400    │ BAD_REQUEST          │
//! │ CoreError::DiscountNotFound  │ 404    │ NOT_FOUND            │
//! │ unmatched route              │ 404    │ NOT_FOUND            │
//! │ DbError                      │ 500    │ DATABASE_ERROR       │
//! │ anything else                │ 500    │ INTERNAL             │
//! └──────────────────────────────┴────────┴──────────────────────┘
//! ```
//!
//! Every error is rendered as `{ "code": "...", "message": "..." }`.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;

use discount_core::{CoreError, ValidationError};
use discount_db::DbError;

/// Machine-readable error code carried in every error body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ValidationError,
    NotFound,
    BadRequest,
    DatabaseError,
    Internal,
}

/// JSON error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
}

/// Discount API errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ApiError::Validation(_) => ErrorCode::ValidationError,
            ApiError::BadRequest(_) => ErrorCode::BadRequest,
            ApiError::NotFound(_) => ErrorCode::NotFound,
            ApiError::Database(_) => ErrorCode::DatabaseError,
            ApiError::Internal(_) => ErrorCode::Internal,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            code: self.code(),
            message: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::DiscountNotFound(_) => ApiError::NotFound(err.to_string()),
            CoreError::Validation(inner) => inner.into(),
        }
    }
}

/// Catalog failures are logged in full; clients get a generic message.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        error!(error = %err, "Catalog operation failed");
        ApiError::Database("catalog unavailable".to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Result type for handlers and the service layer.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use discount_core::RuleKind;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::Validation("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Database("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_message_passes_through() {
        let err: ApiError = ValidationError::MissingForKind {
            field: "itemType".to_string(),
            kind: RuleKind::ByItemType,
        }
        .into();

        assert_eq!(err.code(), ErrorCode::ValidationError);
        assert_eq!(
            err.to_string(),
            "itemType must be supplied with BY_ITEM_TYPE discount"
        );
    }

    #[test]
    fn test_not_found_from_core() {
        let err: ApiError = CoreError::DiscountNotFound("ZZZ".to_string()).into();
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.to_string(), "Discount not found: ZZZ");
    }

    #[test]
    fn test_db_error_does_not_leak_details() {
        let err: ApiError = DbError::QueryFailed("no such table: secret".to_string()).into();
        assert_eq!(err.code(), ErrorCode::DatabaseError);
        assert!(!err.to_string().contains("secret"));
    }

    #[test]
    fn test_error_code_wire_format() {
        let body = ErrorBody {
            code: ErrorCode::ValidationError,
            message: "bad".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"code": "VALIDATION_ERROR", "message": "bad"})
        );
    }
}
