//! API error types and responses.
//!
//! Every failure kind maps to a distinct machine-readable `code` so the
//! mini-app can render an actionable message (show the minimum, show the
//! shortfall) instead of a generic error.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use starpost_core::LedgerError;
use starpost_store::StoreError;

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Unauthorized - missing or invalid credentials.
    #[error("unauthorized")]
    Unauthorized,

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Bad request - invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The supplied amount is missing or not a positive integer.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// Withdrawal below the minimum for non-privileged accounts.
    #[error("withdrawal below minimum: minimum={minimum}, requested={requested}")]
    BelowMinimum {
        /// The enforced minimum in stars.
        minimum: i64,
        /// The requested amount in stars.
        requested: i64,
    },

    /// Insufficient stars.
    #[error("insufficient funds: balance={balance}, required={required}")]
    InsufficientFunds {
        /// Current balance.
        balance: i64,
        /// Required amount.
        required: i64,
    },

    /// Purchase amount does not match the canonical tier price.
    #[error("price mismatch: expected={expected}, supplied={supplied}")]
    PriceMismatch {
        /// The tier being purchased.
        tier: String,
        /// The canonical price.
        expected: i64,
        /// The supplied amount.
        supplied: i64,
    },

    /// Gift target content does not exist.
    #[error("target content not found: {0}")]
    TargetNotFound(String),

    /// No content of the requested kind to pin.
    #[error("no {kind} found to pin for account {account_id}")]
    NoContentFound {
        /// The account whose content was searched.
        account_id: String,
        /// The requested content kind.
        kind: String,
    },

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                self.to_string(),
                None,
            ),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone(), None),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone(), None),
            Self::InvalidAmount(msg) => (
                StatusCode::BAD_REQUEST,
                "invalid_amount",
                msg.clone(),
                None,
            ),
            Self::BelowMinimum { minimum, requested } => (
                StatusCode::BAD_REQUEST,
                "below_minimum",
                self.to_string(),
                Some(serde_json::json!({
                    "minimum": minimum,
                    "requested": requested
                })),
            ),
            Self::InsufficientFunds { balance, required } => (
                StatusCode::PAYMENT_REQUIRED,
                "insufficient_funds",
                self.to_string(),
                Some(serde_json::json!({
                    "balance": balance,
                    "required": required,
                    "shortfall": required - balance
                })),
            ),
            Self::PriceMismatch {
                tier,
                expected,
                supplied,
            } => (
                StatusCode::BAD_REQUEST,
                "price_mismatch",
                self.to_string(),
                Some(serde_json::json!({
                    "tier": tier,
                    "expected": expected,
                    "supplied": supplied
                })),
            ),
            Self::TargetNotFound(id) => (
                StatusCode::NOT_FOUND,
                "target_not_found",
                self.to_string(),
                Some(serde_json::json!({ "content_id": id })),
            ),
            Self::NoContentFound { account_id, kind } => (
                StatusCode::NOT_FOUND,
                "no_content_found",
                self.to_string(),
                Some(serde_json::json!({
                    "account_id": account_id,
                    "kind": kind
                })),
            ),
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => Self::NotFound(format!("{entity}: {id}")),
            StoreError::InsufficientFunds { balance, required } => {
                Self::InsufficientFunds { balance, required }
            }
            StoreError::Database(msg) | StoreError::Serialization(msg) => Self::Internal(msg),
        }
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InvalidAmount(msg) => Self::InvalidAmount(msg),
            LedgerError::BelowMinimum { minimum, requested } => {
                Self::BelowMinimum { minimum, requested }
            }
            LedgerError::InsufficientFunds { balance, required } => {
                Self::InsufficientFunds { balance, required }
            }
            LedgerError::PriceMismatch {
                tier,
                expected,
                supplied,
            } => Self::PriceMismatch {
                tier: tier.to_string(),
                expected,
                supplied,
            },
            LedgerError::TargetNotFound { content_id } => Self::TargetNotFound(content_id),
            LedgerError::NoContentFound { account_id, kind } => {
                Self::NoContentFound { account_id, kind }
            }
        }
    }
}
