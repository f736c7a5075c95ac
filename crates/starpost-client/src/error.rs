//! Client error types.

/// Errors that can occur when using the starpost client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned an error response.
    #[error("API error: {code} - {message}")]
    Api {
        /// Error code.
        code: String,
        /// Error message.
        message: String,
        /// HTTP status code.
        status: u16,
    },

    /// Insufficient stars.
    #[error("insufficient funds: balance={balance}, required={required}")]
    InsufficientFunds {
        /// Current balance.
        balance: i64,
        /// Required amount.
        required: i64,
    },

    /// Withdrawal below the minimum.
    #[error("withdrawal below minimum: minimum={minimum}, requested={requested}")]
    BelowMinimum {
        /// The enforced minimum.
        minimum: i64,
        /// The requested amount.
        requested: i64,
    },

    /// Purchase amount does not match the canonical tier price.
    #[error("price mismatch: expected={expected}, supplied={supplied}")]
    PriceMismatch {
        /// The canonical price.
        expected: i64,
        /// The supplied amount.
        supplied: i64,
    },

    /// The referenced content does not exist.
    #[error("content not found: {message}")]
    ContentNotFound {
        /// Server-provided detail.
        message: String,
    },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
