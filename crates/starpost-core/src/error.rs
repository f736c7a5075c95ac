//! Domain error types for ledger operations.

use crate::entitlement::Tier;

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors a ledger operation can report.
///
/// Every variant is a deterministic validation failure detected before any
/// balance mutation; none of them is retried internally.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
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

    /// The balance does not cover the requested debit.
    #[error("insufficient funds: balance={balance}, required={required}")]
    InsufficientFunds {
        /// Current balance in stars.
        balance: i64,
        /// Required amount in stars.
        required: i64,
    },

    /// The supplied purchase amount does not match the tier's canonical price.
    #[error("price mismatch for {tier}: expected={expected}, supplied={supplied}")]
    PriceMismatch {
        /// The tier being purchased.
        tier: Tier,
        /// The canonical price in stars.
        expected: i64,
        /// The amount the caller supplied.
        supplied: i64,
    },

    /// The gift target content item does not exist.
    #[error("target content not found: {content_id}")]
    TargetNotFound {
        /// The content id that was not found.
        content_id: String,
    },

    /// The account has no content item of the requested kind to pin.
    #[error("no {kind} found to pin for account {account_id}")]
    NoContentFound {
        /// The account whose content was searched.
        account_id: String,
        /// The requested content kind.
        kind: String,
    },
}
