//! Request and response types for the starpost API.

use serde::{Deserialize, Serialize};

/// Balance response.
#[derive(Debug, Clone, Deserialize)]
pub struct Balance {
    /// Current balance in stars.
    pub balance: i64,
}

/// Withdrawal response.
#[derive(Debug, Clone, Deserialize)]
pub struct WithdrawResult {
    /// Balance after the gross amount left the account.
    pub balance: i64,
    /// Amount owed by the external payout system.
    pub net_payout: i64,
    /// Commission withheld from the payout.
    pub commission: i64,
}

/// Premium entitlement status.
#[derive(Debug, Clone, Deserialize)]
pub struct EntitlementStatus {
    /// Whether premium is currently in force.
    pub active: bool,
    /// The granted tier ("standard" or "blogger").
    pub tier: String,
    /// Expiry timestamp (RFC 3339), absent once lapsed.
    #[serde(default)]
    pub expires_at: Option<String>,
    /// True only for the one-time trial.
    pub is_trial: bool,
    /// Per-post video duration cap in seconds.
    pub max_video_seconds: u32,
}

/// Premium purchase response.
#[derive(Debug, Clone, Deserialize)]
pub struct PurchaseResult {
    /// The new entitlement.
    pub entitlement: EntitlementStatus,
    /// Balance after the debit.
    pub balance: i64,
}

/// Pin purchase response.
#[derive(Debug, Clone, Deserialize)]
pub struct PinResult {
    /// The content item that was pinned.
    pub content_id: String,
    /// Effective pin duration after clamping.
    pub hours: i64,
    /// Price charged in stars.
    pub price: i64,
    /// When the pin lapses (RFC 3339).
    pub pinned_until: String,
    /// Balance after the debit.
    pub balance: i64,
}

/// A content item in the feed.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedItem {
    /// Content id.
    pub id: String,
    /// Owning account id.
    pub owner: String,
    /// "post" or "story".
    pub kind: String,
    /// Caption text.
    pub caption: String,
    /// Stars gifted to this item.
    pub star_count: i64,
    /// Whether the item is pinned right now.
    pub pinned: bool,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
}

/// Feed response.
#[derive(Debug, Clone, Deserialize)]
pub struct Feed {
    /// Content items: pinned-and-active first, then newest first.
    pub items: Vec<FeedItem>,
}

/// Error response envelope from the API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    /// The error body.
    pub error: ApiErrorBody,
}

/// Error body from the API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Structured details (balance, minimum, shortfall, ...).
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

/// Gift request body.
#[derive(Debug, Serialize)]
pub(crate) struct GiftRequest {
    pub content_id: String,
    pub amount: i64,
}

/// Amount-only request body (add, withdraw).
#[derive(Debug, Serialize)]
pub(crate) struct AmountRequest {
    pub amount: i64,
}

/// Premium purchase request body.
#[derive(Debug, Serialize)]
pub(crate) struct PurchaseRequest {
    pub tier: String,
    pub amount: i64,
}

/// Pin request body.
#[derive(Debug, Serialize)]
pub(crate) struct PinRequest {
    pub content_type: String,
    pub hours: i64,
}
