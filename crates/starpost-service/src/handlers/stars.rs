//! Star balance, withdrawal, gift, and history handlers.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use starpost_core::{ContentId, StarTransaction, TransactionKind};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// Balance response.
#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    /// Current balance in stars.
    pub balance: i64,
}

/// Get current star balance.
pub async fn get_balance(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<BalanceResponse>, ApiError> {
    let balance = state.ledger.balance(&auth.account_id)?;
    Ok(Json(BalanceResponse { balance }))
}

/// Add stars request.
#[derive(Debug, Deserialize)]
pub struct AddStarsRequest {
    /// Amount of stars to add.
    pub amount: Option<i64>,
}

/// Add stars response.
#[derive(Debug, Serialize)]
pub struct AddStarsResponse {
    /// Balance after the credit.
    pub balance: i64,
}

/// Add stars to the caller's account.
pub async fn add_stars(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(body): Json<AddStarsRequest>,
) -> Result<Json<AddStarsResponse>, ApiError> {
    let balance = state.ledger.add_stars(&auth.account_id, body.amount)?;
    Ok(Json(AddStarsResponse { balance }))
}

/// Withdraw stars request.
#[derive(Debug, Deserialize)]
pub struct WithdrawRequest {
    /// Gross amount of stars to withdraw.
    pub amount: Option<i64>,
}

/// Withdraw stars response.
#[derive(Debug, Serialize)]
pub struct WithdrawResponse {
    /// Balance after the gross amount left the account.
    pub balance: i64,
    /// Amount owed to the user by the external payout system.
    pub net_payout: i64,
    /// Commission withheld from the payout.
    pub commission: i64,
}

/// Withdraw stars to an external payout.
pub async fn withdraw(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(body): Json<WithdrawRequest>,
) -> Result<Json<WithdrawResponse>, ApiError> {
    let privileged = state.is_privileged(&auth.account_id);
    let outcome = state
        .ledger
        .withdraw(&auth.account_id, body.amount, privileged)?;

    Ok(Json(WithdrawResponse {
        balance: outcome.new_balance,
        net_payout: outcome.net_payout,
        commission: outcome.commission,
    }))
}

/// Gift stars request.
#[derive(Debug, Deserialize)]
pub struct GiftRequest {
    /// The content item receiving the stars.
    pub content_id: String,
    /// Amount of stars to gift.
    pub amount: Option<i64>,
}

/// Gift stars response.
#[derive(Debug, Serialize)]
pub struct GiftResponse {
    /// Sender's balance after the debit.
    pub balance: i64,
}

/// Gift stars to a content item.
pub async fn gift(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(body): Json<GiftRequest>,
) -> Result<Json<GiftResponse>, ApiError> {
    let content_id: ContentId = body
        .content_id
        .parse()
        .map_err(|_| ApiError::TargetNotFound(body.content_id.clone()))?;

    let balance = state
        .ledger
        .gift(&auth.account_id, &content_id, body.amount)?;
    Ok(Json(GiftResponse { balance }))
}

/// Transaction list query parameters.
#[derive(Debug, Deserialize)]
pub struct ListTransactionsQuery {
    /// Maximum number of transactions to return (default: 50).
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Offset for pagination (default: 0).
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    50
}

/// Transaction response.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    /// Transaction ID.
    pub id: String,
    /// Signed amount in stars (positive = credit, negative = debit).
    pub amount: i64,
    /// Transaction kind.
    pub kind: TransactionKind,
    /// Balance after this transaction.
    pub balance_after: i64,
    /// Description.
    pub description: String,
    /// Timestamp.
    pub created_at: String,
}

impl From<&StarTransaction> for TransactionResponse {
    fn from(tx: &StarTransaction) -> Self {
        Self {
            id: tx.id.to_string(),
            amount: tx.amount,
            kind: tx.kind,
            balance_after: tx.balance_after,
            description: tx.description.clone(),
            created_at: tx.created_at.to_rfc3339(),
        }
    }
}

/// List transactions response.
#[derive(Debug, Serialize)]
pub struct ListTransactionsResponse {
    /// Transactions (newest first).
    pub transactions: Vec<TransactionResponse>,
    /// Whether there are more transactions.
    pub has_more: bool,
}

/// List the caller's transaction history.
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Query(query): Query<ListTransactionsQuery>,
) -> Result<Json<ListTransactionsResponse>, ApiError> {
    // Fetch one more than requested to determine has_more
    let limit = query.limit.min(100);
    let transactions = state
        .ledger
        .transactions(&auth.account_id, limit + 1, query.offset)?;

    let has_more = transactions.len() > limit;
    let transactions: Vec<_> = transactions
        .iter()
        .take(limit)
        .map(TransactionResponse::from)
        .collect();

    Ok(Json(ListTransactionsResponse {
        transactions,
        has_more,
    }))
}
