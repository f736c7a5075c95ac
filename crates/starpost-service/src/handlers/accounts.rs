//! Account summary handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use starpost_core::Account;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::handlers::premium::EntitlementResponse;
use crate::state::AppState;

/// Account summary response.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    /// Account id.
    pub account_id: String,
    /// Current balance in stars.
    pub balance: i64,
    /// Lifetime stars credited.
    pub lifetime_earned: i64,
    /// Lifetime stars debited (gross).
    pub lifetime_spent: i64,
    /// Premium entitlement, if any history exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entitlement: Option<EntitlementResponse>,
    /// Created timestamp.
    pub created_at: String,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            account_id: account.id.to_string(),
            balance: account.balance,
            lifetime_earned: account.lifetime_earned,
            lifetime_spent: account.lifetime_spent,
            entitlement: account.entitlement.as_ref().map(EntitlementResponse::from),
            created_at: account.created_at.to_rfc3339(),
        }
    }
}

/// Get the caller's account summary.
///
/// Accounts are created implicitly on first mutation; reading an account
/// that has never been written returns a zero-balance view without
/// persisting anything.
pub async fn get_account(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<AccountResponse>, ApiError> {
    let account = state.ledger.account_summary(&auth.account_id)?;
    Ok(Json(AccountResponse::from(&account)))
}
