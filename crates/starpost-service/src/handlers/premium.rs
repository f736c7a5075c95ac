//! Premium entitlement handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use starpost_core::{Entitlement, Tier};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// Entitlement response.
#[derive(Debug, Serialize)]
pub struct EntitlementResponse {
    /// Whether premium is currently in force.
    pub active: bool,
    /// The granted tier.
    pub tier: Tier,
    /// Expiry timestamp, absent once lapsed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    /// True only for the one-time trial.
    pub is_trial: bool,
    /// Per-post video duration cap derived from the tier.
    pub max_video_seconds: u32,
}

impl From<&Entitlement> for EntitlementResponse {
    fn from(entitlement: &Entitlement) -> Self {
        Self {
            active: entitlement.active,
            tier: entitlement.tier,
            expires_at: entitlement.expires_at.map(|t| t.to_rfc3339()),
            is_trial: entitlement.is_trial,
            max_video_seconds: entitlement.max_video_seconds(),
        }
    }
}

/// Get the caller's premium status.
///
/// A first-ever read grants the one-time trial; a read past the expiry
/// persists the lapse.
pub async fn get_entitlement(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<EntitlementResponse>, ApiError> {
    let entitlement = state.ledger.entitlement_status(&auth.account_id)?;
    Ok(Json(EntitlementResponse::from(&entitlement)))
}

/// Purchase premium request.
#[derive(Debug, Deserialize)]
pub struct PurchaseRequest {
    /// The tier to purchase.
    pub tier: Tier,
    /// The amount the client intends to pay. Must match the tier's
    /// canonical price.
    pub amount: Option<i64>,
}

/// Purchase premium response.
#[derive(Debug, Serialize)]
pub struct PurchaseResponse {
    /// The new entitlement.
    pub entitlement: EntitlementResponse,
    /// Balance after the debit.
    pub balance: i64,
}

/// Purchase a premium entitlement.
pub async fn purchase_entitlement(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(body): Json<PurchaseRequest>,
) -> Result<Json<PurchaseResponse>, ApiError> {
    let (entitlement, balance) =
        state
            .ledger
            .purchase_entitlement(&auth.account_id, body.tier, body.amount)?;

    Ok(Json(PurchaseResponse {
        entitlement: EntitlementResponse::from(&entitlement),
        balance,
    }))
}
