//! Content registration, feed, and promotion handlers.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use starpost_core::{ContentItem, ContentKind};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// Content item response.
#[derive(Debug, Serialize)]
pub struct ContentResponse {
    /// Content id.
    pub id: String,
    /// Owning account id.
    pub owner: String,
    /// Post or story.
    pub kind: ContentKind,
    /// Caption text.
    pub caption: String,
    /// Stars gifted to this item.
    pub star_count: i64,
    /// Whether the item is pinned right now (derived).
    pub pinned: bool,
    /// Pin expiry, if a promotion was purchased.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinned_until: Option<String>,
    /// Creation timestamp.
    pub created_at: String,
}

impl From<&ContentItem> for ContentResponse {
    fn from(item: &ContentItem) -> Self {
        Self {
            id: item.id.to_string(),
            owner: item.owner.to_string(),
            kind: item.kind,
            caption: item.caption.clone(),
            star_count: item.star_count,
            pinned: item.is_pinned(Utc::now()),
            pinned_until: item.pinned_until.map(|t| t.to_rfc3339()),
            created_at: item.created_at.to_rfc3339(),
        }
    }
}

/// Create content request.
#[derive(Debug, Deserialize)]
pub struct CreateContentRequest {
    /// Post or story.
    pub kind: ContentKind,
    /// Caption text.
    #[serde(default)]
    pub caption: String,
}

/// Register a content item for the caller.
pub async fn create_content(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(body): Json<CreateContentRequest>,
) -> Result<Json<ContentResponse>, ApiError> {
    let item = state
        .ledger
        .create_content(&auth.account_id, body.kind, body.caption)?;
    Ok(Json(ContentResponse::from(&item)))
}

/// Feed query parameters.
#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    /// Maximum number of items to return (default: 50).
    #[serde(default = "default_feed_limit")]
    pub limit: usize,
}

fn default_feed_limit() -> usize {
    50
}

/// Feed response.
#[derive(Debug, Serialize)]
pub struct FeedResponse {
    /// Content items: pinned-and-active first, then newest first.
    pub items: Vec<ContentResponse>,
}

/// List the content feed.
pub async fn feed(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    Query(query): Query<FeedQuery>,
) -> Result<Json<FeedResponse>, ApiError> {
    let limit = query.limit.min(200);
    let items = state.ledger.feed(limit)?;

    Ok(Json(FeedResponse {
        items: items.iter().map(ContentResponse::from).collect(),
    }))
}

/// Pin content request.
#[derive(Debug, Deserialize)]
pub struct PinRequest {
    /// The kind of content to pin.
    pub content_type: ContentKind,
    /// Pin duration in hours, clamped to 1..=24.
    pub hours: Option<i64>,
}

/// Pin content response.
#[derive(Debug, Serialize)]
pub struct PinResponse {
    /// The content item that was pinned.
    pub content_id: String,
    /// Effective pin duration after clamping.
    pub hours: i64,
    /// Price charged in stars.
    pub price: i64,
    /// When the pin lapses.
    pub pinned_until: String,
    /// Balance after the debit.
    pub balance: i64,
}

/// Pin the caller's most recent content item of a kind.
pub async fn pin_content(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(body): Json<PinRequest>,
) -> Result<Json<PinResponse>, ApiError> {
    let outcome = state
        .ledger
        .pin(&auth.account_id, body.content_type, body.hours)?;

    Ok(Json(PinResponse {
        content_id: outcome.content_id.to_string(),
        hours: outcome.hours,
        price: outcome.price,
        pinned_until: outcome.pinned_until.to_rfc3339(),
        balance: outcome.new_balance,
    }))
}
