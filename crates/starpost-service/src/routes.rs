//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{accounts, content, health, premium, stars};
use crate::state::AppState;

/// Maximum concurrent requests for API endpoints.
const API_MAX_CONCURRENT_REQUESTS: usize = 50;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
///
/// ## Accounts (host bearer auth)
/// - `GET /v1/accounts/me` - Caller's account summary
///
/// ## Stars (host bearer auth)
/// - `GET /v1/stars/balance` - Current balance
/// - `POST /v1/stars/add` - Add stars (host payment flow result)
/// - `POST /v1/stars/withdraw` - Withdraw to an external payout
/// - `POST /v1/stars/gift` - Gift stars to a content item
/// - `GET /v1/stars/transactions` - Transaction history
///
/// ## Premium (host bearer auth)
/// - `GET /v1/premium` - Premium status (lazy trial / expiry transitions)
/// - `POST /v1/premium/purchase` - Purchase an entitlement tier
///
/// ## Content (host bearer auth)
/// - `POST /v1/content` - Register a post or story
/// - `GET /v1/content/feed` - Feed listing (pinned first)
/// - `POST /v1/content/pin` - Pin the caller's latest item of a kind
pub fn create_router(state: AppState) -> Router {
    // Extract config values before moving state
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    let cors = build_cors_layer(&cors_origins);

    let state = Arc::new(state);

    let api_routes = Router::new()
        // Accounts
        .route("/accounts/me", get(accounts::get_account))
        // Stars
        .route("/stars/balance", get(stars::get_balance))
        .route("/stars/add", post(stars::add_stars))
        .route("/stars/withdraw", post(stars::withdraw))
        .route("/stars/gift", post(stars::gift))
        .route("/stars/transactions", get(stars::list_transactions))
        // Premium
        .route("/premium", get(premium::get_entitlement))
        .route("/premium/purchase", post(premium::purchase_entitlement))
        // Content
        .route("/content", post(content::create_content))
        .route("/content/feed", get(content::feed))
        .route("/content/pin", post(content::pin_content))
        .layer(ConcurrencyLimitLayer::new(API_MAX_CONCURRENT_REQUESTS));

    Router::new()
        // Health (public, no rate limit)
        .route("/health", get(health::health))
        // API v1 routes (rate limited)
        .nest("/v1", api_routes)
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
