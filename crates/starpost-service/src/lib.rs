//! Starpost HTTP API Service.
//!
//! This crate provides the HTTP API for the Starpost star ledger:
//!
//! - Star balance, top-ups, withdrawals, and gifts
//! - Premium entitlements (trial, purchase, lazy expiry)
//! - Content registration, the feed, and pin promotions
//!
//! # Authentication
//!
//! Requests carry a bearer token identifying the host-platform user; the
//! account id inside it is the only identity the ledger knows.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Handlers must be async for routing

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod ledger;
pub mod routes;
pub mod state;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use ledger::{Ledger, PinOutcome, WithdrawOutcome};
pub use routes::create_router;
pub use state::AppState;
