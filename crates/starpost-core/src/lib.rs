//! Core types for the Starpost star ledger.
//!
//! This crate provides the foundational types used throughout Starpost:
//!
//! - **Identifiers**: `AccountId`, `ContentId`, `TransactionId`
//! - **Accounts**: `Account` with the authoritative star balance
//! - **Entitlements**: `Entitlement`, `Tier` (premium upgrades)
//! - **Content**: `ContentItem`, `ContentKind`, pin pricing and feed order
//! - **Commission**: the withdrawal commission schedule
//! - **Transactions**: `StarTransaction` ledger entries
//!
//! # Stars
//!
//! The star is the atomic unit of the in-app currency. Balances are stored
//! as `i64` whole stars and are never negative: every debit path checks
//! sufficiency and mutates under the account's write lock in the store.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod account;
pub mod commission;
pub mod content;
pub mod entitlement;
pub mod error;
pub mod ids;
pub mod transactions;

pub use account::Account;
pub use commission::{
    commission, commission_rate_bps, net_payout, BASE_RATE_BPS, HIGH_TIER_RATE_BPS,
    HIGH_TIER_THRESHOLD, MID_TIER_RATE_BPS, MID_TIER_THRESHOLD, MIN_WITHDRAWAL_STARS,
};
pub use content::{
    clamp_pin_hours, feed_order, pin_price, ContentItem, ContentKind, MAX_PIN_HOURS,
    MIN_PIN_HOURS, POST_PIN_RATE_STARS, STORY_PIN_RATE_STARS,
};
pub use entitlement::{
    Entitlement, Tier, BLOGGER_MAX_VIDEO_SECONDS, BLOGGER_PRICE_STARS, PURCHASE_DAYS,
    STANDARD_MAX_VIDEO_SECONDS, STANDARD_PRICE_STARS, TRIAL_DAYS,
};
pub use error::{LedgerError, Result};
pub use ids::{AccountId, ContentId, IdError, TransactionId, MAX_ACCOUNT_ID_BYTES};
pub use transactions::{StarTransaction, TransactionKind};
