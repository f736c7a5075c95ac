//! Starpost Client SDK.
//!
//! This crate provides a client library for services (typically the
//! mini-app's backend-for-frontend) to interact with the starpost API on
//! behalf of a host-platform user.
//!
//! # Example
//!
//! ```no_run
//! use starpost_client::StarpostClient;
//!
//! # async fn example() -> Result<(), starpost_client::ClientError> {
//! let client = StarpostClient::new(
//!     "http://starpost.social.svc:8080",
//!     "host-user:some-account-id",
//! );
//!
//! let balance = client.balance().await?;
//! println!("Balance: {} stars", balance.balance);
//!
//! let result = client.withdraw(1000).await?;
//! println!("Payout: {} (commission {})", result.net_payout, result.commission);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod error;
mod types;

pub use client::{ClientOptions, StarpostClient};
pub use error::ClientError;
pub use types::*;
