//! `RocksDB` storage layer for the Starpost star ledger.
//!
//! This crate provides persistent storage for accounts, star transactions,
//! and content items using `RocksDB` with column families for indexing.
//!
//! # Architecture
//!
//! - `accounts`: account records (balance + entitlement), keyed by account id
//! - `transactions`: star transactions, keyed by `transaction_id` (ULID)
//! - `transactions_by_account`: index for per-account history
//! - `content`: content items, keyed by `content_id` (ULID)
//! - `content_by_owner`: index for "latest item of a kind by owner"
//!
//! # Concurrency
//!
//! The store enforces single-writer-per-account semantics: every
//! read-check-write sequence against one account's balance runs under that
//! account's entry in an internal lock table, so two concurrent debits can
//! never both pass the same sufficiency check. Compound mutations (account
//! plus transaction row plus index entries) commit in one `WriteBatch`.
//!
//! # Example
//!
//! ```no_run
//! use starpost_store::{RocksStore, Store};
//! use starpost_core::{AccountId, StarTransaction};
//!
//! let store = RocksStore::open("/tmp/starpost-db").unwrap();
//!
//! let account = AccountId::generate();
//! let tx = StarTransaction::add(account.clone(), 500);
//! let balance = store.credit(&account, 500, &tx).unwrap();
//! assert_eq!(balance, 500);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod keys;
pub mod rocks;
pub mod schema;

pub use error::{Result, StoreError};
pub use rocks::RocksStore;

use chrono::{DateTime, Utc};
use starpost_core::{
    Account, AccountId, ContentId, ContentItem, ContentKind, Entitlement, StarTransaction,
    TransactionId,
};

/// The storage trait defining all database operations.
///
/// This trait abstracts the storage layer so the ledger is testable without
/// global state and swappable for a different durable store.
pub trait Store: Send + Sync {
    // =========================================================================
    // Account Operations
    // =========================================================================

    /// Insert or update an account record.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_account(&self, account: &Account) -> Result<()>;

    /// Get an account by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_account(&self, account_id: &AccountId) -> Result<Option<Account>>;

    /// Get an account's balance. Missing accounts read as 0.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_balance(&self, account_id: &AccountId) -> Result<i64>;

    /// Credit stars to an account, creating it if missing, and record the
    /// transaction atomically. Returns the new balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn credit(&self, account_id: &AccountId, amount: i64, tx: &StarTransaction) -> Result<i64>;

    /// Debit stars from an account if and only if the balance covers the
    /// amount, recording the transaction atomically. The sufficiency check
    /// and the mutation are a single step under the account's lock; on
    /// failure nothing is written. Returns the new balance.
    ///
    /// # Errors
    ///
    /// - `StoreError::InsufficientFunds` if the balance is too low (a
    ///   missing account reads as balance 0).
    fn debit(&self, account_id: &AccountId, amount: i64, tx: &StarTransaction) -> Result<i64>;

    // =========================================================================
    // Entitlement Operations
    // =========================================================================

    /// Set an account's entitlement record, creating the account if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn set_entitlement(&self, account_id: &AccountId, entitlement: &Entitlement) -> Result<()>;

    /// Debit the purchase price and install the new entitlement in one
    /// atomic step. Either both apply or neither does. Returns the new
    /// balance.
    ///
    /// # Errors
    ///
    /// - `StoreError::InsufficientFunds` if the balance is too low.
    fn purchase_entitlement(
        &self,
        account_id: &AccountId,
        price: i64,
        entitlement: &Entitlement,
        tx: &StarTransaction,
    ) -> Result<i64>;

    // =========================================================================
    // Content Operations
    // =========================================================================

    /// Insert a content item and maintain the owner index.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_content(&self, item: &ContentItem) -> Result<()>;

    /// Get a content item by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_content(&self, content_id: &ContentId) -> Result<Option<ContentItem>>;

    /// Find the owner's most recently created content item of a kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn latest_content_by_owner(
        &self,
        owner: &AccountId,
        kind: ContentKind,
    ) -> Result<Option<ContentItem>>;

    /// Increment a content item's star count. Returns the new count.
    ///
    /// # Errors
    ///
    /// - `StoreError::NotFound` if the content item doesn't exist.
    fn add_content_stars(&self, content_id: &ContentId, amount: i64) -> Result<i64>;

    /// Debit the pin price from the owner and set the content item's
    /// `pinned_until` in one atomic step. Returns the new balance.
    ///
    /// # Errors
    ///
    /// - `StoreError::NotFound` if the content item doesn't exist.
    /// - `StoreError::InsufficientFunds` if the balance is too low.
    fn pin_content(
        &self,
        owner: &AccountId,
        content_id: &ContentId,
        price: i64,
        pinned_until: DateTime<Utc>,
        tx: &StarTransaction,
    ) -> Result<i64>;

    /// List all content items, newest first. Feed ordering (pinned items
    /// first) is applied by the caller, since pin state is time-derived.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_content(&self) -> Result<Vec<ContentItem>>;

    // =========================================================================
    // Transaction Operations
    // =========================================================================

    /// Get a transaction by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_transaction(&self, transaction_id: &TransactionId) -> Result<Option<StarTransaction>>;

    /// List transactions for an account, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_transactions_by_account(
        &self,
        account_id: &AccountId,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<StarTransaction>>;
}
