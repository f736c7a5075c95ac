//! Key encoding utilities for `RocksDB`.
//!
//! Account ids are variable-length strings, so composite keys separate the
//! id from the fixed-width ULID suffix with a `0x00` byte. `AccountId`
//! validation guarantees ids contain no interior NUL, which keeps every
//! prefix scan unambiguous.

use starpost_core::{AccountId, ContentId, ContentKind, TransactionId};

/// Separator between a variable-length account id and the rest of a key.
const SEP: u8 = 0x00;

/// Create an account key from an account id.
#[must_use]
pub fn account_key(account_id: &AccountId) -> Vec<u8> {
    account_id.as_bytes().to_vec()
}

/// Create a transaction key from a transaction id.
#[must_use]
pub fn transaction_key(transaction_id: &TransactionId) -> Vec<u8> {
    transaction_id.to_bytes().to_vec()
}

/// Create an account-transaction index key.
///
/// Format: `account_id || 0x00 || transaction_id (16 bytes)`
///
/// ULIDs are time-ordered, so an account's transactions sort by time.
#[must_use]
pub fn account_transaction_key(account_id: &AccountId, transaction_id: &TransactionId) -> Vec<u8> {
    let mut key = Vec::with_capacity(account_id.as_bytes().len() + 1 + 16);
    key.extend_from_slice(account_id.as_bytes());
    key.push(SEP);
    key.extend_from_slice(&transaction_id.to_bytes());
    key
}

/// Create a prefix for iterating all transactions for an account.
#[must_use]
pub fn account_transactions_prefix(account_id: &AccountId) -> Vec<u8> {
    let mut prefix = account_id.as_bytes().to_vec();
    prefix.push(SEP);
    prefix
}

/// Extract the transaction id from an account-transaction index key.
///
/// # Panics
///
/// Panics if the key is shorter than 17 bytes.
#[must_use]
pub fn extract_transaction_id(key: &[u8]) -> TransactionId {
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&key[key.len() - 16..]);
    TransactionId::from_bytes(bytes)
}

/// Create a content key from a content id.
#[must_use]
pub fn content_key(content_id: &ContentId) -> Vec<u8> {
    content_id.to_bytes().to_vec()
}

/// Create an owner-content index key.
///
/// Format: `account_id || 0x00 || kind (1 byte) || content_id (16 bytes)`
///
/// Grouping by kind first lets "latest story by owner" and "latest post by
/// owner" each be a single prefix scan.
#[must_use]
pub fn owner_content_key(owner: &AccountId, kind: ContentKind, content_id: &ContentId) -> Vec<u8> {
    let mut key = owner_content_prefix(owner, kind);
    key.extend_from_slice(&content_id.to_bytes());
    key
}

/// Create a prefix for iterating an owner's content of one kind.
#[must_use]
pub fn owner_content_prefix(owner: &AccountId, kind: ContentKind) -> Vec<u8> {
    let mut prefix = Vec::with_capacity(owner.as_bytes().len() + 2);
    prefix.extend_from_slice(owner.as_bytes());
    prefix.push(SEP);
    prefix.push(kind.as_byte());
    prefix
}

/// Extract the content id from an owner-content index key.
///
/// # Panics
///
/// Panics if the key is shorter than 18 bytes.
#[must_use]
pub fn extract_content_id(key: &[u8]) -> ContentId {
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&key[key.len() - 16..]);
    ContentId::from_bytes(bytes)
}
