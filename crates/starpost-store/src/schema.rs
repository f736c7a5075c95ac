//! Database schema definitions and column families.
//!
//! This module defines the column families used in `RocksDB` storage.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// Primary account records, keyed by account id bytes.
    pub const ACCOUNTS: &str = "accounts";

    /// Star transactions, keyed by `transaction_id` (ULID).
    pub const TRANSACTIONS: &str = "transactions";

    /// Index: transactions by account, keyed by
    /// `account_id || 0x00 || transaction_id`. Value is empty (index only).
    pub const TRANSACTIONS_BY_ACCOUNT: &str = "transactions_by_account";

    /// Content items, keyed by `content_id` (ULID).
    pub const CONTENT: &str = "content";

    /// Index: content by owner and kind, keyed by
    /// `account_id || 0x00 || kind || content_id`. Value is empty.
    pub const CONTENT_BY_OWNER: &str = "content_by_owner";
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![
        cf::ACCOUNTS,
        cf::TRANSACTIONS,
        cf::TRANSACTIONS_BY_ACCOUNT,
        cf::CONTENT,
        cf::CONTENT_BY_OWNER,
    ]
}
