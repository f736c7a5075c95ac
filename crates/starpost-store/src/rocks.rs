//! `RocksDB` storage implementation.
//!
//! This module provides the `RocksStore` implementation of the `Store` trait.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, IteratorMode, MultiThreaded,
    Options, WriteBatch,
};

use starpost_core::{
    Account, AccountId, ContentId, ContentItem, ContentKind, Entitlement, StarTransaction,
    TransactionId,
};

use crate::error::{Result, StoreError};
use crate::keys;
use crate::schema::{all_column_families, cf};
use crate::Store;

/// RocksDB-backed storage implementation.
///
/// Holds a lock table keyed by record key: every read-check-write sequence
/// against an account (or a content item's star count) runs under that
/// key's exclusive lock, which is what makes `debit` a single atomic step.
pub struct RocksStore {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
    locks: Mutex<HashMap<Vec<u8>, Arc<Mutex<()>>>>,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path, cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(Self {
            db: Arc::new(db),
            locks: Mutex::new(HashMap::new()),
        })
    }

    /// Get a column family handle.
    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Database(format!("column family not found: {name}")))
    }

    /// Get (or create) the exclusive lock for a record key.
    fn key_lock(&self, key: &[u8]) -> Arc<Mutex<()>> {
        let mut table = self
            .locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        table.entry(key.to_vec()).or_default().clone()
    }

    /// Serialize a value using CBOR.
    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a value from CBOR.
    fn deserialize<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Load an account, or a fresh zero-balance record if none exists.
    /// Accounts are created implicitly on first reference.
    fn load_or_new(&self, account_id: &AccountId) -> Result<Account> {
        Ok(self
            .get_account(account_id)?
            .unwrap_or_else(|| Account::new(account_id.clone())))
    }

    /// Write an account mutation plus its transaction row in one batch.
    ///
    /// The transaction's `balance_after` is stamped with the account's
    /// post-mutation balance here, inside the atomic section.
    fn write_account_and_transaction(
        &self,
        account: &Account,
        tx: &StarTransaction,
        extra: Option<(&str, Vec<u8>, Vec<u8>)>,
    ) -> Result<()> {
        let cf_accounts = self.cf(cf::ACCOUNTS)?;
        let cf_tx = self.cf(cf::TRANSACTIONS)?;
        let cf_tx_by_account = self.cf(cf::TRANSACTIONS_BY_ACCOUNT)?;

        let mut tx = tx.clone();
        tx.balance_after = account.balance;

        let account_key = keys::account_key(&account.id);
        let tx_key = keys::transaction_key(&tx.id);
        let tx_index_key = keys::account_transaction_key(&tx.account_id, &tx.id);

        let account_value = Self::serialize(account)?;
        let tx_value = Self::serialize(&tx)?;

        let mut batch = WriteBatch::default();
        batch.put_cf(&cf_accounts, &account_key, &account_value);
        batch.put_cf(&cf_tx, &tx_key, &tx_value);
        batch.put_cf(&cf_tx_by_account, &tx_index_key, []);

        if let Some((cf_name, key, value)) = extra {
            let cf_extra = self.cf(cf_name)?;
            batch.put_cf(&cf_extra, &key, &value);
        }

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))
    }
}

impl Store for RocksStore {
    // =========================================================================
    // Account Operations
    // =========================================================================

    fn put_account(&self, account: &Account) -> Result<()> {
        let cf = self.cf(cf::ACCOUNTS)?;
        let key = keys::account_key(&account.id);
        let value = Self::serialize(account)?;

        self.db
            .put_cf(&cf, key, value)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn get_account(&self, account_id: &AccountId) -> Result<Option<Account>> {
        let cf = self.cf(cf::ACCOUNTS)?;
        let key = keys::account_key(account_id);

        self.db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn get_balance(&self, account_id: &AccountId) -> Result<i64> {
        Ok(self.get_account(account_id)?.map_or(0, |a| a.balance))
    }

    fn credit(&self, account_id: &AccountId, amount: i64, tx: &StarTransaction) -> Result<i64> {
        let lock = self.key_lock(&keys::account_key(account_id));
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut account = self.load_or_new(account_id)?;
        account.balance += amount;
        account.lifetime_earned += amount;
        account.updated_at = Utc::now();

        self.write_account_and_transaction(&account, tx, None)?;
        Ok(account.balance)
    }

    fn debit(&self, account_id: &AccountId, amount: i64, tx: &StarTransaction) -> Result<i64> {
        let lock = self.key_lock(&keys::account_key(account_id));
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut account = self.load_or_new(account_id)?;
        if !account.has_sufficient_stars(amount) {
            return Err(StoreError::InsufficientFunds {
                balance: account.balance,
                required: amount,
            });
        }

        account.balance -= amount;
        account.lifetime_spent += amount;
        account.updated_at = Utc::now();

        self.write_account_and_transaction(&account, tx, None)?;
        Ok(account.balance)
    }

    // =========================================================================
    // Entitlement Operations
    // =========================================================================

    fn set_entitlement(&self, account_id: &AccountId, entitlement: &Entitlement) -> Result<()> {
        let lock = self.key_lock(&keys::account_key(account_id));
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut account = self.load_or_new(account_id)?;
        account.entitlement = Some(entitlement.clone());
        account.updated_at = Utc::now();

        self.put_account(&account)
    }

    fn purchase_entitlement(
        &self,
        account_id: &AccountId,
        price: i64,
        entitlement: &Entitlement,
        tx: &StarTransaction,
    ) -> Result<i64> {
        let lock = self.key_lock(&keys::account_key(account_id));
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut account = self.load_or_new(account_id)?;
        if !account.has_sufficient_stars(price) {
            return Err(StoreError::InsufficientFunds {
                balance: account.balance,
                required: price,
            });
        }

        account.balance -= price;
        account.lifetime_spent += price;
        account.entitlement = Some(entitlement.clone());
        account.updated_at = Utc::now();

        self.write_account_and_transaction(&account, tx, None)?;
        Ok(account.balance)
    }

    // =========================================================================
    // Content Operations
    // =========================================================================

    fn put_content(&self, item: &ContentItem) -> Result<()> {
        let cf_content = self.cf(cf::CONTENT)?;
        let cf_by_owner = self.cf(cf::CONTENT_BY_OWNER)?;

        let content_key = keys::content_key(&item.id);
        let index_key = keys::owner_content_key(&item.owner, item.kind, &item.id);
        let value = Self::serialize(item)?;

        let mut batch = WriteBatch::default();
        batch.put_cf(&cf_content, &content_key, &value);
        batch.put_cf(&cf_by_owner, &index_key, []);

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    fn get_content(&self, content_id: &ContentId) -> Result<Option<ContentItem>> {
        let cf = self.cf(cf::CONTENT)?;
        let key = keys::content_key(content_id);

        self.db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn latest_content_by_owner(
        &self,
        owner: &AccountId,
        kind: ContentKind,
    ) -> Result<Option<ContentItem>> {
        let cf_by_owner = self.cf(cf::CONTENT_BY_OWNER)?;
        let prefix = keys::owner_content_prefix(owner, kind);

        let iter = self.db.iterator_cf(
            &cf_by_owner,
            IteratorMode::From(&prefix, rocksdb::Direction::Forward),
        );

        // ULID suffixes sort by creation time, so the last matching key is
        // the newest item.
        let mut newest: Option<ContentId> = None;
        for item in iter {
            let (key, _) = item.map_err(|e| StoreError::Database(e.to_string()))?;
            if !key.starts_with(&prefix) {
                break;
            }
            newest = Some(keys::extract_content_id(&key));
        }

        match newest {
            Some(id) => self.get_content(&id),
            None => Ok(None),
        }
    }

    fn add_content_stars(&self, content_id: &ContentId, amount: i64) -> Result<i64> {
        let lock = self.key_lock(&keys::content_key(content_id));
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut item = self
            .get_content(content_id)?
            .ok_or_else(|| StoreError::NotFound {
                entity: "content",
                id: content_id.to_string(),
            })?;

        item.star_count += amount;
        self.put_content(&item)?;
        Ok(item.star_count)
    }

    fn pin_content(
        &self,
        owner: &AccountId,
        content_id: &ContentId,
        price: i64,
        pinned_until: DateTime<Utc>,
        tx: &StarTransaction,
    ) -> Result<i64> {
        let account_lock = self.key_lock(&keys::account_key(owner));
        let _account_guard = account_lock.lock().unwrap_or_else(PoisonError::into_inner);
        // Lock order is always account then content, so a concurrent star
        // increment on the same item cannot deadlock or be lost.
        let content_lock = self.key_lock(&keys::content_key(content_id));
        let _content_guard = content_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut item = self
            .get_content(content_id)?
            .ok_or_else(|| StoreError::NotFound {
                entity: "content",
                id: content_id.to_string(),
            })?;
        if item.owner != *owner {
            return Err(StoreError::NotFound {
                entity: "content",
                id: content_id.to_string(),
            });
        }

        let mut account = self.load_or_new(owner)?;
        if !account.has_sufficient_stars(price) {
            return Err(StoreError::InsufficientFunds {
                balance: account.balance,
                required: price,
            });
        }

        account.balance -= price;
        account.lifetime_spent += price;
        account.updated_at = Utc::now();

        // A new purchase overwrites any previous pin expiry.
        item.pinned_until = Some(pinned_until);

        let content_value = Self::serialize(&item)?;
        self.write_account_and_transaction(
            &account,
            tx,
            Some((cf::CONTENT, keys::content_key(content_id), content_value)),
        )?;
        Ok(account.balance)
    }

    fn list_content(&self) -> Result<Vec<ContentItem>> {
        let cf = self.cf(cf::CONTENT)?;

        let mut items = Vec::new();
        for entry in self.db.iterator_cf(&cf, IteratorMode::End) {
            let (_, value) = entry.map_err(|e| StoreError::Database(e.to_string()))?;
            items.push(Self::deserialize(&value)?);
        }

        Ok(items)
    }

    // =========================================================================
    // Transaction Operations
    // =========================================================================

    fn get_transaction(&self, transaction_id: &TransactionId) -> Result<Option<StarTransaction>> {
        let cf = self.cf(cf::TRANSACTIONS)?;
        let key = keys::transaction_key(transaction_id);

        self.db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn list_transactions_by_account(
        &self,
        account_id: &AccountId,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<StarTransaction>> {
        let cf_by_account = self.cf(cf::TRANSACTIONS_BY_ACCOUNT)?;
        let prefix = keys::account_transactions_prefix(account_id);

        let iter = self.db.iterator_cf(
            &cf_by_account,
            IteratorMode::From(&prefix, rocksdb::Direction::Forward),
        );

        let mut all_keys: Vec<Vec<u8>> = Vec::new();
        for item in iter {
            let (key, _) = item.map_err(|e| StoreError::Database(e.to_string()))?;
            if !key.starts_with(&prefix) {
                break;
            }
            all_keys.push(key.to_vec());
        }

        // Reverse to get newest first.
        all_keys.reverse();

        let mut transactions = Vec::new();
        for key in all_keys.into_iter().skip(offset) {
            if transactions.len() >= limit {
                break;
            }
            let tx_id = keys::extract_transaction_id(&key);
            if let Some(tx) = self.get_transaction(&tx_id)? {
                transactions.push(tx);
            }
        }

        Ok(transactions)
    }
}
