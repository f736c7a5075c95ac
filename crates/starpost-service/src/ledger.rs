//! Ledger orchestration.
//!
//! This module holds the business rules between the HTTP handlers and the
//! store: amount validation, the withdrawal minimum and commission schedule,
//! the gift saga, lazy entitlement transitions, and pin targeting. Handlers
//! stay thin; every rule here is exercised directly by the integration
//! tests through the API.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use starpost_core::{
    clamp_pin_hours, commission, net_payout, pin_price, Account, AccountId, ContentId,
    ContentItem, ContentKind, Entitlement, LedgerError, StarTransaction, Tier,
    MIN_WITHDRAWAL_STARS,
};
use starpost_store::Store;

use crate::error::ApiError;

/// Outcome of a successful withdrawal.
#[derive(Debug, Clone, Copy)]
pub struct WithdrawOutcome {
    /// Balance after the gross amount left the account.
    pub new_balance: i64,

    /// Amount the external payout system owes the user.
    pub net_payout: i64,

    /// Commission withheld from the payout.
    pub commission: i64,
}

/// Outcome of a successful pin purchase.
#[derive(Debug, Clone)]
pub struct PinOutcome {
    /// The content item that was pinned.
    pub content_id: ContentId,

    /// Effective pin duration after clamping.
    pub hours: i64,

    /// Price charged in stars.
    pub price: i64,

    /// When the pin lapses.
    pub pinned_until: DateTime<Utc>,

    /// Balance after the debit.
    pub new_balance: i64,
}

/// The ledger service: all star mutations go through here.
#[derive(Clone)]
pub struct Ledger {
    store: Arc<dyn Store>,
}

impl Ledger {
    /// Create a ledger over a storage backend.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Validate a caller-supplied amount: present and strictly positive.
    fn validate_amount(amount: Option<i64>) -> Result<i64, LedgerError> {
        match amount {
            None => Err(LedgerError::InvalidAmount("amount is required".into())),
            Some(n) if n <= 0 => Err(LedgerError::InvalidAmount(format!(
                "amount must be positive, got {n}"
            ))),
            Some(n) => Ok(n),
        }
    }

    /// Current balance. Missing accounts read as 0.
    pub fn balance(&self, account_id: &AccountId) -> Result<i64, ApiError> {
        Ok(self.store.get_balance(account_id)?)
    }

    /// The account record, or a fresh zero-balance view if the account has
    /// never been written. Reading never creates the record.
    pub fn account_summary(&self, account_id: &AccountId) -> Result<Account, ApiError> {
        Ok(self
            .store
            .get_account(account_id)?
            .unwrap_or_else(|| Account::new(account_id.clone())))
    }

    /// Credit stars reported by the host payment flow.
    pub fn add_stars(&self, account_id: &AccountId, amount: Option<i64>) -> Result<i64, ApiError> {
        let amount = Self::validate_amount(amount)?;

        let tx = StarTransaction::add(account_id.clone(), amount);
        let new_balance = self.store.credit(account_id, amount, &tx)?;

        tracing::info!(
            account_id = %account_id,
            amount = %amount,
            new_balance = %new_balance,
            "Stars added"
        );
        Ok(new_balance)
    }

    /// Withdraw stars to an external payout.
    ///
    /// The gross amount leaves the balance; the commission is withheld from
    /// the reported payout, never re-credited internally. Privileged
    /// accounts skip the minimum and pay no commission.
    pub fn withdraw(
        &self,
        account_id: &AccountId,
        amount: Option<i64>,
        privileged: bool,
    ) -> Result<WithdrawOutcome, ApiError> {
        let amount = Self::validate_amount(amount)?;

        if !privileged && amount < MIN_WITHDRAWAL_STARS {
            return Err(LedgerError::BelowMinimum {
                minimum: MIN_WITHDRAWAL_STARS,
                requested: amount,
            }
            .into());
        }

        let commission = commission(amount, privileged);
        let net_payout = net_payout(amount, privileged);

        let tx = StarTransaction::withdraw(account_id.clone(), amount, commission, net_payout);
        let new_balance = self.store.debit(account_id, amount, &tx)?;

        tracing::info!(
            account_id = %account_id,
            amount = %amount,
            commission = %commission,
            net_payout = %net_payout,
            new_balance = %new_balance,
            "Stars withdrawn"
        );
        Ok(WithdrawOutcome {
            new_balance,
            net_payout,
            commission,
        })
    }

    /// Gift stars to a content item.
    ///
    /// Target existence is validated before any mutation. The sender's debit
    /// is the durable fact; the content-side star-count increment runs after
    /// the debit commits and is best-effort — a failure there is logged, not
    /// rolled back, and left to external reconciliation.
    pub fn gift(
        &self,
        from: &AccountId,
        content_id: &ContentId,
        amount: Option<i64>,
    ) -> Result<i64, ApiError> {
        let amount = Self::validate_amount(amount)?;

        if self.store.get_content(content_id)?.is_none() {
            return Err(LedgerError::TargetNotFound {
                content_id: content_id.to_string(),
            }
            .into());
        }

        let tx = StarTransaction::gift(from.clone(), amount, *content_id);
        let new_balance = self.store.debit(from, amount, &tx)?;

        if let Err(e) = self.store.add_content_stars(content_id, amount) {
            tracing::warn!(
                content_id = %content_id,
                amount = %amount,
                error = %e,
                "Content star increment failed after debit; left to reconciliation"
            );
        }

        tracing::info!(
            from = %from,
            content_id = %content_id,
            amount = %amount,
            new_balance = %new_balance,
            "Stars gifted"
        );
        Ok(new_balance)
    }

    /// Current premium status, applying lazy transitions.
    ///
    /// The first-ever read grants the one-time 7-day trial; a read past the
    /// expiry persists the lapse. Both transitions are idempotent: repeated
    /// reads return the identical record without rewriting it.
    pub fn entitlement_status(&self, account_id: &AccountId) -> Result<Entitlement, ApiError> {
        let now = Utc::now();
        let account = self.store.get_account(account_id)?;

        match account.and_then(|a| a.entitlement) {
            None => {
                let trial = Entitlement::trial(now);
                self.store.set_entitlement(account_id, &trial)?;
                tracing::info!(account_id = %account_id, "Trial entitlement granted");
                Ok(trial)
            }
            Some(current) if current.is_current(now) => Ok(current),
            Some(expired) => {
                let lapsed = expired.lapsed();
                if expired != lapsed {
                    self.store.set_entitlement(account_id, &lapsed)?;
                    tracing::info!(account_id = %account_id, "Entitlement lapsed");
                }
                Ok(lapsed)
            }
        }
    }

    /// Purchase a premium entitlement.
    ///
    /// The supplied amount must match the tier's canonical price; this is a
    /// dedicated debit path with no minimum and no commission. A purchase
    /// fully replaces any prior entitlement.
    pub fn purchase_entitlement(
        &self,
        account_id: &AccountId,
        tier: Tier,
        amount: Option<i64>,
    ) -> Result<(Entitlement, i64), ApiError> {
        let supplied = Self::validate_amount(amount)?;
        let price = tier.price_stars();
        if supplied != price {
            return Err(LedgerError::PriceMismatch {
                tier,
                expected: price,
                supplied,
            }
            .into());
        }

        let entitlement = Entitlement::purchased(tier, Utc::now());
        let tx = StarTransaction::entitlement_purchase(account_id.clone(), price, tier);
        let new_balance = self
            .store
            .purchase_entitlement(account_id, price, &entitlement, &tx)?;

        tracing::info!(
            account_id = %account_id,
            tier = %tier,
            price = %price,
            new_balance = %new_balance,
            "Premium purchased"
        );
        Ok((entitlement, new_balance))
    }

    /// Pin the caller's most recent content item of a kind.
    ///
    /// Hours are clamped to the allowed range before pricing, so an
    /// out-of-range request is repriced rather than rejected. Targeting the
    /// most recent item is the deterministic selection rule for this ledger;
    /// ULID content ids make it a single index lookup.
    pub fn pin(
        &self,
        owner: &AccountId,
        kind: ContentKind,
        hours: Option<i64>,
    ) -> Result<PinOutcome, ApiError> {
        let hours = clamp_pin_hours(
            hours.ok_or_else(|| LedgerError::InvalidAmount("hours is required".into()))?,
        );
        let price = pin_price(kind, hours);

        let item = self
            .store
            .latest_content_by_owner(owner, kind)?
            .ok_or_else(|| LedgerError::NoContentFound {
                account_id: owner.to_string(),
                kind: kind.to_string(),
            })?;

        let now = Utc::now();
        let pinned_until = ContentItem::pin_expiry(now, hours);
        let tx = StarTransaction::promotion(owner.clone(), price, item.id, hours);
        let new_balance = self
            .store
            .pin_content(owner, &item.id, price, pinned_until, &tx)?;

        tracing::info!(
            owner = %owner,
            content_id = %item.id,
            kind = %kind,
            hours = %hours,
            price = %price,
            new_balance = %new_balance,
            "Content pinned"
        );
        Ok(PinOutcome {
            content_id: item.id,
            hours,
            price,
            pinned_until,
            new_balance,
        })
    }

    /// Register a content item for an account.
    pub fn create_content(
        &self,
        owner: &AccountId,
        kind: ContentKind,
        caption: String,
    ) -> Result<ContentItem, ApiError> {
        let item = ContentItem::new(owner.clone(), kind, caption);
        self.store.put_content(&item)?;

        tracing::info!(owner = %owner, content_id = %item.id, kind = %kind, "Content created");
        Ok(item)
    }

    /// The feed: pinned-and-active items first, then newest first.
    pub fn feed(&self, limit: usize) -> Result<Vec<ContentItem>, ApiError> {
        let now = Utc::now();
        let mut items = self.store.list_content()?;
        starpost_core::feed_order(&mut items, now);
        items.truncate(limit);
        Ok(items)
    }

    /// Per-account transaction history, newest first.
    pub fn transactions(
        &self,
        account_id: &AccountId,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<StarTransaction>, ApiError> {
        Ok(self
            .store
            .list_transactions_by_account(account_id, limit, offset)?)
    }
}
