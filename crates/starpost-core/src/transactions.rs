//! Star transaction records.
//!
//! Every balance change writes one transaction row. Amounts are signed:
//! positive for credits, negative for debits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entitlement::Tier;
use crate::ids::{AccountId, ContentId, TransactionId};

/// A ledger entry recording one balance change.
///
/// Transactions use ULIDs for time-ordered ids, so per-account history reads
/// back in chronological order without a separate sort key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StarTransaction {
    /// Unique transaction id.
    pub id: TransactionId,

    /// The account whose balance changed.
    pub account_id: AccountId,

    /// Signed amount in stars. Positive = credit, negative = debit.
    pub amount: i64,

    /// What kind of operation produced this entry.
    pub kind: TransactionKind,

    /// Balance after this transaction. Constructors leave this at 0; the
    /// store stamps the post-mutation balance when the write commits, since
    /// only the store knows it inside the account's atomic section.
    pub balance_after: i64,

    /// Human-readable description.
    pub description: String,

    /// Operation-specific details (commission, target content, tier, ...).
    pub metadata: serde_json::Value,

    /// When the transaction was created.
    pub created_at: DateTime<Utc>,
}

impl StarTransaction {
    /// A star top-up reported by the host payment flow.
    #[must_use]
    pub fn add(account_id: AccountId, amount: i64) -> Self {
        Self {
            id: TransactionId::generate(),
            account_id,
            amount,
            kind: TransactionKind::Add,
            balance_after: 0,
            description: format!("Added {amount} stars"),
            metadata: serde_json::Value::Null,
            created_at: Utc::now(),
        }
    }

    /// A withdrawal. The gross amount leaves the balance; commission and net
    /// payout are recorded for the external payout system.
    #[must_use]
    pub fn withdraw(account_id: AccountId, amount: i64, commission: i64, net_payout: i64) -> Self {
        Self {
            id: TransactionId::generate(),
            account_id,
            amount: -amount,
            kind: TransactionKind::Withdraw,
            balance_after: 0,
            description: format!("Withdrew {amount} stars"),
            metadata: serde_json::json!({
                "commission": commission,
                "net_payout": net_payout,
            }),
            created_at: Utc::now(),
        }
    }

    /// A gift debit from the sender. The content-side star count is tracked
    /// on the content item, not as a balance credit.
    #[must_use]
    pub fn gift(account_id: AccountId, amount: i64, target: ContentId) -> Self {
        Self {
            id: TransactionId::generate(),
            account_id,
            amount: -amount,
            kind: TransactionKind::Gift,
            balance_after: 0,
            description: format!("Gifted {amount} stars"),
            metadata: serde_json::json!({ "content_id": target.to_string() }),
            created_at: Utc::now(),
        }
    }

    /// A premium entitlement purchase debit.
    #[must_use]
    pub fn entitlement_purchase(account_id: AccountId, price: i64, tier: Tier) -> Self {
        Self {
            id: TransactionId::generate(),
            account_id,
            amount: -price,
            kind: TransactionKind::EntitlementPurchase,
            balance_after: 0,
            description: format!("Purchased {tier} premium"),
            metadata: serde_json::json!({ "tier": tier.to_string() }),
            created_at: Utc::now(),
        }
    }

    /// A content promotion (pin) debit.
    #[must_use]
    pub fn promotion(account_id: AccountId, price: i64, target: ContentId, hours: i64) -> Self {
        Self {
            id: TransactionId::generate(),
            account_id,
            amount: -price,
            kind: TransactionKind::Promotion,
            balance_after: 0,
            description: format!("Pinned content for {hours}h"),
            metadata: serde_json::json!({
                "content_id": target.to_string(),
                "hours": hours,
            }),
            created_at: Utc::now(),
        }
    }
}

/// Type of star transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Stars added via the host payment flow.
    Add,

    /// Stars withdrawn to an external payout.
    Withdraw,

    /// Stars gifted to a content item.
    Gift,

    /// Premium entitlement purchase.
    EntitlementPurchase,

    /// Content promotion (pin) purchase.
    Promotion,
}

impl TransactionKind {
    /// Whether this kind increases the balance.
    #[must_use]
    pub const fn is_credit(self) -> bool {
        matches!(self, Self::Add)
    }

    /// Whether this kind decreases the balance.
    #[must_use]
    pub const fn is_debit(self) -> bool {
        !self.is_credit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_is_positive() {
        let tx = StarTransaction::add(AccountId::generate(), 500);
        assert_eq!(tx.amount, 500);
        assert_eq!(tx.kind, TransactionKind::Add);
    }

    #[test]
    fn debits_are_negative() {
        let account = AccountId::generate();
        let withdraw = StarTransaction::withdraw(account.clone(), 1000, 100, 900);
        assert_eq!(withdraw.amount, -1000);
        assert_eq!(withdraw.metadata["commission"], 100);
        assert_eq!(withdraw.metadata["net_payout"], 900);

        let gift = StarTransaction::gift(account, 50, ContentId::generate());
        assert_eq!(gift.amount, -50);
        assert_eq!(gift.kind, TransactionKind::Gift);
    }

    #[test]
    fn purchase_records_tier() {
        let tx = StarTransaction::entitlement_purchase(AccountId::generate(), 180, Tier::Blogger);
        assert_eq!(tx.amount, -180);
        assert_eq!(tx.metadata["tier"], "blogger");
    }

    #[test]
    fn kind_credit_debit_split() {
        assert!(TransactionKind::Add.is_credit());
        assert!(TransactionKind::Withdraw.is_debit());
        assert!(TransactionKind::Gift.is_debit());
        assert!(TransactionKind::EntitlementPurchase.is_debit());
        assert!(TransactionKind::Promotion.is_debit());
    }
}
