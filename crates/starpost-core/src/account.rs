//! Account types for the star ledger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entitlement::Entitlement;
use crate::ids::AccountId;

/// A ledger account for one host-platform user.
///
/// Accounts are created implicitly on first reference and hold the single
/// authoritative star balance. The privileged flag is deliberately absent:
/// it is supplied out-of-band by service configuration and never stored or
/// mutated by ledger operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// The account id (opaque string from the host platform).
    pub id: AccountId,

    /// Current star balance. Never negative: every decrement is guarded by
    /// a sufficiency check under the account's write lock.
    pub balance: i64,

    /// Lifetime stars credited to this account.
    pub lifetime_earned: i64,

    /// Lifetime stars debited from this account (gross amounts).
    pub lifetime_spent: i64,

    /// Premium entitlement, if the account has any entitlement history.
    ///
    /// `None` means the account has never had a status read; the first read
    /// grants the one-time trial.
    pub entitlement: Option<Entitlement>,

    /// When the account was created.
    pub created_at: DateTime<Utc>,

    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account with zero balance.
    #[must_use]
    pub fn new(id: AccountId) -> Self {
        let now = Utc::now();
        Self {
            id,
            balance: 0,
            lifetime_earned: 0,
            lifetime_spent: 0,
            entitlement: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether the balance covers a debit.
    #[must_use]
    pub fn has_sufficient_stars(&self, amount: i64) -> bool {
        self.balance >= amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_account_has_zero_balance() {
        let account = Account::new(AccountId::generate());
        assert_eq!(account.balance, 0);
        assert_eq!(account.lifetime_earned, 0);
        assert_eq!(account.lifetime_spent, 0);
        assert!(account.entitlement.is_none());
    }

    #[test]
    fn sufficiency_check_is_inclusive() {
        let mut account = Account::new(AccountId::generate());
        account.balance = 1000;
        assert!(account.has_sufficient_stars(500));
        assert!(account.has_sufficient_stars(1000));
        assert!(!account.has_sufficient_stars(1001));
    }
}
