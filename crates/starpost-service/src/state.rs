//! Application state.

use std::collections::HashSet;
use std::sync::Arc;

use starpost_core::AccountId;
use starpost_store::RocksStore;

use crate::config::ServiceConfig;
use crate::ledger::Ledger;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The ledger service over the storage backend.
    pub ledger: Ledger,

    /// Service configuration.
    pub config: ServiceConfig,

    /// Privileged account ids, from configuration.
    privileged: HashSet<String>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(store: Arc<RocksStore>, config: ServiceConfig) -> Self {
        let privileged: HashSet<String> = config.privileged_accounts.iter().cloned().collect();

        if privileged.is_empty() {
            tracing::info!("No privileged accounts configured");
        } else {
            tracing::info!(
                count = %privileged.len(),
                "Privileged accounts configured"
            );
        }

        Self {
            ledger: Ledger::new(store),
            config,
            privileged,
        }
    }

    /// Whether an account is exempt from withdrawal minimums and commission.
    #[must_use]
    pub fn is_privileged(&self, account_id: &AccountId) -> bool {
        self.privileged.contains(account_id.as_str())
    }
}
