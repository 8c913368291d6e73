use serde::{Deserialize, Serialize};

use crate::domain::Account;

/// The nonzero-balance listing plus the silver in circulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceReport {
    pub entries: Vec<Account>,
    pub total: i64,
}

impl BalanceReport {
    /// Build a report from listed accounts, deriving the aggregate total.
    pub fn new(entries: Vec<Account>) -> Self {
        let total = entries.iter().map(|a| a.balance).sum();
        Self { entries, total }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
