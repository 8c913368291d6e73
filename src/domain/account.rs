use serde::{Deserialize, Serialize};

/// Chat-platform user identifier. Snowflake ids occupy the full u64 range.
pub type UserId = u64;

/// One ledger row: a user and the silver they hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub user_id: UserId,
    pub balance: i64,
}
