use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Invalid amount: {0} (amounts must be positive)")]
    InvalidAmount(i64),

    #[error("Insufficient funds: current balance is {current}")]
    InsufficientFunds { current: i64 },

    #[error("Storage failure: {0}")]
    Storage(#[from] anyhow::Error),
}
