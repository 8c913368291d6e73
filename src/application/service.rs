use crate::domain::UserId;
use crate::storage::{DebitOutcome, Repository};

use super::{BalanceReport, LedgerError};

/// Application service providing the ledger operations.
/// This is the primary interface for any command layer (CLI, bot adapter).
/// Authorization is the command layer's job; the service trusts its caller
/// but still rejects non-positive amounts.
pub struct LedgerService {
    repo: Repository,
}

impl LedgerService {
    /// Create a new ledger service with the given repository.
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Initialize a new database at the given path.
    pub async fn init(database_path: &str) -> Result<Self, LedgerError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let repo = Repository::init(&db_url).await?;
        Ok(Self::new(repo))
    }

    /// Connect to an existing database.
    pub async fn connect(database_path: &str) -> Result<Self, LedgerError> {
        let db_url = format!("sqlite:{}", database_path);
        let repo = Repository::connect(&db_url).await?;
        Ok(Self::new(repo))
    }

    // ========================
    // Ledger operations
    // ========================

    /// Current balance for a user. Users never credited read as 0.
    pub async fn get_balance(&self, user_id: UserId) -> Result<i64, LedgerError> {
        let account = self.repo.get_account(user_id).await?;
        Ok(account.map(|a| a.balance).unwrap_or(0))
    }

    /// Add silver to a user's balance, creating the account on first credit.
    /// Returns the balance after the credit was applied.
    pub async fn credit(&self, user_id: UserId, amount: i64) -> Result<i64, LedgerError> {
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount(amount));
        }

        Ok(self.repo.upsert_credit(user_id, amount).await?)
    }

    /// Remove silver from a user's balance. Declines with
    /// `InsufficientFunds` when the balance cannot cover the amount,
    /// leaving the account untouched. Returns the balance after the debit.
    pub async fn debit(&self, user_id: UserId, amount: i64) -> Result<i64, LedgerError> {
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount(amount));
        }

        let current = self.get_balance(user_id).await?;
        if current < amount {
            return Err(LedgerError::InsufficientFunds { current });
        }

        match self.repo.upsert_debit(user_id, amount).await? {
            DebitOutcome::Applied { balance } => Ok(balance),
            // The balance check above has seen the row and rows are never
            // deleted; a missing one still reads as an empty account.
            DebitOutcome::MissingAccount => Err(LedgerError::InsufficientFunds { current: 0 }),
        }
    }

    /// All accounts holding silver, largest balance first, with the total
    /// in circulation. An empty ledger is an empty report, not an error.
    pub async fn get_all_balances(&self) -> Result<BalanceReport, LedgerError> {
        let entries = self.repo.list_positive().await?;
        Ok(BalanceReport::new(entries))
    }
}
