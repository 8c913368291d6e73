use anyhow::{Context, Result};
use sqlx::{Row, SqlitePool};

use crate::domain::{Account, UserId};

use super::MIGRATION_001_INITIAL;

/// Outcome of a debit at the storage layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebitOutcome {
    /// The account row existed; `balance` is the value after subtraction.
    Applied { balance: i64 },
    /// No row for this user; nothing was written.
    MissingAccount,
}

/// Repository for persisting and querying accounts.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given path.
    /// Creates the database file if it doesn't exist.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;

        Ok(())
    }

    /// Initialize a new database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let repo = Self::connect(database_url).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    // ========================
    // Account operations
    // ========================

    /// Get an account by user id. A user never credited has no row.
    pub async fn get_account(&self, user_id: UserId) -> Result<Option<Account>> {
        let row = sqlx::query("SELECT user_id, balance FROM accounts WHERE user_id = ?")
            .bind(user_id as i64)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch account")?;

        Ok(row.map(|row| Self::row_to_account(&row)))
    }

    /// Add `amount` to a user's balance, creating the account if absent.
    /// The whole read-modify-write is one statement, so concurrent credits
    /// on the same account cannot lose updates. Returns the balance after
    /// the credit was applied.
    pub async fn upsert_credit(&self, user_id: UserId, amount: i64) -> Result<i64> {
        let row = sqlx::query(
            r#"
            INSERT INTO accounts (user_id, balance)
            VALUES (?, ?)
            ON CONFLICT(user_id) DO UPDATE SET balance = balance + excluded.balance
            RETURNING balance
            "#,
        )
        .bind(user_id as i64)
        .bind(amount)
        .fetch_one(&self.pool)
        .await
        .context("Failed to credit account")?;

        Ok(row.get("balance"))
    }

    /// Subtract `amount` from a user's balance. The subtraction is
    /// unconditional when the row exists; sufficiency is the caller's
    /// check. An absent row signals `MissingAccount` and writes nothing.
    pub async fn upsert_debit(&self, user_id: UserId, amount: i64) -> Result<DebitOutcome> {
        let row = sqlx::query(
            r#"
            UPDATE accounts
            SET balance = balance - ?
            WHERE user_id = ?
            RETURNING balance
            "#,
        )
        .bind(amount)
        .bind(user_id as i64)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to debit account")?;

        Ok(match row {
            Some(row) => DebitOutcome::Applied {
                balance: row.get("balance"),
            },
            None => DebitOutcome::MissingAccount,
        })
    }

    /// List all accounts with a positive balance, largest first.
    /// Ties break on user id so the ordering is stable.
    pub async fn list_positive(&self) -> Result<Vec<Account>> {
        let rows = sqlx::query(
            r#"
            SELECT user_id, balance
            FROM accounts
            WHERE balance > 0
            ORDER BY balance DESC, user_id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list accounts")?;

        Ok(rows.iter().map(Self::row_to_account).collect())
    }

    fn row_to_account(row: &sqlx::sqlite::SqliteRow) -> Account {
        // SQLite INTEGER is signed 64-bit; platform ids round-trip through
        // the bit-equal i64.
        Account {
            user_id: row.get::<i64, _>("user_id") as u64,
            balance: row.get("balance"),
        }
    }
}
