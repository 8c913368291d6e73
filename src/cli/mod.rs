use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::application::{LedgerError, LedgerService};
use crate::domain::{UserId, parse_amount};

/// Environment variable naming the users allowed to credit and debit.
const ADMIN_IDS_VAR: &str = "ARGENTUM_ADMIN_IDS";

/// Argentum - Silver ledger for chat communities
#[derive(Parser)]
#[command(name = "argentum")]
#[command(about = "A persistent per-user silver ledger for chat communities")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, default_value = "argentum.db")]
    pub database: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new database
    Init,

    /// Show a user's balance
    Balance {
        /// Platform user id
        user: UserId,
    },

    /// Add silver to a user's balance (admins only)
    Credit {
        /// Platform user id of the recipient
        user: UserId,

        /// Amount of silver; spaces are allowed ("10 000")
        amount: String,

        /// Platform user id of the command issuer
        #[arg(long)]
        actor: UserId,
    },

    /// Remove silver from a user's balance (admins only)
    Debit {
        /// Platform user id of the holder
        user: UserId,

        /// Amount of silver; spaces are allowed ("10 000")
        amount: String,

        /// Platform user id of the command issuer
        #[arg(long)]
        actor: UserId,
    },

    /// List every user holding silver, with the circulating total
    Balances {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        // The admin roster may live in a local .env file.
        dotenvy::dotenv().ok();

        match self.command {
            Commands::Init => {
                LedgerService::init(&self.database).await?;
                println!("Database initialized: {}", self.database);
            }

            Commands::Balance { user } => {
                let service = LedgerService::connect(&self.database).await?;
                let balance = service.get_balance(user).await?;
                println!("User {} holds {} silver.", user, balance);
            }

            Commands::Credit {
                user,
                amount,
                actor,
            } => {
                let amount = authorize_mutation(&amount, actor)?;
                let service = LedgerService::connect(&self.database).await?;
                let new_balance = service.credit(user, amount).await?;
                println!(
                    "Credited {} silver to user {}. New balance: {}.",
                    amount, user, new_balance
                );
            }

            Commands::Debit {
                user,
                amount,
                actor,
            } => {
                let amount = authorize_mutation(&amount, actor)?;
                let service = LedgerService::connect(&self.database).await?;
                match service.debit(user, amount).await {
                    Ok(new_balance) => println!(
                        "Debited {} silver from user {}. New balance: {}.",
                        amount, user, new_balance
                    ),
                    // A declined debit is a normal outcome, not a failure.
                    Err(LedgerError::InsufficientFunds { current }) => println!(
                        "Insufficient funds: user {} holds only {} silver.",
                        user, current
                    ),
                    Err(err) => return Err(err.into()),
                }
            }

            Commands::Balances { json } => {
                let service = LedgerService::connect(&self.database).await?;
                run_balances_command(&service, json).await?;
            }
        }

        Ok(())
    }
}

/// Gate for the mutating commands: parse the amount string, check the actor
/// against the admin roster, require a positive value. The order matches the
/// original command handlers.
fn authorize_mutation(raw_amount: &str, actor: UserId) -> Result<i64> {
    let amount = parse_amount(raw_amount).with_context(|| {
        format!(
            "Invalid amount '{}'. Use whole numbers; spaces are allowed",
            raw_amount
        )
    })?;

    if !admin_roster()?.contains(&actor) {
        anyhow::bail!("User {} is not allowed to modify balances", actor);
    }

    if amount <= 0 {
        anyhow::bail!("Amount must be a positive number of silver");
    }

    Ok(amount)
}

/// Read the admin roster from the environment.
fn admin_roster() -> Result<Vec<UserId>> {
    let raw = std::env::var(ADMIN_IDS_VAR).with_context(|| {
        format!(
            "{} must be set to a comma-separated list of admin user ids",
            ADMIN_IDS_VAR
        )
    })?;
    parse_admin_ids(&raw)
}

/// Parse a comma-separated id list ("1234, 5678").
fn parse_admin_ids(raw: &str) -> Result<Vec<UserId>> {
    raw.split(',')
        .map(|part| {
            part.trim()
                .parse::<UserId>()
                .with_context(|| format!("Invalid admin user id '{}'", part.trim()))
        })
        .collect()
}

async fn run_balances_command(service: &LedgerService, json: bool) -> Result<()> {
    let report = service.get_all_balances().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.is_empty() {
        println!("No user holds any silver yet.");
        return Ok(());
    }

    println!("{:<4} {:<20} {:>12}", "#", "USER", "SILVER");
    println!("{}", "-".repeat(38));
    for (rank, account) in report.entries.iter().enumerate() {
        println!(
            "{:<4} {:<20} {:>12}",
            rank + 1,
            account.user_id,
            account.balance
        );
    }
    println!("{}", "-".repeat(38));
    println!("Total silver in circulation: {}", report.total);

    Ok(())
}
