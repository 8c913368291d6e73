use anyhow::Result;
use argentum::domain::Account;
use argentum::storage::{DebitOutcome, Repository};
use tempfile::TempDir;

/// Helper to open a repository on a fresh temporary database
async fn test_repo() -> Result<(Repository, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let db_url = format!("sqlite:{}?mode=rwc", db_path.to_str().unwrap());
    let repo = Repository::init(&db_url).await?;
    Ok((repo, temp_dir))
}

#[tokio::test]
async fn test_get_account_absent() -> Result<()> {
    let (repo, _temp) = test_repo().await?;

    assert_eq!(repo.get_account(7).await?, None);

    Ok(())
}

#[tokio::test]
async fn test_upsert_credit_creates_then_accumulates() -> Result<()> {
    let (repo, _temp) = test_repo().await?;

    assert_eq!(repo.upsert_credit(7, 30).await?, 30);
    assert_eq!(repo.upsert_credit(7, 12).await?, 42);
    assert_eq!(
        repo.get_account(7).await?,
        Some(Account {
            user_id: 7,
            balance: 42
        })
    );

    Ok(())
}

#[tokio::test]
async fn test_debit_on_missing_account_writes_nothing() -> Result<()> {
    let (repo, _temp) = test_repo().await?;

    assert_eq!(repo.upsert_debit(7, 10).await?, DebitOutcome::MissingAccount);
    assert_eq!(
        repo.get_account(7).await?,
        None,
        "The missing-account branch must not create a row"
    );

    Ok(())
}

#[tokio::test]
async fn test_debit_subtracts_unconditionally_when_present() -> Result<()> {
    let (repo, _temp) = test_repo().await?;

    repo.upsert_credit(7, 10).await?;
    assert_eq!(
        repo.upsert_debit(7, 4).await?,
        DebitOutcome::Applied { balance: 6 }
    );

    // Sufficiency is the service's check, not the store's
    assert_eq!(
        repo.upsert_debit(7, 10).await?,
        DebitOutcome::Applied { balance: -4 }
    );

    Ok(())
}

#[tokio::test]
async fn test_zero_balance_rows_persist_but_leave_listing() -> Result<()> {
    let (repo, _temp) = test_repo().await?;

    repo.upsert_credit(7, 10).await?;
    repo.upsert_debit(7, 10).await?;

    assert_eq!(
        repo.get_account(7).await?,
        Some(Account {
            user_id: 7,
            balance: 0
        })
    );
    assert!(repo.list_positive().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_list_positive_orders_by_balance_descending() -> Result<()> {
    let (repo, _temp) = test_repo().await?;

    repo.upsert_credit(1, 5).await?;
    repo.upsert_credit(2, 500).await?;
    repo.upsert_credit(3, 50).await?;

    let accounts = repo.list_positive().await?;
    let balances: Vec<i64> = accounts.iter().map(|a| a.balance).collect();
    assert_eq!(balances, vec![500, 50, 5]);

    Ok(())
}

#[tokio::test]
async fn test_list_positive_breaks_ties_stably() -> Result<()> {
    let (repo, _temp) = test_repo().await?;

    repo.upsert_credit(30, 100).await?;
    repo.upsert_credit(10, 100).await?;
    repo.upsert_credit(20, 100).await?;

    let first = repo.list_positive().await?;
    let second = repo.list_positive().await?;
    assert_eq!(first, second);

    let users: Vec<u64> = first.iter().map(|a| a.user_id).collect();
    assert_eq!(users, vec![10, 20, 30]);

    Ok(())
}

#[tokio::test]
async fn test_balances_survive_reopen() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let db_url = format!("sqlite:{}?mode=rwc", db_path.to_str().unwrap());

    {
        let repo = Repository::init(&db_url).await?;
        repo.upsert_credit(7, 123).await?;
    }

    let repo = Repository::connect(&db_url).await?;
    assert_eq!(
        repo.get_account(7).await?,
        Some(Account {
            user_id: 7,
            balance: 123
        })
    );

    Ok(())
}

#[tokio::test]
async fn test_ids_in_the_upper_u64_range_round_trip() -> Result<()> {
    let (repo, _temp) = test_repo().await?;

    // Above i64::MAX, so the bit-cast to SQLite INTEGER goes negative
    let id = u64::MAX - 1;
    repo.upsert_credit(id, 9).await?;

    assert_eq!(
        repo.get_account(id).await?,
        Some(Account {
            user_id: id,
            balance: 9
        })
    );

    Ok(())
}
