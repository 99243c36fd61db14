mod common;

use anyhow::Result;
use common::{dec, service_at, test_service};
use passbook::application::LedgerError;
use passbook::domain::OperationKind;
use tempfile::TempDir;
use uuid::Uuid;

#[tokio::test]
async fn test_deposit_and_withdraw_update_the_balance() -> Result<()> {
    let (service, _printer, _temp) = test_service().await?;

    let opened = service.open_account(dec("100")).await?;
    let account_id = opened.account_id;
    assert_eq!(opened.new_balance, dec("100.00"));

    let deposit = service.deposit(account_id, dec("10")).await?;
    assert_eq!(deposit.kind, OperationKind::Deposit);
    assert_eq!(deposit.new_balance, dec("110.00"));

    let withdrawal = service.withdraw(account_id, dec("10")).await?;
    assert_eq!(withdrawal.kind, OperationKind::Withdrawal);
    assert_eq!(withdrawal.new_balance, dec("100.00"));

    let statement = service.statement(account_id).await?;
    assert_eq!(statement.balance, dec("100.00"));
    assert_eq!(statement.operations.len(), 3);

    // Newest first
    assert_eq!(statement.operations[0].kind, OperationKind::Withdrawal);
    assert_eq!(statement.operations[1].new_balance, dec("110.00"));
    assert_eq!(statement.operations[2].new_balance, dec("100.00"));

    Ok(())
}

#[tokio::test]
async fn test_withdrawal_over_balance_appends_nothing() -> Result<()> {
    let (service, _printer, _temp) = test_service().await?;

    let opened = service.open_account(dec("5")).await?;
    let account_id = opened.account_id;

    let result = service.withdraw(account_id, dec("10")).await;
    assert!(matches!(
        result,
        Err(LedgerError::InsufficientFunds { .. })
    ));

    let operations = service.operations(account_id).await?;
    assert_eq!(operations.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_non_positive_amounts_are_rejected() -> Result<()> {
    let (service, _printer, _temp) = test_service().await?;

    let opened = service.open_account(dec("100")).await?;
    let account_id = opened.account_id;

    let deposit = service.deposit(account_id, dec("-10")).await;
    assert!(matches!(deposit, Err(LedgerError::InvalidAmount(_))));

    let withdraw = service.withdraw(account_id, dec("0")).await;
    assert!(matches!(withdraw, Err(LedgerError::InvalidAmount(_))));

    assert_eq!(service.operations(account_id).await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_mutations_require_an_existing_account() -> Result<()> {
    let (service, _printer, _temp) = test_service().await?;
    let unknown = Uuid::new_v4();

    let deposit = service.deposit(unknown, dec("10")).await;
    assert!(matches!(deposit, Err(LedgerError::AccountNotFound(_))));

    let withdraw = service.withdraw(unknown, dec("10")).await;
    assert!(matches!(withdraw, Err(LedgerError::AccountNotFound(_))));

    Ok(())
}

#[tokio::test]
async fn test_statement_of_unknown_account_is_empty_not_an_error() -> Result<()> {
    let (service, _printer, _temp) = test_service().await?;

    let statement = service.statement(Uuid::new_v4()).await?;

    assert_eq!(statement.balance, dec("0.00"));
    assert!(statement.operations.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_midpoint_amounts_round_down() -> Result<()> {
    let (service, _printer, _temp) = test_service().await?;

    let opened = service.open_account(dec("100")).await?;
    let deposit = service.deposit(opened.account_id, dec("10.005")).await?;

    assert_eq!(deposit.amount, dec("10.00"));
    assert_eq!(deposit.new_balance, dec("110.00"));

    Ok(())
}

#[tokio::test]
async fn test_funds_check_runs_on_the_unscaled_amount() -> Result<()> {
    let (service, _printer, _temp) = test_service().await?;

    let opened = service.open_account(dec("10")).await?;

    // 10.004 rounds down to the exact balance, but the check compares the
    // original magnitude and rejects it.
    let result = service.withdraw(opened.account_id, dec("10.004")).await;
    assert!(matches!(
        result,
        Err(LedgerError::InsufficientFunds { .. })
    ));

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_deposits_serialize_per_account() -> Result<()> {
    let (service, _printer, _temp) = test_service().await?;

    let opened = service.open_account(dec("100")).await?;
    let account_id = opened.account_id;

    let service = std::sync::Arc::new(service);
    let barrier = std::sync::Arc::new(tokio::sync::Barrier::new(8));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let service = service.clone();
        let barrier = barrier.clone();
        handles.push(tokio::spawn(async move {
            barrier.wait().await;
            service.deposit(account_id, dec("10")).await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let statement = service.statement(account_id).await?;
    assert_eq!(statement.balance, dec("180.00"));
    assert_eq!(statement.operations.len(), 9);

    Ok(())
}

#[tokio::test]
async fn test_history_survives_a_reconnect() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let db_path = db_path.to_str().unwrap();

    let (service, _printer) = service_at(db_path).await?;
    let opened = service.open_account(dec("100")).await?;
    service.deposit(opened.account_id, dec("10")).await?;
    let before = service.statement(opened.account_id).await?;
    drop(service);

    let (reopened, _printer) = service_at(db_path).await?;
    let after = reopened.statement(opened.account_id).await?;

    assert_eq!(before, after);

    Ok(())
}
