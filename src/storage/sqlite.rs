use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use sqlx::{Row, SqlitePool};
use tokio::sync::OwnedMutexGuard;
use uuid::Uuid;

use crate::domain::{AccountId, Operation, OperationKind};

use super::{AccountLocks, MIGRATION_001_OPERATIONS, MIGRATION_002_INDEXES, OperationStore};

/// SQLite-backed operation store.
///
/// Amounts persist as their exact decimal text, never as floats. The
/// autoincrement `seq` column breaks timestamp ties so descending order is
/// total. Read-then-append is serialized through the per-account locks;
/// these are process-local, so the database file must be owned by a single
/// host process at a time.
pub struct SqliteStore {
    pool: SqlitePool,
    locks: AccountLocks,
}

impl SqliteStore {
    /// Create a new store with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            locks: AccountLocks::new(),
        }
    }

    /// Connect to a SQLite database at the given URL.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_OPERATIONS)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;

        sqlx::query(MIGRATION_002_INDEXES)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 002")?;

        Ok(())
    }

    /// Initialize a new database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let store = Self::connect(database_url).await?;
        store.migrate().await?;
        Ok(store)
    }

    fn row_to_operation(row: &sqlx::sqlite::SqliteRow) -> Result<Operation> {
        let id_str: String = row.get("id");
        let account_id_str: String = row.get("account_id");
        let kind_str: String = row.get("kind");
        let amount_str: String = row.get("amount");
        let new_balance_str: String = row.get("new_balance");
        let recorded_at_str: String = row.get("recorded_at");

        Ok(Operation {
            id: Uuid::parse_str(&id_str).context("Invalid operation ID")?,
            account_id: Uuid::parse_str(&account_id_str).context("Invalid account ID")?,
            kind: OperationKind::from_str(&kind_str)
                .ok_or_else(|| anyhow::anyhow!("Invalid operation kind: {}", kind_str))?,
            amount: amount_str
                .parse::<Decimal>()
                .context("Invalid amount value")?,
            new_balance: new_balance_str
                .parse::<Decimal>()
                .context("Invalid new_balance value")?,
            recorded_at: DateTime::parse_from_rfc3339(&recorded_at_str)
                .context("Invalid recorded_at timestamp")?
                .with_timezone(&Utc),
        })
    }
}

#[async_trait]
impl OperationStore for SqliteStore {
    async fn lock_account(&self, account_id: AccountId) -> OwnedMutexGuard<()> {
        self.locks.acquire(account_id).await
    }

    async fn last_operation(&self, account_id: AccountId) -> Result<Option<Operation>> {
        let row = sqlx::query(
            r#"
            SELECT id, account_id, kind, amount, new_balance, recorded_at
            FROM operations
            WHERE account_id = ?
            ORDER BY recorded_at DESC, seq DESC
            LIMIT 1
            "#,
        )
        .bind(account_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch last operation")?;

        match row {
            Some(row) => Ok(Some(Self::row_to_operation(&row)?)),
            None => Ok(None),
        }
    }

    async fn append(&self, operation: Operation) -> Result<Operation> {
        sqlx::query(
            r#"
            INSERT INTO operations (id, account_id, kind, amount, new_balance, recorded_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(operation.id.to_string())
        .bind(operation.account_id.to_string())
        .bind(operation.kind.as_str())
        .bind(operation.amount.to_string())
        .bind(operation.new_balance.to_string())
        // Fixed-width timestamps keep the lexicographic ORDER BY correct.
        .bind(
            operation
                .recorded_at
                .to_rfc3339_opts(SecondsFormat::Micros, true),
        )
        .execute(&self.pool)
        .await
        .context("Failed to append operation")?;

        Ok(operation)
    }

    async fn list_descending(&self, account_id: AccountId) -> Result<Vec<Operation>> {
        let rows = sqlx::query(
            r#"
            SELECT id, account_id, kind, amount, new_balance, recorded_at
            FROM operations
            WHERE account_id = ?
            ORDER BY recorded_at DESC, seq DESC
            "#,
        )
        .bind(account_id.to_string())
        .fetch_all(&self.pool)
        .await
        .context("Failed to list operations")?;

        rows.iter().map(Self::row_to_operation).collect()
    }
}
