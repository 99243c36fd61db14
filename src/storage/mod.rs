mod locks;
mod memory;
mod sqlite;

pub use locks::*;
pub use memory::*;
pub use sqlite::*;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::OwnedMutexGuard;

use crate::domain::{AccountId, Operation};

/// SQL migration for the operations table
pub const MIGRATION_001_OPERATIONS: &str = include_str!("migrations/001_operations.sql");

/// SQL migration for lookup indexes
pub const MIGRATION_002_INDEXES: &str = include_str!("migrations/002_indexes.sql");

/// Durable, ordered collection of operations keyed by account.
///
/// The store exclusively owns the operation history; the ledger service
/// holds no persistent state of its own. Serializing read-last-then-append
/// per account is the store's job: writers take the account lock before
/// reading the last operation and hold it until their append lands,
/// otherwise two concurrent writes can read the same last balance and fork
/// the `new_balance` chain.
#[async_trait]
pub trait OperationStore: Send + Sync {
    /// Take the write lock for an account. Writers hold the returned guard
    /// across the read-last-then-append pair.
    async fn lock_account(&self, account_id: AccountId) -> OwnedMutexGuard<()>;

    /// Fetch the most recent operation for an account, if any.
    /// An account exists iff it has at least one operation.
    async fn last_operation(&self, account_id: AccountId) -> Result<Option<Operation>>;

    /// Append a new operation. The returned value is authoritative.
    async fn append(&self, operation: Operation) -> Result<Operation>;

    /// List all operations for an account, ordered descending by time.
    async fn list_descending(&self, account_id: AccountId) -> Result<Vec<Operation>>;
}
