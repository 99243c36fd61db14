use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::OwnedMutexGuard;

use crate::domain::{AccountId, Operation};

use super::{AccountLocks, OperationStore};

/// In-memory operation store.
///
/// Individual calls are guarded by a plain mutex; the read-then-append pair
/// is serialized through the per-account locks, which writers hold for the
/// whole pair. Clones share the same underlying history, which lets tests
/// keep a handle for inspection after handing the store to a service.
#[derive(Clone, Default)]
pub struct MemoryStore {
    operations: Arc<Mutex<Vec<Operation>>>,
    locks: Arc<AccountLocks>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored operations, across all accounts.
    pub fn operation_count(&self) -> usize {
        self.operations.lock().unwrap().len()
    }

    fn for_account_descending(&self, account_id: AccountId) -> Vec<Operation> {
        let mut operations: Vec<Operation> = self
            .operations
            .lock()
            .unwrap()
            .iter()
            .filter(|operation| operation.account_id == account_id)
            .cloned()
            .collect();

        // Reverse insertion order first so the stable sort breaks
        // timestamp ties in favor of the most recently appended entry.
        operations.reverse();
        operations.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        operations
    }
}

#[async_trait]
impl OperationStore for MemoryStore {
    async fn lock_account(&self, account_id: AccountId) -> OwnedMutexGuard<()> {
        self.locks.acquire(account_id).await
    }

    async fn last_operation(&self, account_id: AccountId) -> Result<Option<Operation>> {
        Ok(self.for_account_descending(account_id).into_iter().next())
    }

    async fn append(&self, operation: Operation) -> Result<Operation> {
        self.operations.lock().unwrap().push(operation.clone());
        Ok(operation)
    }

    async fn list_descending(&self, account_id: AccountId) -> Result<Vec<Operation>> {
        Ok(self.for_account_descending(account_id))
    }
}
