use rust_decimal::Decimal;
use serde::Serialize;

use super::{AccountId, Operation, zero_amount};

/// A derived, read-only view of an account: current balance plus the
/// operation history ordered descending by time. Built on demand for
/// presentation, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountStatement {
    pub account_id: AccountId,
    pub balance: Decimal,
    pub operations: Vec<Operation>,
}

impl AccountStatement {
    /// Build a statement from operations ordered descending by time.
    /// The balance is the `new_balance` of the most recent operation, or
    /// zero for an account with no history - an empty history is a valid,
    /// representable state, not an error.
    pub fn from_operations(account_id: AccountId, operations: Vec<Operation>) -> Self {
        let balance = operations
            .first()
            .map(|operation| operation.new_balance)
            .unwrap_or_else(zero_amount);

        Self {
            account_id,
            balance,
            operations,
        }
    }
}
