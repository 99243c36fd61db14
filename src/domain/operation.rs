use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type OperationId = Uuid;
pub type AccountId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// Money entering the account
    Deposit,
    /// Money leaving the account
    Withdrawal,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Deposit => "deposit",
            OperationKind::Withdrawal => "withdrawal",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "deposit" => Some(OperationKind::Deposit),
            "withdrawal" => Some(OperationKind::Withdrawal),
            _ => None,
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single deposit or withdrawal on an account.
///
/// Operations are immutable and append-only: the account's state is
/// entirely defined by its operation history. `new_balance` is the balance
/// immediately after this operation and is the sole source of truth for
/// "current balance" - there is no separate mutable balance field anywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub id: OperationId,
    pub account_id: AccountId,
    pub kind: OperationKind,
    /// Amount moved, always positive, scaled to 2 fractional digits
    pub amount: Decimal,
    /// Account balance after applying this operation, scaled to 2 digits
    pub new_balance: Decimal,
    /// When the operation was recorded
    pub recorded_at: DateTime<Utc>,
}

impl Operation {
    pub fn new(
        id: OperationId,
        account_id: AccountId,
        kind: OperationKind,
        amount: Decimal,
        new_balance: Decimal,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            account_id,
            kind,
            amount,
            new_balance,
            recorded_at,
        }
    }

    pub fn is_deposit(&self) -> bool {
        self.kind == OperationKind::Deposit
    }
}
