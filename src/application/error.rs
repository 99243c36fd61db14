use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::AccountId;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Amount must be positive, got {0}")]
    InvalidAmount(Decimal),

    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    #[error("Insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds {
        balance: Decimal,
        requested: Decimal,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}
