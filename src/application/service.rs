use rust_decimal::Decimal;

use crate::domain::{AccountId, AccountStatement, Operation, OperationKind, scale_amount};
use crate::io::{ConsolePrinter, HumanReadableFormatter, StatementFormatter, StringPrinter};
use crate::storage::{OperationStore, SqliteStore};

use super::{Clock, LedgerError, OperationIds, RandomIds, SystemClock};

/// Ledger service: validates requests, derives balances from the operation
/// history and appends new operations through the store. This is the
/// primary interface for any client (CLI, API, TUI, etc.).
///
/// The service holds no state of its own beyond injected collaborators, so
/// it is safe to share across tasks. Mutations take the store's per-account
/// write lock and hold it across the read-then-append pair, so concurrent
/// writers on the same account cannot read the same last balance.
pub struct LedgerService {
    store: Box<dyn OperationStore>,
    formatter: Box<dyn StatementFormatter>,
    printer: Box<dyn StringPrinter>,
    clock: Box<dyn Clock>,
    ids: Box<dyn OperationIds>,
}

impl LedgerService {
    /// Create a service with the real clock and random operation ids.
    pub fn new(
        store: Box<dyn OperationStore>,
        formatter: Box<dyn StatementFormatter>,
        printer: Box<dyn StringPrinter>,
    ) -> Self {
        Self::with_sources(
            store,
            formatter,
            printer,
            Box::new(SystemClock),
            Box::new(RandomIds),
        )
    }

    /// Create a service with explicit time and id sources. Tests use this
    /// with a fixed clock and deterministic ids.
    pub fn with_sources(
        store: Box<dyn OperationStore>,
        formatter: Box<dyn StatementFormatter>,
        printer: Box<dyn StringPrinter>,
        clock: Box<dyn Clock>,
        ids: Box<dyn OperationIds>,
    ) -> Self {
        Self {
            store,
            formatter,
            printer,
            clock,
            ids,
        }
    }

    /// Initialize a new database at the given path and wire up the default
    /// console collaborators.
    pub async fn init(database_path: &str) -> Result<Self, LedgerError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let store = SqliteStore::init(&db_url).await?;
        Ok(Self::console(store))
    }

    /// Connect to an existing database.
    pub async fn connect(database_path: &str) -> Result<Self, LedgerError> {
        let db_url = format!("sqlite:{}", database_path);
        let store = SqliteStore::connect(&db_url).await?;
        Ok(Self::console(store))
    }

    fn console(store: SqliteStore) -> Self {
        Self::new(
            Box::new(store),
            Box::new(HumanReadableFormatter),
            Box::new(ConsolePrinter),
        )
    }

    /// Open a new account by recording its first deposit.
    ///
    /// An account exists iff it has at least one operation, so this is the
    /// only entry point that appends without consulting the store first.
    pub async fn open_account(&self, initial_deposit: Decimal) -> Result<Operation, LedgerError> {
        let scaled = validate_and_scale(initial_deposit)?;
        // The account id is freshly generated, so no other writer can
        // target it yet and no lock is needed.
        let account_id = self.ids.next();

        let operation = Operation::new(
            self.ids.next(),
            account_id,
            OperationKind::Deposit,
            scaled,
            scaled,
            self.clock.now(),
        );

        Ok(self.store.append(operation).await?)
    }

    /// Record a deposit. The new balance is the last operation's balance
    /// plus the amount scaled to 2 digits (half-down).
    pub async fn deposit(
        &self,
        account_id: AccountId,
        amount: Decimal,
    ) -> Result<Operation, LedgerError> {
        let scaled = validate_and_scale(amount)?;
        let _lock = self.store.lock_account(account_id).await;
        let last_balance = self.current_balance(account_id).await?;

        let operation = Operation::new(
            self.ids.next(),
            account_id,
            OperationKind::Deposit,
            scaled,
            last_balance + scaled,
            self.clock.now(),
        );

        Ok(self.store.append(operation).await?)
    }

    /// Record a withdrawal.
    ///
    /// The funds check compares the balance against the *unscaled* requested
    /// amount, while the ledger entry uses the scaled amount. A request
    /// whose fractional part would round away can therefore still be
    /// rejected on its original magnitude. This asymmetry is a deliberate,
    /// tested contract of the ledger.
    pub async fn withdraw(
        &self,
        account_id: AccountId,
        amount: Decimal,
    ) -> Result<Operation, LedgerError> {
        let scaled = validate_and_scale(amount)?;
        let _lock = self.store.lock_account(account_id).await;
        let last_balance = self.current_balance(account_id).await?;

        if last_balance < amount {
            return Err(LedgerError::InsufficientFunds {
                balance: last_balance,
                requested: amount,
            });
        }

        let operation = Operation::new(
            self.ids.next(),
            account_id,
            OperationKind::Withdrawal,
            scaled,
            last_balance - scaled,
            self.clock.now(),
        );

        Ok(self.store.append(operation).await?)
    }

    /// Build the account statement, render it through the formatter and
    /// hand the text to the output sink.
    ///
    /// Unlike deposit/withdraw this never fails for an unknown account: an
    /// empty history is a valid statement with balance zero.
    pub async fn statement(&self, account_id: AccountId) -> Result<AccountStatement, LedgerError> {
        let operations = self.store.list_descending(account_id).await?;
        let statement = AccountStatement::from_operations(account_id, operations);

        let text = self.formatter.format(&statement);
        self.printer.print(&text);

        Ok(statement)
    }

    /// List all operations for an account, newest first.
    pub async fn operations(&self, account_id: AccountId) -> Result<Vec<Operation>, LedgerError> {
        Ok(self.store.list_descending(account_id).await?)
    }

    async fn current_balance(&self, account_id: AccountId) -> Result<Decimal, LedgerError> {
        let last_operation = self
            .store
            .last_operation(account_id)
            .await?
            .ok_or(LedgerError::AccountNotFound(account_id))?;
        Ok(last_operation.new_balance)
    }
}

fn validate_and_scale(amount: Decimal) -> Result<Decimal, LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::InvalidAmount(amount));
    }
    Ok(scale_amount(amount))
}
