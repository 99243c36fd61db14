use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::application::LedgerService;
use crate::domain::{AccountId, AccountStatement, parse_amount};

/// Passbook - Single-Account Bank Ledger
#[derive(Parser)]
#[command(name = "passbook")]
#[command(about = "A bank ledger that records deposits and withdrawals as an append-only history")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, default_value = "passbook.db")]
    pub database: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new database
    Init,

    /// Open a new account with an initial deposit
    Open {
        /// Initial deposit (e.g., "100.00" or "100")
        amount: String,
    },

    /// Deposit money into an account
    Deposit {
        /// Account ID
        account: String,

        /// Amount to deposit (e.g., "50.00" or "50")
        amount: String,
    },

    /// Withdraw money from an account
    Withdraw {
        /// Account ID
        account: String,

        /// Amount to withdraw (e.g., "50.00" or "50")
        amount: String,
    },

    /// Print the account statement (balance + operation history)
    Statement {
        /// Account ID
        account: String,

        /// Emit the statement as JSON instead of the text rendering
        #[arg(long)]
        json: bool,
    },

    /// List operations for an account, newest first
    Operations {
        /// Account ID
        account: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Init => {
                LedgerService::init(&self.database).await?;
                println!("Database initialized: {}", self.database);
            }

            Commands::Open { amount } => {
                let service = LedgerService::connect(&self.database).await?;
                let amount = parse_cli_amount(&amount)?;

                let operation = service.open_account(amount).await?;

                println!("Opened account: {}", operation.account_id);
                println!("Initial balance: {}", operation.new_balance);
                if self.verbose {
                    eprintln!("[open] operation {}", operation.id);
                }
            }

            Commands::Deposit { account, amount } => {
                let service = LedgerService::connect(&self.database).await?;
                let account_id = parse_account(&account)?;
                let amount = parse_cli_amount(&amount)?;

                let operation = service.deposit(account_id, amount).await?;

                println!(
                    "Deposited {} into {} (balance: {})",
                    operation.amount, operation.account_id, operation.new_balance
                );
                if self.verbose {
                    eprintln!("[deposit] operation {}", operation.id);
                }
            }

            Commands::Withdraw { account, amount } => {
                let service = LedgerService::connect(&self.database).await?;
                let account_id = parse_account(&account)?;
                let amount = parse_cli_amount(&amount)?;

                let operation = service.withdraw(account_id, amount).await?;

                println!(
                    "Withdrew {} from {} (balance: {})",
                    operation.amount, operation.account_id, operation.new_balance
                );
                if self.verbose {
                    eprintln!("[withdraw] operation {}", operation.id);
                }
            }

            Commands::Statement { account, json } => {
                let service = LedgerService::connect(&self.database).await?;
                let account_id = parse_account(&account)?;

                if json {
                    // The statement printer renders text; JSON output is a
                    // plain serialization of the same snapshot.
                    let operations = service.operations(account_id).await?;
                    let statement = AccountStatement::from_operations(account_id, operations);
                    println!("{}", serde_json::to_string_pretty(&statement)?);
                } else {
                    service.statement(account_id).await?;
                }
            }

            Commands::Operations { account } => {
                let service = LedgerService::connect(&self.database).await?;
                let account_id = parse_account(&account)?;

                let operations = service.operations(account_id).await?;
                if operations.is_empty() {
                    println!("No operations for account {}", account_id);
                } else {
                    for operation in operations {
                        println!(
                            "{}  {:<12} {:>12}  (balance: {})",
                            operation.recorded_at.format("%Y-%m-%d %H:%M"),
                            operation.kind.as_str(),
                            operation.amount,
                            operation.new_balance
                        );
                    }
                }
            }
        }

        Ok(())
    }
}

fn parse_account(input: &str) -> Result<AccountId> {
    Uuid::parse_str(input.trim())
        .with_context(|| format!("Invalid account ID '{}'", input))
}

fn parse_cli_amount(input: &str) -> Result<Decimal> {
    parse_amount(input).context("Invalid amount format. Use '50.00' or '50'")
}
