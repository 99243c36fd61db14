// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use passbook::application::LedgerService;
use passbook::io::{HumanReadableFormatter, RecordingPrinter};
use passbook::storage::SqliteStore;
use rust_decimal::Decimal;
use tempfile::TempDir;

/// Helper to create a test service backed by a temporary database, with a
/// handle to the recording printer for asserting statement output.
pub async fn test_service() -> Result<(LedgerService, RecordingPrinter, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let (service, printer) = service_at(db_path.to_str().unwrap()).await?;
    Ok((service, printer, temp_dir))
}

/// Build a service against a specific database path (creates it if needed).
pub async fn service_at(db_path: &str) -> Result<(LedgerService, RecordingPrinter)> {
    let db_url = format!("sqlite:{}?mode=rwc", db_path);
    let store = SqliteStore::init(&db_url).await?;
    let printer = RecordingPrinter::new();
    let service = LedgerService::new(
        Box::new(store),
        Box::new(HumanReadableFormatter),
        Box::new(printer.clone()),
    );
    Ok((service, printer))
}

/// Helper to parse a decimal literal in tests
pub fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}
