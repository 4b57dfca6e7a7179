// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use spendbook::application::LedgerService;
use spendbook::domain::Transaction;
use spendbook::storage::SqliteStore;
use tempfile::TempDir;

/// Helper to create a test service with a temporary database
pub async fn test_service() -> Result<(LedgerService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let service = LedgerService::init(db_path.to_str().unwrap()).await?;
    Ok((service, temp_dir))
}

/// Helper to create a bare SQLite store in a temporary directory
pub async fn test_store() -> Result<(SqliteStore, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let url = format!("sqlite:{}?mode=rwc", db_path.to_str().unwrap());
    let store = SqliteStore::init(&url).await?;
    Ok((store, temp_dir))
}

/// Field tuples of a transaction list, ignoring ids
pub fn fields(transactions: &[Transaction]) -> Vec<(String, i64, String)> {
    let mut fields: Vec<_> = transactions
        .iter()
        .map(|t| (t.label.clone(), t.amount_cents, t.description.clone()))
        .collect();
    fields.sort();
    fields
}
