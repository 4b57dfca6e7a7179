use anyhow::{Context, Result};
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};

use crate::domain::{Transaction, TransactionId};

use super::{TransactionStore, MIGRATION_001_INITIAL};

/// SQLite-backed transaction store.
///
/// The pool holds a single connection. sqlx drives each SQLite connection
/// from its own worker thread, so every query runs off the caller's thread
/// and queries are executed in the order they are issued.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Create a new store with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await
            .context("Failed to connect to database")?;
        tracing::debug!(database_url, "connected to database");
        Ok(Self::new(pool))
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;
        Ok(())
    }

    /// Initialize a database (connect + migrate). Safe on an existing database.
    pub async fn init(database_url: &str) -> Result<Self> {
        let store = Self::connect(database_url).await?;
        store.migrate().await?;
        Ok(store)
    }

    fn row_to_transaction(row: &SqliteRow) -> Result<Transaction> {
        Ok(Transaction {
            id: row.try_get("id").context("Invalid transaction id")?,
            label: row.try_get("label").context("Invalid label")?,
            amount_cents: row.try_get("amount_cents").context("Invalid amount")?,
            description: row.try_get("description").context("Invalid description")?,
        })
    }
}

impl TransactionStore for SqliteStore {
    async fn insert(&self, transaction: &Transaction) -> Result<TransactionId> {
        // NULL lets SQLite pick the next AUTOINCREMENT id
        let explicit_id = transaction.is_stored().then_some(transaction.id);

        let result = sqlx::query(
            r#"
            INSERT INTO transactions (id, label, amount_cents, description)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(explicit_id)
        .bind(&transaction.label)
        .bind(transaction.amount_cents)
        .bind(&transaction.description)
        .execute(&self.pool)
        .await
        .context("Failed to save transaction")?;

        let id = result.last_insert_rowid();
        tracing::info!(id, label = %transaction.label, "inserted transaction");
        Ok(id)
    }

    async fn update(&self, transaction: &Transaction) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE transactions
            SET label = ?, amount_cents = ?, description = ?
            WHERE id = ?
            "#,
        )
        .bind(&transaction.label)
        .bind(transaction.amount_cents)
        .bind(&transaction.description)
        .bind(transaction.id)
        .execute(&self.pool)
        .await
        .context("Failed to update transaction")?;

        let matched = result.rows_affected() > 0;
        tracing::info!(id = transaction.id, matched, "updated transaction");
        Ok(matched)
    }

    async fn delete(&self, id: TransactionId) -> Result<()> {
        let result = sqlx::query("DELETE FROM transactions WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete transaction")?;
        tracing::info!(id, removed = result.rows_affected(), "deleted transaction");
        Ok(())
    }

    async fn get(&self, id: TransactionId) -> Result<Option<Transaction>> {
        let row = sqlx::query(
            r#"
            SELECT id, label, amount_cents, description
            FROM transactions
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch transaction")?;

        row.as_ref().map(Self::row_to_transaction).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Transaction>> {
        let rows = sqlx::query(
            r#"
            SELECT id, label, amount_cents, description
            FROM transactions
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list transactions")?;

        tracing::debug!(count = rows.len(), "listed transactions");
        rows.iter().map(Self::row_to_transaction).collect()
    }
}
