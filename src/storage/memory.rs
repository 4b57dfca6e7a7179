use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use anyhow::{Result, anyhow, bail};

use crate::domain::{Transaction, TransactionId};

use super::TransactionStore;

/// In-process transaction store.
///
/// Keeps records in a map behind a mutex. Nothing survives the process, so it
/// suits tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    transactions: BTreeMap<TransactionId, Transaction>,
    // Highest id ever handed out, so deleted ids are not reused
    last_id: TransactionId,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the given transactions.
    /// Transactions without an id get one assigned in order.
    pub fn with_transactions(transactions: impl IntoIterator<Item = Transaction>) -> Result<Self> {
        let store = Self::new();
        {
            let mut state = store.lock()?;
            for transaction in transactions {
                state.insert(transaction)?;
            }
        }
        Ok(store)
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>> {
        self.inner
            .lock()
            .map_err(|_| anyhow!("Memory store lock poisoned"))
    }
}

impl MemoryState {
    fn insert(&mut self, mut transaction: Transaction) -> Result<TransactionId> {
        if transaction.label.is_empty() {
            bail!("Failed to save transaction: label must not be empty");
        }
        if transaction.is_stored() {
            if self.transactions.contains_key(&transaction.id) {
                bail!(
                    "Failed to save transaction: id {} already exists",
                    transaction.id
                );
            }
        } else {
            transaction.id = match self.last_id.checked_add(1) {
                Some(id) => id,
                None => bail!("Failed to save transaction: no ids left"),
            };
        }

        let id = transaction.id;
        self.last_id = self.last_id.max(id);
        self.transactions.insert(id, transaction);
        Ok(id)
    }
}

impl TransactionStore for MemoryStore {
    async fn insert(&self, transaction: &Transaction) -> Result<TransactionId> {
        let id = self.lock()?.insert(transaction.clone())?;
        tracing::info!(id, label = %transaction.label, "inserted transaction");
        Ok(id)
    }

    async fn update(&self, transaction: &Transaction) -> Result<bool> {
        let mut state = self.lock()?;
        match state.transactions.get_mut(&transaction.id) {
            Some(existing) => {
                *existing = transaction.clone();
                tracing::info!(id = transaction.id, "updated transaction");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: TransactionId) -> Result<()> {
        let removed = self.lock()?.transactions.remove(&id).is_some();
        tracing::info!(id, removed, "deleted transaction");
        Ok(())
    }

    async fn get(&self, id: TransactionId) -> Result<Option<Transaction>> {
        Ok(self.lock()?.transactions.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Transaction>> {
        let transactions: Vec<Transaction> = self.lock()?.transactions.values().cloned().collect();
        tracing::debug!(count = transactions.len(), "listed transactions");
        Ok(transactions)
    }
}
