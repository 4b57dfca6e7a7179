use crate::domain::{compute_dashboard, Dashboard, Transaction, TransactionId, UNASSIGNED_ID};
use crate::storage::{SqliteStore, TransactionStore};

use super::AppError;

/// Application service providing high-level operations for the ledger.
/// This is the primary interface for any client (CLI, shell, tests).
///
/// Holds a read-through copy of all transactions, rebuilt by [`refresh`]
/// and patched only by [`delete_with_undo`] and [`undo`]. `add` and `edit`
/// write to the store only; call `refresh` afterwards to see their effect.
///
/// [`refresh`]: LedgerService::refresh
/// [`delete_with_undo`]: LedgerService::delete_with_undo
/// [`undo`]: LedgerService::undo
pub struct LedgerService<S = SqliteStore> {
    store: S,
    cache: Vec<Transaction>,
    pending_undo: Option<PendingUndo>,
    deletions: u64,
}

/// Handle returned by a deletion, used to reverse it.
///
/// Only the token of the most recent deletion is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoToken {
    deletion: u64,
}

struct PendingUndo {
    token: UndoToken,
    snapshot: Vec<Transaction>,
    deleted: Transaction,
}

impl LedgerService<SqliteStore> {
    /// Initialize a database at the given path, creating it if needed.
    pub async fn init(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let store = SqliteStore::init(&db_url).await?;
        Ok(Self::new(store))
    }

    /// Connect to an existing database.
    pub async fn connect(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}", database_path);
        let store = SqliteStore::connect(&db_url).await?;
        Ok(Self::new(store))
    }
}

impl<S: TransactionStore> LedgerService<S> {
    /// Create a new ledger service over the given store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            cache: Vec::new(),
            pending_undo: None,
            deletions: 0,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Transactions as of the last refresh, delete or undo.
    pub fn transactions(&self) -> &[Transaction] {
        &self.cache
    }

    /// Dashboard totals over the cached transactions.
    pub fn dashboard(&self) -> Result<Dashboard, AppError> {
        Ok(compute_dashboard(&self.cache)?)
    }

    /// Returns true if `token` belongs to the most recent, not yet undone deletion.
    pub fn can_undo(&self, token: UndoToken) -> bool {
        self.pending_undo
            .as_ref()
            .is_some_and(|pending| pending.token == token)
    }

    /// Reload every transaction from the store and replace the cache.
    pub async fn refresh(&mut self) -> Result<&[Transaction], AppError> {
        self.cache = self.store.list_all().await?;
        tracing::debug!(count = self.cache.len(), "refreshed transactions");
        Ok(&self.cache)
    }

    /// Get a single transaction from the store.
    pub async fn get(&self, id: TransactionId) -> Result<Transaction, AppError> {
        self.store
            .get(id)
            .await?
            .ok_or(AppError::TransactionNotFound(id))
    }

    /// Validate user input and record a new transaction.
    pub async fn add(
        &self,
        label: &str,
        amount_text: &str,
        description: &str,
    ) -> Result<Transaction, AppError> {
        let transaction = Transaction::from_input(label, amount_text, description)?;
        let id = self.store.insert(&transaction).await?;
        Ok(transaction.with_id(id))
    }

    /// Validate user input and replace `existing` with it.
    ///
    /// Fails with [`AppError::TransactionNotFound`] if `existing` is no longer stored.
    pub async fn edit(
        &self,
        existing: &Transaction,
        label: &str,
        amount_text: &str,
        description: &str,
    ) -> Result<Transaction, AppError> {
        let transaction =
            Transaction::from_input(label, amount_text, description)?.with_id(existing.id);

        if !self.store.update(&transaction).await? {
            return Err(AppError::TransactionNotFound(existing.id));
        }
        Ok(transaction)
    }

    /// Delete a transaction and remember enough to undo it.
    ///
    /// Returns `None` if no transaction has this id; any earlier undo stays
    /// available in that case. Otherwise the earlier undo is discarded.
    pub async fn delete_with_undo(
        &mut self,
        id: TransactionId,
    ) -> Result<Option<UndoToken>, AppError> {
        if !self.cache.iter().any(|t| t.id == id) {
            self.refresh().await?;
        }
        let Some(deleted) = self.cache.iter().find(|t| t.id == id).cloned() else {
            tracing::debug!(id, "nothing to delete");
            return Ok(None);
        };

        self.store.delete(id).await?;

        let snapshot = std::mem::take(&mut self.cache);
        self.cache = snapshot.iter().filter(|t| t.id != id).cloned().collect();

        self.deletions += 1;
        let token = UndoToken {
            deletion: self.deletions,
        };
        let superseded = self.pending_undo.replace(PendingUndo {
            token,
            snapshot,
            deleted,
        });
        if let Some(previous) = superseded {
            tracing::debug!(id = previous.deleted.id, "previous deletion can no longer be undone");
        }

        Ok(Some(token))
    }

    /// Reverse the deletion that produced `token`.
    ///
    /// Returns the restored transaction, or `None` when the token is stale
    /// (a later deletion happened) or was already used. The restored record
    /// keeps its id unless another record has taken it meanwhile.
    pub async fn undo(&mut self, token: UndoToken) -> Result<Option<Transaction>, AppError> {
        let pending = match self.pending_undo.take() {
            Some(pending) if pending.token == token => pending,
            other => {
                self.pending_undo = other;
                tracing::warn!(?token, "undo token is no longer valid");
                return Ok(None);
            }
        };

        let result = self.restore(&pending.deleted).await;
        let restored = match result {
            Ok(restored) => restored,
            Err(e) => {
                // Keep the undo available so the caller can retry
                self.pending_undo = Some(pending);
                return Err(e);
            }
        };

        let mut snapshot = pending.snapshot;
        if restored.id != pending.deleted.id {
            for transaction in snapshot.iter_mut().filter(|t| t.id == pending.deleted.id) {
                *transaction = restored.clone();
            }
            snapshot.sort_by_key(|t| t.id);
        }
        self.cache = snapshot;

        Ok(Some(restored))
    }

    async fn restore(&self, deleted: &Transaction) -> Result<Transaction, AppError> {
        let id = if self.store.get(deleted.id).await?.is_some() {
            tracing::warn!(id = deleted.id, "original id is taken, restoring under a new id");
            let fresh = deleted.clone().with_id(UNASSIGNED_ID);
            self.store.insert(&fresh).await?
        } else {
            self.store.insert(deleted).await?
        };

        tracing::info!(id, label = %deleted.label, "restored transaction");
        Ok(deleted.clone().with_id(id))
    }
}
