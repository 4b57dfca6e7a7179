//! Storage contract for transaction records.

use std::future::Future;

use anyhow::Result;

use crate::domain::{Transaction, TransactionId};

/// Durable keyed collection of transactions.
///
/// Implementations must ensure:
/// - Every call is atomic; no partial write is ever observable
/// - Assigned ids are unique and never handed out twice
/// - `list_all` returns records ordered by ascending id
pub trait TransactionStore: Send + Sync {
    /// Persist a transaction and return its id.
    ///
    /// A transaction carrying [`UNASSIGNED_ID`](crate::domain::UNASSIGNED_ID)
    /// gets a fresh id. Any other id is stored as is and fails if it is
    /// already taken.
    fn insert(
        &self,
        transaction: &Transaction,
    ) -> impl Future<Output = Result<TransactionId>> + Send;

    /// Replace the record with the same id.
    ///
    /// Returns `false` when no record has that id; nothing is written then.
    fn update(&self, transaction: &Transaction) -> impl Future<Output = Result<bool>> + Send;

    /// Remove a record. Deleting an unknown id is not an error.
    fn delete(&self, id: TransactionId) -> impl Future<Output = Result<()>> + Send;

    /// Fetch a single record.
    fn get(&self, id: TransactionId) -> impl Future<Output = Result<Option<Transaction>>> + Send;

    /// Fetch every record, ordered by id.
    fn list_all(&self) -> impl Future<Output = Result<Vec<Transaction>>> + Send;
}
