use thiserror::Error;

use crate::domain::{Field, TotalsOverflow, TransactionId, ValidationError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Totals(#[from] TotalsOverflow),

    #[error("Transaction not found: {0}")]
    TransactionNotFound(TransactionId),

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}

impl AppError {
    /// The input field that failed validation, if this is a validation error.
    pub fn validation_field(&self) -> Option<Field> {
        match self {
            AppError::Validation(e) => Some(e.field),
            _ => None,
        }
    }

    /// True when the store could not complete the operation.
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            AppError::TransactionNotFound(_) | AppError::Database(_)
        )
    }
}
