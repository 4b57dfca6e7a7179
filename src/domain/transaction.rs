use std::fmt;

use serde::{Deserialize, Serialize};

use super::{parse_cents, Cents, ParseCentsError};

pub type TransactionId = i64;

/// Id carried by a transaction that has not been stored yet.
/// The store assigns a real id on insert.
pub const UNASSIGNED_ID: TransactionId = 0;

/// A single income (positive amount) or expense (negative amount) record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub label: String,
    pub amount_cents: Cents,
    pub description: String,
}

impl Transaction {
    pub fn new(label: impl Into<String>, amount_cents: Cents) -> Self {
        Self {
            id: UNASSIGNED_ID,
            label: label.into(),
            amount_cents,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_id(mut self, id: TransactionId) -> Self {
        self.id = id;
        self
    }

    /// Build a transaction from raw user input.
    ///
    /// The label must be non-blank and is stored trimmed. The amount must parse
    /// as a signed decimal. The label is checked first, so a submission with
    /// both fields wrong reports the label.
    pub fn from_input(
        label: &str,
        amount_text: &str,
        description: &str,
    ) -> Result<Self, ValidationError> {
        let label = label.trim();
        if label.is_empty() {
            return Err(ValidationError::new(Field::Label, "label must not be empty"));
        }

        let amount_cents = parse_cents(amount_text).map_err(|e| match e {
            ParseCentsError::InvalidFormat => {
                ValidationError::new(Field::Amount, format!("'{}' is not a number", amount_text))
            }
            ParseCentsError::TooPrecise | ParseCentsError::OutOfRange => {
                ValidationError::new(Field::Amount, e.to_string())
            }
        })?;

        Ok(Self::new(label, amount_cents).with_description(description))
    }

    /// Returns true for income, i.e. amounts that count towards the budget.
    pub fn is_income(&self) -> bool {
        self.amount_cents > 0
    }

    pub fn is_stored(&self) -> bool {
        self.id != UNASSIGNED_ID
    }
}

/// Input field a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Label,
    Amount,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Label => "label",
            Field::Amount => "amount",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: Field,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: Field, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid {}: {}", self.field, self.reason)
    }
}

impl std::error::Error for ValidationError {}
