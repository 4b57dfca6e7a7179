use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Cents, Transaction};

/// Totals shown on the dashboard.
///
/// `balance == budget + expense` always holds; `budget` is never negative
/// and `expense` is never positive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    pub balance: Cents,
    pub budget: Cents,
    pub expense: Cents,
}

/// Compute the dashboard totals from a list of transactions.
/// Balance = sum of all amounts, budget = sum of positive amounts,
/// expense = balance - budget.
///
/// Sums are accumulated in 128 bits and fail if a total does not fit in [`Cents`].
pub fn compute_dashboard(transactions: &[Transaction]) -> Result<Dashboard, TotalsOverflow> {
    let (balance, budget) = transactions
        .iter()
        .fold((0i128, 0i128), |(balance, budget), tx| {
            let amount = i128::from(tx.amount_cents);
            let budget = if tx.is_income() { budget + amount } else { budget };
            (balance + amount, budget)
        });

    let to_cents = |total: i128| Cents::try_from(total).map_err(|_| TotalsOverflow);
    Ok(Dashboard {
        balance: to_cents(balance)?,
        budget: to_cents(budget)?,
        expense: to_cents(balance - budget)?,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TotalsOverflow;

impl fmt::Display for TotalsOverflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dashboard totals are too large to display")
    }
}

impl std::error::Error for TotalsOverflow {}
