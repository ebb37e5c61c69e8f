//! Aggregate summary over a user's transactions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The (balance, income, expenses) triple computed over a user's ledger.
///
/// Invariant: `balance == income + expenses` (expenses is non-positive).
/// Every component is zero, never absent, for users with no matching rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Sum over all amounts
    pub balance: Decimal,
    /// Sum over strictly positive amounts
    pub income: Decimal,
    /// Sum over strictly negative amounts
    pub expenses: Decimal,
}

impl Summary {
    /// A summary with all components at zero.
    pub fn zero() -> Self {
        Self {
            balance: Decimal::ZERO,
            income: Decimal::ZERO,
            expenses: Decimal::ZERO,
        }
    }

    /// Checks the summary invariant.
    pub fn is_consistent(&self) -> bool {
        self.balance == self.income + self.expenses
    }
}
