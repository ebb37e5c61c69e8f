//! Transaction domain model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Unique identifier for a Transaction.
///
/// Assigned by storage on insert (monotonically increasing surrogate key),
/// never reused or reassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(i64);

impl TransactionId {
    /// Creates a TransactionId from a raw storage key.
    pub fn from_i64(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw storage key.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TransactionId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse::<i64>()?))
    }
}

/// A signed monetary entry belonging to a user.
///
/// Transactions are immutable once created - they are either unchanged
/// or deleted, never edited in place. The sign of `amount` carries the
/// semantics: positive = income, negative = expense, zero = neutral.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,
    /// Opaque caller-supplied owner identifier
    pub user_id: String,
    /// Human-readable label
    pub title: String,
    /// Signed amount, at most 2 fractional digits
    pub amount: Decimal,
    /// Free-form category label
    pub category: String,
    /// Calendar date the row was inserted, set once by storage
    pub created_at: NaiveDate,
}

impl Transaction {
    /// Reconstructs a transaction from database fields.
    pub fn from_parts(
        id: TransactionId,
        user_id: String,
        title: String,
        amount: Decimal,
        category: String,
        created_at: NaiveDate,
    ) -> Self {
        Self {
            id,
            user_id,
            title,
            amount,
            category,
            created_at,
        }
    }
}

/// Returns true if `amount` fits the ledger's fixed precision of
/// 2 fractional digits without rounding.
pub fn fits_ledger_precision(amount: &Decimal) -> bool {
    amount.normalize().scale() <= 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_id_roundtrip_through_str() {
        let id: TransactionId = "42".parse().unwrap();
        assert_eq!(id, TransactionId::from_i64(42));
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_id_rejects_non_integer() {
        assert!("abc".parse::<TransactionId>().is_err());
        assert!("1.5".parse::<TransactionId>().is_err());
        assert!("".parse::<TransactionId>().is_err());
    }

    #[test]
    fn test_id_accepts_surrounding_whitespace() {
        let id: TransactionId = " 7 ".parse().unwrap();
        assert_eq!(id.as_i64(), 7);
    }

    #[test]
    fn test_precision_check() {
        assert!(fits_ledger_precision(&dec!(-3.50)));
        assert!(fits_ledger_precision(&dec!(0)));
        assert!(fits_ledger_precision(&dec!(1200)));
        // Trailing zeros beyond 2 places are still exact at 2 places.
        assert!(fits_ledger_precision(&dec!(1.500)));
        assert!(!fits_ledger_precision(&dec!(0.001)));
        assert!(!fits_ledger_precision(&dec!(-9.999)));
    }
}
