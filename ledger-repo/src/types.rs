//! Shared database types with feature-gated fields for SQLite and PostgreSQL.

use rust_decimal::Decimal;
use sqlx::FromRow;

use ledger_types::{RepoError, Transaction, TransactionId};

#[cfg(not(feature = "sqlite"))]
use chrono::NaiveDate;

// ─────────────────────────────────────────────────────────────────────────────
// Database row structs (derive FromRow for automatic mapping)
// ─────────────────────────────────────────────────────────────────────────────

/// Transaction row from database.
///
/// PostgreSQL stores the amount as NUMERIC(10,2) and the date as DATE;
/// SQLite stores integer cents and a `YYYY-MM-DD` string.
#[derive(FromRow)]
pub struct DbTransaction {
    pub id: i64,
    pub user_id: String,
    pub title: String,

    #[cfg(not(feature = "sqlite"))]
    pub amount: Decimal,
    #[cfg(feature = "sqlite")]
    pub amount_cents: i64,

    pub category: String,

    #[cfg(not(feature = "sqlite"))]
    pub created_at: NaiveDate,
    #[cfg(feature = "sqlite")]
    pub created_at: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversion helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Converts a 2-decimal amount into integer cents for SQLite storage.
///
/// The service validates precision before the repository sees the payload;
/// a residual fraction here means the mapping contract was broken.
#[cfg(feature = "sqlite")]
pub fn decimal_to_cents(amount: &Decimal) -> Result<i64, RepoError> {
    use rust_decimal::prelude::ToPrimitive;

    let scaled = amount * Decimal::new(100, 0);
    if !scaled.is_integer() {
        return Err(RepoError::Storage(format!(
            "amount {} exceeds 2 decimal places",
            amount
        )));
    }
    scaled
        .to_i64()
        .ok_or_else(|| RepoError::Storage(format!("amount {} out of range", amount)))
}

/// Converts stored integer cents back into a 2-decimal amount.
#[cfg(feature = "sqlite")]
pub fn cents_to_decimal(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

// ─────────────────────────────────────────────────────────────────────────────
// Domain conversion (feature-gated implementations)
// ─────────────────────────────────────────────────────────────────────────────

impl DbTransaction {
    /// Convert database row to domain Transaction.
    pub fn into_domain(self) -> Result<Transaction, RepoError> {
        #[cfg(not(feature = "sqlite"))]
        let (amount, created_at) = (self.amount, self.created_at);

        #[cfg(feature = "sqlite")]
        let (amount, created_at) = {
            let amount = cents_to_decimal(self.amount_cents);
            let date = chrono::NaiveDate::parse_from_str(&self.created_at, "%Y-%m-%d")
                .map_err(|e| RepoError::Storage(e.to_string()))?;
            (amount, date)
        };

        Ok(Transaction::from_parts(
            TransactionId::from_i64(self.id),
            self.user_id,
            self.title,
            amount,
            self.category,
            created_at,
        ))
    }
}
