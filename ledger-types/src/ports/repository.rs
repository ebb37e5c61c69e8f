//! Repository port trait.
//!
//! This is the primary port in our hexagonal architecture.
//! Adapters (Postgres, SQLite) will implement this trait.

use rust_decimal::Decimal;

use crate::domain::{Transaction, TransactionId};
use crate::dto::NewTransaction;
use crate::error::RepoError;

/// Amount predicate for single-aggregate sums.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountFilter {
    /// Every row for the user
    All,
    /// Rows with amount > 0
    Income,
    /// Rows with amount < 0
    Expense,
}

/// The main repository port for ledger operations.
///
/// A thin mapping layer with no business rules: each operation is exactly
/// one parameterized statement against the store, so correctness under
/// concurrent calls relies on per-statement atomicity alone.
#[async_trait::async_trait]
pub trait TransactionRepository: Send + Sync + 'static {
    /// Inserts a transaction, returning the full persisted row including
    /// the storage-assigned `id` and `created_at`.
    async fn insert(&self, tx: NewTransaction) -> Result<Transaction, RepoError>;

    /// Returns all rows for the user ordered by `created_at` descending
    /// (ties broken by `id` descending). Unknown users yield an empty
    /// vec, not an error.
    async fn find_by_user(&self, user_id: &str) -> Result<Vec<Transaction>, RepoError>;

    /// Deletes a row by id, returning the deleted row. `Ok(None)` means
    /// no such row existed; an `Err` means the store itself failed.
    async fn delete_by_id(&self, id: TransactionId) -> Result<Option<Transaction>, RepoError>;

    /// Sums the amounts of rows matching the filter. Returns zero (never
    /// null/absent) when no rows match.
    async fn sum_by_user(&self, user_id: &str, filter: AmountFilter)
    -> Result<Decimal, RepoError>;
}
