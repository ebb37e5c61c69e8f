//! Ledger Application Service
//!
//! Validates inputs, enforces invariants, and orchestrates the repository
//! port. Contains NO infrastructure logic - pure business orchestration.

use ledger_types::{
    AmountFilter, AppError, CreateTransactionRequest, NewTransaction, Summary, Transaction,
    TransactionId, TransactionRepository, domain::transaction::fits_ledger_precision,
};

/// Application service for ledger operations.
///
/// Generic over `R: TransactionRepository` - the adapter is injected at
/// compile time. The service holds no mutable state of its own; every
/// operation is fully described by its inputs and the store's contents,
/// so calls may run concurrently without in-process locking.
pub struct LedgerService<R: TransactionRepository> {
    repo: R,
}

impl<R: TransactionRepository> LedgerService<R> {
    /// Creates a new ledger service with the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Records a new transaction.
    ///
    /// All four fields must be present; the three string fields must be
    /// non-blank and the amount may be zero but not absent. Nothing is
    /// persisted when validation fails.
    pub async fn create_transaction(
        &self,
        req: CreateTransactionRequest,
    ) -> Result<Transaction, AppError> {
        let (Some(user_id), Some(title), Some(amount), Some(category)) =
            (req.user_id, req.title, req.amount, req.category)
        else {
            return Err(AppError::Validation("Missing required fields".into()));
        };

        if user_id.trim().is_empty() || title.trim().is_empty() || category.trim().is_empty() {
            return Err(AppError::Validation("Missing required fields".into()));
        }

        // Fixed 2-decimal precision: reject rather than round.
        if !fits_ledger_precision(&amount) {
            return Err(AppError::Validation(
                "Amount must have at most 2 decimal places".into(),
            ));
        }

        self.repo
            .insert(NewTransaction {
                user_id,
                title,
                amount,
                category,
            })
            .await
            .map_err(Into::into)
    }

    /// Lists a user's transactions, newest date first.
    ///
    /// Unknown users simply yield an empty list.
    pub async fn list_transactions(&self, user_id: &str) -> Result<Vec<Transaction>, AppError> {
        self.repo.find_by_user(user_id).await.map_err(Into::into)
    }

    /// Deletes a transaction by its raw (unparsed) id.
    ///
    /// A non-integer id fails validation before storage is touched.
    pub async fn delete_transaction(&self, id: &str) -> Result<Transaction, AppError> {
        let id: TransactionId = id
            .parse()
            .map_err(|_| AppError::Validation("Invalid transaction ID".into()))?;

        self.repo
            .delete_by_id(id)
            .await
            .map_err(AppError::from)
            .and_then(|opt| opt.ok_or_else(|| AppError::NotFound("Transaction not found".into())))
    }

    /// Computes the (balance, income, expenses) triple for a user.
    ///
    /// Three single-aggregate statements against the store; each component
    /// defaults to zero, and `balance == income + expenses` holds for every
    /// call.
    pub async fn summarize(&self, user_id: &str) -> Result<Summary, AppError> {
        let balance = self.repo.sum_by_user(user_id, AmountFilter::All).await?;
        let income = self.repo.sum_by_user(user_id, AmountFilter::Income).await?;
        let expenses = self.repo.sum_by_user(user_id, AmountFilter::Expense).await?;

        Ok(Summary {
            balance,
            income,
            expenses,
        })
    }
}
