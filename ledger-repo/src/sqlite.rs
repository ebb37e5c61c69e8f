//! SQLite repository adapter.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use std::str::FromStr;

use ledger_types::{
    AmountFilter, NewTransaction, RepoError, Transaction, TransactionId, TransactionRepository,
};

use crate::types::{DbTransaction, cents_to_decimal, decimal_to_cents};

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite repository implementation.
pub struct SqliteRepo {
    pool: SqlitePool,
}

impl SqliteRepo {
    /// Creates a new SQLite repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            // Remove query parameters
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;

        // Run migration from migration file
        let ddl = include_str!("../migrations/0001_create_transactions.sql");
        sqlx::query(ddl).execute(&pool).await?;

        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates the database schema (for testing with existing pool).
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        let ddl = include_str!("../migrations/0001_create_transactions.sql");
        sqlx::query(ddl)
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::Storage(e.to_string()))?;

        Ok(())
    }
}

fn amount_predicate(filter: AmountFilter) -> &'static str {
    match filter {
        AmountFilter::All => "",
        AmountFilter::Income => " AND amount_cents > 0",
        AmountFilter::Expense => " AND amount_cents < 0",
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl TransactionRepository for SqliteRepo {
    async fn insert(&self, tx: NewTransaction) -> Result<Transaction, RepoError> {
        let cents = decimal_to_cents(&tx.amount)?;

        let row: DbTransaction = sqlx::query_as(
            r#"INSERT INTO transactions (user_id, title, amount_cents, category)
               VALUES (?, ?, ?, ?)
               RETURNING id, user_id, title, amount_cents, category, created_at"#,
        )
        .bind(&tx.user_id)
        .bind(&tx.title)
        .bind(cents)
        .bind(&tx.category)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepoError::Storage(e.to_string()))?;

        row.into_domain()
    }

    async fn find_by_user(&self, user_id: &str) -> Result<Vec<Transaction>, RepoError> {
        let rows: Vec<DbTransaction> = sqlx::query_as(
            r#"SELECT id, user_id, title, amount_cents, category, created_at
               FROM transactions WHERE user_id = ?
               ORDER BY created_at DESC, id DESC"#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::Storage(e.to_string()))?;

        rows.into_iter().map(DbTransaction::into_domain).collect()
    }

    async fn delete_by_id(&self, id: TransactionId) -> Result<Option<Transaction>, RepoError> {
        let row: Option<DbTransaction> = sqlx::query_as(
            r#"DELETE FROM transactions WHERE id = ?
               RETURNING id, user_id, title, amount_cents, category, created_at"#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::Storage(e.to_string()))?;

        row.map(DbTransaction::into_domain).transpose()
    }

    async fn sum_by_user(
        &self,
        user_id: &str,
        filter: AmountFilter,
    ) -> Result<Decimal, RepoError> {
        let sql = format!(
            "SELECT COALESCE(SUM(amount_cents), 0) FROM transactions WHERE user_id = ?{}",
            amount_predicate(filter)
        );

        let (cents,): (i64,) = sqlx::query_as(&sql)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepoError::Storage(e.to_string()))?;

        Ok(cents_to_decimal(cents))
    }
}
