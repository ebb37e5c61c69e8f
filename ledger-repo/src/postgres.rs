//! PostgreSQL repository adapter.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;

use ledger_types::{
    AmountFilter, NewTransaction, RepoError, Transaction, TransactionId, TransactionRepository,
};

use crate::types::DbTransaction;

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Repository
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL repository backed by a connection pool.
pub struct PostgresRepo {
    pool: PgPool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

/// Runs all database migrations.
async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    execute_migration(
        pool,
        include_str!("../migrations/0001_create_transactions_pg.sql"),
        "0001",
    )
    .await
}

impl PostgresRepo {
    /// Creates a new PostgreSQL repository with automatic migration.
    ///
    /// A migration failure here is fatal to startup; the caller is expected
    /// to abort rather than serve requests against a half-initialized schema.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the database schema (for testing with existing pool).
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        run_migrations(&self.pool)
            .await
            .map_err(|e| RepoError::Storage(e.to_string()))
    }
}

fn amount_predicate(filter: AmountFilter) -> &'static str {
    match filter {
        AmountFilter::All => "",
        AmountFilter::Income => " AND amount > 0",
        AmountFilter::Expense => " AND amount < 0",
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl TransactionRepository for PostgresRepo {
    async fn insert(&self, tx: NewTransaction) -> Result<Transaction, RepoError> {
        let row: DbTransaction = sqlx::query_as(
            r#"INSERT INTO transactions (user_id, title, amount, category)
               VALUES ($1, $2, $3, $4)
               RETURNING id, user_id, title, amount, category, created_at"#,
        )
        .bind(&tx.user_id)
        .bind(&tx.title)
        .bind(tx.amount)
        .bind(&tx.category)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepoError::Storage(e.to_string()))?;

        row.into_domain()
    }

    async fn find_by_user(&self, user_id: &str) -> Result<Vec<Transaction>, RepoError> {
        let rows: Vec<DbTransaction> = sqlx::query_as(
            r#"SELECT id, user_id, title, amount, category, created_at
               FROM transactions WHERE user_id = $1
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
            r#"DELETE FROM transactions WHERE id = $1
               RETURNING id, user_id, title, amount, category, created_at"#,
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
            "SELECT COALESCE(SUM(amount), 0) FROM transactions WHERE user_id = $1{}",
            amount_predicate(filter)
        );

        let (total,): (Decimal,) = sqlx::query_as(&sql)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepoError::Storage(e.to_string()))?;

        Ok(total)
    }
}
