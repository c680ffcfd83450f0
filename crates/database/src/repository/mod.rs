use crate::error::DbError;
use sqlx::postgres::{PgPool, Postgres};
use sqlx::Transaction;

mod campaigns;
mod channels;
mod customers;
mod metrics;
mod reports;
mod segments;

pub use channels::ChannelDiff;

/// The `DbRepository` provides a high-level, application-specific interface
/// to the database. It encapsulates all SQL queries and data access logic.
///
/// Every method runs on its own pooled connection inside one transaction.
/// The transaction is committed only on success; on any early return the
/// dropped `Transaction` rolls back and hands its connection back to the pool.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Acquires a connection and opens a transaction on it. Any failure here
    /// means the server could not be used at all.
    async fn begin(&self) -> Result<Transaction<'static, Postgres>, DbError> {
        self.pool.begin().await.map_err(DbError::Unavailable)
    }
}
