use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

pub mod filter;
pub mod models;
pub mod repositories;

pub type DbPool = sqlx::SqlitePool;
pub type DbTransaction = sqlx::Transaction<'static, sqlx::Sqlite>;

/// Create a connection pool from a `sqlite://` URL.
///
/// The database file is created if missing. Every connection runs with
/// foreign keys enforced, WAL journaling and a 5 s busy timeout.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await
}

/// Apply all pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}

/// Begin a transaction that takes the write lock immediately.
///
/// A deferred transaction that reads before writing cannot upgrade its lock
/// while another writer holds it, and SQLite fails it with `SQLITE_BUSY`
/// instead of waiting. Taking the lock at `BEGIN` lets the busy timeout
/// queue writers.
pub async fn begin_write(pool: &DbPool) -> Result<DbTransaction, sqlx::Error> {
    pool.begin_with("BEGIN IMMEDIATE").await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(pool)
        .await
        .map(|_| ())
}
