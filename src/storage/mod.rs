//! Lookup log storage.
//!
//! Optional SQLite-backed log of completed lookups. When no database path is
//! configured the service runs without any of this; when configured, every
//! lookup appends one row, fire-and-forget.

mod insert;
mod pool;

pub use insert::insert_ioc_log;
pub use pool::init_db_pool;

use sqlx::{Pool, Sqlite};

use crate::error_handling::DatabaseError;

/// Creates the `ioc_logs` table if it does not exist.
pub async fn run_migrations(pool: &Pool<Sqlite>) -> Result<(), DatabaseError> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS ioc_logs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            query TEXT NOT NULL,
            ioc_type TEXT NOT NULL,
            result TEXT NOT NULL,
            created_at INTEGER NOT NULL
        )",
    )
    .execute(pool)
    .await
    .map_err(DatabaseError::SqlError)?;

    Ok(())
}
