//! Database connection pool management.
//!
//! Initializes the SQLite connection pool with WAL mode enabled and creates
//! the database file when it does not exist.

use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::sync::Arc;

use log::{error, info};
use sqlx::{Pool, Sqlite, SqlitePool};

use crate::error_handling::DatabaseError;

/// Initializes and returns a database connection pool for the lookup log.
///
/// Creates the database file if it doesn't exist and enables WAL mode for
/// better concurrent access.
pub async fn init_db_pool(db_path: &std::path::Path) -> Result<Arc<Pool<Sqlite>>, DatabaseError> {
    let db_path_str = db_path.to_string_lossy().to_string();
    match OpenOptions::new()
        .read(true)
        .write(true)
        .create_new(true)
        .open(&db_path_str)
    {
        Ok(_) => info!("Lookup log database file created."),
        Err(ref e) if e.kind() == ErrorKind::AlreadyExists => {
            info!("Lookup log database file already exists.")
        }
        Err(e) => {
            error!("Failed to create lookup log database file: {e}");
            return Err(DatabaseError::FileCreationError(e.to_string()));
        }
    }

    let pool = SqlitePool::connect(&format!("sqlite:{}", db_path_str))
        .await
        .map_err(|e| {
            error!("Failed to connect to lookup log database: {e}");
            DatabaseError::SqlError(e)
        })?;

    // Enable WAL mode
    sqlx::query("PRAGMA journal_mode=WAL")
        .execute(&pool)
        .await
        .map_err(|e| {
            error!("Failed to set WAL mode: {e}");
            DatabaseError::SqlError(e)
        })?;

    Ok(Arc::new(pool))
}
