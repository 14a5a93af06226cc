//! Lookup log insertion.

use sqlx::SqlitePool;

use crate::enrich::EnrichmentResult;
use crate::error_handling::DatabaseError;

/// Appends one completed lookup to the `ioc_logs` table.
///
/// The enrichment payload is stored as serialized JSON. There is no
/// uniqueness constraint; every lookup appends a new row.
///
/// # Arguments
///
/// * `pool` - Database connection pool
/// * `query` - Normalized query string
/// * `ioc_type` - Classification tag (`ip` or `domain`)
/// * `result` - Aggregated enrichment payload
pub async fn insert_ioc_log(
    pool: &SqlitePool,
    query: &str,
    ioc_type: &str,
    result: &EnrichmentResult,
) -> Result<(), DatabaseError> {
    let result_json = serde_json::to_string(result).unwrap_or_default();

    sqlx::query(
        "INSERT INTO ioc_logs (query, ioc_type, result, created_at)
         VALUES (?, ?, ?, ?)",
    )
    .bind(query)
    .bind(ioc_type)
    .bind(result_json)
    .bind(chrono::Utc::now().timestamp_millis())
    .execute(pool)
    .await
    .map_err(DatabaseError::SqlError)?;

    Ok(())
}
