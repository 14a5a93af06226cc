//! HTTP lookup server.
//!
//! Provides two endpoints:
//! - `/api/lookup` - IOC enrichment lookup
//! - `/status` - JSON counters for monitoring
//!
//! Every response carries `Content-Type: application/json` and the
//! permissive CORS headers of the original endpoint contract.

mod handlers;
mod types;

use axum::routing::get;
use axum::Router;

use handlers::{lookup_handler, status_handler};
pub use types::{
    AppState, ErrorResponse, LookupParams, LookupResponse, StatusResponse, UpstreamErrorCounts,
};

/// Builds the service router over the given state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/lookup", get(lookup_handler))
        .route("/status", get(status_handler))
        .with_state(state)
}

/// Serves the router on an already-bound listener until the process exits.
pub async fn serve(listener: tokio::net::TcpListener, state: AppState) -> Result<(), anyhow::Error> {
    let app = build_router(state);
    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Lookup server error: {}", e))?;
    Ok(())
}
