//! HTTP client initialization.

use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::Config;

/// Initializes the shared HTTP client for upstream enrichment calls.
///
/// Creates a `reqwest::Client` configured with:
/// - The per-call timeout from the configuration (applies to every
///   enrichment request made through this client)
/// - The service User-Agent
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(config.upstream_timeout_secs))
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}
