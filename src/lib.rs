//! ioc_enrich library: IOC enrichment lookup service
//!
//! This library provides an HTTP service that accepts an IP address or
//! domain name and returns enrichment data (geolocation, threat reputation,
//! WHOIS) aggregated from third-party lookup services into a single JSON
//! payload, with a short-lived response cache and an optional SQLite lookup
//! log.
//!
//! # Example
//!
//! ```no_run
//! use ioc_enrich::{Config, run_server};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     port: 8080,
//!     ..Default::default()
//! };
//!
//! run_server(config).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an async
//! context.

pub mod cache;
pub mod config;
pub mod enrich;
pub mod error_handling;
pub mod initialization;
pub mod ioc;
pub mod server;
pub mod storage;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use ioc::{classify, normalize, Ioc, IocKind, TypeHint};
pub use run::run_server;

// Internal run module (wires resources together and serves)
mod run {
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, Instant};

    use anyhow::{Context, Result};
    use log::info;

    use crate::cache::ResponseCache;
    use crate::config::Config;
    use crate::error_handling::LookupStats;
    use crate::initialization::init_client;
    use crate::server::AppState;
    use crate::storage::{init_db_pool, run_migrations};

    /// Runs the lookup server with the provided configuration.
    ///
    /// This is the main entry point for the library. It initializes the
    /// shared HTTP client, the response cache, and (when configured) the
    /// lookup log database, then serves `/api/lookup` until the process
    /// exits.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The HTTP client cannot be constructed
    /// - The lookup log database cannot be initialized
    /// - The listen address cannot be bound
    pub async fn run_server(config: Config) -> Result<()> {
        let client = init_client(&config).context("Failed to initialize HTTP client")?;

        let pool = match &config.log_db {
            Some(path) => {
                let pool = init_db_pool(path)
                    .await
                    .context("Failed to initialize lookup log database")?;
                run_migrations(&pool)
                    .await
                    .context("Failed to run lookup log migrations")?;
                info!("Lookup logging enabled: {}", path.display());
                Some(pool)
            }
            None => None,
        };

        let cache = Arc::new(Mutex::new(ResponseCache::new(Duration::from_secs(
            config.cache_ttl_secs,
        ))));
        let stats = Arc::new(LookupStats::new());

        let addr = format!("{}:{}", config.bind, config.port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind lookup server to {addr}"))?;

        info!("Lookup server listening on http://{addr}/");
        info!("  - Lookup: http://{addr}/api/lookup?query=<ip-or-domain>");
        info!("  - Status: http://{addr}/status");

        let state = AppState {
            client,
            cache,
            config: Arc::new(config),
            stats,
            pool,
            start_time: Arc::new(Instant::now()),
        };

        crate::server::serve(listener, state).await
    }
}
