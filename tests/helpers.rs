// Shared test helpers for spinning up the lookup server and test databases.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use sqlx::SqlitePool;

use ioc_enrich::cache::ResponseCache;
use ioc_enrich::config::Config;
use ioc_enrich::error_handling::LookupStats;
use ioc_enrich::initialization::init_client;
use ioc_enrich::server::AppState;

/// Returns a localhost port with nothing listening on it, so connections
/// are refused immediately.
#[allow(dead_code)] // Used by other test files
pub fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("should bind ephemeral port");
    let port = listener.local_addr().expect("should have local addr").port();
    drop(listener);
    port
}

/// A config whose upstream bases all point at a closed local port, so no
/// test ever reaches the real providers.
#[allow(dead_code)]
pub fn offline_config() -> Config {
    let dead = format!("http://127.0.0.1:{}", closed_port());
    Config {
        geo_base: dead.clone(),
        threat_base: dead.clone(),
        whois_ip_base: dead.clone(),
        whois_domain_base: dead,
        ..Default::default()
    }
}

/// Binds the real router on an ephemeral port and serves it in the
/// background. Returns the base URL to issue requests against.
#[allow(dead_code)]
pub async fn spawn_app(config: Config) -> String {
    spawn_app_with_pool(config, None).await
}

/// Like `spawn_app`, with an optional lookup log pool attached.
#[allow(dead_code)]
pub async fn spawn_app_with_pool(config: Config, pool: Option<Arc<SqlitePool>>) -> String {
    let client = init_client(&config).expect("should build HTTP client");
    let state = AppState {
        client,
        cache: Arc::new(Mutex::new(ResponseCache::new(Duration::from_secs(
            config.cache_ttl_secs,
        )))),
        config: Arc::new(config),
        stats: Arc::new(LookupStats::new()),
        pool,
        start_time: Arc::new(Instant::now()),
    };

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("should bind test listener");
    let addr = listener.local_addr().expect("should have local addr");
    tokio::spawn(async move {
        let _ = ioc_enrich::server::serve(listener, state).await;
    });

    format!("http://{}", addr)
}

/// Creates a file-backed test database pool with migrations applied.
/// Returns the pool together with the tempdir keeping the file alive.
#[allow(dead_code)]
pub async fn create_test_pool() -> (Arc<SqlitePool>, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let db_path = dir.path().join("ioc_logs_test.db");
    let pool = ioc_enrich::storage::init_db_pool(&db_path)
        .await
        .expect("should create test database pool");
    ioc_enrich::storage::run_migrations(&pool)
        .await
        .expect("should run migrations");
    (pool, dir)
}
