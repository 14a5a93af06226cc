//! Configuration types and CLI options.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    CACHE_TTL_SECS, DEFAULT_BIND_ADDR, DEFAULT_PORT, DEFAULT_USER_AGENT, GEO_API_BASE,
    THREAT_API_BASE, UPSTREAM_TIMEOUT_SECS, WHOIS_DOMAIN_API_BASE, WHOIS_IP_API_BASE,
};

/// Logging level for the service.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Service configuration.
///
/// Doubles as the CLI surface (via clap) and the library configuration; all
/// fields have defaults so it can be constructed programmatically with
/// `Config::default()` and overridden field by field.
///
/// # Examples
///
/// ```no_run
/// use ioc_enrich::Config;
///
/// let config = Config {
///     port: 9000,
///     geo_base: "http://127.0.0.1:4000".to_string(),
///     ..Default::default()
/// };
/// ```
#[derive(Parser, Debug, Clone)]
#[command(
    name = "ioc_enrich",
    about = "Enrichment HTTP service for IPs and domains (geolocation, threat reputation, WHOIS)."
)]
pub struct Config {
    /// Address to bind the HTTP server to
    #[arg(long, default_value = DEFAULT_BIND_ADDR)]
    pub bind: String,

    /// Port to bind the HTTP server to
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Base URL of the geolocation provider
    #[arg(long = "geo-base", default_value = GEO_API_BASE)]
    pub geo_base: String,

    /// Base URL of the threat reputation provider
    #[arg(long = "threat-base", default_value = THREAT_API_BASE)]
    pub threat_base: String,

    /// Base URL of the WHOIS provider used for IP addresses
    #[arg(long = "whois-ip-base", default_value = WHOIS_IP_API_BASE)]
    pub whois_ip_base: String,

    /// Base URL of the WHOIS provider used for domain names
    #[arg(long = "whois-domain-base", default_value = WHOIS_DOMAIN_API_BASE)]
    pub whois_domain_base: String,

    /// API key for the threat reputation provider. Without a key the threat
    /// section is served as a static stub instead of calling out.
    #[arg(long = "threat-api-key", env = "ABUSEIPDB_API_KEY")]
    pub threat_api_key: Option<String>,

    /// SQLite database path for the lookup log. When unset, lookups are not
    /// logged to storage at all.
    #[arg(long = "log-db", env = "IOC_LOG_DB_PATH")]
    pub log_db: Option<PathBuf>,

    /// Per-upstream-call timeout in seconds
    #[arg(long = "upstream-timeout", default_value_t = UPSTREAM_TIMEOUT_SECS)]
    pub upstream_timeout_secs: u64,

    /// Response cache time-to-live in seconds
    #[arg(long = "cache-ttl", default_value_t = CACHE_TTL_SECS)]
    pub cache_ttl_secs: u64,

    /// User-Agent header for upstream calls
    #[arg(long = "user-agent", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Log level
    #[arg(long = "log-level", value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long = "log-format", value_enum, default_value = "plain")]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND_ADDR.to_string(),
            port: DEFAULT_PORT,
            geo_base: GEO_API_BASE.to_string(),
            threat_base: THREAT_API_BASE.to_string(),
            whois_ip_base: WHOIS_IP_API_BASE.to_string(),
            whois_domain_base: WHOIS_DOMAIN_API_BASE.to_string(),
            threat_api_key: None,
            log_db: None,
            upstream_timeout_secs: UPSTREAM_TIMEOUT_SECS,
            cache_ttl_secs: CACHE_TTL_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}
