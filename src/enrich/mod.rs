//! IOC enrichment: upstream fetchers and aggregation.
//!
//! Each enrichment source is fetched independently and guarded
//! independently: a timeout, connect failure, bad status, or undecodable
//! body degrades that one section to an `{"error": ...}` placeholder and is
//! never propagated to the caller. The three sources run sequentially, each
//! blocking up to the configured per-call timeout.

mod geo;
mod threat;
mod types;
mod whois;

pub use geo::fetch_geolocation;
pub use threat::fetch_threat;
pub use types::{EnrichmentResult, Section};
pub use whois::fetch_whois;

use crate::config::Config;
use crate::error_handling::{categorize_reqwest_error, LookupStats, UpstreamErrorKind};
use crate::ioc::Ioc;

/// Runs all enrichment sources for one IOC and assembles the result.
///
/// Sources execute sequentially; a failure in one never aborts the others.
pub async fn enrich(
    client: &reqwest::Client,
    config: &Config,
    stats: &LookupStats,
    ioc: &Ioc,
) -> EnrichmentResult {
    let geo = fetch_geolocation(client, &config.geo_base, stats, ioc).await;
    let threat = fetch_threat(
        client,
        &config.threat_base,
        config.threat_api_key.as_deref(),
        stats,
        ioc,
    )
    .await;
    let whois = fetch_whois(client, config, stats, ioc).await;

    EnrichmentResult { geo, threat, whois }
}

/// Sends an upstream request and parses the body as JSON, converting every
/// failure mode into a placeholder section.
///
/// # Arguments
///
/// * `request` - Prepared request builder for the upstream call
/// * `source` - Section name used in log lines and placeholder messages
/// * `stats` - Counters to record upstream failures against
pub(crate) async fn get_json(
    request: reqwest::RequestBuilder,
    source: &str,
    stats: &LookupStats,
) -> Section {
    let response = match request.send().await {
        Ok(response) => response,
        Err(e) => {
            return upstream_failure(source, stats, categorize_reqwest_error(&e), &e);
        }
    };

    let response = match response.error_for_status() {
        Ok(response) => response,
        Err(e) => {
            return upstream_failure(source, stats, UpstreamErrorKind::Status, &e);
        }
    };

    match response.json::<serde_json::Value>().await {
        Ok(value) => {
            log::debug!("{source} lookup succeeded");
            Section::Data(value)
        }
        Err(e) => upstream_failure(source, stats, UpstreamErrorKind::Decode, &e),
    }
}

fn upstream_failure(
    source: &str,
    stats: &LookupStats,
    kind: UpstreamErrorKind,
    error: &reqwest::Error,
) -> Section {
    stats.record_upstream_error(kind);
    log::warn!("{source} lookup failed ({kind}): {error}");
    Section::failed(kind, format!("{source}: {kind}"))
}
