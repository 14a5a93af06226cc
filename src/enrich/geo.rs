//! Geolocation lookup.

use crate::error_handling::LookupStats;
use crate::ioc::Ioc;

use super::types::Section;

/// Fetches geolocation data for an IOC.
///
/// The provider resolves both IP addresses and hostnames, so the query is
/// passed through regardless of classification. Any failure degrades to a
/// placeholder.
pub async fn fetch_geolocation(
    client: &reqwest::Client,
    base: &str,
    stats: &LookupStats,
    ioc: &Ioc,
) -> Section {
    let url = format!("{}/json/{}", base.trim_end_matches('/'), ioc.query);
    log::debug!("geolocation lookup for {}", ioc.query);
    super::get_json(client.get(&url), "geolocation", stats).await
}
