//! Threat reputation lookup.

use serde_json::json;

use crate::config::THREAT_MAX_AGE_DAYS;
use crate::error_handling::{LookupStats, UpstreamErrorKind};
use crate::ioc::{Ioc, IocKind};

use super::types::Section;

/// Fetches threat reputation data for an IOC.
///
/// The reputation provider only accepts IP addresses; a domain IOC degrades
/// to a placeholder. Without an API key no call is made at all and the
/// section is a static stub, marked `"stub": true` so consumers can tell it
/// apart from a real report.
pub async fn fetch_threat(
    client: &reqwest::Client,
    base: &str,
    api_key: Option<&str>,
    stats: &LookupStats,
    ioc: &Ioc,
) -> Section {
    if ioc.kind != IocKind::Ip {
        stats.record_upstream_error(UpstreamErrorKind::Unsupported);
        return Section::failed(
            UpstreamErrorKind::Unsupported,
            "threat: reputation provider accepts IP addresses only",
        );
    }

    let Some(key) = api_key else {
        log::debug!("threat lookup for {} served as stub (no API key)", ioc.query);
        return Section::Data(json!({
            "stub": true,
            "ipAddress": ioc.query,
            "abuseConfidenceScore": 0,
            "note": "reputation lookup disabled; no API key configured",
        }));
    };

    let url = format!("{}/api/v2/check", base.trim_end_matches('/'));
    log::debug!("threat lookup for {}", ioc.query);
    let max_age = THREAT_MAX_AGE_DAYS.to_string();
    let request = client
        .get(&url)
        .header("Key", key)
        .header("Accept", "application/json")
        .query(&[
            ("ipAddress", ioc.query.as_str()),
            ("maxAgeInDays", max_age.as_str()),
        ]);
    super::get_json(request, "threat", stats).await
}
