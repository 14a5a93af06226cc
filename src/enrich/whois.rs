//! WHOIS lookup.

use crate::config::Config;
use crate::error_handling::LookupStats;
use crate::ioc::{Ioc, IocKind};

use super::types::Section;

/// Fetches WHOIS/registration data for an IOC.
///
/// Branches by classification: IP addresses go to the RIPEstat-style data
/// API, domains to a generic WHOIS API. The two providers return different
/// shapes; both are passed through untouched. Any failure degrades to a
/// placeholder.
pub async fn fetch_whois(
    client: &reqwest::Client,
    config: &Config,
    stats: &LookupStats,
    ioc: &Ioc,
) -> Section {
    log::debug!("whois lookup for {} ({})", ioc.query, ioc.kind);
    let request = match ioc.kind {
        IocKind::Ip => {
            let url = format!(
                "{}/data/whois/data.json",
                config.whois_ip_base.trim_end_matches('/')
            );
            client.get(&url).query(&[("resource", ioc.query.as_str())])
        }
        IocKind::Domain => {
            let url = format!(
                "{}/v1/whois",
                config.whois_domain_base.trim_end_matches('/')
            );
            client.get(&url).query(&[("domain", ioc.query.as_str())])
        }
    };
    super::get_json(request, "whois", stats).await
}
