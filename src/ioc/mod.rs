//! IOC normalization and classification.
//!
//! An indicator of compromise arrives as a raw query string that may carry a
//! scheme, path, or port. This module reduces it to a bare host, classifies
//! it as an IP address or domain name, and validates the caller's optional
//! `type` hint against that classification.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::config::MAX_QUERY_LENGTH;
use crate::error_handling::LookupError;

/// Classification of a normalized query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IocKind {
    Ip,
    Domain,
}

impl IocKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IocKind::Ip => "ip",
            IocKind::Domain => "domain",
        }
    }
}

impl std::fmt::Display for IocKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-supplied classification hint from the `type` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeHint {
    #[default]
    Auto,
    Ip,
    Domain,
}

impl TypeHint {
    /// Parses the optional `type` query parameter.
    ///
    /// An absent or empty parameter means `Auto`; anything other than
    /// `auto`, `ip`, or `domain` is a validation error.
    pub fn from_param(param: Option<&str>) -> Result<Self, LookupError> {
        match param.map(|s| s.trim().to_ascii_lowercase()) {
            None => Ok(TypeHint::Auto),
            Some(s) => match s.as_str() {
                "" | "auto" => Ok(TypeHint::Auto),
                "ip" => Ok(TypeHint::Ip),
                "domain" => Ok(TypeHint::Domain),
                other => Err(LookupError::Validation(format!(
                    "Unknown type hint '{other}' (expected auto, ip, or domain)"
                ))),
            },
        }
    }
}

/// A validated indicator of compromise: the normalized query plus its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ioc {
    /// Normalized query string (bare lowercase host)
    pub query: String,
    /// Detected classification
    pub kind: IocKind,
}

impl Ioc {
    /// Normalizes and classifies a raw query, honoring the `type` hint.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::Validation` if the query is empty after
    /// normalization, exceeds the maximum length, or the hint contradicts
    /// the detected classification.
    pub fn parse(raw: &str, hint: TypeHint) -> Result<Self, LookupError> {
        if raw.len() > MAX_QUERY_LENGTH {
            return Err(LookupError::Validation(format!(
                "Query parameter exceeds maximum length ({} > {})",
                raw.len(),
                MAX_QUERY_LENGTH
            )));
        }

        let query = normalize(raw);
        if query.is_empty() {
            return Err(LookupError::Validation(
                "Query parameter is empty".to_string(),
            ));
        }

        let kind = classify(&query);
        match (hint, kind) {
            (TypeHint::Ip, IocKind::Domain) => Err(LookupError::Validation(format!(
                "Type hint 'ip' contradicts detected classification 'domain' for '{query}'"
            ))),
            (TypeHint::Domain, IocKind::Ip) => Err(LookupError::Validation(format!(
                "Type hint 'domain' contradicts detected classification 'ip' for '{query}'"
            ))),
            _ => Ok(Ioc { query, kind }),
        }
    }
}

/// Reduces a raw query to a bare lowercase host.
///
/// Trims whitespace, case-folds, strips a leading scheme, drops any
/// path/query/fragment suffix, and removes a trailing numeric port.
pub fn normalize(raw: &str) -> String {
    let mut s = raw.trim().to_ascii_lowercase();

    // URL-shaped input: let the URL parser pull out the host
    if s.contains("://") {
        if let Ok(parsed) = url::Url::parse(&s) {
            if let Some(host) = parsed.host_str() {
                return host.to_ascii_lowercase();
            }
        }
        // Unparseable pseudo-URL: drop the scheme and fall through
        if let Some(idx) = s.find("://") {
            s = s[idx + 3..].to_string();
        }
    }

    if let Some(idx) = s.find(|c| c == '/' || c == '?' || c == '#') {
        s.truncate(idx);
    }

    if let Some((host, port)) = s.rsplit_once(':') {
        if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) {
            s = host.to_string();
        }
    }

    s
}

static IPV4_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Classifies a normalized query as an IP address or domain name.
///
/// Matches against a dotted-quad numeric pattern. Octets are deliberately
/// NOT range-checked: `999.999.999.999` classifies as an IP and is left to
/// the upstream providers to reject.
pub fn classify(query: &str) -> IocKind {
    let pattern = IPV4_PATTERN.get_or_init(|| {
        Regex::new(r"^\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}$")
            .expect("hard-coded IPv4 pattern compiles")
    });
    if pattern.is_match(query) {
        IocKind::Ip
    } else {
        IocKind::Domain
    }
}
