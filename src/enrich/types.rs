//! Enrichment result types.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error_handling::UpstreamErrorKind;

/// One enrichment section: raw upstream JSON, or a typed failure.
///
/// Failures serialize as the standard `{"error": <message>}` placeholder so
/// the overall payload shape is stable whether or not a source succeeded,
/// while the kind stays available in-process for logging and counters.
#[derive(Debug, Clone)]
pub enum Section {
    /// The upstream's JSON response, passed through untouched.
    Data(serde_json::Value),
    /// The upstream call failed; the section degrades to a placeholder.
    Failed {
        kind: UpstreamErrorKind,
        message: String,
    },
}

impl Section {
    pub fn failed(kind: UpstreamErrorKind, message: impl Into<String>) -> Self {
        Section::Failed {
            kind,
            message: message.into(),
        }
    }

    pub fn is_data(&self) -> bool {
        matches!(self, Section::Data(_))
    }
}

impl Serialize for Section {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Section::Data(value) => value.serialize(serializer),
            Section::Failed { message, .. } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("error", message)?;
                map.end()
            }
        }
    }
}

/// The aggregated enrichment payload for one IOC.
///
/// Assembled once per lookup and never mutated afterwards; each section is
/// independently either upstream data or a placeholder.
#[derive(Debug, Clone, serde::Serialize)]
pub struct EnrichmentResult {
    pub geo: Section,
    pub threat: Section,
    pub whois: Section,
}
