use chrono::{DateTime, Utc};
use utoipa::ToSchema;

/// A published vulnerability record (CVE), as produced by the feed-ingestion
/// collaborator. Consumed read-only.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VulnerabilityRecord {
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<DateTime<Utc>>,
    /// Severity label as present on the feed record. The engine treats this
    /// as opaque and never re-scores.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Affected products, in feed order. Order is significant: the first
    /// name-equal entry wins during classification.
    #[serde(default)]
    pub affected: Vec<AffectedProduct>,
}

/// One product name plus an inclusive upper version bound describing
/// vulnerable releases.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AffectedProduct {
    pub product: String,
    /// Inclusive upper bound. May be absent, or a string that is not a valid
    /// semantic version; both are tolerated and simply disable the version
    /// check for this entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub less_than_or_equal: Option<String>,
}

impl AffectedProduct {
    pub fn new(product: impl Into<String>, less_than_or_equal: Option<impl Into<String>>) -> Self {
        Self {
            product: product.into(),
            less_than_or_equal: less_than_or_equal.map(Into::into),
        }
    }
}
