use chrono::{DateTime, Utc};
use serde::{de, ser, Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Classification of a correlation outcome.
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord, Hash, ToSchema)]
#[schema(rename_all = "snake_case")]
pub enum MatchType {
    /// Some affected-product name equals the software name; the version
    /// check was skipped or did not hold.
    NameOnly,

    /// Name equality plus a successful inclusive upper-bound version check.
    NameAndVersion,

    /// The vulnerability description contains one of the host's keywords.
    Keyword,
}

impl MatchType {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchType::NameOnly => "name_only",
            MatchType::NameAndVersion => "name_and_version",
            MatchType::Keyword => "keyword",
        }
    }
}

impl FromStr for MatchType {
    type Err = UnknownMatchType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name_only" => Ok(MatchType::NameOnly),
            "name_and_version" => Ok(MatchType::NameAndVersion),
            "keyword" => Ok(MatchType::Keyword),
            _ => Err(UnknownMatchType { name: s.to_owned() }),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown match type: {name}")]
pub struct UnknownMatchType {
    pub name: String,
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MatchType {
    fn deserialize<D: de::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer)?
            .parse()
            .map_err(de::Error::custom)
    }
}

impl Serialize for MatchType {
    fn serialize<S: ser::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_str().serialize(serializer)
    }
}

/// The transient result of evaluating one installed-software record (or the
/// host's keywords) against one vulnerability. Never persisted standalone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchOutcome {
    /// Name equality only. Carries the matched entry's upper bound as given,
    /// even when it was absent or unparseable.
    Name {
        product: String,
        less_than_or_equal: Option<String>,
    },
    /// Name equality and the installed version lies within the bound.
    NameAndVersion {
        product: String,
        less_than_or_equal: String,
    },
    /// Keyword containment in the vulnerability description.
    Keyword { keyword: String },
}

impl MatchOutcome {
    pub fn match_type(&self) -> MatchType {
        match self {
            MatchOutcome::Name { .. } => MatchType::NameOnly,
            MatchOutcome::NameAndVersion { .. } => MatchType::NameAndVersion,
            MatchOutcome::Keyword { .. } => MatchType::Keyword,
        }
    }
}

/// Options for one correlation run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationOptions {
    /// Attempt to upgrade name matches to name-and-version matches. Off by
    /// default: name-only correlation.
    #[serde(default)]
    pub match_version: bool,
}

/// One matched (host, software, vulnerability) triple.
///
/// A single vulnerability may appear several times for the same host, once
/// per matching installed-software record; records are not deduplicated at
/// the CVE level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub host_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub software_name: Option<String>,
    /// The installed version exactly as reported by the inventory,
    /// unnormalized. Sentinel placeholders are preserved here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub software_version: Option<String>,
    pub cve_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub match_type: MatchType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_product: Option<String>,
    /// The matched entry's inclusive upper bound, as given in the feed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

/// All match records for one host, in traversal order (vulnerability feed
/// order, then installed-software order).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HostMatches {
    pub host_id: String,
    pub matches: Vec<MatchRecord>,
}

/// The complete per-host collection of match records produced by one run.
///
/// Contains an entry for every host in the snapshot, including hosts with
/// zero matches; the sparse persistable form is produced by the aggregator.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HostMatchSet {
    pub hosts: Vec<HostMatches>,
}

impl HostMatchSet {
    pub fn get(&self, host_id: &str) -> Option<&HostMatches> {
        self.hosts.iter().find(|h| h.host_id == host_id)
    }

    pub fn total_records(&self) -> usize {
        self.hosts.iter().map(|h| h.matches.len()).sum()
    }
}

/// Match counters aggregated across all hosts for one run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub total_matches: u64,
    pub name_only_matches: u64,
    pub name_and_version_matches: u64,
    pub keyword_matches: u64,
}

impl RunSummary {
    pub fn record(&mut self, match_type: MatchType) {
        self.total_matches += 1;
        match match_type {
            MatchType::NameOnly => self.name_only_matches += 1,
            MatchType::NameAndVersion => self.name_and_version_matches += 1,
            MatchType::Keyword => self.keyword_matches += 1,
        }
    }
}

/// One matched vulnerability within a persistable per-host document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchedCve {
    pub cve_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub match_type: MatchType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_product: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub software_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub software_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

impl From<&MatchRecord> for MatchedCve {
    fn from(record: &MatchRecord) -> Self {
        Self {
            cve_id: record.cve_id.clone(),
            severity: record.severity.clone(),
            description: record.description.clone(),
            published_date: record.published_date,
            url: record.url.clone(),
            match_type: record.match_type,
            affected_product: record.affected_product.clone(),
            affected_version: record.affected_version.clone(),
            software_name: record.software_name.clone(),
            software_version: record.software_version.clone(),
            keyword: record.keyword.clone(),
        }
    }
}

/// The per-host document handed to the persistence and export collaborators.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HostMatchDocument {
    pub host_id: String,
    // "CVEs" stays upper-cased on the wire, unlike what camelCase would give
    #[serde(rename = "matchedCVEs")]
    pub matched_cves: Vec<MatchedCve>,
}
