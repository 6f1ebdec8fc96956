use utoipa::ToSchema;

/// A monitored host, as read from the inventory collaborator.
///
/// The engine only ever consumes a snapshot; host lifecycle is owned
/// elsewhere.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Host {
    pub id: String,
    #[serde(default)]
    pub installed_software: Vec<InstalledSoftware>,
    /// Optional free-text keywords describing the host.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

/// One installed software record on a host.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InstalledSoftware {
    pub name: String,
    /// The version as reported by the inventory. May be absent, or a
    /// sentinel placeholder like `"unknown"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl InstalledSoftware {
    pub fn new(name: impl Into<String>, version: Option<impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            version: version.map(Into::into),
        }
    }
}
