use crate::model::{HostMatchDocument, HostMatchSet};

/// Shape a run's [`HostMatchSet`] into the sparse per-host documents
/// consumed by the persistence and export collaborators.
///
/// Hosts with zero matches produce no document. Matches keep the traversal
/// order of the run that produced them.
pub fn to_persistable(set: &HostMatchSet) -> Vec<HostMatchDocument> {
    set.hosts
        .iter()
        .filter(|host| !host.matches.is_empty())
        .map(|host| HostMatchDocument {
            host_id: host.host_id.clone(),
            matched_cves: host.matches.iter().map(Into::into).collect(),
        })
        .collect()
}
