mod aggregate;
mod classify;
mod index;

pub use aggregate::*;
pub use classify::*;

#[cfg(test)]
mod test;

use crate::model::{
    CorrelationOptions, HostMatchSet, HostMatches, MatchOutcome, MatchRecord, RunSummary,
};
use index::ProductIndex;
use vigil_common::model::{Host, VulnerabilityRecord};
use vigil_common::normalize::normalize;
use vigil_common::version;

/// The correlation engine.
///
/// A run is a pure function of the host snapshot, the vulnerability
/// snapshot and the options: no state is held across runs, and identical
/// inputs produce an identical [`HostMatchSet`] and [`RunSummary`].
#[derive(Clone, Copy, Debug, Default)]
pub struct CorrelationService;

impl CorrelationService {
    pub fn new() -> Self {
        Self
    }

    /// Correlate every host against every vulnerability.
    ///
    /// Traversal order per host is vulnerability feed order, then
    /// installed-software order; every classification outcome becomes one
    /// [`MatchRecord`]. A host accumulates one record per matching software
    /// item, so the same CVE may appear several times for one host.
    ///
    /// Internally a [`ProductIndex`] narrows each software item to its
    /// candidate vulnerabilities; candidates are re-sorted into feed order
    /// so the index changes no observable outcome. Malformed version data
    /// never fails a run, and empty snapshots yield empty results.
    pub fn run(
        &self,
        hosts: &[Host],
        cves: &[VulnerabilityRecord],
        options: CorrelationOptions,
    ) -> (HostMatchSet, RunSummary) {
        log::debug!(
            "correlating {} host(s) against {} vulnerability record(s), match_version: {}",
            hosts.len(),
            cves.len(),
            options.match_version
        );

        let classifier = MatchClassifier::new(options);
        let index = ProductIndex::new(cves);

        let mut summary = RunSummary::default();
        let mut set = HostMatchSet::default();

        for host in hosts {
            let mut hits = Vec::new();
            for (software_position, software) in host.installed_software.iter().enumerate() {
                for &cve_position in index.candidates(&normalize(&software.name)) {
                    hits.push((cve_position, software_position));
                }
            }
            // restore feed order, then software order
            hits.sort_unstable();

            let mut matches = Vec::new();
            for (cve_position, software_position) in hits {
                let cve = &cves[cve_position];
                let software = &host.installed_software[software_position];
                let installed = version::usable_version(software.version.as_deref());

                let Some(outcome) = classifier.classify(&software.name, installed, &cve.affected)
                else {
                    continue;
                };

                let match_type = outcome.match_type();
                let (affected_product, affected_version, keyword) = match outcome {
                    MatchOutcome::Name {
                        product,
                        less_than_or_equal,
                    } => (Some(product), less_than_or_equal, None),
                    MatchOutcome::NameAndVersion {
                        product,
                        less_than_or_equal,
                    } => (Some(product), Some(less_than_or_equal), None),
                    MatchOutcome::Keyword { keyword } => (None, None, Some(keyword)),
                };

                log::debug!(
                    "host {}: {} matched {} ({})",
                    host.id,
                    cve.id,
                    software.name,
                    match_type
                );

                summary.record(match_type);
                matches.push(MatchRecord {
                    host_id: host.id.clone(),
                    software_name: Some(software.name.clone()),
                    software_version: software.version.clone(),
                    cve_id: cve.id.clone(),
                    severity: cve.severity.clone(),
                    description: cve.description.clone(),
                    published_date: cve.published_date,
                    url: cve.url.clone(),
                    match_type,
                    affected_product,
                    affected_version,
                    keyword,
                });
            }

            set.hosts.push(HostMatches {
                host_id: host.id.clone(),
                matches,
            });
        }

        log::info!(
            "correlation run complete: {} total, {} name-only, {} name-and-version, {} keyword",
            summary.total_matches,
            summary.name_only_matches,
            summary.name_and_version_matches,
            summary.keyword_matches
        );

        (set, summary)
    }
}
