use std::collections::HashMap;
use vigil_common::model::VulnerabilityRecord;
use vigil_common::normalize::normalize;

/// Precomputed index from normalized affected-product name to candidate
/// vulnerability positions in the feed snapshot.
///
/// Built once per run. Candidate lists retain feed order, and a
/// vulnerability appears at most once per product name, so looking up a
/// software name yields exactly the vulnerabilities a full scan would have
/// matched, in the same order. Classification still scans each candidate's
/// affected list to honor the first-entry tie-break.
#[derive(Debug, Default)]
pub(crate) struct ProductIndex {
    by_product: HashMap<String, Vec<usize>>,
}

impl ProductIndex {
    pub(crate) fn new(cves: &[VulnerabilityRecord]) -> Self {
        let mut by_product: HashMap<String, Vec<usize>> = HashMap::new();

        for (position, cve) in cves.iter().enumerate() {
            for entry in &cve.affected {
                let candidates = by_product.entry(normalize(&entry.product)).or_default();
                if candidates.last() != Some(&position) {
                    candidates.push(position);
                }
            }
        }

        Self { by_product }
    }

    /// Feed-ordered candidate positions for an already normalized name.
    pub(crate) fn candidates(&self, normalized_name: &str) -> &[usize] {
        self.by_product
            .get(normalized_name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
