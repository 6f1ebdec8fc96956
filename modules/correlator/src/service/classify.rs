use crate::model::{CorrelationOptions, MatchOutcome};
use vigil_common::model::AffectedProduct;
use vigil_common::normalize::normalize;
use vigil_common::version;

/// Decides whether and how one installed-software record matches one
/// vulnerability's affected-product list.
#[derive(Clone, Copy, Debug, Default)]
pub struct MatchClassifier {
    options: CorrelationOptions,
}

impl MatchClassifier {
    pub fn new(options: CorrelationOptions) -> Self {
        Self { options }
    }

    /// Classify one (software, vulnerability) pair.
    ///
    /// The first affected entry whose normalized product name equals the
    /// normalized software name wins; later entries are never consulted,
    /// even if they would yield a more precise version match.
    ///
    /// The version check never excludes a name match. When it is attempted
    /// and holds, the outcome is upgraded to [`MatchOutcome::NameAndVersion`];
    /// when it fails or is skipped (gate off, version absent, either side not
    /// valid semver), the outcome stays [`MatchOutcome::Name`] for the same
    /// entry.
    pub fn classify(
        &self,
        software_name: &str,
        software_version: Option<&str>,
        affected: &[AffectedProduct],
    ) -> Option<MatchOutcome> {
        let name = normalize(software_name);

        let entry = affected
            .iter()
            .find(|entry| normalize(&entry.product) == name)?;

        if self.options.match_version {
            if let (Some(installed), Some(bound)) =
                (software_version, entry.less_than_or_equal.as_deref())
            {
                if version::less_than_or_equal(installed, bound) == Some(true) {
                    return Some(MatchOutcome::NameAndVersion {
                        product: entry.product.clone(),
                        less_than_or_equal: bound.to_owned(),
                    });
                }
                log::trace!(
                    "version check failed or not computable for {software_name}: {installed} <= {bound}, keeping name-only match"
                );
            }
        }

        Some(MatchOutcome::Name {
            product: entry.product.clone(),
            less_than_or_equal: entry.less_than_or_equal.clone(),
        })
    }

    /// Classify a vulnerability description against a host's keyword list.
    ///
    /// Returns a [`MatchOutcome::Keyword`] for the first normalized keyword
    /// contained in the normalized description. The engine traversal does not
    /// currently invoke this entry point.
    pub fn classify_keyword(
        &self,
        description: &str,
        keywords: &[String],
    ) -> Option<MatchOutcome> {
        let description = normalize(description);

        keywords
            .iter()
            .map(|keyword| normalize(keyword))
            .find(|keyword| description.contains(keyword.as_str()))
            .map(|keyword| MatchOutcome::Keyword { keyword })
    }
}
