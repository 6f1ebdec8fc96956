use super::*;
use crate::model::{CorrelationOptions, MatchOutcome, MatchType};
use rstest::rstest;
use vigil_common::model::AffectedProduct;

fn with_version_gate() -> MatchClassifier {
    MatchClassifier::new(CorrelationOptions {
        match_version: true,
    })
}

fn entry(product: &str, bound: Option<&str>) -> AffectedProduct {
    AffectedProduct::new(product, bound)
}

#[test]
fn no_name_equality_is_no_match() {
    let classifier = with_version_gate();
    let affected = vec![entry("apache", Some("9.9.9"))];

    assert_eq!(classifier.classify("nginx", Some("1.0.0"), &affected), None);
}

#[test]
fn name_equality_is_normalized() {
    let classifier = MatchClassifier::default();
    let affected = vec![entry("Apache ", None)];

    let outcome = classifier.classify("  apache", None, &affected);
    assert_eq!(
        outcome,
        Some(MatchOutcome::Name {
            product: "Apache ".into(),
            less_than_or_equal: None,
        })
    );
}

#[test]
fn first_matching_entry_wins() {
    let classifier = with_version_gate();
    let affected = vec![entry("x", Some("1.0.0")), entry("x", Some("9.9.9"))];

    // the second entry would upgrade to a version match, but is never consulted
    let outcome = classifier.classify("x", Some("5.0.0"), &affected);
    assert_eq!(
        outcome,
        Some(MatchOutcome::Name {
            product: "x".into(),
            less_than_or_equal: Some("1.0.0".into()),
        })
    );
}

#[test]
fn failed_version_check_does_not_exclude() {
    let classifier = with_version_gate();
    let affected = vec![entry("apache", Some("2.4.50"))];

    let outcome = classifier.classify("apache", Some("2.4.51"), &affected);
    assert_eq!(
        outcome,
        Some(MatchOutcome::Name {
            product: "apache".into(),
            less_than_or_equal: Some("2.4.50".into()),
        })
    );
}

#[test]
fn satisfied_version_check_upgrades() {
    let classifier = with_version_gate();
    let affected = vec![entry("apache", Some("2.4.50"))];

    let outcome = classifier.classify("apache", Some("2.4.49"), &affected);
    assert_eq!(
        outcome,
        Some(MatchOutcome::NameAndVersion {
            product: "apache".into(),
            less_than_or_equal: "2.4.50".into(),
        })
    );
}

#[rstest]
#[case::invalid_bound(Some("1.0.0"), Some("latest"))]
#[case::missing_bound(Some("1.0.0"), None)]
#[case::invalid_version(Some("5.0"), Some("9.9.9"))]
#[case::missing_version(None, Some("9.9.9"))]
fn skipped_version_check_stays_name_only(
    #[case] version: Option<&str>,
    #[case] bound: Option<&str>,
) {
    let classifier = with_version_gate();
    let affected = vec![entry("apache", bound)];

    let outcome = classifier.classify("apache", version, &affected);
    assert_eq!(outcome.map(|o| o.match_type()), Some(MatchType::NameOnly));
}

#[test]
fn version_gate_off_never_upgrades() {
    let classifier = MatchClassifier::new(CorrelationOptions {
        match_version: false,
    });
    let affected = vec![entry("apache", Some("2.4.50"))];

    let outcome = classifier.classify("apache", Some("2.4.49"), &affected);
    assert_eq!(outcome.map(|o| o.match_type()), Some(MatchType::NameOnly));
}

#[test]
fn keyword_containment_matches() {
    let classifier = MatchClassifier::default();

    let outcome = classifier.classify_keyword(
        "A heap overflow in OpenSSL allows remote attackers to crash the server",
        &["nginx".into(), " OpenSSL ".into()],
    );
    assert_eq!(
        outcome,
        Some(MatchOutcome::Keyword {
            keyword: "openssl".into(),
        })
    );
}

#[test]
fn first_contained_keyword_wins() {
    let classifier = MatchClassifier::default();

    let outcome = classifier.classify_keyword(
        "affects both apache and nginx deployments",
        &["apache".into(), "nginx".into()],
    );
    assert_eq!(
        outcome,
        Some(MatchOutcome::Keyword {
            keyword: "apache".into(),
        })
    );
}

#[test]
fn unrelated_keywords_do_not_match() {
    let classifier = MatchClassifier::default();

    let outcome = classifier.classify_keyword("A flaw in zlib", &["openssl".into()]);
    assert_eq!(outcome, None);
}

mod aggregate {
    use crate::model::{HostMatchSet, HostMatches, MatchRecord, MatchType};
    use crate::service::to_persistable;

    fn record(host_id: &str, cve_id: &str) -> MatchRecord {
        MatchRecord {
            host_id: host_id.into(),
            software_name: Some("apache".into()),
            software_version: Some("2.4.49".into()),
            cve_id: cve_id.into(),
            severity: Some("HIGH".into()),
            description: "test".into(),
            published_date: None,
            url: None,
            match_type: MatchType::NameOnly,
            affected_product: Some("apache".into()),
            affected_version: None,
            keyword: None,
        }
    }

    #[test]
    fn hosts_without_matches_produce_no_document() {
        let set = HostMatchSet {
            hosts: vec![
                HostMatches {
                    host_id: "host-a".into(),
                    matches: vec![],
                },
                HostMatches {
                    host_id: "host-b".into(),
                    matches: vec![record("host-b", "CVE-2024-0001")],
                },
            ],
        };

        let documents = to_persistable(&set);
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].host_id, "host-b");
        assert_eq!(documents[0].matched_cves[0].cve_id, "CVE-2024-0001");
    }

    #[test]
    fn document_order_follows_the_set() {
        let set = HostMatchSet {
            hosts: vec![
                HostMatches {
                    host_id: "host-b".into(),
                    matches: vec![record("host-b", "CVE-2024-0002")],
                },
                HostMatches {
                    host_id: "host-a".into(),
                    matches: vec![
                        record("host-a", "CVE-2024-0001"),
                        record("host-a", "CVE-2024-0002"),
                    ],
                },
            ],
        };

        let documents = to_persistable(&set);
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].host_id, "host-b");
        assert_eq!(documents[1].host_id, "host-a");
        assert_eq!(documents[1].matched_cves.len(), 2);
    }
}
