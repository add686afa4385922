//! Severity classification and aggregation. Shared by segment rendering and
//! the stats surface so the two can never disagree on a bucket.

use crate::model::{Brief, FirstOccurrence, Severity, SeverityCounts, VerificationResult};
use crate::scanner::{self, ScanItem};
use crate::sequence;

/// Severity for a citation given its (possibly absent) verification result.
/// No result classifies as `Valid`, the coarsest bucket.
pub fn classify_severity(result: Option<&VerificationResult>) -> Severity {
    result.map(|result| result.severity).unwrap_or(Severity::Valid)
}

/// Reduces the full result list into per-severity counts. Closed three-way
/// partition: every result lands in exactly one bucket, so the bucket sum
/// always equals the input length.
pub fn aggregate(results: &[VerificationResult]) -> SeverityCounts {
    let mut counts = SeverityCounts::default();
    for result in results {
        match result.severity {
            Severity::Critical => counts.critical += 1,
            Severity::Warning => counts.warning += 1,
            Severity::Valid => counts.valid += 1,
        }
    }
    counts
}

/// Locates the first citation occurrence with the given severity in document
/// order, reusing the same scan, resolution, and classification as
/// sequencing. Dropped markers (out-of-range ordinals) cannot be occurrences.
pub fn first_occurrence(brief: &Brief, severity: Severity) -> Option<FirstOccurrence> {
    for item in scanner::scan(&brief.content) {
        let ScanItem::Marker { ordinal, start, .. } = item else {
            continue;
        };
        let Some(citation) = sequence::resolve_citation(ordinal, &brief.citations) else {
            continue;
        };
        let result = sequence::match_result(&citation.id, &brief.verification_results);
        if classify_severity(result) == severity {
            return Some(FirstOccurrence {
                severity,
                citation_id: citation.id.clone(),
                ordinal,
                byte_offset: start,
            });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::{aggregate, classify_severity, first_occurrence};
    use crate::model::{Brief, Citation, Severity, VerificationResult};

    fn citation(id: &str) -> Citation {
        Citation {
            id: id.to_string(),
            text: format!("Case {id}"),
            case_name: format!("Case {id}"),
            reporter: "1 U.S. 1".to_string(),
            pin_cite: None,
            year: 1990,
        }
    }

    fn result(citation_id: &str, severity: Severity) -> VerificationResult {
        VerificationResult {
            citation_id: citation_id.to_string(),
            status: severity.as_str().to_string(),
            severity,
            message: String::new(),
            details: None,
        }
    }

    #[test]
    fn classify_defaults_to_valid_without_a_result() {
        assert_eq!(classify_severity(None), Severity::Valid);

        let critical = result("c1", Severity::Critical);
        assert_eq!(classify_severity(Some(&critical)), Severity::Critical);
    }

    #[test]
    fn aggregate_partitions_every_result_exactly_once() {
        let results = vec![
            result("c1", Severity::Valid),
            result("c2", Severity::Warning),
            result("c3", Severity::Critical),
            result("c4", Severity::Valid),
            result("c5", Severity::Critical),
        ];

        let counts = aggregate(&results);

        assert_eq!(counts.valid, 2);
        assert_eq!(counts.warning, 1);
        assert_eq!(counts.critical, 2);
        assert_eq!(counts.total(), results.len());
    }

    #[test]
    fn aggregate_of_empty_list_is_all_zero() {
        let counts = aggregate(&[]);
        assert_eq!(counts.total(), 0);
    }

    #[test]
    fn unknown_severity_string_deserializes_into_the_valid_bucket() {
        let raw = r#"
        {
          "citationId": "c1",
          "status": "quote_mismatch",
          "severity": "mystery",
          "message": "odd"
        }
        "#;

        let parsed: VerificationResult =
            serde_json::from_str(raw).expect("result with unknown severity should deserialize");
        assert_eq!(parsed.severity, Severity::Valid);
        assert_eq!(aggregate(&[parsed]).valid, 1);
    }

    #[test]
    fn first_occurrence_follows_document_order_not_registry_order() {
        let brief = Brief {
            title: String::new(),
            content: "x [[CITATION:2]] y [[CITATION:1]] z".to_string(),
            citations: vec![citation("c1"), citation("c2")],
            verification_results: vec![
                result("c1", Severity::Warning),
                result("c2", Severity::Warning),
            ],
        };

        let hit = first_occurrence(&brief, Severity::Warning).expect("warning exists");
        assert_eq!(hit.citation_id, "c2");
        assert_eq!(hit.ordinal, 2);
        assert_eq!(hit.byte_offset, 2);
    }

    #[test]
    fn first_occurrence_skips_dropped_markers_and_misses_cleanly() {
        let brief = Brief {
            title: String::new(),
            content: "[[CITATION:9]] then [[CITATION:1]]".to_string(),
            citations: vec![citation("c1")],
            verification_results: vec![result("c1", Severity::Valid)],
        };

        assert!(first_occurrence(&brief, Severity::Critical).is_none());

        let valid = first_occurrence(&brief, Severity::Valid).expect("c1 is valid");
        assert_eq!(valid.citation_id, "c1");
    }

    #[test]
    fn first_occurrence_treats_unverified_citations_as_valid() {
        let brief = Brief {
            title: String::new(),
            content: "[[CITATION:1]]".to_string(),
            citations: vec![citation("c1")],
            verification_results: vec![],
        };

        let hit = first_occurrence(&brief, Severity::Valid).expect("unverified counts as valid");
        assert_eq!(hit.byte_offset, 0);
    }
}
