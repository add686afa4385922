//! Merges the marker scan with the citation registry and verification
//! results into the ordered render-segment list handed to presentation.

use crate::labels::{self, StatusLabels};
use crate::model::{Brief, Citation, RenderSegment, VerificationResult};
use crate::scanner::{self, ScanItem};
use crate::severity::classify_severity;

/// Resolves a marker ordinal (1-based) against the citation registry.
pub fn resolve_citation(ordinal: usize, citations: &[Citation]) -> Option<&Citation> {
    if ordinal == 0 {
        return None;
    }
    citations.get(ordinal - 1)
}

/// Finds the verification result for a citation id. At most one result per
/// citation is authoritative; with duplicates the first in list order wins.
pub fn match_result<'a>(
    citation_id: &str,
    results: &'a [VerificationResult],
) -> Option<&'a VerificationResult> {
    results.iter().find(|result| result.citation_id == citation_id)
}

pub fn status_label<'a>(
    result: Option<&'a VerificationResult>,
    labels: &'a StatusLabels,
) -> &'a str {
    match result {
        Some(result) => labels.label(&result.status),
        None => labels::UNKNOWN_LABEL,
    }
}

/// Composes the hover text for a citation marker: `"<label>: <message>"`
/// when a result exists, otherwise the citation's own display text.
pub fn tooltip(
    citation: &Citation,
    result: Option<&VerificationResult>,
    labels: &StatusLabels,
) -> String {
    match result {
        Some(result) => format!("{}: {}", labels.label(&result.status), result.message),
        None => citation.text.clone(),
    }
}

/// Primary entry point: produces the full ordered segment list for a brief.
/// Pure in (content, citations, results, selection); safe to recompute on
/// every state change.
pub fn sequence(
    brief: &Brief,
    labels: &StatusLabels,
    selected_citation_id: Option<&str>,
) -> Vec<RenderSegment> {
    let mut segments = Vec::new();

    for item in scanner::scan(&brief.content) {
        match item {
            ScanItem::Prose { text } => segments.push(RenderSegment::Prose {
                text: text.to_string(),
            }),
            ScanItem::Marker { ordinal, .. } => {
                // Out-of-range ordinals drop the marker entirely; the literal
                // token text is not re-inserted as prose. Flagged by `check`,
                // kept here for compatibility.
                let Some(citation) = resolve_citation(ordinal, &brief.citations) else {
                    continue;
                };
                let result = match_result(&citation.id, &brief.verification_results);
                segments.push(RenderSegment::Citation {
                    severity: classify_severity(result),
                    status_label: status_label(result, labels).to_string(),
                    tooltip: tooltip(citation, result, labels),
                    selected: selected_citation_id == Some(citation.id.as_str()),
                    citation: citation.clone(),
                    result: result.cloned(),
                });
            }
        }
    }

    segments
}
