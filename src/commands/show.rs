use std::io::{self, Write};

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::{info, warn};

use crate::cli::ShowArgs;
use crate::labels::StatusLabels;
use crate::model::{Brief, Citation, Severity, VerificationResult};
use crate::sequence;
use crate::severity::classify_severity;
use crate::util;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ShowResponse<'a> {
    citation: &'a Citation,
    result: &'a VerificationResult,
    severity: Severity,
    status_label: &'a str,
    tooltip: String,
}

pub fn run(args: ShowArgs) -> Result<()> {
    let brief: Brief = util::load_json(&args.brief_path)?;
    let labels = super::load_labels(args.labels_path.as_deref())?;

    let citation = locate_citation(&brief, args.citation_id.as_deref(), args.ordinal)?;
    let result = sequence::match_result(&citation.id, &brief.verification_results);

    // Same behavior as the inert inline marker: nothing opens.
    let Some(result) = result else {
        warn!(citation_id = %citation.id, "citation has no verification result; nothing to show");
        return Ok(());
    };

    info!(citation_id = %citation.id, status = %result.status, "opened citation detail");

    let response = ShowResponse {
        citation,
        result,
        severity: classify_severity(Some(result)),
        status_label: sequence::status_label(Some(result), &labels),
        tooltip: sequence::tooltip(citation, Some(result), &labels),
    };

    if args.json {
        write_json_response(&response)
    } else {
        write_text_response(&response)
    }
}

/// Looks a citation up by id or by 1-based ordinal. Exactly one selector is
/// required.
fn locate_citation<'a>(
    brief: &'a Brief,
    citation_id: Option<&str>,
    ordinal: Option<usize>,
) -> Result<&'a Citation> {
    match (citation_id, ordinal) {
        (Some(_), Some(_)) => bail!("pass either --citation-id or --ordinal, not both"),
        (None, None) => bail!("one of --citation-id or --ordinal is required"),
        (Some(id), None) => brief
            .citations
            .iter()
            .find(|citation| citation.id == id)
            .with_context(|| format!("citation id not present in brief: {id}")),
        (None, Some(ordinal)) => sequence::resolve_citation(ordinal, &brief.citations)
            .with_context(|| {
                format!(
                    "ordinal {ordinal} outside citations list (len {})",
                    brief.citations.len()
                )
            }),
    }
}

fn write_json_response(response: &ShowResponse<'_>) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());
    serde_json::to_writer_pretty(&mut output, response)
        .context("failed to serialize show json output")?;
    writeln!(output)?;
    output.flush()?;
    Ok(())
}

fn write_text_response(response: &ShowResponse<'_>) -> Result<()> {
    let citation = response.citation;
    let result = response.result;
    let mut output = io::BufWriter::new(io::stdout().lock());

    writeln!(
        output,
        "{} ({})",
        response.status_label,
        response.severity.as_str()
    )?;
    writeln!(output, "{}", result.message)?;
    writeln!(output)?;
    writeln!(output, "Citation")?;
    writeln!(output, "\tcase: {}", citation.case_name)?;
    writeln!(output, "\treporter: {}", citation.reporter)?;
    if let Some(pin_cite) = &citation.pin_cite {
        writeln!(output, "\tpin cite: {pin_cite}")?;
    }
    writeln!(output, "\tyear: {}", citation.year)?;

    if let Some(details) = &result.details {
        if details.expected_quote.is_some() || details.actual_quote.is_some() {
            writeln!(output)?;
            writeln!(output, "Quote comparison")?;
            if let Some(expected) = &details.expected_quote {
                writeln!(output, "\tin brief: \"{expected}\"")?;
            }
            if let Some(actual) = &details.actual_quote {
                writeln!(output, "\tactual source: \"{actual}\"")?;
            }
        }
        if let Some(history) = &details.treatment_history {
            writeln!(output)?;
            writeln!(output, "Treatment history")?;
            writeln!(output, "\t{history}")?;
        }
    }

    output.flush()?;
    Ok(())
}
