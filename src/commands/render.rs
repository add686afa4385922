use std::io::{self, Write};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use crate::cli::RenderArgs;
use crate::model::{Brief, RenderSegment};
use crate::selection::SelectionState;
use crate::sequence;
use crate::util;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RenderResponse {
    title: String,
    selected_citation_id: Option<String>,
    segment_count: usize,
    segments: Vec<RenderSegment>,
}

pub fn run(args: RenderArgs) -> Result<()> {
    let brief: Brief = util::load_json(&args.brief_path)?;
    let labels = super::load_labels(args.labels_path.as_deref())?;

    info!(
        path = %args.brief_path.display(),
        citations = brief.citations.len(),
        results = brief.verification_results.len(),
        "loaded brief"
    );

    let mut selection = SelectionState::new();
    if let Some(requested) = args.selected.as_deref() {
        apply_selection(&mut selection, &brief, requested);
    }

    let segments = sequence::sequence(&brief, &labels, selection.selected_citation_id());
    info!(segments = segments.len(), "sequenced brief content");

    if args.json {
        write_json_response(&brief, &selection, segments)
    } else {
        write_text_response(&brief, &segments)
    }
}

/// Applies a requested selection through the state machine; a citation with
/// no verification result is inert and leaves the state unselected.
fn apply_selection(selection: &mut SelectionState, brief: &Brief, citation_id: &str) {
    match brief.citations.iter().find(|c| c.id == citation_id) {
        Some(citation) => {
            let result = sequence::match_result(&citation.id, &brief.verification_results);
            if !selection.select(citation, result) {
                warn!(
                    citation_id = %citation_id,
                    "citation has no verification result; selection ignored"
                );
            }
        }
        None => warn!(citation_id = %citation_id, "selected citation id not present in brief"),
    }
}

fn write_json_response(
    brief: &Brief,
    selection: &SelectionState,
    segments: Vec<RenderSegment>,
) -> Result<()> {
    let response = RenderResponse {
        title: brief.title.clone(),
        selected_citation_id: selection.selected_citation_id().map(str::to_string),
        segment_count: segments.len(),
        segments,
    };

    let mut output = io::BufWriter::new(io::stdout().lock());
    serde_json::to_writer_pretty(&mut output, &response)
        .context("failed to serialize render json output")?;
    writeln!(output)?;
    output.flush()?;
    Ok(())
}

fn write_text_response(brief: &Brief, segments: &[RenderSegment]) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());

    writeln!(output, "Brief: {}", brief.title)?;
    writeln!(
        output,
        "Citations: {} results: {} segments: {}",
        brief.citations.len(),
        brief.verification_results.len(),
        segments.len()
    )?;
    writeln!(output)?;

    for segment in segments {
        match segment {
            RenderSegment::Prose { text } => write!(output, "{text}")?,
            RenderSegment::Citation { .. } => write!(output, "{}", inline_marker(segment))?,
        }
    }
    writeln!(output)?;

    let citation_segments: Vec<&RenderSegment> = segments
        .iter()
        .filter(|segment| matches!(segment, RenderSegment::Citation { .. }))
        .collect();
    if !citation_segments.is_empty() {
        writeln!(output)?;
        writeln!(output, "Citations:")?;
        for (position, segment) in citation_segments.iter().enumerate() {
            if let RenderSegment::Citation {
                citation,
                severity,
                tooltip,
                selected,
                ..
            } = segment
            {
                writeln!(
                    output,
                    "{}.\t{}\t{}\t{}{}",
                    position + 1,
                    citation.id,
                    severity.as_str(),
                    tooltip,
                    if *selected { "\t[selected]" } else { "" }
                )?;
            }
        }
    }

    output.flush()?;
    Ok(())
}

/// Inline text rendering of a citation marker: the citation text plus its
/// status label, with a trailing `*` when selected.
fn inline_marker(segment: &RenderSegment) -> String {
    match segment {
        RenderSegment::Citation {
            citation,
            status_label,
            selected,
            ..
        } => {
            let mut marker = format!("[{} | {}]", citation.text, status_label);
            if *selected {
                marker.push('*');
            }
            marker
        }
        RenderSegment::Prose { text } => text.clone(),
    }
}
