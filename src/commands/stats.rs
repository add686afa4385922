use std::io::{self, Write};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use crate::cli::StatsArgs;
use crate::model::{Brief, FirstOccurrence, SeverityCounts};
use crate::severity;
use crate::util;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsReport {
    manifest_version: u32,
    generated_at: String,
    brief_path: String,
    brief_sha256: String,
    title: String,
    result_count: usize,
    counts: SeverityCounts,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_occurrence: Option<FirstOccurrence>,
}

pub fn run(args: StatsArgs) -> Result<()> {
    let brief: Brief = util::load_json(&args.brief_path)?;

    let counts = severity::aggregate(&brief.verification_results);
    info!(
        valid = counts.valid,
        warning = counts.warning,
        critical = counts.critical,
        total = counts.total(),
        "aggregated verification results"
    );

    let first_occurrence = match args.severity {
        Some(filter) => {
            let target = filter.as_severity();
            let hit = severity::first_occurrence(&brief, target);
            if hit.is_none() {
                warn!(severity = target.as_str(), "no citation occurrence with requested severity");
            }
            hit
        }
        None => None,
    };

    let report = StatsReport {
        manifest_version: 1,
        generated_at: util::now_utc_string(),
        brief_path: args.brief_path.display().to_string(),
        brief_sha256: util::sha256_file(&args.brief_path)?,
        title: brief.title.clone(),
        result_count: brief.verification_results.len(),
        counts,
        first_occurrence,
    };

    if let Some(report_path) = &args.report_path {
        util::write_json_pretty(report_path, &report)?;
        info!(path = %report_path.display(), "wrote stats report");
    }

    if args.json {
        write_json_response(&report)
    } else {
        write_text_response(&report)
    }
}

fn write_json_response(report: &StatsReport) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());
    serde_json::to_writer_pretty(&mut output, report)
        .context("failed to serialize stats json output")?;
    writeln!(output)?;
    output.flush()?;
    Ok(())
}

fn write_text_response(report: &StatsReport) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());

    writeln!(output, "Brief: {}", report.title)?;
    writeln!(
        output,
        "Results: {} (valid={} warning={} critical={})",
        report.result_count,
        report.counts.valid,
        report.counts.warning,
        report.counts.critical
    )?;
    if let Some(hit) = &report.first_occurrence {
        writeln!(
            output,
            "First {}: citation {} (ordinal {}) at byte {}",
            hit.severity.as_str(),
            hit.citation_id,
            hit.ordinal,
            hit.byte_offset
        )?;
    }

    output.flush()?;
    Ok(())
}
