use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Args;
use serde::Serialize;

use crate::columns::resolve_columns;
use crate::config::DEFAULT_HOUR_OFFSET;
use crate::flatten::flatten_record;
use crate::parser::{ParseStats, parse_log_file};

#[derive(Debug, Clone, Args)]
pub struct InspectArgs {
    #[arg(value_name = "PATH")]
    pub target: PathBuf,

    /// Hours added to UTC timestamps to produce local time (default: 1).
    #[arg(long, value_name = "HOURS", allow_negative_numbers = true)]
    pub hour_offset: Option<i64>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InspectReport {
    pub target_path: String,
    pub file_size_bytes: u64,
    pub line_counts: InspectLineCounts,
    pub messages: usize,
    pub first_message: Option<String>,
    pub last_message: Option<String>,
    /// Column order the CSV would carry; empty when no messages parsed.
    pub columns: Vec<String>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InspectLineCounts {
    pub total_lines: usize,
    pub header_lines: usize,
    pub payload_lines: usize,
    pub invalid_payload_lines: usize,
    pub discarded_headers: usize,
    pub orphan_payloads: usize,
}

impl From<ParseStats> for InspectLineCounts {
    fn from(stats: ParseStats) -> Self {
        Self {
            total_lines: stats.total_lines,
            header_lines: stats.header_lines,
            payload_lines: stats.payload_lines,
            invalid_payload_lines: stats.invalid_payload_lines,
            discarded_headers: stats.discarded_headers,
            orphan_payloads: stats.orphan_payloads,
        }
    }
}

pub fn inspect_target(path: &Path, hour_offset: i64) -> Result<InspectReport> {
    if !path.exists() {
        bail!("inspect target does not exist: {}", path.display());
    }
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("failed to stat file: {}", path.display()))?;
    if !metadata.is_file() {
        bail!("inspect target must be a file: {}", path.display());
    }

    let parsed = parse_log_file(path, hour_offset)?;
    let rows: Vec<_> = parsed.records.iter().map(flatten_record).collect();
    let columns = if rows.is_empty() {
        Vec::new()
    } else {
        resolve_columns(&rows)
    };

    Ok(InspectReport {
        target_path: path.to_string_lossy().to_string(),
        file_size_bytes: metadata.len(),
        line_counts: parsed.stats.into(),
        messages: parsed.records.len(),
        first_message: parsed
            .records
            .first()
            .map(|record| record.timestamp_local.clone()),
        last_message: parsed
            .records
            .last()
            .map(|record| record.timestamp_local.clone()),
        columns,
        warnings: parsed.warnings,
    })
}

#[must_use]
pub fn render_text_report(report: &InspectReport) -> String {
    let mut lines = vec![
        format!("target_path: {}", report.target_path),
        format!("file_size_bytes: {}", report.file_size_bytes),
        format!("line_counts.total_lines: {}", report.line_counts.total_lines),
        format!(
            "line_counts.header_lines: {}",
            report.line_counts.header_lines
        ),
        format!(
            "line_counts.payload_lines: {}",
            report.line_counts.payload_lines
        ),
        format!(
            "line_counts.invalid_payload_lines: {}",
            report.line_counts.invalid_payload_lines
        ),
        format!(
            "line_counts.discarded_headers: {}",
            report.line_counts.discarded_headers
        ),
        format!(
            "line_counts.orphan_payloads: {}",
            report.line_counts.orphan_payloads
        ),
        format!("messages: {}", report.messages),
    ];

    if let Some(first_message) = &report.first_message {
        lines.push(format!("first_message: {first_message}"));
    }
    if let Some(last_message) = &report.last_message {
        lines.push(format!("last_message: {last_message}"));
    }
    if !report.columns.is_empty() {
        lines.push(format!("columns: {}", report.columns.join(",")));
    }
    if !report.warnings.is_empty() {
        lines.push("warnings:".to_string());
        lines.extend(report.warnings.iter().map(|warning| format!("- {warning}")));
    }

    lines.join("\n")
}

pub fn render_json_report(report: &InspectReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to encode inspect report as JSON")
}

pub fn run(args: &InspectArgs) -> Result<()> {
    let hour_offset = args.hour_offset.unwrap_or(DEFAULT_HOUR_OFFSET);
    let report = inspect_target(args.target.as_path(), hour_offset)?;
    if args.json {
        println!("{}", render_json_report(&report)?);
    } else {
        println!("{}", render_text_report(&report));
    }
    Ok(())
}
