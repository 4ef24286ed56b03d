use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use time::OffsetDateTime;

use crate::columns::resolve_columns;
use crate::flatten::{FlattenedRow, flatten_record};
use crate::models::{CellValue, LogRecord};
use crate::utils::time::compact_stamp;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub output_path: PathBuf,
    pub rows_written: usize,
    pub columns: Vec<String>,
}

/// Machine-readable run summary, written as pretty JSON next to the CSV on
/// request. Diagnostic only; the CSV is the data contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    pub input_path: String,
    pub output_path: String,
    pub messages: usize,
    pub columns: Vec<String>,
    pub first_message: Option<String>,
    pub last_message: Option<String>,
    pub parse_warnings: usize,
}

/// `<input-stem>_export_<YYYYMMDD_HHMMSS>.csv`, placed next to the input
/// unless an output directory override is given.
#[must_use]
pub fn output_path_for(input: &Path, output_dir: Option<&Path>, stamp: OffsetDateTime) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "export".to_string(), |stem| stem.to_string_lossy().to_string());
    let file_name = format!("{stem}_export_{}.csv", compact_stamp(stamp));

    let dir = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => input
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf),
    };
    dir.join(file_name)
}

#[must_use]
pub fn report_path_for(output_path: &Path) -> PathBuf {
    output_path.with_extension("report.json")
}

/// Flattens every record, resolves the column set, and writes header plus
/// one row per record. Cells absent from a row are emitted empty; quoting of
/// commas, quotes, and newlines follows standard CSV rules. The writer is
/// flushed before returning.
pub fn export_records(records: &[LogRecord], output_path: &Path) -> Result<ExportOutcome> {
    let rows: Vec<FlattenedRow> = records.iter().map(flatten_record).collect();
    let columns = resolve_columns(&rows);

    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("failed to create output file: {}", output_path.display()))?;
    writer
        .write_record(&columns)
        .context("failed to write CSV header row")?;

    for row in &rows {
        let record: Vec<String> = columns
            .iter()
            .map(|column| row.get(column).map(CellValue::render).unwrap_or_default())
            .collect();
        writer
            .write_record(&record)
            .context("failed to write CSV data row")?;
    }
    writer.flush().context("failed to flush CSV output")?;

    Ok(ExportOutcome {
        output_path: output_path.to_path_buf(),
        rows_written: rows.len(),
        columns,
    })
}

#[must_use]
pub fn build_report(
    input: &Path,
    outcome: &ExportOutcome,
    records: &[LogRecord],
    parse_warnings: usize,
) -> ExportReport {
    ExportReport {
        input_path: input.to_string_lossy().to_string(),
        output_path: outcome.output_path.to_string_lossy().to_string(),
        messages: outcome.rows_written,
        columns: outcome.columns.clone(),
        first_message: records.first().map(|record| record.timestamp_local.clone()),
        last_message: records.last().map(|record| record.timestamp_local.clone()),
        parse_warnings,
    }
}

pub fn write_report(path: &Path, report: &ExportReport) -> Result<()> {
    let mut body =
        serde_json::to_string_pretty(report).context("failed to encode export report as JSON")?;
    body.push('\n');
    std::fs::write(path, body)
        .with_context(|| format!("failed to write export report: {}", path.display()))
}
