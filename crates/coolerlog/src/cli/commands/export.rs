use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;

use crate::config::{ExportConfig, resolve_export_config};
use crate::discovery::{find_log_files, select_most_recent};
use crate::export::{build_report, export_records, output_path_for, report_path_for, write_report};
use crate::parser::parse_log_file;
use crate::utils::time::shifted_now;

#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// Directory scanned for log files (default: ./logs).
    #[arg(long, value_name = "PATH")]
    pub logs_dir: Option<PathBuf>,

    /// Export this log file instead of discovering one.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Filename glob with a single `*` (default: mqtt_messages_*.txt).
    #[arg(long, value_name = "GLOB")]
    pub pattern: Option<String>,

    /// Hours added to UTC timestamps to produce local time (default: 1).
    #[arg(long, value_name = "HOURS", allow_negative_numbers = true)]
    pub hour_offset: Option<i64>,

    /// Write the CSV here instead of next to the input log.
    #[arg(long, value_name = "PATH")]
    pub out_dir: Option<PathBuf>,

    /// Also write a JSON export report next to the CSV.
    #[arg(long, default_value_t = false)]
    pub report: bool,
}

pub fn run(args: &ExportArgs) -> Result<()> {
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let config = resolve_export_config(
        &cwd,
        args.logs_dir.as_deref(),
        args.pattern.as_deref(),
        args.hour_offset,
    )?;

    let Some(input) = select_input(args, &config)? else {
        return Ok(());
    };

    println!("export: stage parse {}", input.display());
    let parsed = parse_log_file(&input, config.hour_offset)?;
    for warning in &parsed.warnings {
        println!("export: parse_warning {warning}");
    }
    println!(
        "export: checkpoint parsed records={} warnings={} headers_discarded={} orphan_payloads={}",
        parsed.records.len(),
        parsed.warnings.len(),
        parsed.stats.discarded_headers,
        parsed.stats.orphan_payloads
    );
    println!(
        "export: timestamps localized with hour_offset={:+}",
        config.hour_offset
    );

    if parsed.records.is_empty() {
        println!(
            "export: no valid messages found in {}; skipping CSV generation",
            input.display()
        );
        return Ok(());
    }

    if let Some(out_dir) = &args.out_dir {
        std::fs::create_dir_all(out_dir).with_context(|| {
            format!("failed to create output directory: {}", out_dir.display())
        })?;
    }
    let output_path = output_path_for(
        &input,
        args.out_dir.as_deref(),
        shifted_now(config.hour_offset),
    );

    println!("export: stage write {}", output_path.display());
    let outcome = export_records(&parsed.records, &output_path)?;
    println!(
        "export: checkpoint written rows={} columns={}",
        outcome.rows_written,
        outcome.columns.len()
    );
    println!("export: column_order {}", outcome.columns.join(","));

    let first_message = parsed
        .records
        .first()
        .map_or("n/a", |record| record.timestamp_local.as_str());
    let last_message = parsed
        .records
        .last()
        .map_or("n/a", |record| record.timestamp_local.as_str());
    println!(
        "export: complete messages={} first_message={} last_message={} output={}",
        outcome.rows_written,
        first_message,
        last_message,
        outcome.output_path.display()
    );

    if args.report {
        let report = build_report(&input, &outcome, &parsed.records, parsed.warnings.len());
        let report_path = report_path_for(&outcome.output_path);
        write_report(&report_path, &report)?;
        println!(
            "export: checkpoint report_written {}",
            report_path.display()
        );
    }

    Ok(())
}

fn select_input(args: &ExportArgs, config: &ExportConfig) -> Result<Option<PathBuf>> {
    if let Some(log_file) = &args.log_file {
        if !log_file.is_file() {
            bail!("log file does not exist: {}", log_file.display());
        }
        return Ok(Some(log_file.clone()));
    }

    let candidates = find_log_files(&config.logs_dir, &config.filename_pattern)?;
    if candidates.is_empty() {
        println!(
            "export: no log files matching `{}` under {}",
            config.filename_pattern,
            config.logs_dir.display()
        );
        return Ok(None);
    }

    println!(
        "export: discovered {} log file(s) under {}",
        candidates.len(),
        config.logs_dir.display()
    );
    for candidate in &candidates {
        println!(
            "export: candidate {} size_mb={:.1}",
            candidate.path.display(),
            megabytes(candidate.size_bytes)
        );
    }

    let selected = select_most_recent(&candidates).map(|candidate| candidate.path.clone());
    if let Some(path) = &selected {
        println!("export: selected most recent {}", path.display());
    }
    Ok(selected)
}

fn megabytes(size_bytes: u64) -> f64 {
    size_bytes as f64 / (1024.0 * 1024.0)
}
