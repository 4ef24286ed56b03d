use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use coolerlog::cli::commands::inspect::{inspect_target, render_json_report, render_text_report};
use serde_json::Value;

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time should be after unix epoch")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("{prefix}-{nanos}"));
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
    dir
}

const FIXTURE: &str = "\
[2024-06-01T10:00:00Z] cooler_mqtt/status
{\"SNU\": \"A1\", \"temp\": -18}
[2024-06-01T10:05:00Z] cooler_mqtt/status
{\"temp\": broken}
[2024-06-01T10:10:00Z] cooler_mqtt/status
{\"temp\": -17}
";

#[test]
fn reports_parse_stats_and_column_preview() {
    let dir = unique_temp_dir("coolerlog-inspect-stats");
    let path = dir.join("mqtt_messages_20240601.txt");
    std::fs::write(&path, FIXTURE).expect("fixture should be writable");

    let report = inspect_target(&path, 1).expect("inspect should succeed");

    assert_eq!(report.line_counts.total_lines, 6);
    assert_eq!(report.line_counts.header_lines, 3);
    assert_eq!(report.line_counts.payload_lines, 3);
    assert_eq!(report.line_counts.invalid_payload_lines, 1);
    assert_eq!(report.line_counts.discarded_headers, 1);
    assert_eq!(report.messages, 2);
    assert_eq!(report.first_message.as_deref(), Some("2024-06-01 11:00:00"));
    assert_eq!(report.last_message.as_deref(), Some("2024-06-01 11:10:00"));
    assert_eq!(
        report.columns,
        vec![
            "timestamp",
            "SNU",
            "timestamp_original",
            "line_number",
            "temp",
            "topic",
        ]
    );
    assert_eq!(report.warnings.len(), 1);
}

#[test]
fn text_report_lists_counts_and_warnings() {
    let dir = unique_temp_dir("coolerlog-inspect-text");
    let path = dir.join("mqtt_messages_20240601.txt");
    std::fs::write(&path, FIXTURE).expect("fixture should be writable");

    let report = inspect_target(&path, 1).expect("inspect should succeed");
    let text = render_text_report(&report);

    assert!(text.contains("line_counts.total_lines: 6"));
    assert!(text.contains("messages: 2"));
    assert!(text.contains("columns: timestamp,SNU,timestamp_original"));
    assert!(text.contains("warnings:"));
}

#[test]
fn json_report_round_trips() {
    let dir = unique_temp_dir("coolerlog-inspect-json");
    let path = dir.join("mqtt_messages_20240601.txt");
    std::fs::write(&path, FIXTURE).expect("fixture should be writable");

    let report = inspect_target(&path, 1).expect("inspect should succeed");
    let body = render_json_report(&report).expect("report should encode");
    let parsed: Value = serde_json::from_str(&body).expect("report should be valid JSON");

    assert_eq!(parsed["messages"], Value::from(2));
    assert_eq!(parsed["line_counts"]["header_lines"], Value::from(3));
    assert_eq!(parsed["columns"][1], Value::from("SNU"));
}

#[test]
fn empty_log_reports_no_columns() {
    let dir = unique_temp_dir("coolerlog-inspect-empty");
    let path = dir.join("mqtt_messages_empty.txt");
    std::fs::write(&path, "no messages here\n").expect("fixture should be writable");

    let report = inspect_target(&path, 1).expect("inspect should succeed");
    assert_eq!(report.messages, 0);
    assert!(report.columns.is_empty());
    assert!(report.first_message.is_none());
}

#[test]
fn missing_target_fails() {
    let dir = unique_temp_dir("coolerlog-inspect-missing");
    let err = inspect_target(&dir.join("nope.txt"), 1).expect_err("missing target must fail");
    assert!(err.to_string().contains("does not exist"));
}

#[test]
fn directory_target_fails() {
    let dir = unique_temp_dir("coolerlog-inspect-dir");
    let err = inspect_target(&dir, 1).expect_err("directory target must fail");
    assert!(err.to_string().contains("must be a file"));
}
