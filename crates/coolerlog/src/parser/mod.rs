use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use regex::Regex;
use serde_json::{Map, Value};

use crate::models::LogRecord;
use crate::utils::content::{PAYLOAD_PREVIEW_MAX_CHARS, preview};
use crate::utils::time::localize_timestamp;

/// A header line starts with `[` and carries this marker after the closing
/// bracket; everything following the bracket segment is the topic, verbatim.
pub const HEADER_TOPIC_MARKER: &str = "] cooler_mqtt/";

#[derive(Debug, Clone, PartialEq)]
pub struct LogParseResult {
    /// Completed header+payload pairs, in file order.
    pub records: Vec<LogRecord>,
    /// Line-numbered diagnostics; none of them aborted the parse.
    pub warnings: Vec<String>,
    pub stats: ParseStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseStats {
    pub total_lines: usize,
    pub header_lines: usize,
    pub payload_lines: usize,
    pub invalid_payload_lines: usize,
    /// Headers overwritten by a later header before any payload arrived.
    pub discarded_headers: usize,
    /// Payload lines seen while no header was pending.
    pub orphan_payloads: usize,
}

#[derive(Debug, Clone, PartialEq)]
struct PendingHeader {
    timestamp_local: String,
    timestamp_original: String,
    topic: String,
    line_number: usize,
}

/// Two-state pairing machine: awaiting-header until a header line arrives,
/// then awaiting-payload until a JSON line completes the record. Feed lines
/// with [`LogParser::push_line`] and collect the outcome with
/// [`LogParser::finish`].
#[derive(Debug)]
pub struct LogParser {
    hour_offset: i64,
    pending: Option<PendingHeader>,
    records: Vec<LogRecord>,
    warnings: Vec<String>,
    stats: ParseStats,
}

impl LogParser {
    #[must_use]
    pub fn new(hour_offset: i64) -> Self {
        Self {
            hour_offset,
            pending: None,
            records: Vec::new(),
            warnings: Vec::new(),
            stats: ParseStats::default(),
        }
    }

    pub fn push_line(&mut self, line_number: usize, raw_line: &str) {
        self.stats.total_lines += 1;
        let line = raw_line.trim();

        if is_header_line(line) {
            self.start_header(line_number, line);
        } else if is_payload_line(line) {
            self.attach_payload(line_number, line);
        }
        // Everything else is noise between messages and is ignored.
    }

    /// Consumes the parser. A trailing header that never saw a payload is
    /// dropped, not emitted.
    #[must_use]
    pub fn finish(self) -> LogParseResult {
        LogParseResult {
            records: self.records,
            warnings: self.warnings,
            stats: self.stats,
        }
    }

    fn start_header(&mut self, line_number: usize, line: &str) {
        let Some(captures) = header_regex().captures(line) else {
            return;
        };

        self.stats.header_lines += 1;
        if self.pending.is_some() {
            // Only the most recent unmatched header survives; the overwrite
            // is silent by contract.
            self.stats.discarded_headers += 1;
        }

        let timestamp_original = captures[1].to_string();
        let topic = captures[2].to_string();
        let localized = localize_timestamp(&timestamp_original, self.hour_offset);
        if let Some(warning) = localized.warning {
            self.warnings.push(format!("line {line_number}: {warning}"));
        }

        self.pending = Some(PendingHeader {
            timestamp_local: localized.display,
            timestamp_original,
            topic,
            line_number,
        });
    }

    fn attach_payload(&mut self, line_number: usize, line: &str) {
        self.stats.payload_lines += 1;
        if self.pending.is_none() {
            self.stats.orphan_payloads += 1;
            return;
        }

        match serde_json::from_str::<Map<String, Value>>(line) {
            Ok(payload) => {
                if let Some(header) = self.pending.take() {
                    self.records.push(LogRecord {
                        timestamp_local: header.timestamp_local,
                        timestamp_original: header.timestamp_original,
                        topic: header.topic,
                        line_number: header.line_number,
                        payload,
                    });
                }
            }
            Err(error) => {
                self.stats.invalid_payload_lines += 1;
                // The pending header stays armed so a later payload line can
                // still claim it.
                self.warnings.push(format!(
                    "line {line_number}: invalid JSON payload `{}` ({error})",
                    preview(line, PAYLOAD_PREVIEW_MAX_CHARS)
                ));
            }
        }
    }
}

/// Parses in-memory log text; 1-indexed line numbers.
#[must_use]
pub fn parse_log_text(input: &str, hour_offset: i64) -> LogParseResult {
    let mut parser = LogParser::new(hour_offset);
    for (index, line) in input.lines().enumerate() {
        parser.push_line(index + 1, line);
    }
    parser.finish()
}

/// Streams `path` line by line through the pairing machine. The file handle
/// is dropped before the result is returned.
pub fn parse_log_file(path: &Path, hour_offset: i64) -> Result<LogParseResult> {
    let file = File::open(path)
        .with_context(|| format!("failed to open log file: {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut parser = LogParser::new(hour_offset);
    for (index, line) in reader.lines().enumerate() {
        let line = line.with_context(|| {
            format!("failed to read line {} of {}", index + 1, path.display())
        })?;
        parser.push_line(index + 1, &line);
    }
    Ok(parser.finish())
}

fn is_header_line(line: &str) -> bool {
    line.starts_with('[') && line.contains(HEADER_TOPIC_MARKER)
}

fn is_payload_line(line: &str) -> bool {
    line.len() >= 2 && line.starts_with('{') && line.ends_with('}')
}

fn header_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"^\[([^\]]+)\] (.+)$").expect("header regex should compile")
    })
}
