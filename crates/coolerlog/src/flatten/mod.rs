use std::collections::BTreeMap;

use serde_json::{Map, Number, Value};

use crate::models::{CellValue, LogRecord};

pub const TIMESTAMP_COLUMN: &str = "timestamp";
pub const ORIGINAL_TIMESTAMP_COLUMN: &str = "timestamp_original";
pub const TOPIC_COLUMN: &str = "topic";
pub const LINE_NUMBER_COLUMN: &str = "line_number";

/// One CSV row before column resolution: column name to cell value.
pub type FlattenedRow = BTreeMap<String, CellValue>;

/// One-level flattening: a top-level object value expands into
/// `"<key>_<subkey>"` entries; anything nested deeper (and every array)
/// passes through as a raw JSON cell. Non-object values map directly.
#[must_use]
pub fn flatten_payload(payload: &Map<String, Value>) -> FlattenedRow {
    let mut flattened = BTreeMap::new();
    for (key, value) in payload {
        match value {
            Value::Object(nested) => {
                for (sub_key, sub_value) in nested {
                    flattened.insert(format!("{key}_{sub_key}"), CellValue::from_json(sub_value));
                }
            }
            other => {
                flattened.insert(key.clone(), CellValue::from_json(other));
            }
        }
    }
    flattened
}

/// Full row for one record: the four fixed record fields plus the flattened
/// payload. A payload key that collides with a fixed field shadows it.
#[must_use]
pub fn flatten_record(record: &LogRecord) -> FlattenedRow {
    let mut row = BTreeMap::new();
    row.insert(
        TIMESTAMP_COLUMN.to_string(),
        CellValue::Text(record.timestamp_local.clone()),
    );
    row.insert(
        ORIGINAL_TIMESTAMP_COLUMN.to_string(),
        CellValue::Text(record.timestamp_original.clone()),
    );
    row.insert(
        TOPIC_COLUMN.to_string(),
        CellValue::Text(record.topic.clone()),
    );
    row.insert(
        LINE_NUMBER_COLUMN.to_string(),
        CellValue::Number(Number::from(record.line_number)),
    );
    row.extend(flatten_payload(&record.payload));
    row
}
