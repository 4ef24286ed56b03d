use std::collections::BTreeSet;

use crate::flatten::{FlattenedRow, ORIGINAL_TIMESTAMP_COLUMN, TIMESTAMP_COLUMN};

/// Cooler unit serial number; pinned to column 2 when any row carries it.
pub const UNIT_SERIAL_COLUMN: &str = "SNU";

/// Deterministic header ordering over the union of all row keys:
/// `timestamp` first, `SNU` second when present anywhere, then
/// `timestamp_original`, then the remainder in ascending byte order.
/// `topic` and `line_number` get no special placement and land wherever
/// they sort.
#[must_use]
pub fn resolve_columns(rows: &[FlattenedRow]) -> Vec<String> {
    let mut remaining: BTreeSet<&str> = rows
        .iter()
        .flat_map(|row| row.keys().map(String::as_str))
        .collect();
    remaining.remove(TIMESTAMP_COLUMN);
    remaining.remove(ORIGINAL_TIMESTAMP_COLUMN);
    let has_unit_serial = remaining.remove(UNIT_SERIAL_COLUMN);

    let mut columns = Vec::with_capacity(remaining.len() + 3);
    columns.push(TIMESTAMP_COLUMN.to_string());
    if has_unit_serial {
        columns.push(UNIT_SERIAL_COLUMN.to_string());
    }
    columns.push(ORIGINAL_TIMESTAMP_COLUMN.to_string());
    columns.extend(remaining.into_iter().map(str::to_string));
    columns
}
