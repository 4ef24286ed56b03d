use anyhow::{Result, anyhow, bail};
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Duration, OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// Bare ISO-8601 date-times carry no zone marker and are treated as UTC.
const BARE_FORMATS: &[&[BorrowedFormatItem<'static>]] = &[
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
];

/// Outcome of localizing one header timestamp. `display` is always usable:
/// when parsing fails it is the input unchanged and `warning` says why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedTimestamp {
    pub display: String,
    pub warning: Option<String>,
}

#[must_use]
pub fn localize_timestamp(raw: &str, hour_offset: i64) -> LocalizedTimestamp {
    match to_local_display(raw, hour_offset) {
        Ok(display) => LocalizedTimestamp {
            display,
            warning: None,
        },
        Err(error) => LocalizedTimestamp {
            display: raw.to_string(),
            warning: Some(format!("could not localize timestamp `{raw}`: {error}")),
        },
    }
}

/// Parses `raw` as a UTC instant, shifts it by `hour_offset` hours, and
/// formats the result as `YYYY-MM-DD HH:MM:SS` (no zone suffix, fraction
/// dropped).
pub fn to_local_display(raw: &str, hour_offset: i64) -> Result<String> {
    let utc = parse_as_utc(raw.trim())?;
    let local = utc
        .checked_add(Duration::hours(hour_offset))
        .ok_or_else(|| anyhow!("hour offset overflows the datetime range"))?;
    Ok(format_local(local))
}

/// Current instant shifted by the configured hour offset; stamps the export
/// filename the same way row timestamps are localized.
#[must_use]
pub fn shifted_now(hour_offset: i64) -> OffsetDateTime {
    OffsetDateTime::now_utc().saturating_add(Duration::hours(hour_offset))
}

#[must_use]
pub fn format_local(dt: OffsetDateTime) -> String {
    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
        dt.year(),
        u8::from(dt.month()),
        dt.day(),
        dt.hour(),
        dt.minute(),
        dt.second()
    )
}

/// `YYYYMMDD_HHMMSS`, used in export filenames.
#[must_use]
pub fn compact_stamp(dt: OffsetDateTime) -> String {
    format!(
        "{:04}{:02}{:02}_{:02}{:02}{:02}",
        dt.year(),
        u8::from(dt.month()),
        dt.day(),
        dt.hour(),
        dt.minute(),
        dt.second()
    )
}

fn parse_as_utc(candidate: &str) -> Result<OffsetDateTime> {
    if candidate.is_empty() {
        bail!("timestamp input is empty");
    }

    if let Ok(parsed) = OffsetDateTime::parse(candidate, &Rfc3339) {
        return Ok(parsed.to_offset(UtcOffset::UTC));
    }

    for &description in BARE_FORMATS {
        if let Ok(parsed) = PrimitiveDateTime::parse(candidate, description) {
            return Ok(parsed.assume_utc());
        }
    }

    bail!("unsupported timestamp format: {candidate}")
}
