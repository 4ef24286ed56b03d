use serde_json::{Map, Number, Value};

/// One completed header+payload pair from a cooler MQTT log.
///
/// Records only exist once both halves have been matched; a header whose
/// payload never arrives is dropped by the parser and never surfaces here.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    /// Header timestamp shifted to local time, `YYYY-MM-DD HH:MM:SS`.
    /// Falls back to the raw header string when localization fails.
    pub timestamp_local: String,
    /// Header timestamp exactly as it appeared in the log.
    pub timestamp_original: String,
    /// Topic string after the bracket segment, verbatim.
    pub topic: String,
    /// 1-indexed line number of the header line.
    pub line_number: usize,
    pub payload: Map<String, Value>,
}

/// Closed variant for flattened cell values.
///
/// `Raw` carries arrays and objects nested deeper than one level; they are
/// rendered as compact JSON rather than expanded further.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(Number),
    Bool(bool),
    Null,
    Raw(Value),
}

impl CellValue {
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(flag) => Self::Bool(*flag),
            Value::Number(number) => Self::Number(number.clone()),
            Value::String(text) => Self::Text(text.clone()),
            Value::Array(_) | Value::Object(_) => Self::Raw(value.clone()),
        }
    }

    /// CSV cell text. `Null` becomes the empty cell.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Number(number) => number.to_string(),
            Self::Bool(flag) => flag.to_string(),
            Self::Null => String::new(),
            Self::Raw(value) => value.to_string(),
        }
    }
}
