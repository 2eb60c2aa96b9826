use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned identifier. Backends differ on whether this is numeric or
/// an opaque string, so both are accepted and normalised to text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawRecordId")]
pub struct RecordId(pub String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRecordId {
    Text(String),
    Number(i64),
}

impl From<RawRecordId> for RecordId {
    fn from(value: RawRecordId) -> Self {
        match value {
            RawRecordId::Text(text) => Self(text),
            RawRecordId::Number(number) => Self(number.to_string()),
        }
    }
}

impl RecordId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    #[default]
    Present,
    Absent,
}

impl AttendanceStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Present => "Present",
            Self::Absent => "Absent",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("present") {
            Some(Self::Present)
        } else if raw.eq_ignore_ascii_case("absent") {
            Some(Self::Absent)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_id_accepts_numbers_and_strings() {
        let numeric: RecordId = serde_json::from_str("42").expect("numeric id");
        let text: RecordId = serde_json::from_str("\"65a1f0\"").expect("text id");
        assert_eq!(numeric, RecordId::new("42"));
        assert_eq!(text.as_str(), "65a1f0");
    }

    #[test]
    fn status_uses_lowercase_wire_names() {
        assert_eq!(
            serde_json::to_string(&AttendanceStatus::Absent).expect("serialize"),
            "\"absent\""
        );
        assert_eq!(AttendanceStatus::parse("PRESENT"), Some(AttendanceStatus::Present));
        assert_eq!(AttendanceStatus::parse("late"), None);
    }
}
