use super::identity::Pid;
use super::mapping::{ColumnMapping, LogicalField};
use super::normalizer::non_blank;
use super::table::Table;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d.%m.%Y", "%m/%d/%Y"];

/// Raw answers for one applicant, as read from one input row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantRecord {
    /// Zero-based position in the input table.
    pub row: usize,
    pub email: Option<String>,
    pub organisation: Option<String>,
    pub motivation: Option<String>,
    pub function: Option<String>,
    pub referee: Option<String>,
    pub language: Option<String>,
    pub weekly_time: Option<String>,
    pub alumni: Option<String>,
    pub submitted_at: Option<NaiveDateTime>,
}

impl ApplicantRecord {
    /// Extract every mapped field of `row`. Unmapped fields and blank cells become `None`.
    pub fn from_row(table: &Table, mapping: &ColumnMapping, row: usize) -> Self {
        let text = |field: LogicalField| -> Option<String> {
            let column = table.column_index(mapping.column(field)?)?;
            non_blank(table.cell(row, column)).map(str::to_string)
        };

        Self {
            row,
            email: text(LogicalField::Email),
            organisation: text(LogicalField::Organisation),
            motivation: text(LogicalField::Motivation),
            function: text(LogicalField::Function),
            referee: text(LogicalField::Referee),
            language: text(LogicalField::Language),
            weekly_time: text(LogicalField::WeeklyTime),
            alumni: text(LogicalField::Alumni),
            submitted_at: text(LogicalField::Timestamp)
                .as_deref()
                .and_then(parse_timestamp),
        }
    }

    pub fn from_table(table: &Table, mapping: &ColumnMapping) -> Vec<Self> {
        (0..table.len())
            .map(|row| Self::from_row(table, mapping, row))
            .collect()
    }
}

/// Applicant whose email has been replaced by a pseudonymous ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifiedApplicant {
    pub pid: Pid,
    pub record: ApplicantRecord,
}

/// Parse the timestamp formats survey tools commonly export. Unparseable input is `None`.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
    {
        return Some(dt);
    }

    let parsed = DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0));
    if parsed.is_none() {
        tracing::debug!(value = trimmed, "unrecognised timestamp format");
    }
    parsed
}
