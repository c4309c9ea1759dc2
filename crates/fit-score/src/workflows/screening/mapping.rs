use super::table::Table;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::OnceLock;

/// Logical survey fields the scoring pipeline knows how to consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalField {
    Timestamp,
    Email,
    Motivation,
    Function,
    Organisation,
    Referee,
    Language,
    WeeklyTime,
    Alumni,
}

impl LogicalField {
    /// Detection order. Content fields pick their headers before the submission
    /// timestamp, whose `date` pattern also matches words like "candidate". Weekly time
    /// goes last so a header already claimed as the timestamp is never offered to it.
    pub const fn ordered() -> [Self; 9] {
        [
            Self::Email,
            Self::Motivation,
            Self::Function,
            Self::Organisation,
            Self::Referee,
            Self::Language,
            Self::Alumni,
            Self::Timestamp,
            Self::WeeklyTime,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Timestamp => "Submission timestamp",
            Self::Email => "Email",
            Self::Motivation => "Motivation text",
            Self::Function => "Function / job title",
            Self::Organisation => "Organisation",
            Self::Referee => "Referee / recommendation",
            Self::Language => "Language level",
            Self::WeeklyTime => "Weekly time commitment",
            Self::Alumni => "Alumni referral",
        }
    }

    pub const fn is_required(self) -> bool {
        matches!(self, Self::Email | Self::Motivation | Self::Function)
    }

    fn patterns(self) -> &'static [&'static str] {
        match self {
            Self::Timestamp => &[r"timestamp", r"submitted", r"submission", r"date"],
            Self::Email => &[r"\bemail\b", r"e-mail"],
            Self::Motivation => &[
                r"motivation",
                r"why.*apply",
                r"statement",
                r"interest",
                r"reason",
            ],
            Self::Function => &[r"\bfunction\b", r"job", r"title", r"position", r"role"],
            Self::Organisation => &[
                r"organi[sz]ation",
                r"employer",
                r"company",
                r"institution",
                r"affiliation",
            ],
            Self::Referee => &[r"refere", r"reference", r"recommend", r"endorse"],
            Self::Language => &[
                r"language",
                r"english",
                r"fluency",
                r"proficien",
                r"comfort",
            ],
            Self::WeeklyTime => &[r"time", r"hours", r"weekly", r"commit"],
            Self::Alumni => &[r"alumni", r"referral", r"referred", r"how.*hear"],
        }
    }
}

impl fmt::Display for LogicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    #[error("column '{header}' chosen for {field} does not exist in the input")]
    UnknownColumn { field: LogicalField, header: String },
    #[error("missing required mapping for: {0}")]
    Unresolved(LogicalField),
}

/// Resolved logical field to header mapping. Only the email column is mandatory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    email: String,
    optional: BTreeMap<LogicalField, String>,
}

impl ColumnMapping {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            optional: BTreeMap::new(),
        }
    }

    pub fn with(mut self, field: LogicalField, header: impl Into<String>) -> Self {
        match field {
            LogicalField::Email => self.email = header.into(),
            other => {
                self.optional.insert(other, header.into());
            }
        }
        self
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn column(&self, field: LogicalField) -> Option<&str> {
        match field {
            LogicalField::Email => Some(&self.email),
            other => self.optional.get(&other).map(String::as_str),
        }
    }
}

/// Guesses which header holds each logical field, honouring explicit overrides.
#[derive(Debug, Clone, Default)]
pub struct ColumnResolver {
    overrides: BTreeMap<LogicalField, String>,
}

impl ColumnResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_override(mut self, field: LogicalField, header: impl Into<String>) -> Self {
        self.overrides.insert(field, header.into());
        self
    }

    pub fn resolve(&self, table: &Table) -> Result<ColumnMapping, MappingError> {
        let mut resolved: BTreeMap<LogicalField, String> = BTreeMap::new();
        let mut claimed: HashSet<usize> = HashSet::new();

        for (field, header) in &self.overrides {
            let index =
                table
                    .column_index(header)
                    .ok_or_else(|| MappingError::UnknownColumn {
                        field: *field,
                        header: header.clone(),
                    })?;
            claimed.insert(index);
            resolved.insert(*field, table.headers()[index].clone());
        }

        for field in LogicalField::ordered() {
            if resolved.contains_key(&field) {
                continue;
            }
            let hit = table
                .headers()
                .iter()
                .enumerate()
                .filter(|(index, _)| !claimed.contains(index))
                .find(|(_, header)| header_matches(field, header));
            match hit {
                Some((index, header)) => {
                    claimed.insert(index);
                    resolved.insert(field, header.clone());
                }
                None if field.is_required() => return Err(MappingError::Unresolved(field)),
                None => {}
            }
        }

        let email = resolved
            .remove(&LogicalField::Email)
            .ok_or(MappingError::Unresolved(LogicalField::Email))?;
        Ok(ColumnMapping {
            email,
            optional: resolved,
        })
    }
}

fn header_matches(field: LogicalField, header: &str) -> bool {
    let lowered = header.to_lowercase();
    compiled_patterns()
        .get(&field)
        .map(|patterns| patterns.iter().any(|pattern| pattern.is_match(&lowered)))
        .unwrap_or(false)
}

fn compiled_patterns() -> &'static BTreeMap<LogicalField, Vec<Regex>> {
    static PATTERNS: OnceLock<BTreeMap<LogicalField, Vec<Regex>>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        LogicalField::ordered()
            .into_iter()
            .map(|field| {
                let patterns = field
                    .patterns()
                    .iter()
                    .filter_map(|pattern| Regex::new(pattern).ok())
                    .collect();
                (field, patterns)
            })
            .collect()
    })
}
