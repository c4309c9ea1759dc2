use chrono::{NaiveDate, NaiveDateTime};

use crate::workflows::screening::{
    ApplicantRecord, ColumnMapping, IdentifiedApplicant, IdentityHasher, LogicalField, Salt,
    ScoringConfig, ScreeningPipeline, Table,
};

pub(super) const SALT: &str = "pepper";

pub(super) fn hasher() -> IdentityHasher {
    IdentityHasher::new(Salt::new(SALT).expect("valid salt"))
}

pub(super) fn finance_config() -> ScoringConfig {
    ScoringConfig::finance_optimized()
}

pub(super) fn pipeline(config: ScoringConfig) -> ScreeningPipeline {
    ScreeningPipeline::new(hasher(), config)
}

/// 49-word statement that trips every rubric keyword.
pub(super) fn strong_motivation() -> String {
    "I coordinate a seed value chain programme reaching 1200 farmers and I use survey \
     data dashboards every week to track market prices and agricultural extension \
     visits across three districts so this course would help me design better food \
     system interventions and monitoring plans for our cooperative members next year"
        .to_string()
}

pub(super) fn record(row: usize) -> ApplicantRecord {
    ApplicantRecord {
        row,
        email: Some(format!("applicant{row}@example.org")),
        ..ApplicantRecord::default()
    }
}

pub(super) fn full_record(row: usize) -> ApplicantRecord {
    ApplicantRecord {
        row,
        email: Some(format!("applicant{row}@example.org")),
        organisation: Some("Ministry of Agriculture".to_string()),
        motivation: Some(strong_motivation()),
        function: Some("Senior Policy Analyst".to_string()),
        referee: Some("Yes, confirmed".to_string()),
        language: Some("Fluent".to_string()),
        weekly_time: Some(">=3h".to_string()),
        alumni: Some("Yes - referred by a 2023 alumna".to_string()),
        submitted_at: None,
    }
}

pub(super) fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, day)
        .expect("valid date")
        .and_hms_opt(hour, 0, 0)
        .expect("valid time")
}

pub(super) fn identified(email: &str, row: usize, submitted_at: Option<NaiveDateTime>) -> IdentifiedApplicant {
    let record = ApplicantRecord {
        row,
        email: Some(email.to_string()),
        submitted_at,
        ..ApplicantRecord::default()
    };
    IdentifiedApplicant {
        pid: hasher().pid_for(Some(email)),
        record,
    }
}

pub(super) const SURVEY_HEADERS: [&str; 9] = [
    "Timestamp",
    "Email",
    "Organisation",
    "Motivation statement",
    "Job title",
    "Referee confirmation",
    "Language level",
    "Weekly time commitment",
    "Alumni referral",
];

pub(super) fn survey_table(rows: Vec<[&str; 9]>) -> Table {
    Table::new(
        SURVEY_HEADERS.iter().map(|header| header.to_string()).collect(),
        rows.into_iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect(),
    )
}

pub(super) fn survey_mapping() -> ColumnMapping {
    ColumnMapping::new("Email")
        .with(LogicalField::Timestamp, "Timestamp")
        .with(LogicalField::Organisation, "Organisation")
        .with(LogicalField::Motivation, "Motivation statement")
        .with(LogicalField::Function, "Job title")
        .with(LogicalField::Referee, "Referee confirmation")
        .with(LogicalField::Language, "Language level")
        .with(LogicalField::WeeklyTime, "Weekly time commitment")
        .with(LogicalField::Alumni, "Alumni referral")
}
