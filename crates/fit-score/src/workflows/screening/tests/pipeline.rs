use super::common::*;
use crate::workflows::screening::{
    write_scored_csv, ColumnMapping, Decision, KeepPolicy, LogicalField, ScoreField,
    ScreeningError, Sector, Table, OUTPUT_COLUMNS,
};

fn cohort() -> Table {
    let strong = strong_motivation();
    survey_table(vec![
        [
            "2025-03-01 09:00:00",
            "Jane.Doe@Example.com",
            "Ministry of Agriculture",
            strong.as_str(),
            "Senior Policy Analyst",
            "Yes",
            "Fluent",
            ">=3h",
            "Yes",
        ],
        [
            "2025-03-02 10:00:00",
            "",
            "Ministry of Agriculture",
            strong.as_str(),
            "Director",
            "Yes",
            "Fluent",
            ">=3h",
            "Yes",
        ],
        [
            "2025-03-03 11:00:00",
            "omar@example.org",
            "Lakeside Farmers Cooperative",
            "",
            "Field coordinator",
            "Yes",
            "",
            "",
            "",
        ],
        [
            "2025-03-04 12:00:00",
            " jane.doe@example.com ",
            "Ministry of Agriculture",
            "",
            "Intern",
            "No",
            "Basic",
            "<1h",
            "No",
        ],
    ])
}

#[test]
fn scores_cohort_end_to_end() {
    let outcome = pipeline(finance_config())
        .run(&cohort(), &survey_mapping())
        .expect("pipeline runs");

    let summary = &outcome.summary;
    assert_eq!(summary.input_rows, 4);
    assert_eq!(summary.dropped_without_email, 1);
    assert_eq!(summary.duplicates_removed, 1);
    assert_eq!(summary.scored, 2);
    assert_eq!(summary.by_decision.get(&Decision::ReserveEquity), Some(&1));
    assert_eq!(summary.by_decision.get(&Decision::Reserve), Some(&1));

    let omar = &outcome.applicants[0];
    assert_eq!(omar.source_row, 2);
    assert_eq!(omar.sector, Sector::FarmerOrg);
    assert_eq!(omar.rfs, 40.0);
    assert_eq!(omar.decision, Decision::ReserveEquity);

    // The later submission wins even though the first one scored higher.
    let jane = &outcome.applicants[1];
    assert_eq!(jane.pid.as_str(), "fb30037b6d90f8ea");
    assert_eq!(jane.source_row, 3);
    assert_eq!(jane.rfs, 19.5);
    assert_eq!(jane.decision, Decision::Reserve);
}

#[test]
fn row_order_policy_applies_without_timestamp_column() {
    let mapping = ColumnMapping::new("Email")
        .with(LogicalField::Organisation, "Organisation")
        .with(LogicalField::Motivation, "Motivation statement")
        .with(LogicalField::Function, "Job title")
        .with(LogicalField::Referee, "Referee confirmation")
        .with(LogicalField::Language, "Language level")
        .with(LogicalField::WeeklyTime, "Weekly time commitment")
        .with(LogicalField::Alumni, "Alumni referral");

    let mut config = finance_config();
    config.keep_policy = KeepPolicy::KeepFirst;
    let outcome = pipeline(config)
        .run(&cohort(), &mapping)
        .expect("pipeline runs");

    let jane = outcome
        .applicants
        .iter()
        .find(|applicant| applicant.pid.as_str() == "fb30037b6d90f8ea")
        .expect("jane scored");
    assert_eq!(jane.source_row, 0);
    assert_eq!(jane.rfs, 103.0);
    assert_eq!(jane.decision, Decision::Priority);
}

#[test]
fn blank_email_column_is_an_error() {
    let table = survey_table(vec![[
        "2025-03-01 09:00:00",
        "   ",
        "Ministry of Agriculture",
        "",
        "Analyst",
        "Yes",
        "",
        "",
        "",
    ]]);

    let error = pipeline(finance_config())
        .run(&table, &survey_mapping())
        .expect_err("no usable emails");
    assert!(matches!(error, ScreeningError::NoValidEmails));
}

#[test]
fn unknown_email_column_is_an_error() {
    let mapping = ColumnMapping::new("Contact address")
        .with(LogicalField::Motivation, "Motivation statement");

    let error = pipeline(finance_config())
        .run(&cohort(), &mapping)
        .expect_err("email column missing");
    assert!(matches!(error, ScreeningError::MissingEmailColumn(ref name) if name == "Contact address"));
}

#[test]
fn scored_csv_carries_no_contact_details() {
    let outcome = pipeline(finance_config())
        .run(&cohort(), &survey_mapping())
        .expect("pipeline runs");

    let mut buffer = Vec::new();
    write_scored_csv(&mut buffer, &outcome.applicants).expect("csv written");
    let text = String::from_utf8(buffer).expect("utf8");

    assert!(!text.to_lowercase().contains("example"));
    assert!(!text.contains('@'));

    let written = Table::from_reader(text.as_bytes()).expect("csv parses");
    assert_eq!(written.headers(), OUTPUT_COLUMNS);
    assert_eq!(written.len(), 2);
    let decision = written.column_index("Decision").expect("decision column");
    assert_eq!(written.cell(0, decision), Some("Reserve (Equity)"));
}

#[test]
fn empty_scored_csv_still_has_headers() {
    let mut buffer = Vec::new();
    write_scored_csv(&mut buffer, &[]).expect("csv written");
    let text = String::from_utf8(buffer).expect("utf8");
    assert_eq!(text.trim_end(), OUTPUT_COLUMNS.join(","));
}

#[test]
fn point_columns_follow_score_fields() {
    assert_eq!(OUTPUT_COLUMNS[..4], ["PID", "Sector", "RFS", "Decision"]);
    let points: Vec<&str> = ScoreField::ordered()
        .into_iter()
        .map(ScoreField::column_name)
        .collect();
    assert_eq!(OUTPUT_COLUMNS[4..], points[..]);
}
