use fit_score::workflows::screening::{
    write_scored_csv, ColumnResolver, Decision, IdentityHasher, LogicalField, Salt,
    ScoringConfig, ScreeningPipeline, Sector, Table, OUTPUT_COLUMNS,
};

const MOTIVATION: &str = "I coordinate a seed value chain programme reaching 1200 farmers and I use \
survey data dashboards every week to track market prices and agricultural extension visits \
across three districts so this course would help me design better food system interventions \
and monitoring plans for our cooperative members next year";

fn survey_export() -> String {
    let header = "\u{feff}Timestamp;Email Address;Organisation;Motivation statement;Job title;\
Referee confirmation;English level;Weekly time commitment;Alumni referral";
    let rows = [
        format!(
            "2025-03-01 09:00:00;jane.doe@example.com;Ministry of Agriculture;{MOTIVATION};\
Senior Policy Analyst;Yes;Fluent;>=3h;Yes"
        ),
        "2025-03-02 09:00:00;omar@example.org;Lakeside Farmers Cooperative;;Field coordinator;Yes;;;"
            .to_string(),
        "2025-03-03 09:00:00;li@example.net;Acme Ltd;Keen to learn more;Intern;No;Working;1-2h;No"
            .to_string(),
        format!(
            "2025-03-04 09:00:00;JANE.DOE@example.com;Ministry of Agriculture;{MOTIVATION};\
Director;Yes;Fluent;2\u{2013}3h;No"
        ),
    ];
    format!("{header}\n{}\n", rows.join("\n"))
}

fn pipeline() -> ScreeningPipeline {
    let hasher = IdentityHasher::new(Salt::new("pepper").expect("valid salt"));
    ScreeningPipeline::new(hasher, ScoringConfig::finance_optimized())
}

#[test]
fn detects_columns_in_semicolon_export() {
    let table = Table::from_reader(survey_export().as_bytes()).expect("export parses");
    assert_eq!(table.len(), 4);
    assert_eq!(table.headers()[0], "Timestamp");

    let mapping = ColumnResolver::new().resolve(&table).expect("columns resolve");
    assert_eq!(mapping.email(), "Email Address");
    assert_eq!(mapping.column(LogicalField::Timestamp), Some("Timestamp"));
    assert_eq!(
        mapping.column(LogicalField::WeeklyTime),
        Some("Weekly time commitment")
    );
    assert_eq!(mapping.column(LogicalField::Language), Some("English level"));
}

#[test]
fn scores_export_into_pseudonymous_table() {
    let table = Table::from_reader(survey_export().as_bytes()).expect("export parses");
    let mapping = ColumnResolver::new().resolve(&table).expect("columns resolve");

    let outcome = pipeline().run(&table, &mapping).expect("pipeline runs");

    assert_eq!(outcome.summary.input_rows, 4);
    assert_eq!(outcome.summary.duplicates_removed, 1);
    assert_eq!(outcome.summary.scored, 3);

    let decisions: Vec<(Sector, f64, Decision)> = outcome
        .applicants
        .iter()
        .map(|applicant| (applicant.sector, applicant.rfs, applicant.decision))
        .collect();
    assert_eq!(
        decisions,
        vec![
            (Sector::FarmerOrg, 40.0, Decision::ReserveEquity),
            (Sector::Private, 27.0, Decision::Reserve),
            (Sector::Government, 94.0, Decision::Priority),
        ]
    );

    let mut buffer = Vec::new();
    write_scored_csv(&mut buffer, &outcome.applicants).expect("csv written");
    let text = String::from_utf8(buffer).expect("utf8 output");
    assert!(!text.contains('@'));

    let scored = Table::from_reader(text.as_bytes()).expect("scored csv parses");
    assert_eq!(scored.headers(), OUTPUT_COLUMNS);
    let pid = scored.column_index("PID").expect("pid column");
    assert!((0..scored.len()).all(|row| scored
        .cell(row, pid)
        .is_some_and(|value| value.len() == 16 && value.chars().all(|c| c.is_ascii_hexdigit()))));
}

#[test]
fn balanced_preset_changes_tiers_not_identities() {
    let table = Table::from_reader(survey_export().as_bytes()).expect("export parses");
    let mapping = ColumnResolver::new().resolve(&table).expect("columns resolve");

    let finance = pipeline().run(&table, &mapping).expect("finance run");
    let hasher = IdentityHasher::new(Salt::new("pepper").expect("valid salt"));
    let balanced = ScreeningPipeline::new(hasher, ScoringConfig::balanced())
        .run(&table, &mapping)
        .expect("balanced run");

    let pids = |outcome: &fit_score::workflows::screening::ScreeningOutcome| {
        outcome
            .applicants
            .iter()
            .map(|applicant| applicant.pid.clone())
            .collect::<Vec<_>>()
    };
    assert_eq!(pids(&finance), pids(&balanced));

    let max = ScoringConfig::balanced().max_total();
    assert!(balanced
        .applicants
        .iter()
        .all(|applicant| applicant.rfs >= 0.0 && applicant.rfs <= max));
}
