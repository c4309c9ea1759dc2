use super::evaluation::{
    round2, Decision, EvaluationOutcome, FieldScores, ScoreComponent, ScoreField,
};
use super::identity::Pid;
use super::sector::Sector;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

pub const OUTPUT_COLUMNS: [&str; 11] = [
    "PID",
    "Sector",
    "RFS",
    "Decision",
    ScoreField::Motivation.column_name(),
    ScoreField::Sector.column_name(),
    ScoreField::Referee.column_name(),
    ScoreField::Function.column_name(),
    ScoreField::Time.column_name(),
    ScoreField::Language.column_name(),
    ScoreField::Alumni.column_name(),
];

/// One applicant in the scored output. Carries no contact details.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredApplicant {
    pub pid: Pid,
    pub source_row: usize,
    pub sector: Sector,
    pub rfs: f64,
    pub decision: Decision,
    pub field_scores: FieldScores,
    pub components: Vec<ScoreComponent>,
}

impl ScoredApplicant {
    pub(crate) fn new(pid: Pid, source_row: usize, outcome: EvaluationOutcome) -> Self {
        Self {
            pid,
            source_row,
            sector: outcome.sector,
            rfs: outcome.rfs,
            decision: outcome.decision,
            field_scores: outcome.field_scores,
            components: outcome.components,
        }
    }
}

/// Counts describing one scoring run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScreeningSummary {
    pub input_rows: usize,
    pub dropped_without_email: usize,
    pub duplicates_removed: usize,
    pub scored: usize,
    pub by_decision: BTreeMap<Decision, usize>,
}

#[derive(Debug, Serialize)]
struct ScoredRow<'a> {
    #[serde(rename = "PID")]
    pid: &'a Pid,
    #[serde(rename = "Sector")]
    sector: Sector,
    #[serde(rename = "RFS")]
    rfs: f64,
    #[serde(rename = "Decision")]
    decision: Decision,
    #[serde(rename = "MotivationPts")]
    motivation: f64,
    #[serde(rename = "SectorPts")]
    sector_points: f64,
    #[serde(rename = "RefereePts")]
    referee: f64,
    #[serde(rename = "FunctionPts")]
    function: f64,
    #[serde(rename = "TimePts")]
    time: f64,
    #[serde(rename = "LanguagePts")]
    language: f64,
    #[serde(rename = "AlumniPts")]
    alumni: f64,
}

impl<'a> From<&'a ScoredApplicant> for ScoredRow<'a> {
    fn from(applicant: &'a ScoredApplicant) -> Self {
        let scores = &applicant.field_scores;
        Self {
            pid: &applicant.pid,
            sector: applicant.sector,
            rfs: round2(applicant.rfs),
            decision: applicant.decision,
            motivation: round2(scores.motivation),
            sector_points: round2(scores.sector),
            referee: round2(scores.referee),
            function: round2(scores.function),
            time: round2(scores.time),
            language: round2(scores.language),
            alumni: round2(scores.alumni),
        }
    }
}

/// Write the scored table with the columns listed in [`OUTPUT_COLUMNS`].
pub fn write_scored_csv<W: Write>(writer: W, applicants: &[ScoredApplicant]) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    if applicants.is_empty() {
        csv_writer.write_record(OUTPUT_COLUMNS)?;
    }
    for applicant in applicants {
        csv_writer.serialize(ScoredRow::from(applicant))?;
    }
    csv_writer.flush()?;
    Ok(())
}
