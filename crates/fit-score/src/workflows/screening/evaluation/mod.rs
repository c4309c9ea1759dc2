mod config;
mod policy;
mod rules;

pub use config::{
    EquityReserve, FieldWeights, FunctionRule, InvalidScoringConfig, LanguageRule, ScoringConfig,
    SectorCap, Thresholds, BALANCED, FINANCE_OPTIMIZED,
};
pub use policy::{decide, Decision};
pub use rules::{
    function_points, language_band, language_points, motivation_points, rubric_scores,
    sector_points, time_band, time_points, yes_no_points, LanguageBand, RubricScores, TimeBand,
    RUBRIC_SUBSCORE_CAP,
};

use super::domain::ApplicantRecord;
use super::sector::{classify_sector, Sector};
use serde::{Deserialize, Serialize};

/// Stateless evaluator that applies one scoring configuration to applicants.
#[derive(Debug, Clone)]
pub struct FitScoreEngine {
    config: ScoringConfig,
}

impl FitScoreEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn score(&self, record: &ApplicantRecord) -> EvaluationOutcome {
        let sector = classify_sector(record.organisation.as_deref());
        let (field_scores, components) = rules::score_record(record, sector, &self.config);
        let rfs = round2(field_scores.total());
        let decision = decide(rfs, sector, &self.config);

        EvaluationOutcome {
            sector,
            field_scores,
            rfs,
            decision,
            components,
        }
    }
}

/// Score one applicant and return its fit score with the decision tier.
pub fn score(record: &ApplicantRecord, config: &ScoringConfig) -> (f64, Decision) {
    let sector = classify_sector(record.organisation.as_deref());
    let (field_scores, _) = rules::score_record(record, sector, config);
    let rfs = round2(field_scores.total());
    (rfs, decide(rfs, sector, config))
}

/// Scored fields, one per output column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreField {
    Motivation,
    Sector,
    Referee,
    Function,
    Time,
    Language,
    Alumni,
}

impl ScoreField {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::Motivation,
            Self::Sector,
            Self::Referee,
            Self::Function,
            Self::Time,
            Self::Language,
            Self::Alumni,
        ]
    }

    pub const fn column_name(self) -> &'static str {
        match self {
            Self::Motivation => "MotivationPts",
            Self::Sector => "SectorPts",
            Self::Referee => "RefereePts",
            Self::Function => "FunctionPts",
            Self::Time => "TimePts",
            Self::Language => "LanguagePts",
            Self::Alumni => "AlumniPts",
        }
    }
}

/// Discrete contribution to a fit score, kept for audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub field: ScoreField,
    pub points: f64,
    pub notes: String,
}

impl ScoreComponent {
    pub fn new(field: ScoreField, points: f64, notes: impl Into<String>) -> Self {
        Self {
            field,
            points,
            notes: notes.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldScores {
    pub motivation: f64,
    pub sector: f64,
    pub referee: f64,
    pub function: f64,
    pub time: f64,
    pub language: f64,
    pub alumni: f64,
}

impl FieldScores {
    pub fn get(&self, field: ScoreField) -> f64 {
        match field {
            ScoreField::Motivation => self.motivation,
            ScoreField::Sector => self.sector,
            ScoreField::Referee => self.referee,
            ScoreField::Function => self.function,
            ScoreField::Time => self.time,
            ScoreField::Language => self.language,
            ScoreField::Alumni => self.alumni,
        }
    }

    pub(crate) fn set(&mut self, field: ScoreField, points: f64) {
        let slot = match field {
            ScoreField::Motivation => &mut self.motivation,
            ScoreField::Sector => &mut self.sector,
            ScoreField::Referee => &mut self.referee,
            ScoreField::Function => &mut self.function,
            ScoreField::Time => &mut self.time,
            ScoreField::Language => &mut self.language,
            ScoreField::Alumni => &mut self.alumni,
        };
        *slot = points;
    }

    pub fn total(&self) -> f64 {
        ScoreField::ordered()
            .into_iter()
            .map(|field| self.get(field))
            .sum()
    }
}

/// Evaluation output: the classified sector, per-field points, fit score and tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationOutcome {
    pub sector: Sector,
    pub field_scores: FieldScores,
    pub rfs: f64,
    pub decision: Decision,
    pub components: Vec<ScoreComponent>,
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
