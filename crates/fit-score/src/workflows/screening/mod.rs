//! Applicant screening: pseudonymisation, deduplication, rubric scoring and tiering.
//!
//! Data flows one way through the pipeline: table rows become [`ApplicantRecord`]s,
//! emails become [`Pid`]s, repeated identities collapse to one record, and each
//! survivor is scored independently by the [`FitScoreEngine`].

pub mod dedupe;
pub mod domain;
pub mod evaluation;
pub mod identity;
pub mod mapping;
mod normalizer;
pub mod report;
pub mod sector;
pub mod table;

#[cfg(test)]
mod tests;

pub use dedupe::{dedupe, KeepPolicy};
pub use domain::{parse_timestamp, ApplicantRecord, IdentifiedApplicant};
pub use evaluation::{
    decide, score, Decision, EvaluationOutcome, FieldScores, FitScoreEngine, FunctionRule,
    InvalidScoringConfig, LanguageRule, ScoreComponent, ScoreField, ScoringConfig, SectorCap,
};
pub use identity::{normalize_email, IdentityError, IdentityHasher, Pid, Salt};
pub use mapping::{ColumnMapping, ColumnResolver, LogicalField, MappingError};
pub use report::{write_scored_csv, ScoredApplicant, ScreeningSummary, OUTPUT_COLUMNS};
pub use sector::{classify_sector, Sector};
pub use table::{Table, TableError};

use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum ScreeningError {
    #[error("email column '{0}' does not exist in the input")]
    MissingEmailColumn(String),
    #[error("no valid email values found after normalization; check the email column mapping")]
    NoValidEmails,
}

/// Scored applicants plus run counts.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreeningOutcome {
    pub applicants: Vec<ScoredApplicant>,
    pub summary: ScreeningSummary,
}

/// One configured scoring run over a raw applicant table.
#[derive(Debug, Clone)]
pub struct ScreeningPipeline {
    hasher: IdentityHasher,
    engine: FitScoreEngine,
}

impl ScreeningPipeline {
    pub fn new(hasher: IdentityHasher, config: ScoringConfig) -> Self {
        Self {
            hasher,
            engine: FitScoreEngine::new(config),
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        self.engine.config()
    }

    pub fn run(
        &self,
        table: &Table,
        mapping: &ColumnMapping,
    ) -> Result<ScreeningOutcome, ScreeningError> {
        if table.column_index(mapping.email()).is_none() {
            return Err(ScreeningError::MissingEmailColumn(mapping.email().to_string()));
        }

        let records = ApplicantRecord::from_table(table, mapping);
        let input_rows = records.len();

        // Blank emails would all share one PID, so they are dropped rather than merged.
        let identified: Vec<IdentifiedApplicant> = records
            .into_iter()
            .filter_map(|record| {
                let normalized = normalize_email(record.email.as_deref());
                if normalized.is_empty() {
                    return None;
                }
                Some(IdentifiedApplicant {
                    pid: self.hasher.hash_id(&normalized),
                    record,
                })
            })
            .collect();

        let dropped_without_email = input_rows - identified.len();
        if identified.is_empty() {
            return Err(ScreeningError::NoValidEmails);
        }
        if dropped_without_email > 0 {
            warn!(dropped = dropped_without_email, "rows without an email were skipped");
        }

        let before = identified.len();
        let by_timestamp = mapping.column(LogicalField::Timestamp).is_some();
        let survivors = dedupe(identified, self.config().keep_policy, by_timestamp);
        let duplicates_removed = before - survivors.len();
        if duplicates_removed > 0 {
            info!(
                removed = duplicates_removed,
                by_timestamp,
                policy = ?self.config().keep_policy,
                "de-duplicated repeated applicants"
            );
        }

        let applicants: Vec<ScoredApplicant> = survivors
            .into_iter()
            .map(|applicant| {
                let outcome = self.engine.score(&applicant.record);
                ScoredApplicant::new(applicant.pid, applicant.record.row, outcome)
            })
            .collect();

        let mut summary = ScreeningSummary {
            input_rows,
            dropped_without_email,
            duplicates_removed,
            scored: applicants.len(),
            ..ScreeningSummary::default()
        };
        for applicant in &applicants {
            *summary.by_decision.entry(applicant.decision).or_default() += 1;
        }

        info!(
            scored = summary.scored,
            preset = %self.config().name,
            by_decision = ?summary.by_decision,
            "scored applicants"
        );

        Ok(ScreeningOutcome {
            applicants,
            summary,
        })
    }
}
