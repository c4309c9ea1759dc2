//! Recover a contactable list from a scored table.
//!
//! The scored artifact carries PIDs only. Whoever holds the raw applicant list and the
//! salt used at scoring time can recompute each row's PID and attach the decision and
//! fit score back to the contact details.

use crate::workflows::screening::{
    dedupe, parse_timestamp, ApplicantRecord, IdentifiedApplicant, IdentityHasher, KeepPolicy,
    Pid, Table,
};
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::{info, warn};

const PID_COLUMN: &str = "PID";
const DECISION_COLUMN: &str = "Decision";
const RFS_COLUMN: &str = "RFS";

#[derive(Debug, thiserror::Error)]
pub enum JoinError {
    #[error("couldn't find '{0}' in the applications table; pass the email column name")]
    MissingEmailColumn(String),
    #[error("scored table is missing columns: {}", .0.join(", "))]
    MissingScoredColumns(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOptions {
    pub email_column: String,
    /// Used for de-duplication only when the column exists in the applications table.
    pub date_column: Option<String>,
}

impl Default for JoinOptions {
    fn default() -> Self {
        Self {
            email_column: "Email".to_string(),
            date_column: Some("ApplicationDate".to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct JoinSummary {
    pub matched: usize,
    pub unmatched: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JoinOutcome {
    pub table: Table,
    pub summary: JoinSummary,
}

#[derive(Debug, Clone)]
struct ScoredEntry {
    decision: String,
    rfs: f64,
    rfs_text: String,
}

/// Left-join the applications table onto the scored table by recomputed PID.
///
/// Output columns are `[email, PID, Decision, RFS, ...remaining application columns]`.
/// Matched rows come first ordered by decision text then descending fit score;
/// unmatched rows follow in input order with blank decision and score.
pub fn join(
    applications: &Table,
    scored: &Table,
    hasher: &IdentityHasher,
    options: &JoinOptions,
) -> Result<JoinOutcome, JoinError> {
    let email_index = applications
        .column_index(&options.email_column)
        .ok_or_else(|| JoinError::MissingEmailColumn(options.email_column.clone()))?;
    let scores = index_scored(scored)?;

    let date_index = options
        .date_column
        .as_deref()
        .and_then(|column| applications.column_index(column));
    let rows = surviving_rows(applications, email_index, date_index, hasher);

    let mut matched: Vec<(usize, Pid, &ScoredEntry)> = Vec::new();
    let mut unmatched: Vec<(usize, Pid)> = Vec::new();
    for (row, pid) in rows {
        match scores.get(pid.as_str()) {
            Some(entry) => matched.push((row, pid, entry)),
            None => unmatched.push((row, pid)),
        }
    }

    matched.sort_by(|(_, _, left), (_, _, right)| {
        left.decision
            .cmp(&right.decision)
            .then_with(|| right.rfs.partial_cmp(&left.rfs).unwrap_or(Ordering::Equal))
    });

    let rest: Vec<usize> = applications
        .headers()
        .iter()
        .enumerate()
        .filter(|(index, header)| *index != email_index && !is_join_column(header))
        .map(|(index, _)| index)
        .collect();

    let mut headers = vec![
        applications.headers()[email_index].clone(),
        PID_COLUMN.to_string(),
        DECISION_COLUMN.to_string(),
        RFS_COLUMN.to_string(),
    ];
    headers.extend(rest.iter().map(|&index| applications.headers()[index].clone()));

    let build_row = |row: usize, pid: &Pid, decision: &str, rfs: &str| -> Vec<String> {
        let cell = |column: usize| applications.cell(row, column).unwrap_or_default().to_string();
        let mut cells = vec![
            cell(email_index),
            pid.to_string(),
            decision.to_string(),
            rfs.to_string(),
        ];
        cells.extend(rest.iter().map(|&column| cell(column)));
        cells
    };

    let summary = JoinSummary {
        matched: matched.len(),
        unmatched: unmatched.len(),
    };

    let mut output_rows = Vec::with_capacity(summary.matched + summary.unmatched);
    for (row, pid, entry) in &matched {
        output_rows.push(build_row(*row, pid, &entry.decision, &entry.rfs_text));
    }
    for (row, pid) in &unmatched {
        output_rows.push(build_row(*row, pid, "", ""));
    }

    info!(
        matched = summary.matched,
        unmatched = summary.unmatched,
        "joined applications to scored table"
    );

    Ok(JoinOutcome {
        table: Table::new(headers, output_rows),
        summary,
    })
}

fn index_scored(scored: &Table) -> Result<HashMap<String, ScoredEntry>, JoinError> {
    let required = [PID_COLUMN, RFS_COLUMN, DECISION_COLUMN];
    let missing: Vec<String> = required
        .iter()
        .filter(|column| scored.column_index(column).is_none())
        .map(|column| column.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(JoinError::MissingScoredColumns(missing));
    }

    let column = |name: &str| scored.column_index(name).unwrap_or_default();
    let (pid_index, rfs_index, decision_index) =
        (column(PID_COLUMN), column(RFS_COLUMN), column(DECISION_COLUMN));

    let mut entries = HashMap::with_capacity(scored.len());
    for row in 0..scored.len() {
        let pid = scored.cell(row, pid_index).unwrap_or_default().trim();
        if pid.is_empty() {
            continue;
        }
        let rfs_text = scored.cell(row, rfs_index).unwrap_or_default().trim();
        let Ok(rfs) = rfs_text.parse::<f64>() else {
            warn!(row, value = rfs_text, "skipping scored row with unreadable RFS");
            continue;
        };
        entries
            .entry(pid.to_string())
            .or_insert_with(|| ScoredEntry {
                decision: scored
                    .cell(row, decision_index)
                    .unwrap_or_default()
                    .trim()
                    .to_string(),
                rfs,
                rfs_text: rfs_text.to_string(),
            });
    }
    Ok(entries)
}

/// Rows of the applications table with their PIDs, collapsed to the latest dated row
/// per PID when a date column is available.
fn surviving_rows(
    applications: &Table,
    email_index: usize,
    date_index: Option<usize>,
    hasher: &IdentityHasher,
) -> Vec<(usize, Pid)> {
    let identified: Vec<IdentifiedApplicant> = (0..applications.len())
        .map(|row| IdentifiedApplicant {
            pid: hasher.pid_for(applications.cell(row, email_index)),
            record: ApplicantRecord {
                row,
                submitted_at: date_index
                    .and_then(|column| applications.cell(row, column))
                    .and_then(parse_timestamp),
                ..ApplicantRecord::default()
            },
        })
        .collect();

    if date_index.is_none() {
        return identified
            .into_iter()
            .map(|applicant| (applicant.record.row, applicant.pid))
            .collect();
    }

    let before = identified.len();
    let mut survivors = dedupe(identified, KeepPolicy::KeepLast, true);
    survivors.sort_by_key(|applicant| applicant.record.row);
    if survivors.len() < before {
        info!(
            removed = before - survivors.len(),
            "collapsed repeated applications by latest date"
        );
    }
    survivors
        .into_iter()
        .map(|applicant| (applicant.record.row, applicant.pid))
        .collect()
}

fn is_join_column(header: &str) -> bool {
    [PID_COLUMN, DECISION_COLUMN, RFS_COLUMN]
        .iter()
        .any(|column| header.eq_ignore_ascii_case(column))
}
