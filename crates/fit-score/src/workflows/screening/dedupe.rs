use super::domain::IdentifiedApplicant;
use super::identity::Pid;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Which submission survives when the same identity applied more than once and no
/// timestamp column is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeepPolicy {
    KeepFirst,
    #[default]
    KeepLast,
}

impl KeepPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "first" | "keep_first" => Some(Self::KeepFirst),
            "last" | "keep_last" => Some(Self::KeepLast),
            _ => None,
        }
    }
}

/// Collapse repeated submissions to one per PID.
///
/// With `by_timestamp` set, records are ordered by submission time (missing or
/// unparseable times first, ties kept in row order) and the latest survives regardless
/// of `policy`. Survivors keep their relative order.
pub fn dedupe(
    mut applicants: Vec<IdentifiedApplicant>,
    policy: KeepPolicy,
    by_timestamp: bool,
) -> Vec<IdentifiedApplicant> {
    let keep_last = if by_timestamp {
        applicants.sort_by_key(|applicant| applicant.record.submitted_at);
        true
    } else {
        policy == KeepPolicy::KeepLast
    };

    if keep_last {
        applicants.reverse();
    }

    let mut seen: HashSet<Pid> = HashSet::with_capacity(applicants.len());
    let mut survivors: Vec<IdentifiedApplicant> = applicants
        .into_iter()
        .filter(|applicant| seen.insert(applicant.pid.clone()))
        .collect();

    if keep_last {
        survivors.reverse();
    }
    survivors
}
