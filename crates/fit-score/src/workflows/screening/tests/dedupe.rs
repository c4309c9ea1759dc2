use super::common::*;
use crate::workflows::screening::{dedupe, KeepPolicy};
use std::collections::HashSet;

#[test]
fn timestamps_keep_latest_submission() {
    let applicants = vec![
        identified("jane@example.com", 0, Some(at(5, 9))),
        identified("omar@example.com", 1, Some(at(3, 9))),
        identified("Jane@Example.com ", 2, Some(at(2, 9))),
        identified("jane@example.com", 3, Some(at(7, 9))),
    ];

    let survivors = dedupe(applicants, KeepPolicy::KeepFirst, true);

    assert_eq!(survivors.len(), 2);
    let jane = survivors
        .iter()
        .find(|applicant| applicant.record.email.as_deref() == Some("jane@example.com"))
        .expect("jane survives");
    assert_eq!(jane.record.row, 3);
}

#[test]
fn unparseable_timestamps_sort_first() {
    let applicants = vec![
        identified("jane@example.com", 0, Some(at(1, 8))),
        identified("jane@example.com", 1, None),
    ];

    let survivors = dedupe(applicants, KeepPolicy::KeepLast, true);

    assert_eq!(survivors.len(), 1);
    assert_eq!(survivors[0].record.row, 0);
}

#[test]
fn row_order_policy_applies_without_timestamps() {
    let applicants = || {
        vec![
            identified("jane@example.com", 0, None),
            identified("omar@example.com", 1, None),
            identified("jane@example.com", 2, None),
        ]
    };

    let first = dedupe(applicants(), KeepPolicy::KeepFirst, false);
    let rows: Vec<usize> = first.iter().map(|applicant| applicant.record.row).collect();
    assert_eq!(rows, vec![0, 1]);

    let last = dedupe(applicants(), KeepPolicy::KeepLast, false);
    let rows: Vec<usize> = last.iter().map(|applicant| applicant.record.row).collect();
    assert_eq!(rows, vec![1, 2]);
}

#[test]
fn output_has_unique_pids() {
    let applicants: Vec<_> = (0..30)
        .map(|row| identified(&format!("person{}@example.com", row % 7), row, None))
        .collect();

    let survivors = dedupe(applicants, KeepPolicy::KeepLast, false);

    let unique: HashSet<_> = survivors.iter().map(|applicant| &applicant.pid).collect();
    assert_eq!(unique.len(), survivors.len());
    assert_eq!(survivors.len(), 7);
}

#[test]
fn keep_policy_parses_both_spellings() {
    assert_eq!(KeepPolicy::parse("first"), Some(KeepPolicy::KeepFirst));
    assert_eq!(KeepPolicy::parse("KEEP_LAST"), Some(KeepPolicy::KeepLast));
    assert_eq!(KeepPolicy::parse("newest"), None);
}
