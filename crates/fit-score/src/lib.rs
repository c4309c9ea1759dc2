//! Recruitment fit scoring for applicant survey exports.
//!
//! The crate turns a table of free-text and categorical answers into a pseudonymised,
//! scored table with one decision tier per applicant, and can later rejoin that table
//! to the raw applicant list for anyone holding the same secret salt.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
