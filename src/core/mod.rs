//! Core grade book functionality shared by the CLI and the library API

pub mod config;
pub mod gradebook;
pub mod grading;
pub mod input;
pub mod models;
pub mod report;
pub mod storage;

/// Returns the current version of the `grade_book` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
