//! CLI command handlers for the grade book.
//!
//! `config` manages settings, `menu` runs the interactive loop, `roster` runs
//! one-shot roster commands, and `output` holds the listings both share.

pub mod config;
pub mod menu;
pub mod output;
pub mod roster;

use grade_book::config::Config;
use grade_book::core::storage;
use grade_book::GradeBook;

/// Load the grade book from the configured documents
///
/// # Errors
/// Returns a printable message when a document is unreadable or invalid.
pub fn load_book(config: &Config) -> Result<GradeBook, String> {
    storage::load(&config.students_path(), &config.courses_path())
        .map_err(|e| format!("✗ Failed to load grade book: {e}"))
}

/// Write the grade book back to the configured documents
///
/// # Errors
/// Returns a printable message when a document cannot be written.
pub fn save_book(book: &GradeBook, config: &Config) -> Result<(), String> {
    storage::save(book, &config.students_path(), &config.courses_path())
        .map_err(|e| format!("✗ Failed to save grade book: {e}"))
}
