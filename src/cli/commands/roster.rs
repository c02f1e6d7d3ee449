//! One-shot roster commands
//!
//! Each command loads the grade book, runs a single operation and, when the
//! roster changed, saves it back.

use super::{load_book, output, save_book};
use crate::args::Command;
use grade_book::config::Config;
use grade_book::core::report::{reporter_for, ReportFormat, TranscriptContext};
use grade_book::{error, info, verbose, GradeBook};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Run a roster command against the configured documents.
///
/// Exits with status 1 when the grade book cannot be loaded or saved, or the
/// operation is rejected.
pub fn run(command: Command, config: &Config) {
    let mut book = match load_book(config) {
        Ok(book) => book,
        Err(e) => {
            error!("{e}");
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    verbose!(
        "Loaded {} students and {} courses",
        book.students().len(),
        book.courses().len()
    );

    match execute(command, &mut book, config) {
        Ok(Outcome::Changed(message)) => {
            if let Err(e) = save_book(&book, config) {
                eprintln!("{e}");
                std::process::exit(1);
            }
            println!("✓ {message}");
        }
        Ok(Outcome::Unchanged) => {}
        Err(e) => {
            eprintln!("✗ {e}");
            std::process::exit(1);
        }
    }
}

/// Result of a successful command
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The roster was modified and must be saved
    Changed(String),
    /// Read-only command; nothing to save
    Unchanged,
}

/// Execute a roster command, printing listings to stdout
///
/// # Errors
/// Returns a printable message when the operation is rejected or output fails.
pub fn execute(command: Command, book: &mut GradeBook, config: &Config) -> Result<Outcome, String> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute_to(command, book, config, &mut out)
}

fn io_message(e: &io::Error) -> String {
    format!("Failed to write output: {e}")
}

/// Execute a roster command, writing listings to `out`
///
/// # Errors
/// Returns a printable message when the operation is rejected or output fails.
pub fn execute_to(
    command: Command,
    book: &mut GradeBook,
    config: &Config,
    out: &mut impl Write,
) -> Result<Outcome, String> {
    match command {
        Command::AddStudent { email, names } => {
            let student = book.add_student(&email, &names).map_err(|e| e.to_string())?;
            Ok(Outcome::Changed(format!("Added student {}", student.email())))
        }
        Command::AddCourse {
            name,
            trimester,
            credits,
        } => {
            let course = book
                .add_course(&name, &trimester, credits)
                .map_err(|e| e.to_string())?;
            Ok(Outcome::Changed(format!("Added course {}", course.name())))
        }
        Command::Enroll { email, course } => {
            book.enroll(&email, &course).map_err(|e| e.to_string())?;
            Ok(Outcome::Changed(format!(
                "Registered {} for {}",
                email.trim(),
                course.trim()
            )))
        }
        Command::Grade {
            email,
            course,
            percentage,
        } => {
            let points = book
                .assign_grade(&email, &course, percentage)
                .map_err(|e| e.to_string())?;
            Ok(Outcome::Changed(format!(
                "Recorded {percentage}% ({points:.1} grade points) for {} in {}",
                email.trim(),
                course.trim()
            )))
        }
        Command::Rank => {
            output::write_ranking(out, &book.rank()).map_err(|e| io_message(&e))?;
            Ok(Outcome::Unchanged)
        }
        Command::Filter { min, max } => {
            output::write_filtered(out, &book.filter_by_gpa(min, max))
                .map_err(|e| io_message(&e))?;
            Ok(Outcome::Unchanged)
        }
        Command::Courses => {
            output::write_courses(out, book.courses()).map_err(|e| io_message(&e))?;
            Ok(Outcome::Unchanged)
        }
        Command::Transcript { format: None, .. } => {
            output::write_transcript(out, &book.transcript()).map_err(|e| io_message(&e))?;
            Ok(Outcome::Unchanged)
        }
        Command::Transcript {
            format: Some(format),
            output,
        } => {
            let path = write_transcript_report(book, &format, output.as_deref(), config)?;
            writeln!(out, "✓ Transcript written to: {}", path.display())
                .map_err(|e| io_message(&e))?;
            Ok(Outcome::Unchanged)
        }
        Command::Menu | Command::Config { .. } => {
            Err("Command is not a roster operation".to_string())
        }
    }
}

/// Render the transcript report and write it to disk
///
/// # Errors
/// Returns a printable message for an unknown format or a failed write.
pub fn write_transcript_report(
    book: &mut GradeBook,
    format_str: &str,
    output: Option<&Path>,
    config: &Config,
) -> Result<PathBuf, String> {
    let format = ReportFormat::from_str(format_str)?;
    let path = if let Some(path) = output {
        path.to_path_buf()
    } else {
        let reports_dir = PathBuf::from(&config.paths.reports_dir);
        std::fs::create_dir_all(&reports_dir).map_err(|e| {
            format!(
                "Failed to create reports directory {}: {e}",
                reports_dir.display()
            )
        })?;
        reports_dir.join(format!("transcript.{}", format.extension()))
    };

    book.recalculate_gpas();
    let ctx = TranscriptContext::new(book);
    reporter_for(format)
        .generate(&ctx, &path)
        .map_err(|e| format!("Failed to generate {format} transcript: {e}"))?;
    info!("Transcript ({format}) written to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_cmd(command: Command, book: &mut GradeBook) -> (Result<Outcome, String>, String) {
        let config = Config::default();
        let mut out = Vec::new();
        let result = execute_to(command, book, &config, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_mutations_report_changed() {
        let mut book = GradeBook::new();
        let (result, _) = run_cmd(
            Command::AddStudent {
                email: "A@X.com".to_string(),
                names: "Alice".to_string(),
            },
            &mut book,
        );
        assert_eq!(result, Ok(Outcome::Changed("Added student a@x.com".to_string())));

        let (result, _) = run_cmd(
            Command::AddStudent {
                email: "a@x.com".to_string(),
                names: "Again".to_string(),
            },
            &mut book,
        );
        assert!(result.unwrap_err().contains("already exists"));
    }

    #[test]
    fn test_listings_are_unchanged() {
        let mut book = GradeBook::new();
        book.add_course("CS101", "T1", 3).unwrap();

        let (result, text) = run_cmd(Command::Courses, &mut book);

        assert_eq!(result, Ok(Outcome::Unchanged));
        assert!(text.contains("Course Name: CS101 (T1, 3 credits)"));
    }

    #[test]
    fn test_transcript_report_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("t.html");
        let mut book = GradeBook::new();
        book.add_student("a@x.com", "Alice").unwrap();

        let (result, text) = run_cmd(
            Command::Transcript {
                format: Some("html".to_string()),
                output: Some(target.clone()),
            },
            &mut book,
        );

        assert_eq!(result, Ok(Outcome::Unchanged));
        assert!(text.contains("Transcript written to"));
        let html = std::fs::read_to_string(target).unwrap();
        assert!(html.contains("Alice"));
    }

    #[test]
    fn test_unknown_report_format() {
        let mut book = GradeBook::new();
        let (result, _) = run_cmd(
            Command::Transcript {
                format: Some("pdf".to_string()),
                output: None,
            },
            &mut book,
        );
        assert_eq!(result, Err("Unknown report format: pdf".to_string()));
    }
}
