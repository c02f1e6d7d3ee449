//! Transcript report generation
//!
//! Renders the ranked transcript in Markdown or HTML from embedded templates.
//! Each student section lists their registered courses with credits and grade points.

pub mod formats;

use crate::core::gradebook::{GradeBook, TranscriptEntry};
use crate::core::models::Enrollment;
use std::error::Error;
use std::path::Path;

pub use formats::{HtmlReporter, MarkdownReporter, ReportFormat};

/// Data context for report generation
///
/// Built from a grade book whose GPAs are already current.
#[derive(Debug, Clone)]
pub struct TranscriptContext<'a> {
    /// The grade book being reported
    pub book: &'a GradeBook,
    /// Students in rank order
    pub entries: Vec<TranscriptEntry<'a>>,
}

impl<'a> TranscriptContext<'a> {
    /// Create a report context from the grade book's current state
    #[must_use]
    pub fn new(book: &'a GradeBook) -> Self {
        Self {
            book,
            entries: book.transcript_entries(),
        }
    }

    /// Number of students on the transcript
    #[must_use]
    pub fn student_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of courses on offer
    #[must_use]
    pub fn course_count(&self) -> usize {
        self.book.courses().len()
    }

    /// Mean GPA over students with at least one graded course
    #[must_use]
    pub fn mean_gpa(&self) -> Option<f64> {
        let graded: Vec<f64> = self
            .entries
            .iter()
            .filter(|e| e.student.enrollments().iter().any(Enrollment::is_graded))
            .map(TranscriptEntry::gpa)
            .collect();
        if graded.is_empty() {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        let count = graded.len() as f64;
        Some(graded.iter().sum::<f64>() / count)
    }

    /// Trimester label of an enrolled course, if the course still exists
    #[must_use]
    pub fn trimester_of(&self, enrollment: &Enrollment) -> &str {
        self.book
            .course(&enrollment.course_name)
            .map_or("-", |c| c.trimester())
    }
}

/// Format grade points for display; ungraded records show a dash
#[must_use]
pub fn format_grade(grade: Option<f64>) -> String {
    grade.map_or_else(|| "-".to_string(), |g| format!("{g:.1}"))
}

/// Fill `{{name}}` placeholders in one pass over `template`
///
/// Substituted text is never scanned again, so values may contain braces.
/// Placeholders without a value are kept as written.
#[must_use]
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };
        let name = &after[..end];
        match values.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + end + 4]),
        }
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if report generation or file writing fails
    fn generate(&self, ctx: &TranscriptContext, output_path: &Path) -> Result<(), Box<dyn Error>>;

    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if report generation fails
    fn render(&self, ctx: &TranscriptContext) -> Result<String, Box<dyn Error>>;
}

/// Reporter for a format
#[must_use]
pub fn reporter_for(format: ReportFormat) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Markdown => Box::new(MarkdownReporter::new()),
        ReportFormat::Html => Box::new(HtmlReporter::new()),
    }
}
