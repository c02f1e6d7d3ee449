//! Markdown transcript generator

use crate::core::report::{fill_template, format_grade, ReportGenerator, TranscriptContext};
use std::error::Error;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Embedded Markdown transcript template
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/transcript.md");

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &TranscriptContext) -> String {
        let mean = ctx
            .mean_gpa()
            .map_or_else(|| "-".to_string(), |g| format!("{g:.2}"));
        let students = ctx.student_count().to_string();
        let courses = ctx.course_count().to_string();
        let ranking = Self::generate_ranking_table(ctx);
        let sections = Self::generate_student_sections(ctx);

        fill_template(
            MARKDOWN_TEMPLATE,
            &[
                ("student_count", students.as_str()),
                ("course_count", courses.as_str()),
                ("mean_gpa", mean.as_str()),
                ("ranking", ranking.as_str()),
                ("students", sections.as_str()),
            ],
        )
    }

    /// Escape characters that would break a table cell
    fn cell(text: &str) -> String {
        text.replace('|', "\\|")
    }

    fn generate_ranking_table(ctx: &TranscriptContext) -> String {
        let mut md = String::new();
        for entry in &ctx.entries {
            let _ = writeln!(
                md,
                "| {} | {} | {} | {:.2} |",
                entry.rank,
                Self::cell(entry.name()),
                Self::cell(entry.student.email()),
                entry.gpa()
            );
        }
        md
    }

    fn generate_student_sections(ctx: &TranscriptContext) -> String {
        let mut md = String::new();
        for entry in &ctx.entries {
            let _ = writeln!(md, "### {}. {}\n", entry.rank, entry.name());
            let _ = writeln!(md, "GPA: {:.2}\n", entry.gpa());

            let enrollments = entry.student.enrollments();
            if enrollments.is_empty() {
                let _ = writeln!(md, "_No registered courses._\n");
                continue;
            }

            let _ = writeln!(md, "| Course | Trimester | Credits | Grade Points |");
            let _ = writeln!(md, "|--------|-----------|---------|--------------|");
            for enrollment in enrollments {
                let _ = writeln!(
                    md,
                    "| {} | {} | {} | {} |",
                    Self::cell(&enrollment.course_name),
                    Self::cell(ctx.trimester_of(enrollment)),
                    enrollment.credits,
                    format_grade(enrollment.grade)
                );
            }
            md.push('\n');
        }
        md
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn generate(&self, ctx: &TranscriptContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(ctx)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    fn render(&self, ctx: &TranscriptContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}
