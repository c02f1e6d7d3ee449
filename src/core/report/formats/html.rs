//! HTML transcript generator
//!
//! The generated page is self-contained with embedded CSS.

use crate::core::report::{fill_template, format_grade, ReportGenerator, TranscriptContext};
use std::error::Error;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Embedded HTML transcript template
const HTML_TEMPLATE: &str = include_str!("../templates/transcript.html");

/// HTML report generator
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
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
        let ranking = Self::generate_ranking_rows(ctx);
        let sections = Self::generate_student_sections(ctx);

        fill_template(
            HTML_TEMPLATE,
            &[
                ("student_count", students.as_str()),
                ("course_count", courses.as_str()),
                ("mean_gpa", mean.as_str()),
                ("ranking", ranking.as_str()),
                ("students", sections.as_str()),
            ],
        )
    }

    fn escape(text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for ch in text.chars() {
            match ch {
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                '"' => out.push_str("&quot;"),
                '\'' => out.push_str("&#39;"),
                _ => out.push(ch),
            }
        }
        out
    }

    fn generate_ranking_rows(ctx: &TranscriptContext) -> String {
        let mut html = String::new();
        for entry in &ctx.entries {
            let _ = writeln!(
                html,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{:.2}</td></tr>",
                entry.rank,
                Self::escape(entry.name()),
                Self::escape(entry.student.email()),
                entry.gpa()
            );
        }
        html
    }

    fn generate_student_sections(ctx: &TranscriptContext) -> String {
        let mut html = String::new();
        for entry in &ctx.entries {
            let _ = writeln!(
                html,
                "<h3>{}. {}</h3>\n<p>GPA: {:.2}</p>",
                entry.rank,
                Self::escape(entry.name()),
                entry.gpa()
            );

            let enrollments = entry.student.enrollments();
            if enrollments.is_empty() {
                let _ = writeln!(html, "<p class=\"ungraded\">No registered courses.</p>");
                continue;
            }

            let _ = writeln!(html, "<table>");
            let _ = writeln!(
                html,
                "<tr><th>Course</th><th>Trimester</th><th>Credits</th><th>Grade Points</th></tr>"
            );
            for enrollment in enrollments {
                let class = if enrollment.is_graded() {
                    ""
                } else {
                    " class=\"ungraded\""
                };
                let _ = writeln!(
                    html,
                    "<tr{class}><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                    Self::escape(&enrollment.course_name),
                    Self::escape(ctx.trimester_of(enrollment)),
                    enrollment.credits,
                    format_grade(enrollment.grade)
                );
            }
            let _ = writeln!(html, "</table>");
        }
        html
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn generate(&self, ctx: &TranscriptContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(ctx)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    fn render(&self, ctx: &TranscriptContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gradebook::GradeBook;

    #[test]
    fn test_escape() {
        assert_eq!(
            HtmlReporter::escape("<b>Tom & \"Jerry\"</b>"),
            "&lt;b&gt;Tom &amp; &quot;Jerry&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_html_escapes_student_names() {
        let mut book = GradeBook::new();
        book.add_course("CS101", "T1", 3).unwrap();
        book.add_student("a@x.com", "<script>").unwrap();
        book.enroll("a@x.com", "CS101").unwrap();

        let ctx = TranscriptContext::new(&book);
        let html = HtmlReporter::new().render(&ctx).unwrap();

        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains(
            "<tr class=\"ungraded\"><td>CS101</td><td>T1</td><td>3</td><td>-</td></tr>"
        ));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn test_placeholder_text_in_names_is_kept_verbatim() {
        let mut book = GradeBook::new();
        book.add_student("a@x.com", "{{mean_gpa}}").unwrap();

        let ctx = TranscriptContext::new(&book);
        let html = HtmlReporter::new().render(&ctx).unwrap();

        assert!(html.contains("<td>{{mean_gpa}}</td>"));
        assert_eq!(html.matches("<td>a@x.com</td>").count(), 1);
    }
}
