//! Terminal listings shared by the menu and one-shot commands

use grade_book::core::models::{Course, Student};
use grade_book::TranscriptEntry;
use std::io::{self, Write};

/// Print students in rank order as `rank. email: GPA`
pub fn write_ranking(out: &mut impl Write, ranked: &[&Student]) -> io::Result<()> {
    if ranked.is_empty() {
        return writeln!(out, "No students available to rank.");
    }
    writeln!(out, "Student Ranking by GPA:")?;
    for (i, student) in ranked.iter().enumerate() {
        writeln!(out, "{}. {}: {:.2}", i + 1, student.email(), student.gpa())?;
    }
    Ok(())
}

/// Print students found in a GPA range as `email: GPA`
pub fn write_filtered(out: &mut impl Write, students: &[&Student]) -> io::Result<()> {
    if students.is_empty() {
        return writeln!(out, "No students found in the specified GPA range.");
    }
    writeln!(out, "Students in the GPA range:")?;
    for student in students {
        writeln!(out, "{}: {:.2}", student.email(), student.gpa())?;
    }
    Ok(())
}

/// Print the transcript as rank, name and GPA
pub fn write_transcript(out: &mut impl Write, entries: &[TranscriptEntry]) -> io::Result<()> {
    if entries.is_empty() {
        return writeln!(out, "No students available to generate transcripts.");
    }
    writeln!(out, "Transcript:")?;
    for entry in entries {
        writeln!(out, "{}. {}", entry.rank, entry.name())?;
        writeln!(out, "GPA: {:.2}\n", entry.gpa())?;
    }
    Ok(())
}

/// Print the course catalog
pub fn write_courses(out: &mut impl Write, courses: &[Course]) -> io::Result<()> {
    if courses.is_empty() {
        return writeln!(out, "No courses available.");
    }
    writeln!(out, "Available Courses:")?;
    for course in courses {
        writeln!(
            out,
            "Course Name: {} ({}, {} credits)",
            course.name(),
            course.trimester(),
            course.credits()
        )?;
    }
    Ok(())
}
