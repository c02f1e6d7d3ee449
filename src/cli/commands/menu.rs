//! Interactive numbered menu
//!
//! Reads from any `BufRead` and writes to any `Write` so the loop can be driven
//! by tests. Invalid input re-prompts; end of input behaves like "Save and Exit".

use super::output;
use grade_book::core::input::{parse_float, parse_int, parse_text, MenuChoice};
use grade_book::{debug, GradeBook};
use std::io::{self, BufRead, Write};

const RULE: &str = "===================================";

/// Read one trimmed line after printing `prompt`; `None` at end of input
fn read_line(
    input: &mut impl BufRead,
    out: &mut impl Write,
    prompt: &str,
) -> io::Result<Option<String>> {
    write!(out, "{prompt}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Prompt until `parse` accepts the input; `None` at end of input
fn prompt_until<T>(
    input: &mut impl BufRead,
    out: &mut impl Write,
    prompt: &str,
    kind: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> io::Result<Option<T>> {
    loop {
        let Some(line) = read_line(input, out, prompt)? else {
            return Ok(None);
        };
        if let Some(value) = parse(&line) {
            return Ok(Some(value));
        }
        writeln!(out, "Invalid input. Please enter a valid {kind}.")?;
    }
}

fn prompt_text(
    input: &mut impl BufRead,
    out: &mut impl Write,
    prompt: &str,
) -> io::Result<Option<String>> {
    prompt_until(input, out, prompt, "text", parse_text)
}

fn print_menu(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\n{RULE}")?;
    writeln!(out, "        Grade Book Menu")?;
    writeln!(out, "{RULE}")?;
    for choice in MenuChoice::ALL {
        writeln!(out, "{choice}")?;
    }
    writeln!(out, "{RULE}")
}

/// Report the outcome of a roster operation
fn report<T, E: std::fmt::Display>(
    out: &mut impl Write,
    result: Result<T, E>,
    ok: &str,
) -> io::Result<()> {
    match result {
        Ok(_) => writeln!(out, "\n{ok}"),
        Err(e) => writeln!(out, "\nError: {e}"),
    }
}

/// Run one menu action. Returns `Ok(false)` when input ran out mid-action.
fn dispatch(
    choice: MenuChoice,
    book: &mut GradeBook,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> io::Result<bool> {
    debug!("Menu action: {}", choice.label());
    match choice {
        MenuChoice::AddStudent => {
            let Some(email) = prompt_text(input, out, "Enter student email: ")? else {
                return Ok(false);
            };
            let Some(names) = prompt_text(input, out, "Enter student names: ")? else {
                return Ok(false);
            };
            report(out, book.add_student(&email, &names), "Student added successfully.")?;
        }
        MenuChoice::AddCourse => {
            let Some(name) = prompt_text(input, out, "Enter course name: ")? else {
                return Ok(false);
            };
            let Some(trimester) = prompt_text(input, out, "Enter course trimester: ")? else {
                return Ok(false);
            };
            let Some(credits) =
                prompt_until(input, out, "Enter course credits: ", "integer", parse_int)?
            else {
                return Ok(false);
            };
            report(
                out,
                book.add_course(&name, &trimester, credits),
                "Course added successfully.",
            )?;
        }
        MenuChoice::Enroll => {
            let Some(email) = prompt_text(input, out, "Enter student email: ")? else {
                return Ok(false);
            };
            let Some(course) = prompt_text(input, out, "Enter course name: ")? else {
                return Ok(false);
            };
            report(out, book.enroll(&email, &course), "Course registered successfully.")?;
        }
        MenuChoice::AssignGrade => {
            let Some(email) = prompt_text(input, out, "Enter student email: ")? else {
                return Ok(false);
            };
            let Some(course) = prompt_text(input, out, "Enter course name: ")? else {
                return Ok(false);
            };
            let Some(percentage) =
                prompt_until(input, out, "Enter grade out of 100: ", "number", parse_float)?
            else {
                return Ok(false);
            };
            report(
                out,
                book.assign_grade(&email, &course, percentage),
                "Grade registered successfully.",
            )?;
        }
        MenuChoice::Rank => output::write_ranking(out, &book.rank())?,
        MenuChoice::FilterByGpa => {
            let Some(min) = prompt_until(input, out, "Enter minimum GPA: ", "number", parse_float)?
            else {
                return Ok(false);
            };
            let Some(max) = prompt_until(input, out, "Enter maximum GPA: ", "number", parse_float)?
            else {
                return Ok(false);
            };
            output::write_filtered(out, &book.filter_by_gpa(min, max))?;
        }
        MenuChoice::Transcript => output::write_transcript(out, &book.transcript())?,
        MenuChoice::ListCourses => output::write_courses(out, book.courses())?,
        MenuChoice::SaveAndExit => return Ok(false),
    }
    Ok(true)
}

/// Run the menu until "Save and Exit" is chosen or input ends
///
/// Saving is left to the caller.
///
/// # Errors
/// Returns an error only if reading input or writing output fails.
pub fn run_menu(
    book: &mut GradeBook,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> io::Result<()> {
    loop {
        print_menu(out)?;
        let Some(choice) =
            prompt_until(input, out, "Enter your choice: ", "integer", parse_int)?
        else {
            break;
        };
        let Some(choice) = MenuChoice::from_number(choice) else {
            writeln!(out, "\nInvalid choice. Please try again.")?;
            continue;
        };
        if !dispatch(choice, book, input, out)? {
            break;
        }
    }
    writeln!(out, "\nSaving data and exiting...")
}

/// Run the menu on the terminal
///
/// # Errors
/// Returns an error if the terminal cannot be read or written.
pub fn run_interactive(book: &mut GradeBook) -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_menu(book, &mut stdin.lock(), &mut stdout.lock())
}
