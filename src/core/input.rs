//! Parsing of interactive menu input
//!
//! Each parser is pure: it accepts a raw line and either returns the coerced
//! value or `None`. Re-prompting on `None` is left to the caller.

use std::fmt;

/// Parse a non-negative integer made only of ASCII digits
#[must_use]
pub fn parse_int(input: &str) -> Option<u32> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse().ok()
}

/// Parse a non-negative decimal: digits with at most one `.`
///
/// Signs, exponents and other float spellings (`inf`, `NaN`) are rejected.
#[must_use]
pub fn parse_float(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    let has_digit = trimmed.bytes().any(|b| b.is_ascii_digit());
    let dots = trimmed.bytes().filter(|&b| b == b'.').count();
    let only_digits_and_dot = trimmed.bytes().all(|b| b.is_ascii_digit() || b == b'.');
    if !has_digit || dots > 1 || !only_digits_and_dot {
        return None;
    }
    trimmed.parse().ok()
}

/// Accept text unless it is empty or made only of digits and spaces
#[must_use]
pub fn parse_text(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.chars().all(|c| c.is_ascii_digit() || c == ' ') {
        return None;
    }
    Some(trimmed.to_string())
}

/// Actions offered by the interactive menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// 1. Add a student
    AddStudent,
    /// 2. Add a course
    AddCourse,
    /// 3. Register a student for a course
    Enroll,
    /// 4. Record a grade
    AssignGrade,
    /// 5. Rank students by GPA
    Rank,
    /// 6. Search students by GPA range
    FilterByGpa,
    /// 7. Print the transcript
    Transcript,
    /// 8. List available courses
    ListCourses,
    /// 9. Save and exit
    SaveAndExit,
}

impl MenuChoice {
    /// All choices in menu order
    pub const ALL: [Self; 9] = [
        Self::AddStudent,
        Self::AddCourse,
        Self::Enroll,
        Self::AssignGrade,
        Self::Rank,
        Self::FilterByGpa,
        Self::Transcript,
        Self::ListCourses,
        Self::SaveAndExit,
    ];

    /// Menu number (1-based)
    #[must_use]
    pub fn number(self) -> usize {
        Self::ALL.iter().position(|&c| c == self).map_or(0, |i| i + 1)
    }

    /// Look up the choice for a menu number
    #[must_use]
    pub fn from_number(number: u32) -> Option<Self> {
        let idx = usize::try_from(number).ok()?.checked_sub(1)?;
        Self::ALL.get(idx).copied()
    }

    /// Menu label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::AddStudent => "Add Student",
            Self::AddCourse => "Add Course",
            Self::Enroll => "Register Student for Course",
            Self::AssignGrade => "Register Grade for Student",
            Self::Rank => "Calculate Ranking",
            Self::FilterByGpa => "Search by GPA",
            Self::Transcript => "Generate Transcript",
            Self::ListCourses => "View Available Courses",
            Self::SaveAndExit => "Save and Exit",
        }
    }
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.label())
    }
}

/// Parse a menu selection; `None` for anything other than 1–9
#[must_use]
pub fn parse_menu_choice(input: &str) -> Option<MenuChoice> {
    parse_int(input).and_then(MenuChoice::from_number)
}
