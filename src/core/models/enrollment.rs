//! Enrollment record model

/// A student's registration in a course
///
/// Credits are copied from the course when the record is created, so the record
/// stays valid on its own. `grade` holds grade points (0.0 to 4.0) once assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct Enrollment {
    /// Name of the enrolled course
    pub course_name: String,

    /// Credit hours copied from the course at enrollment time
    pub credits: u32,

    /// Grade points, or `None` until a grade is assigned
    pub grade: Option<f64>,
}

impl Enrollment {
    /// Create an ungraded enrollment record
    #[must_use]
    pub const fn new(course_name: String, credits: u32) -> Self {
        Self {
            course_name,
            credits,
            grade: None,
        }
    }

    /// Whether a grade has been assigned
    #[must_use]
    pub const fn is_graded(&self) -> bool {
        self.grade.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_enrollment_is_ungraded() {
        let enrollment = Enrollment::new("CS101".to_string(), 3);

        assert_eq!(enrollment.course_name, "CS101");
        assert_eq!(enrollment.credits, 3);
        assert!(!enrollment.is_graded());
    }
}
