//! Student model

use super::Enrollment;
use crate::core::grading::compute_gpa;

/// A student and the courses they are registered for
#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    email: String,
    names: String,
    gpa: f64,
    enrollments: Vec<Enrollment>,
}

impl Student {
    /// Create a student with no enrollments and a GPA of 0.0
    ///
    /// # Arguments
    /// * `email` - Email address; trimmed and lower-cased to form the unique key
    /// * `names` - Display name; trimmed
    #[must_use]
    pub fn new(email: &str, names: &str) -> Self {
        Self {
            email: Self::normalize_email(email),
            names: names.trim().to_string(),
            gpa: 0.0,
            enrollments: Vec::new(),
        }
    }

    /// Rebuild a student from persisted parts, deriving the GPA from `enrollments`
    #[must_use]
    pub fn with_enrollments(email: &str, names: &str, enrollments: Vec<Enrollment>) -> Self {
        let mut student = Self::new(email, names);
        student.enrollments = enrollments;
        student.recalculate_gpa();
        student
    }

    /// Normalize an email address into its lookup key
    #[must_use]
    pub fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }

    /// Email address (unique key)
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Display name
    #[must_use]
    pub fn names(&self) -> &str {
        &self.names
    }

    /// GPA as of the last recalculation
    #[must_use]
    pub const fn gpa(&self) -> f64 {
        self.gpa
    }

    /// Enrollment records in registration order
    #[must_use]
    pub fn enrollments(&self) -> &[Enrollment] {
        &self.enrollments
    }

    /// Find the enrollment record for a course
    #[must_use]
    pub fn enrollment(&self, course_name: &str) -> Option<&Enrollment> {
        self.enrollments
            .iter()
            .find(|e| e.course_name == course_name)
    }

    /// Whether the student holds a record for the course
    #[must_use]
    pub fn is_enrolled_in(&self, course_name: &str) -> bool {
        self.enrollment(course_name).is_some()
    }

    /// Recompute the GPA from the graded enrollments
    pub fn recalculate_gpa(&mut self) {
        self.gpa = compute_gpa(&self.enrollments);
    }

    pub(crate) fn push_enrollment(&mut self, enrollment: Enrollment) {
        self.enrollments.push(enrollment);
    }

    /// Store grade points on the matching enrollment and refresh the GPA.
    /// Returns `false` when the student holds no record for the course.
    pub(crate) fn set_grade(&mut self, course_name: &str, points: f64) -> bool {
        let Some(entry) = self
            .enrollments
            .iter_mut()
            .find(|e| e.course_name == course_name)
        else {
            return false;
        };
        entry.grade = Some(points);
        self.recalculate_gpa();
        true
    }
}
