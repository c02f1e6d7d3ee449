//! In-memory roster of students and courses
//!
//! `GradeBook` is the only mutator of enrollment and grade state. Every
//! operation either succeeds completely or returns a [`GradeBookError`] and
//! leaves the roster untouched.

use crate::core::grading::grade_points;
use crate::core::models::{Course, Enrollment, Student};
use crate::{debug, warn};
use thiserror::Error;

/// Rejected roster operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GradeBookError {
    /// A student with this email already exists
    #[error("Student with email '{0}' already exists")]
    DuplicateStudent(String),

    /// A course with this name already exists
    #[error("Course '{0}' already exists")]
    DuplicateCourse(String),

    /// No student with this email
    #[error("Student '{0}' does not exist")]
    StudentNotFound(String),

    /// No course with this name
    #[error("Course '{0}' does not exist")]
    CourseNotFound(String),

    /// The student is not registered for the course
    #[error("Student '{email}' is not registered for course '{course}'")]
    EnrollmentNotFound {
        /// Student email
        email: String,
        /// Course name
        course: String,
    },

    /// The student is already registered for the course
    #[error("Student '{email}' is already registered for course '{course}'")]
    AlreadyEnrolled {
        /// Student email
        email: String,
        /// Course name
        course: String,
    },

    /// An email or course name is blank after trimming
    #[error("{0} must not be empty")]
    EmptyKey(&'static str),

    /// Credit hours must be a positive integer
    #[error("Course '{0}' must carry at least one credit hour")]
    InvalidCredits(String),
}

/// One line of the transcript: position, display name and GPA
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptEntry<'a> {
    /// 1-based rank by GPA
    pub rank: usize,
    /// The ranked student
    pub student: &'a Student,
}

impl TranscriptEntry<'_> {
    /// Student display name
    #[must_use]
    pub fn name(&self) -> &str {
        self.student.names()
    }

    /// Student GPA
    #[must_use]
    pub const fn gpa(&self) -> f64 {
        self.student.gpa()
    }
}

/// Registry of students and courses, both kept in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GradeBook {
    students: Vec<Student>,
    courses: Vec<Course>,
}

impl GradeBook {
    /// Create an empty grade book
    #[must_use]
    pub const fn new() -> Self {
        Self {
            students: Vec::new(),
            courses: Vec::new(),
        }
    }

    /// Build a grade book from already validated collections
    pub(crate) const fn from_parts(students: Vec<Student>, courses: Vec<Course>) -> Self {
        Self { students, courses }
    }

    /// Students in insertion order
    #[must_use]
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// Courses in insertion order
    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Whether the grade book has neither students nor courses
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.students.is_empty() && self.courses.is_empty()
    }

    /// Look up a student by email (case-insensitive, whitespace-trimmed)
    #[must_use]
    pub fn student(&self, email: &str) -> Option<&Student> {
        let key = Student::normalize_email(email);
        self.students.iter().find(|s| s.email() == key)
    }

    /// Look up a course by name (whitespace-trimmed)
    #[must_use]
    pub fn course(&self, name: &str) -> Option<&Course> {
        let key = Course::normalize_name(name);
        self.courses.iter().find(|c| c.name() == key)
    }

    fn student_index(&self, email: &str) -> Result<usize, GradeBookError> {
        let key = Student::normalize_email(email);
        self.students
            .iter()
            .position(|s| s.email() == key)
            .ok_or_else(|| {
                warn!("Unknown student: {key}");
                GradeBookError::StudentNotFound(key)
            })
    }

    fn existing_course(&self, name: &str) -> Result<&Course, GradeBookError> {
        self.course(name).ok_or_else(|| {
            let key = Course::normalize_name(name);
            warn!("Unknown course: {key}");
            GradeBookError::CourseNotFound(key)
        })
    }

    /// Add a new student
    ///
    /// # Errors
    /// Returns [`GradeBookError::EmptyKey`] for a blank email, or
    /// [`GradeBookError::DuplicateStudent`] if the normalized email is taken.
    pub fn add_student(&mut self, email: &str, names: &str) -> Result<&Student, GradeBookError> {
        let student = Student::new(email, names);
        if student.email().is_empty() {
            warn!("Rejected student with a blank email");
            return Err(GradeBookError::EmptyKey("Student email"));
        }
        if self.student(student.email()).is_some() {
            warn!("Rejected duplicate student: {}", student.email());
            return Err(GradeBookError::DuplicateStudent(student.email().to_string()));
        }
        debug!("Adding student {} ({})", student.email(), student.names());
        let idx = self.students.len();
        self.students.push(student);
        Ok(&self.students[idx])
    }

    /// Add a new course
    ///
    /// # Errors
    /// Returns [`GradeBookError::EmptyKey`] for a blank name,
    /// [`GradeBookError::DuplicateCourse`] if the trimmed name is taken, or
    /// [`GradeBookError::InvalidCredits`] if `credits` is zero.
    pub fn add_course(
        &mut self,
        name: &str,
        trimester: &str,
        credits: u32,
    ) -> Result<&Course, GradeBookError> {
        let course = Course::new(name, trimester, credits);
        if course.name().is_empty() {
            warn!("Rejected course with a blank name");
            return Err(GradeBookError::EmptyKey("Course name"));
        }
        if self.course(course.name()).is_some() {
            warn!("Rejected duplicate course: {}", course.name());
            return Err(GradeBookError::DuplicateCourse(course.name().to_string()));
        }
        if credits == 0 {
            warn!("Rejected course {} with zero credits", course.name());
            return Err(GradeBookError::InvalidCredits(course.name().to_string()));
        }
        debug!(
            "Adding course {} ({}, {} credits)",
            course.name(),
            course.trimester(),
            course.credits()
        );
        let idx = self.courses.len();
        self.courses.push(course);
        Ok(&self.courses[idx])
    }

    /// Register a student for a course
    ///
    /// The course's current credit hours are copied into the new record.
    ///
    /// # Errors
    /// Returns [`GradeBookError::StudentNotFound`] or [`GradeBookError::CourseNotFound`]
    /// when either side is missing, and [`GradeBookError::AlreadyEnrolled`] when the
    /// student already holds a record for the course.
    pub fn enroll(&mut self, email: &str, course_name: &str) -> Result<(), GradeBookError> {
        let idx = self.student_index(email)?;
        let course = self.existing_course(course_name)?;
        let enrollment = Enrollment::new(course.name().to_string(), course.credits());

        let student = &mut self.students[idx];
        if student.is_enrolled_in(&enrollment.course_name) {
            warn!(
                "Rejected repeat registration of {} for {}",
                student.email(),
                enrollment.course_name
            );
            return Err(GradeBookError::AlreadyEnrolled {
                email: student.email().to_string(),
                course: enrollment.course_name,
            });
        }
        debug!("Registering {} for {}", student.email(), enrollment.course_name);
        student.push_enrollment(enrollment);
        Ok(())
    }

    /// Record a percentage grade for a registered course
    ///
    /// Converts the percentage into grade points, stores them on the enrollment
    /// (replacing any earlier grade) and recomputes the student's GPA.
    ///
    /// # Returns
    /// The grade points stored.
    ///
    /// # Errors
    /// Returns [`GradeBookError::StudentNotFound`], [`GradeBookError::CourseNotFound`]
    /// or [`GradeBookError::EnrollmentNotFound`].
    pub fn assign_grade(
        &mut self,
        email: &str,
        course_name: &str,
        percentage: f64,
    ) -> Result<f64, GradeBookError> {
        let idx = self.student_index(email)?;
        let course_key = self.existing_course(course_name)?.name().to_string();

        let points = grade_points(percentage);
        let student = &mut self.students[idx];
        if !student.set_grade(&course_key, points) {
            warn!("{} is not registered for {course_key}", student.email());
            return Err(GradeBookError::EnrollmentNotFound {
                email: student.email().to_string(),
                course: course_key,
            });
        }
        debug!(
            "Graded {} in {}: {percentage}% -> {points} (GPA {})",
            student.email(),
            course_key,
            student.gpa()
        );
        Ok(points)
    }

    /// Recompute every student's GPA from their enrollments
    pub fn recalculate_gpas(&mut self) {
        for student in &mut self.students {
            student.recalculate_gpa();
        }
    }

    /// Students ordered by their current GPA, highest first
    ///
    /// Equal GPAs keep their insertion order. GPAs are not recomputed; see [`Self::rank`].
    #[must_use]
    pub fn ranked(&self) -> Vec<&Student> {
        let mut ranked: Vec<&Student> = self.students.iter().collect();
        ranked.sort_by(|a, b| b.gpa().total_cmp(&a.gpa()));
        ranked
    }

    /// Recompute all GPAs, then order students by GPA, highest first
    ///
    /// Equal GPAs keep their insertion order.
    pub fn rank(&mut self) -> Vec<&Student> {
        self.recalculate_gpas();
        self.ranked()
    }

    /// Students whose GPA lies in `min..=max`, in insertion order
    pub fn filter_by_gpa(&mut self, min: f64, max: f64) -> Vec<&Student> {
        self.recalculate_gpas();
        self.students
            .iter()
            .filter(|s| (min..=max).contains(&s.gpa()))
            .collect()
    }

    /// Transcript entries for the current GPAs, rank starting at 1
    #[must_use]
    pub fn transcript_entries(&self) -> Vec<TranscriptEntry<'_>> {
        self.ranked()
            .into_iter()
            .enumerate()
            .map(|(i, student)| TranscriptEntry {
                rank: i + 1,
                student,
            })
            .collect()
    }

    /// Recompute all GPAs, then build the ranked transcript
    pub fn transcript(&mut self) -> Vec<TranscriptEntry<'_>> {
        self.recalculate_gpas();
        self.transcript_entries()
    }
}
