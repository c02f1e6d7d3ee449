//! JSON persistence for the grade book
//!
//! Students and courses live in two independent documents. Loading goes through
//! record types that mirror the on-disk layout; a record only becomes an entity
//! after it has been validated.

use crate::core::gradebook::GradeBook;
use crate::core::models::{Course, Enrollment, Student};
use crate::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default file name of the students document
pub const STUDENTS_FILE: &str = "students.json";

/// Default file name of the courses document
pub const COURSES_FILE: &str = "courses.json";

/// Failures while reading or writing persisted state
#[derive(Debug, Error)]
pub enum StorageError {
    /// The file exists but could not be read or written
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// The file is not valid JSON or does not match the document layout
    #[error("Malformed JSON in {path}: {source}")]
    Json {
        /// File being parsed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// A record parsed but holds values an entity cannot have
    #[error("Invalid record #{index} in {path}: {reason}")]
    InvalidRecord {
        /// File containing the record
        path: PathBuf,
        /// Zero-based position in the document
        index: usize,
        /// What is wrong with it
        reason: String,
    },

    /// Two records share the same key
    #[error("Duplicate key '{key}' in {path}")]
    DuplicateRecord {
        /// File containing the records
        path: PathBuf,
        /// The repeated key
        key: String,
    },
}

/// On-disk layout of a course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CourseRecord {
    /// Course name
    pub name: String,
    /// Trimester label
    pub trimester: String,
    /// Credit hours
    pub course_credits: u32,
}

/// On-disk layout of an enrollment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnrollmentRecord {
    /// Course name
    pub name: String,
    /// Credit hours copied at enrollment time
    pub course_credits: u32,
    /// Grade points, `null` until graded
    pub grade: Option<f64>,
}

/// On-disk layout of a student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StudentRecord {
    /// Email address
    pub email: String,
    /// Display name
    pub names: String,
    /// Enrollment records
    pub courses_registered: Vec<EnrollmentRecord>,
    /// GPA at save time
    #[serde(rename = "GPA")]
    pub gpa: f64,
}

impl From<&Course> for CourseRecord {
    fn from(course: &Course) -> Self {
        Self {
            name: course.name().to_string(),
            trimester: course.trimester().to_string(),
            course_credits: course.credits(),
        }
    }
}

impl From<&Enrollment> for EnrollmentRecord {
    fn from(enrollment: &Enrollment) -> Self {
        Self {
            name: enrollment.course_name.clone(),
            course_credits: enrollment.credits,
            grade: enrollment.grade,
        }
    }
}

impl From<&Student> for StudentRecord {
    fn from(student: &Student) -> Self {
        Self {
            email: student.email().to_string(),
            names: student.names().to_string(),
            courses_registered: student.enrollments().iter().map(Into::into).collect(),
            gpa: student.gpa(),
        }
    }
}

impl TryFrom<CourseRecord> for Course {
    type Error = String;

    fn try_from(record: CourseRecord) -> Result<Self, Self::Error> {
        if record.name.trim().is_empty() {
            return Err("course name is empty".to_string());
        }
        if record.course_credits == 0 {
            return Err(format!("course '{}' has zero credits", record.name.trim()));
        }
        Ok(Self::new(&record.name, &record.trimester, record.course_credits))
    }
}

impl TryFrom<EnrollmentRecord> for Enrollment {
    type Error = String;

    fn try_from(record: EnrollmentRecord) -> Result<Self, Self::Error> {
        let name = Course::normalize_name(&record.name);
        if name.is_empty() {
            return Err("enrollment has an empty course name".to_string());
        }
        if let Some(grade) = record.grade {
            if !(0.0..=4.0).contains(&grade) {
                return Err(format!("grade {grade} for '{name}' is outside 0.0-4.0"));
            }
        }
        let mut enrollment = Self::new(name, record.course_credits);
        enrollment.grade = record.grade;
        Ok(enrollment)
    }
}

impl TryFrom<StudentRecord> for Student {
    type Error = String;

    fn try_from(record: StudentRecord) -> Result<Self, Self::Error> {
        if record.email.trim().is_empty() {
            return Err("student email is empty".to_string());
        }
        if !record.gpa.is_finite() {
            return Err(format!("GPA of '{}' is not a number", record.email.trim()));
        }
        let enrollments = record
            .courses_registered
            .into_iter()
            .map(Enrollment::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::with_enrollments(&record.email, &record.names, enrollments))
    }
}

/// Read a JSON array document; a missing file yields `None`
fn read_document<T>(path: &Path) -> Result<Option<Vec<T>>, StorageError>
where
    T: for<'de> Deserialize<'de>,
{
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("{} not found, starting empty", path.display());
            return Ok(None);
        }
        Err(source) => {
            return Err(StorageError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| StorageError::Json {
            path: path.to_path_buf(),
            source,
        })
}

/// Convert records into entities, rejecting invalid records and repeated keys
fn build_entities<R, E>(
    path: &Path,
    records: Vec<R>,
    key: impl Fn(&E) -> String,
) -> Result<Vec<E>, StorageError>
where
    E: TryFrom<R, Error = String>,
{
    let mut seen = HashSet::new();
    let mut entities = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        let entity = E::try_from(record).map_err(|reason| StorageError::InvalidRecord {
            path: path.to_path_buf(),
            index,
            reason,
        })?;
        let entity_key = key(&entity);
        if !seen.insert(entity_key.clone()) {
            return Err(StorageError::DuplicateRecord {
                path: path.to_path_buf(),
                key: entity_key,
            });
        }
        entities.push(entity);
    }
    Ok(entities)
}

/// Load a grade book from the students and courses documents
///
/// A missing document leaves that collection empty. GPAs are recomputed from
/// the enrollment records rather than trusted from the file.
///
/// # Errors
/// Returns a [`StorageError`] if a file cannot be read, is not valid JSON, or
/// holds an invalid or duplicate record.
pub fn load(students_path: &Path, courses_path: &Path) -> Result<GradeBook, StorageError> {
    let student_records: Vec<StudentRecord> = read_document(students_path)?.unwrap_or_default();
    let course_records: Vec<CourseRecord> = read_document(courses_path)?.unwrap_or_default();

    let students = build_entities(students_path, student_records, |s: &Student| {
        s.email().to_string()
    })?;
    let courses = build_entities(courses_path, course_records, |c: &Course| {
        c.name().to_string()
    })?;

    info!(
        "Loaded {} students from {} and {} courses from {}",
        students.len(),
        students_path.display(),
        courses.len(),
        courses_path.display()
    );
    Ok(GradeBook::from_parts(students, courses))
}

/// Serialize records as a JSON array with 4-space indentation
fn to_pretty_json<T: Serialize>(records: &[T]) -> Result<Vec<u8>, serde_json::Error> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    records.serialize(&mut serializer)?;
    out.push(b'\n');
    Ok(out)
}

fn write_document<T: Serialize>(path: &Path, records: &[T]) -> Result<(), StorageError> {
    let io_err = |source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
    }
    let bytes = to_pretty_json(records).map_err(|source| StorageError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, bytes).map_err(io_err)
}

/// Overwrite both documents with the grade book's current state
///
/// # Errors
/// Returns a [`StorageError`] if either file cannot be written.
pub fn save(
    book: &GradeBook,
    students_path: &Path,
    courses_path: &Path,
) -> Result<(), StorageError> {
    let students: Vec<StudentRecord> = book.students().iter().map(Into::into).collect();
    let courses: Vec<CourseRecord> = book.courses().iter().map(Into::into).collect();

    write_document(students_path, &students)?;
    write_document(courses_path, &courses)?;

    info!(
        "Saved {} students to {} and {} courses to {}",
        students.len(),
        students_path.display(),
        courses.len(),
        courses_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_record_uses_legacy_field_names() {
        let mut student = Student::new("a@x.com", "Alice");
        student.push_enrollment(Enrollment::new("CS101".to_string(), 3));
        let record = StudentRecord::from(&student);

        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["email"], "a@x.com");
        assert_eq!(json["names"], "Alice");
        assert_eq!(json["GPA"], 0.0);
        assert_eq!(json["courses_registered"][0]["name"], "CS101");
        assert_eq!(json["courses_registered"][0]["course_credits"], 3);
        assert!(json["courses_registered"][0]["grade"].is_null());
    }

    #[test]
    fn test_student_record_requires_all_fields() {
        let missing_gpa = r#"{"email": "a@x.com", "names": "A", "courses_registered": []}"#;
        assert!(serde_json::from_str::<StudentRecord>(missing_gpa).is_err());

        let wrong_type = r#"{"name": "CS101", "trimester": "T1", "course_credits": "three"}"#;
        assert!(serde_json::from_str::<CourseRecord>(wrong_type).is_err());
    }

    #[test]
    fn test_course_record_validation() {
        let zero = CourseRecord {
            name: "CS101".to_string(),
            trimester: "T1".to_string(),
            course_credits: 0,
        };
        assert!(Course::try_from(zero).is_err());

        let blank = CourseRecord {
            name: "   ".to_string(),
            trimester: "T1".to_string(),
            course_credits: 3,
        };
        assert!(Course::try_from(blank).is_err());
    }

    #[test]
    fn test_enrollment_grade_out_of_scale_is_rejected() {
        let record = EnrollmentRecord {
            name: "CS101".to_string(),
            course_credits: 3,
            grade: Some(95.0),
        };
        assert!(Enrollment::try_from(record).is_err());
    }

    #[test]
    fn test_student_record_recomputes_gpa() {
        let record = StudentRecord {
            email: " A@X.com ".to_string(),
            names: "Alice".to_string(),
            courses_registered: vec![EnrollmentRecord {
                name: "CS101".to_string(),
                course_credits: 3,
                grade: Some(3.0),
            }],
            gpa: 1.5,
        };

        let student = Student::try_from(record).unwrap();

        assert_eq!(student.email(), "a@x.com");
        assert!((student.gpa() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pretty_json_uses_four_spaces() {
        let records = vec![CourseRecord {
            name: "CS101".to_string(),
            trimester: "T1".to_string(),
            course_credits: 3,
        }];

        let text = String::from_utf8(to_pretty_json(&records).unwrap()).unwrap();

        assert!(text.contains("\n    {\n        \"name\": \"CS101\""));
    }
}
