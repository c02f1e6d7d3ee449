//! Data models for the grade book

pub mod course;
pub mod enrollment;
pub mod student;

pub use course::Course;
pub use enrollment::Enrollment;
pub use student::Student;
