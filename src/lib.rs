//! Grade book library
//! Tracks students, courses, enrollments and grades; computes GPAs, rankings and transcripts.

pub mod core;
pub mod logger;

pub use crate::core::config;
pub use crate::core::get_version;
pub use crate::core::gradebook::{GradeBook, GradeBookError, TranscriptEntry};
pub use crate::core::storage::StorageError;
