//! Course model

/// A course offered in a given trimester
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    name: String,
    trimester: String,
    credits: u32,
}

impl Course {
    /// Create a new course
    ///
    /// The name and trimester are trimmed; the name is otherwise kept verbatim
    /// and is the course's unique key.
    ///
    /// # Arguments
    /// * `name` - Course name (e.g., "CS101")
    /// * `trimester` - Trimester label (e.g., "T1 2024")
    /// * `credits` - Credit hours
    #[must_use]
    pub fn new(name: &str, trimester: &str, credits: u32) -> Self {
        Self {
            name: Self::normalize_name(name),
            trimester: trimester.trim().to_string(),
            credits,
        }
    }

    /// Normalize a course name into its lookup key
    #[must_use]
    pub fn normalize_name(name: &str) -> String {
        name.trim().to_string()
    }

    /// Course name (unique key)
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Trimester label
    #[must_use]
    pub fn trimester(&self) -> &str {
        &self.trimester
    }

    /// Credit hours
    #[must_use]
    pub const fn credits(&self) -> u32 {
        self.credits
    }
}
