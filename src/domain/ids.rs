//! Domain identifier types with validation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Subject identifier newtype wrapper
///
/// Identifies the person whose data is being exported. Stores compare it
/// against the entity's subject-id field, so it is kept in its textual form:
/// a numeric key `42` and the string `"42"` name the same subject.
///
/// # Examples
///
/// ```
/// use gdpr_export::domain::ids::SubjectId;
/// use std::str::FromStr;
///
/// let subject_id = SubjectId::from_str("42").unwrap();
/// assert_eq!(subject_id.as_str(), "42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectId(String);

impl SubjectId {
    /// Creates a new SubjectId from a string
    ///
    /// Surrounding whitespace is removed.
    ///
    /// # Returns
    ///
    /// Returns `Ok(SubjectId)` if the ID is non-blank, `Err` otherwise
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err("Subject ID cannot be empty".to_string());
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the subject ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SubjectId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for SubjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<u64> for SubjectId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}
