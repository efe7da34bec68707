//! Account identifier being summarized.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Length of a `0x`-prefixed 20-byte hex address.
pub const SUBJECT_LEN: usize = 42;

/// Chain address an asset summary is computed for.
///
/// The inner String is private so validated construction goes through
/// [`Subject::parse`]. Case is preserved exactly as given: cache keys and
/// history rows are case-sensitive on the subject.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Subject(String);

impl Subject {
    /// Validate and wrap an address of the form `0x` + 40 hex digits.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidSubject`] for any other shape.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let valid = raw.len() == SUBJECT_LEN
            && raw.starts_with("0x")
            && raw[2..].bytes().all(|b| b.is_ascii_hexdigit());
        if valid {
            Ok(Self(raw.to_string()))
        } else {
            Err(ValidationError::InvalidSubject(raw.to_string()))
        }
    }

    /// Wrap an identifier that was validated elsewhere.
    pub fn new_unchecked(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the subject as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
