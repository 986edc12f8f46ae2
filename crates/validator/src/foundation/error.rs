//! Error type for validation failures
//!
//! All string fields use `Cow<'static, str>` so static codes and messages
//! cost no allocation.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::borrow::Cow;
use std::fmt;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A structured validation error produced by a single check.
///
/// # Examples
///
/// ```rust,ignore
/// use bookshelf_validator::foundation::ValidationError;
///
/// let error = ValidationError::new("date_not_future", "Date must not be in the future")
///     .with_field("ReleaseDate")
///     .with_param("today", "2024-05-01");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error code for programmatic handling.
    ///
    /// Examples: "required", "date_not_future"
    pub code: Cow<'static, str>,

    /// Human-readable error message in English.
    ///
    /// The form layer replaces this with a localized text when the error
    /// is shown on a control.
    pub message: Cow<'static, str>,

    /// Record key of the field that failed, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<Cow<'static, str>>,

    /// Ordered key-value parameters (typically 0-2).
    #[serde(default, skip_serializing_if = "SmallVec::is_empty")]
    pub params: SmallVec<[(Cow<'static, str>, Cow<'static, str>); 2]>,
}

impl ValidationError {
    /// Creates a new validation error with a code and message.
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            field: None,
            params: SmallVec::new(),
        }
    }

    /// Sets the field this error belongs to.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_field(mut self, field: impl Into<Cow<'static, str>>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Adds a parameter to the error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }

    /// Creates a "required" error.
    pub fn required() -> Self {
        Self::new("required", "This field is required")
    }

    /// Creates a "date_not_future" error.
    pub fn date_in_future(date: impl fmt::Display, today: impl fmt::Display) -> Self {
        Self::new("date_not_future", "Date must not be in the future")
            .with_param("date", date.to_string())
            .with_param("today", today.to_string())
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(field) = &self.field {
            write!(f, "[{}] {}: {}", field, self.code, self.message)?;
        } else {
            write!(f, "{}: {}", self.code, self.message)?;
        }

        if !self.params.is_empty() {
            write!(f, " (params: [")?;
            for (i, (k, v)) in self.params.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{k}={v}")?;
            }
            write!(f, "])")?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_error() {
        let error = ValidationError::new("test", "Test error");
        assert_eq!(error.code, "test");
        assert_eq!(error.message, "Test error");
        assert_eq!(error.to_string(), "test: Test error");
    }

    #[test]
    fn test_error_with_field() {
        let error = ValidationError::required().with_field("Name");
        assert_eq!(error.field.as_deref(), Some("Name"));
        assert_eq!(error.to_string(), "[Name] required: This field is required");
    }

    #[test]
    fn test_date_in_future_params() {
        let error = ValidationError::date_in_future("2024-05-02", "2024-05-01");
        assert_eq!(error.param("date"), Some("2024-05-02"));
        assert_eq!(error.param("today"), Some("2024-05-01"));
        assert_eq!(error.param("missing"), None);
        assert!(error.to_string().ends_with("(params: [date=2024-05-02, today=2024-05-01])"));
    }

    #[test]
    fn test_zero_alloc_static_strings() {
        let error = ValidationError::required();
        assert!(matches!(error.code, Cow::Borrowed(_)));
        assert!(matches!(error.message, Cow::Borrowed(_)));
    }
}
