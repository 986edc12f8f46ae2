//! Required-value check for record fields.

use crate::form::Value;
use crate::foundation::{Validate, ValidationError};

/// Validates that a value carries non-whitespace content.
///
/// `Null`, the empty string and whitespace-only strings fail. Numbers and
/// dates always pass, including `0`.
///
/// # Examples
///
/// ```rust,ignore
/// use bookshelf_validator::validators::NotBlank;
/// use bookshelf_validator::foundation::Validate;
///
/// assert!(NotBlank.validate(&Value::from(0)).is_ok());
/// assert!(NotBlank.validate(&Value::Null).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NotBlank;

impl Validate for NotBlank {
    type Input = Value;

    fn validate(&self, input: &Value) -> Result<(), ValidationError> {
        if input.is_blank() {
            Err(ValidationError::required())
        } else {
            Ok(())
        }
    }
}

/// Creates a [`NotBlank`] validator.
#[must_use]
pub fn not_blank() -> NotBlank {
    NotBlank
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Value::Null)]
    #[case(Value::from(""))]
    #[case(Value::from("   "))]
    #[case(Value::from("\t\n"))]
    fn blank_values_fail(#[case] value: Value) {
        let err = not_blank().validate(&value).unwrap_err();
        assert_eq!(err.code, "required");
    }

    #[rstest]
    #[case(Value::from("A"))]
    #[case(Value::from(" Drama "))]
    #[case(Value::from(0))]
    #[case(Value::from(3))]
    fn present_values_pass(#[case] value: Value) {
        assert!(not_blank().is_valid(&value));
    }
}
