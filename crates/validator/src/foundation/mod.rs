//! Core validation types and traits
//!
//! This module contains the building blocks the form validator is made of:
//!
//! - **Traits**: [`Validate`]
//! - **Errors**: [`ValidationError`]
//!
//! Built-in checks such as [`NotBlank`](crate::validators::NotBlank) implement
//! [`Validate`] over a single input value. The form layer decides which check
//! applies to which field and how a failure is displayed.

pub mod error;
pub mod traits;

pub use error::ValidationError;
pub use traits::Validate;

#[cfg(test)]
mod core_tests {
    use super::*;

    struct AlwaysValid;

    impl Validate for AlwaysValid {
        type Input = str;

        fn validate(&self, _input: &Self::Input) -> Result<(), ValidationError> {
            Ok(())
        }
    }

    struct AlwaysFails;

    impl Validate for AlwaysFails {
        type Input = str;

        fn validate(&self, _input: &Self::Input) -> Result<(), ValidationError> {
            Err(ValidationError::new("always_fails", "Always fails"))
        }
    }

    #[test]
    fn test_is_valid_follows_validate() {
        assert!(AlwaysValid.is_valid("test"));
        assert!(!AlwaysFails.is_valid("test"));
    }

    #[test]
    fn test_validate_through_trait_object() {
        let validator: &dyn Validate<Input = str> = &AlwaysFails;
        let err = validator.validate("test").unwrap_err();
        assert_eq!(err.code, "always_fails");
    }

    #[test]
    fn test_validate_through_reference() {
        let validator = &&AlwaysValid;
        assert!(validator.validate("test").is_ok());
    }
}
