//! Core trait for the validation system

use crate::foundation::ValidationError;

/// The trait every built-in check implements.
///
/// Generic over the input type so each check states exactly what it looks
/// at: [`NotBlank`](crate::validators::NotBlank) inspects a record
/// [`Value`](crate::form::Value), [`NotInFuture`](crate::validators::NotInFuture)
/// a calendar day.
///
/// # Examples
///
/// ```rust,ignore
/// use bookshelf_validator::foundation::{Validate, ValidationError};
///
/// struct MaxQuantity(u32);
///
/// impl Validate for MaxQuantity {
///     type Input = u32;
///
///     fn validate(&self, input: &u32) -> Result<(), ValidationError> {
///         if *input <= self.0 {
///             Ok(())
///         } else {
///             Err(ValidationError::new("max_quantity", "Too many copies"))
///         }
///     }
/// }
/// ```
pub trait Validate {
    /// The type of input being validated.
    ///
    /// Use `?Sized` to allow validation of unsized types like `str`.
    type Input: ?Sized;

    /// Validates the input value.
    ///
    /// * `Ok(())` if validation succeeds
    /// * `Err(ValidationError)` if validation fails
    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError>;

    /// Returns `true` when the input passes.
    fn is_valid(&self, input: &Self::Input) -> bool {
        self.validate(input).is_ok()
    }
}

impl<V> Validate for &V
where
    V: Validate + ?Sized,
{
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        (**self).validate(input)
    }
}
