//! Date-in-future check at day granularity.

use chrono::NaiveDate;

use crate::foundation::{Validate, ValidationError};

/// Validates that a day is not after a reference day.
///
/// Both sides are calendar days, so time of day never matters: the
/// reference day itself passes, the next day fails.
///
/// # Examples
///
/// ```rust,ignore
/// use bookshelf_validator::validators::NotInFuture;
/// use bookshelf_validator::foundation::Validate;
///
/// let check = NotInFuture::new(today);
/// assert!(check.validate(&today).is_ok());
/// assert!(check.validate(&today.succ_opt().unwrap()).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotInFuture {
    today: NaiveDate,
}

impl NotInFuture {
    /// Creates a check against `today`.
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// The reference day.
    pub fn today(&self) -> NaiveDate {
        self.today
    }
}

impl Validate for NotInFuture {
    type Input = NaiveDate;

    fn validate(&self, input: &NaiveDate) -> Result<(), ValidationError> {
        if *input > self.today {
            Err(ValidationError::date_in_future(input, self.today))
        } else {
            Ok(())
        }
    }
}

/// Creates a [`NotInFuture`] validator.
#[must_use]
pub fn not_in_future(today: NaiveDate) -> NotInFuture {
    NotInFuture::new(today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;
    use rstest::rstest;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
    }

    #[rstest]
    #[case(today(), true)]
    #[case(today() - Days::new(1), true)]
    #[case(today() + Days::new(1), false)]
    #[case(NaiveDate::from_ymd_opt(1900, 1, 1).unwrap(), true)]
    fn day_granularity(#[case] day: NaiveDate, #[case] valid: bool) {
        assert_eq!(not_in_future(today()).is_valid(&day), valid);
    }

    #[test]
    fn failure_names_both_days() {
        let tomorrow = today() + Days::new(1);
        let err = not_in_future(today()).validate(&tomorrow).unwrap_err();
        assert_eq!(err.code, "date_not_future");
        assert_eq!(err.param("date"), Some("2025-01-01"));
        assert_eq!(err.param("today"), Some("2024-12-31"));
    }
}
