//! Source of "today" for the date-in-future check.

use chrono::NaiveDate;

/// Supplies the current calendar day.
pub trait Clock {
    /// Returns today's date in the local calendar.
    fn today(&self) -> NaiveDate;
}

impl<T> Clock for &T
where
    T: Clock + ?Sized,
{
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

/// Reads the local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Always reports the same day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Clock configured from an optional override.
///
/// `Some(day)` pins today to `day`; `None` follows the wall clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfiguredClock(pub Option<NaiveDate>);

impl Clock for ConfiguredClock {
    fn today(&self) -> NaiveDate {
        self.0.unwrap_or_else(|| SystemClock.today())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_and_configured_clocks() {
        let day = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(FixedClock(day).today(), day);
        assert_eq!(ConfiguredClock(Some(day)).today(), day);
        assert_eq!((&FixedClock(day)).today(), day);
    }
}
