//! Macros for building records with minimal boilerplate.
//!
//! # Examples
//!
//! ```rust,ignore
//! use bookshelf_validator::record;
//!
//! let book = record! {
//!     "Name" => "Tech Patterns",
//!     "ReleaseDate" => chrono::NaiveDate::from_ymd_opt(2020, 6, 10).unwrap(),
//!     "AvailableQuantity" => 7,
//! };
//! ```

/// Builds a [`Record`](crate::form::Record) from `key => value` pairs.
///
/// Values go through `Value::from`, so anything with a `From` impl on
/// [`Value`](crate::form::Value) is accepted, including `Option<T>`
/// (`None` becomes `Value::Null`).
#[macro_export]
macro_rules! record {
    () => {
        $crate::form::Record::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut record = $crate::form::Record::new();
        $(
            record.insert($key, $crate::form::Value::from($value));
        )+
        record
    }};
}
